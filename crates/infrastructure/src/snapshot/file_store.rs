use async_trait::async_trait;
use dnsprofiler_application::ports::SnapshotStore;
use dnsprofiler_domain::DomainError;
use std::path::{Path, PathBuf};
use tracing::info;

/// Snapshot artifacts as plain text files in one directory.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    directory: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.directory.join(name)
    }

    /// Creates the artifact directory if it is missing.
    pub async fn ensure_directory(&self) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| {
                DomainError::IoError(format!(
                    "cannot create snapshot directory {}: {}",
                    self.directory.display(),
                    e
                ))
            })?;
        info!(directory = %self.directory.display(), "Snapshot directory ready");
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn exists(&self, name: &str) -> Result<bool, DomainError> {
        let path = self.path_of(name);
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| DomainError::IoError(format!("stat {}: {}", path.display(), e)))
    }

    async fn write(&self, name: &str, contents: &str) -> Result<(), DomainError> {
        let path = self.path_of(name);
        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| DomainError::ArtifactWriteFailure {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
    }
}
