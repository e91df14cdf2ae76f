use async_trait::async_trait;
use dnsprofiler_domain::DomainError;

/// Persistent home of the hourly ranked snapshots.
///
/// Artifacts are addressed by file name only; the store decides where they
/// live. Existence of an artifact is what marks a bucket as produced.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn exists(&self, name: &str) -> Result<bool, DomainError>;

    /// Creates or truncates `name` with `contents`.
    async fn write(&self, name: &str, contents: &str) -> Result<(), DomainError>;
}
