use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No DNS request classification found for request")]
    MissingClassification,

    #[error("Failed to write snapshot artifact {path}: {reason}")]
    ArtifactWriteFailure { path: String, reason: String },

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}
