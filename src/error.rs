use std::path::PathBuf;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("File not readable: {0}")]
    FileNotReadable(PathBuf),

    #[error("File is empty: {0}")]
    EmptyFile(PathBuf),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Malformed service response: {0}")]
    MalformedResponse(String),

    #[error("Transport error: {context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: BoxError,
    },

    #[error("Invalid quality value: {0}. Must be between 1 and 100")]
    InvalidQuality(u8),

    #[error("Invalid timeout: {0} seconds. Must be a positive number of seconds")]
    InvalidTimeout(u64),

    #[error("Invalid service endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OptimizerError {
    /// Wraps any transport-layer failure so callers only ever see `Transport`.
    pub fn transport<E>(context: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        OptimizerError::Transport {
            context: context.into(),
            source: source.into(),
        }
    }

    /// True for the local-file precondition failures, which never touch the network.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            OptimizerError::FileNotFound(_)
                | OptimizerError::FileNotReadable(_)
                | OptimizerError::EmptyFile(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, OptimizerError>;
