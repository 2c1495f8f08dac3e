use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocgenError {
    #[error("{0}")]
    InvalidPayload(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Rendering error: {message}")]
    RenderError { message: String },
}

/// Coarse classification used to pick the response for a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadInput,
    Configuration,
    Rendering,
}

impl DocgenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DocgenError::InvalidPayload(_) => ErrorKind::BadInput,
            DocgenError::IoError(_)
            | DocgenError::ConfigError { .. }
            | DocgenError::MissingConfigError { .. }
            | DocgenError::InvalidConfigValueError { .. } => ErrorKind::Configuration,
            DocgenError::RenderError { .. } => ErrorKind::Rendering,
        }
    }

    pub(crate) fn render(message: impl Into<String>) -> Self {
        DocgenError::RenderError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DocgenError>;
