#[derive(Debug, thiserror::Error)]
pub enum DatakickError {
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Image must have one of the following extensions: {allowed:?} (got {path})")]
    InvalidImageFormat {
        path: String,
        allowed: &'static [&'static str],
    },

    #[error("Image must be <= {limit} bytes in size (got {size})")]
    ImageTooLarge { size: u64, limit: u64 },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DatakickError {
    /// The HTTP status code, if the service answered with a non-2xx status.
    pub fn status(&self) -> Option<u16> {
        match self {
            DatakickError::Status { status, .. } => Some(*status),
            DatakickError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DatakickError>;
