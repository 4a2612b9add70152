use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Not authorized by the remote API")]
    Unauthorized,

    #[error("Remote API rejected the request ({code}): {message}")]
    Rejected { code: u16, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Maps a non-success HTTP status to the matching variant.
    pub fn from_status(code: u16, message: impl Into<String>) -> Self {
        match code {
            401 | 403 => RepositoryError::Unauthorized,
            404 => RepositoryError::NotFound,
            _ => RepositoryError::Rejected {
                code,
                message: message.into(),
            },
        }
    }
}

#[cfg(feature = "server")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return RepositoryError::from_status(status.as_u16(), err.to_string());
        }
        if err.is_connect() || err.is_timeout() {
            RepositoryError::ConnectionError(format!("Connection error: {err}"))
        } else if err.is_decode() {
            RepositoryError::DecodeError(err.to_string())
        } else {
            RepositoryError::Unexpected(format!("Unexpected transport error: {err}"))
        }
    }
}
