use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            RepositoryError::ConnectionError(err.to_string())
        } else if err.is_decode() {
            RepositoryError::ValidationError(format!("Malformed response: {err}"))
        } else if let Some(status) = err.status() {
            if status == reqwest::StatusCode::NOT_FOUND {
                RepositoryError::NotFound
            } else {
                RepositoryError::StoreError(format!("Store responded with {status}"))
            }
        } else {
            RepositoryError::Unexpected(format!("Unexpected http error: {err}"))
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::ValidationError(format!("Serialization error: {err}"))
    }
}
