use thiserror::Error;

use crate::domain::quote::QuoteError;
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("form error: {0}")]
    Form(#[from] FormError),

    #[error("invalid value: {0}")]
    TypeConstraint(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("quote step is incomplete")]
    QuoteValidation(Vec<QuoteError>),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Field names to highlight, when the error is tied to inputs.
    pub fn fields(&self) -> Vec<String> {
        match self {
            ServiceError::Form(err) => err.fields(),
            ServiceError::QuoteValidation(errors) => {
                let mut fields: Vec<String> =
                    errors.iter().map(|e| e.field().to_string()).collect();
                fields.dedup();
                fields
            }
            _ => Vec::new(),
        }
    }
}
