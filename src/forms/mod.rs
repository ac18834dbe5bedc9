//! Request payloads accepted by the storefront and admin routes.

use serde::Deserialize;
use thiserror::Error;
use validator::ValidationErrors;

pub mod auth;
pub mod category;
pub mod chat;
pub mod product;
pub mod quote;
pub mod sample_pdf;
pub mod slide;
#[cfg(feature = "server")]
pub mod upload;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid id")]
    InvalidId,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid url")]
    InvalidUrl,

    #[error("invalid consultation status")]
    InvalidStatus,

    #[error("deletion must be confirmed")]
    MissingConfirmation,

    #[error("invalid upload: {0}")]
    InvalidUpload(String),
}

impl FormError {
    /// Names of the offending fields, for highlighting next to inputs.
    pub fn fields(&self) -> Vec<String> {
        match self {
            FormError::Validation(errors) => {
                let mut fields: Vec<String> = errors
                    .field_errors()
                    .keys()
                    .map(|field| field.to_string())
                    .collect();
                fields.sort();
                fields
            }
            FormError::InvalidUrl => vec!["url".to_string()],
            FormError::InvalidStatus => vec!["status".to_string()],
            FormError::MissingConfirmation => vec!["confirm".to_string()],
            FormError::InvalidUpload(_) => vec!["image".to_string()],
            FormError::InvalidId | FormError::InvalidName => Vec::new(),
        }
    }
}

/// Query string of every admin delete request.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

impl DeleteQuery {
    /// Deletion only proceeds once the admin has confirmed it.
    pub fn ensure_confirmed(&self) -> Result<(), FormError> {
        if self.confirm {
            Ok(())
        } else {
            Err(FormError::MissingConfirmation)
        }
    }
}

/// Trims optional text inputs, treating blank values as absent.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
