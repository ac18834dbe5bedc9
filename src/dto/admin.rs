//! DTOs for the admin management screens.

use serde::Serialize;

/// Outcome of a save: the written document plus the reloaded collection.
#[derive(Debug, Serialize)]
pub struct SavedData<T> {
    pub saved: T,
    pub items: Vec<T>,
}

/// Collection reloaded after a delete or reorder.
#[derive(Debug, Serialize)]
pub struct ListData<T> {
    pub items: Vec<T>,
}

/// Preview URL produced from an uploaded image.
#[derive(Debug, Serialize)]
pub struct UploadedImageData {
    pub url: String,
}
