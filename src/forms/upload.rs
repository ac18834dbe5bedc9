//! Image uploads for admin previews, inlined as `data:` URLs.

use std::io::Read;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

use crate::domain::types::ResourceUrl;
use crate::forms::FormError;

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(MultipartForm)]
pub struct UploadImageForm {
    #[multipart(limit = "5MB")]
    pub image: TempFile,
}

impl TryFrom<UploadImageForm> for ResourceUrl {
    type Error = FormError;

    fn try_from(mut form: UploadImageForm) -> Result<Self, Self::Error> {
        let mime = form
            .image
            .content_type
            .as_ref()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_default();

        let mut bytes = Vec::with_capacity(form.image.size);
        form.image
            .file
            .as_file_mut()
            .read_to_end(&mut bytes)
            .map_err(|e| FormError::InvalidUpload(format!("cannot read upload: {e}")))?;

        image_data_url(&mime, &bytes)
    }
}

/// Encodes raw image bytes as a `data:<mime>;base64,<payload>` URL.
pub fn image_data_url(mime: &str, bytes: &[u8]) -> Result<ResourceUrl, FormError> {
    if !mime.starts_with("image/") {
        return Err(FormError::InvalidUpload(format!(
            "expected an image, got {mime:?}"
        )));
    }
    if bytes.is_empty() {
        return Err(FormError::InvalidUpload("file is empty".to_string()));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(FormError::InvalidUpload("file is too large".to_string()));
    }

    let url = format!("data:{mime};base64,{}", BASE64.encode(bytes));
    ResourceUrl::new(url).map_err(|_| FormError::InvalidUrl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_png_bytes() {
        let url = image_data_url("image/png", &[0x89, b'P', b'N', b'G']).unwrap();
        assert_eq!(url.as_str(), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn rejects_non_images() {
        assert!(matches!(
            image_data_url("application/pdf", b"%PDF"),
            Err(FormError::InvalidUpload(_))
        ));
        assert!(matches!(
            image_data_url("image/png", &[]),
            Err(FormError::InvalidUpload(_))
        ));
    }
}
