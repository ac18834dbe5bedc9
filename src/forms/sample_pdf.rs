use serde::Deserialize;
use validator::Validate;

use crate::domain::sample_pdf::{MoveDirection, NewBrandSamplePdf, UpdateBrandSamplePdf};
use crate::domain::types::{BrandName, ResourceUrl, SamplePdfId};
use crate::forms::{FormError, optional_text};

#[derive(Debug, Deserialize, Validate)]
pub struct SaveSamplePdfForm {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1))]
    pub brand_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub thumbnail_image: Option<String>,
    #[validate(length(min = 1))]
    pub pdf_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug)]
pub struct SaveSamplePdfPayload {
    pub id: Option<SamplePdfId>,
    pub pdf: UpdateBrandSamplePdf,
}

impl TryFrom<SaveSamplePdfForm> for SaveSamplePdfPayload {
    type Error = FormError;

    fn try_from(form: SaveSamplePdfForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let id = optional_text(form.id)
            .map(SamplePdfId::new)
            .transpose()
            .map_err(|_| FormError::InvalidId)?;
        let thumbnail_image = optional_text(form.thumbnail_image)
            .map(ResourceUrl::new)
            .transpose()
            .map_err(|_| FormError::InvalidUrl)?;

        Ok(Self {
            id,
            pdf: UpdateBrandSamplePdf {
                brand_name: BrandName::new(form.brand_name).map_err(|_| FormError::InvalidName)?,
                category: optional_text(form.category),
                thumbnail_image,
                pdf_url: ResourceUrl::new(form.pdf_url).map_err(|_| FormError::InvalidUrl)?,
                description: optional_text(form.description),
                is_active: form.is_active,
                display_order: form.display_order,
            },
        })
    }
}

impl SaveSamplePdfPayload {
    pub fn into_new(self) -> NewBrandSamplePdf {
        NewBrandSamplePdf {
            id: self.id.unwrap_or_else(SamplePdfId::generate),
            brand_name: self.pdf.brand_name,
            category: self.pdf.category,
            thumbnail_image: self.pdf.thumbnail_image,
            pdf_url: self.pdf.pdf_url,
            description: self.pdf.description,
            is_active: self.pdf.is_active,
            display_order: self.pdf.display_order,
        }
    }
}

/// Moves one sample book a position up or down the list.
#[derive(Debug, Deserialize)]
pub struct ReorderSamplePdfForm {
    pub id: String,
    pub direction: MoveDirection,
}

impl ReorderSamplePdfForm {
    pub fn sample_id(&self) -> Result<SamplePdfId, FormError> {
        SamplePdfId::new(self.id.as_str()).map_err(|_| FormError::InvalidId)
    }
}
