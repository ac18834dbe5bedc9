use serde::{Deserialize, Serialize};

use crate::domain::sample_pdf::{
    BrandSamplePdf as DomainSamplePdf, NewBrandSamplePdf as DomainNewSamplePdf,
    UpdateBrandSamplePdf as DomainUpdateSamplePdf,
};
use crate::domain::types::{BrandName, ResourceUrl, SamplePdfId, TypeConstraintError, non_blank};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Stored document for [`crate::domain::sample_pdf::BrandSamplePdf`].
pub struct BrandSamplePdf {
    #[serde(rename = "_id")]
    pub id: String,
    pub brand_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub thumbnail_image: Option<String>,
    pub pdf_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBrandSamplePdf<'a> {
    #[serde(rename = "_id")]
    pub id: &'a str,
    pub brand_name: &'a str,
    pub category: Option<&'a str>,
    pub thumbnail_image: Option<&'a str>,
    pub pdf_url: &'a str,
    pub description: Option<&'a str>,
    pub is_active: bool,
    pub display_order: i32,
}

/// Reorder touches nothing but the position.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDisplayOrder<'a> {
    #[serde(rename = "_id")]
    pub id: &'a str,
    pub display_order: i32,
}

impl TryFrom<BrandSamplePdf> for DomainSamplePdf {
    type Error = TypeConstraintError;

    fn try_from(doc: BrandSamplePdf) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SamplePdfId::new(doc.id)?,
            brand_name: BrandName::new(doc.brand_name)?,
            category: non_blank(doc.category),
            thumbnail_image: non_blank(doc.thumbnail_image)
                .and_then(|url| ResourceUrl::new(url).ok()),
            pdf_url: ResourceUrl::new(doc.pdf_url)?,
            description: non_blank(doc.description),
            is_active: doc.is_active,
            display_order: doc.display_order,
        })
    }
}

impl From<&DomainNewSamplePdf> for BrandSamplePdf {
    fn from(pdf: &DomainNewSamplePdf) -> Self {
        Self {
            id: pdf.id.as_str().to_string(),
            brand_name: pdf.brand_name.as_str().to_string(),
            category: pdf.category.clone(),
            thumbnail_image: pdf.thumbnail_image.as_ref().map(|u| u.as_str().to_string()),
            pdf_url: pdf.pdf_url.as_str().to_string(),
            description: pdf.description.clone(),
            is_active: pdf.is_active,
            display_order: pdf.display_order,
        }
    }
}

impl<'a> UpdateBrandSamplePdf<'a> {
    pub fn new(id: &'a SamplePdfId, updates: &'a DomainUpdateSamplePdf) -> Self {
        Self {
            id: id.as_str(),
            brand_name: updates.brand_name.as_str(),
            category: updates.category.as_deref(),
            thumbnail_image: updates.thumbnail_image.as_ref().map(|u| u.as_str()),
            pdf_url: updates.pdf_url.as_str(),
            description: updates.description.as_deref(),
            is_active: updates.is_active,
            display_order: updates.display_order,
        }
    }
}
