use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::slide::{
    CatalogSlide as DomainSlide, NewCatalogSlide as DomainNewSlide,
    UpdateCatalogSlide as DomainUpdateSlide,
};
use crate::domain::types::{ResourceUrl, SlideId, SlideTitle, TypeConstraintError, non_blank};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Stored document for [`crate::domain::slide::CatalogSlide`].
pub struct CatalogSlide {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_createdDate", default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    pub page_number: u32,
    pub page_title: String,
    #[serde(default)]
    pub page_content_summary: Option<String>,
    #[serde(default)]
    pub slide_image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCatalogSlide<'a> {
    #[serde(rename = "_id")]
    pub id: &'a str,
    pub page_number: u32,
    pub page_title: &'a str,
    pub page_content_summary: Option<&'a str>,
    pub slide_image: Option<&'a str>,
}

impl TryFrom<CatalogSlide> for DomainSlide {
    type Error = TypeConstraintError;

    fn try_from(doc: CatalogSlide) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SlideId::new(doc.id)?,
            page_number: doc.page_number,
            page_title: SlideTitle::new(doc.page_title)?,
            page_content_summary: non_blank(doc.page_content_summary),
            slide_image: non_blank(doc.slide_image).and_then(|url| ResourceUrl::new(url).ok()),
            created_at: doc.created_date,
        })
    }
}

impl From<&DomainNewSlide> for CatalogSlide {
    fn from(slide: &DomainNewSlide) -> Self {
        Self {
            id: slide.id.as_str().to_string(),
            created_date: None,
            page_number: slide.page_number,
            page_title: slide.page_title.as_str().to_string(),
            page_content_summary: slide.page_content_summary.clone(),
            slide_image: slide.slide_image.as_ref().map(|u| u.as_str().to_string()),
        }
    }
}

impl<'a> UpdateCatalogSlide<'a> {
    pub fn new(id: &'a SlideId, updates: &'a DomainUpdateSlide) -> Self {
        Self {
            id: id.as_str(),
            page_number: updates.page_number,
            page_title: updates.page_title.as_str(),
            page_content_summary: updates.page_content_summary.as_deref(),
            slide_image: updates.slide_image.as_ref().map(|u| u.as_str()),
        }
    }
}
