use serde::Deserialize;
use validator::Validate;

use crate::domain::slide::{NewCatalogSlide, UpdateCatalogSlide};
use crate::domain::types::{ResourceUrl, SlideId, SlideTitle};
use crate::forms::{FormError, optional_text};

#[derive(Debug, Deserialize, Validate)]
pub struct SaveSlideForm {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(range(min = 1))]
    pub page_number: u32,
    #[validate(length(min = 1))]
    pub page_title: String,
    #[serde(default)]
    pub page_content_summary: Option<String>,
    #[serde(default)]
    pub slide_image: Option<String>,
}

#[derive(Debug)]
pub struct SaveSlidePayload {
    pub id: Option<SlideId>,
    pub slide: UpdateCatalogSlide,
}

impl TryFrom<SaveSlideForm> for SaveSlidePayload {
    type Error = FormError;

    fn try_from(form: SaveSlideForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let id = optional_text(form.id)
            .map(SlideId::new)
            .transpose()
            .map_err(|_| FormError::InvalidId)?;
        let slide_image = optional_text(form.slide_image)
            .map(ResourceUrl::new)
            .transpose()
            .map_err(|_| FormError::InvalidUrl)?;

        Ok(Self {
            id,
            slide: UpdateCatalogSlide {
                page_number: form.page_number,
                page_title: SlideTitle::new(form.page_title).map_err(|_| FormError::InvalidName)?,
                page_content_summary: optional_text(form.page_content_summary),
                slide_image,
            },
        })
    }
}

impl SaveSlidePayload {
    pub fn into_new(self) -> NewCatalogSlide {
        NewCatalogSlide {
            id: self.id.unwrap_or_else(SlideId::generate),
            page_number: self.slide.page_number,
            page_title: self.slide.page_title,
            page_content_summary: self.slide.page_content_summary,
            slide_image: self.slide.slide_image,
        }
    }
}
