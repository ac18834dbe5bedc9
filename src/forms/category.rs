use serde::Deserialize;
use validator::Validate;

use crate::domain::category::{NewProductCategory, UpdateProductCategory};
use crate::domain::types::{CategoryId, CategoryName, CategorySlug};
use crate::forms::{FormError, optional_text};

#[derive(Debug, Deserialize, Validate)]
pub struct SaveCategoryForm {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1))]
    pub category_name: String,
    #[validate(length(min = 1))]
    pub category_slug: String,
    #[serde(default)]
    pub category_description: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug)]
pub struct SaveCategoryPayload {
    pub id: Option<CategoryId>,
    pub category: UpdateProductCategory,
}

impl TryFrom<SaveCategoryForm> for SaveCategoryPayload {
    type Error = FormError;

    fn try_from(form: SaveCategoryForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let id = optional_text(form.id)
            .map(CategoryId::new)
            .transpose()
            .map_err(|_| FormError::InvalidId)?;

        Ok(Self {
            id,
            category: UpdateProductCategory {
                category_name: CategoryName::new(form.category_name)
                    .map_err(|_| FormError::InvalidName)?,
                category_slug: CategorySlug::new(form.category_slug)
                    .map_err(|_| FormError::InvalidName)?,
                category_description: optional_text(form.category_description),
                display_order: form.display_order,
            },
        })
    }
}

impl SaveCategoryPayload {
    pub fn into_new(self) -> NewProductCategory {
        NewProductCategory {
            id: self.id.unwrap_or_else(CategoryId::generate),
            category_name: self.category.category_name,
            category_slug: self.category.category_slug,
            category_description: self.category.category_description,
            display_order: self.category.display_order,
        }
    }
}
