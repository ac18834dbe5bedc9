use serde::Deserialize;
use validator::Validate;

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::domain::types::{BrandName, CategorySlug, ProductId, ProductName, ResourceUrl};
use crate::forms::{FormError, optional_text};

/// Admin product editor. A missing `id` creates, a present one updates.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveProductForm {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1))]
    pub product_name: String,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub specifications: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub product_image: Option<String>,
    #[serde(default)]
    pub material_code: Option<String>,
}

/// Validated product editor contents.
#[derive(Debug)]
pub struct SaveProductPayload {
    pub id: Option<ProductId>,
    pub product: UpdateProduct,
}

impl TryFrom<SaveProductForm> for SaveProductPayload {
    type Error = FormError;

    fn try_from(form: SaveProductForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let id = optional_text(form.id)
            .map(ProductId::new)
            .transpose()
            .map_err(|_| FormError::InvalidId)?;
        let product_name = ProductName::new(form.product_name).map_err(|_| FormError::InvalidName)?;
        let brand_name = optional_text(form.brand_name)
            .map(BrandName::new)
            .transpose()
            .map_err(|_| FormError::InvalidName)?;
        let category = optional_text(form.category)
            .map(CategorySlug::new)
            .transpose()
            .map_err(|_| FormError::InvalidName)?;
        let product_image = optional_text(form.product_image)
            .map(ResourceUrl::new)
            .transpose()
            .map_err(|_| FormError::InvalidUrl)?;

        Ok(Self {
            id,
            product: UpdateProduct {
                product_name,
                brand_name,
                specifications: optional_text(form.specifications),
                price: form.price,
                category,
                product_image,
                material_code: optional_text(form.material_code),
            },
        })
    }
}

impl SaveProductPayload {
    /// Builds the create payload with a fresh client-side id.
    pub fn into_new(self) -> NewProduct {
        let UpdateProduct {
            product_name,
            brand_name,
            specifications,
            price,
            category,
            product_image,
            material_code,
        } = self.product;

        NewProduct {
            id: self.id.unwrap_or_else(ProductId::generate),
            product_name,
            brand_name,
            specifications,
            price,
            category,
            product_image,
            material_code,
        }
    }
}
