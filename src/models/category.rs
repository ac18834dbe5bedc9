use serde::{Deserialize, Serialize};

use crate::domain::category::{
    NewProductCategory as DomainNewCategory, ProductCategory as DomainCategory,
    UpdateProductCategory as DomainUpdateCategory,
};
use crate::domain::types::{CategoryId, CategoryName, CategorySlug, TypeConstraintError, non_blank};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Stored document for [`crate::domain::category::ProductCategory`].
pub struct ProductCategory {
    #[serde(rename = "_id")]
    pub id: String,
    pub category_name: String,
    pub category_slug: String,
    #[serde(default)]
    pub category_description: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductCategory<'a> {
    #[serde(rename = "_id")]
    pub id: &'a str,
    pub category_name: &'a str,
    pub category_slug: &'a str,
    pub category_description: Option<&'a str>,
    pub display_order: i32,
}

impl TryFrom<ProductCategory> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(doc: ProductCategory) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CategoryId::new(doc.id)?,
            category_name: CategoryName::new(doc.category_name)?,
            category_slug: CategorySlug::new(doc.category_slug)?,
            category_description: non_blank(doc.category_description),
            display_order: doc.display_order,
        })
    }
}

impl From<&DomainNewCategory> for ProductCategory {
    fn from(category: &DomainNewCategory) -> Self {
        Self {
            id: category.id.as_str().to_string(),
            category_name: category.category_name.as_str().to_string(),
            category_slug: category.category_slug.as_str().to_string(),
            category_description: category.category_description.clone(),
            display_order: category.display_order,
        }
    }
}

impl<'a> UpdateProductCategory<'a> {
    pub fn new(id: &'a CategoryId, updates: &'a DomainUpdateCategory) -> Self {
        Self {
            id: id.as_str(),
            category_name: updates.category_name.as_str(),
            category_slug: updates.category_slug.as_str(),
            category_description: updates.category_description.as_deref(),
            display_order: updates.display_order,
        }
    }
}
