use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};
use crate::domain::types::{
    BrandName, CategorySlug, ProductId, ProductName, ResourceUrl, TypeConstraintError, non_blank,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Stored document for [`crate::domain::product::Product`].
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_createdDate", default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(rename = "_updatedDate", default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTime<Utc>>,
    pub product_name: String,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub specifications: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub product_image: Option<String>,
    #[serde(default)]
    pub material_code: Option<String>,
}

/// Partial document for updates; every mutable field is sent so cleared values are cleared.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct<'a> {
    #[serde(rename = "_id")]
    pub id: &'a str,
    pub product_name: &'a str,
    pub brand_name: Option<&'a str>,
    pub specifications: Option<&'a str>,
    pub price: Option<f64>,
    pub category: Option<&'a str>,
    pub product_image: Option<&'a str>,
    pub material_code: Option<&'a str>,
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(doc: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(doc.id)?,
            product_name: ProductName::new(doc.product_name)?,
            brand_name: non_blank(doc.brand_name).map(BrandName::new).transpose()?,
            specifications: non_blank(doc.specifications),
            price: doc.price.filter(|price| price.is_finite()),
            category: non_blank(doc.category).map(CategorySlug::new).transpose()?,
            // Broken image links should not hide the whole product.
            product_image: non_blank(doc.product_image).and_then(|url| ResourceUrl::new(url).ok()),
            material_code: non_blank(doc.material_code),
            created_at: doc.created_date,
            updated_at: doc.updated_date,
        })
    }
}

impl From<&DomainNewProduct> for Product {
    fn from(product: &DomainNewProduct) -> Self {
        Self {
            id: product.id.as_str().to_string(),
            created_date: None,
            updated_date: None,
            product_name: product.product_name.as_str().to_string(),
            brand_name: product.brand_name.as_ref().map(|b| b.as_str().to_string()),
            specifications: product.specifications.clone(),
            price: product.price,
            category: product.category.as_ref().map(|c| c.as_str().to_string()),
            product_image: product.product_image.as_ref().map(|u| u.as_str().to_string()),
            material_code: product.material_code.clone(),
        }
    }
}

impl<'a> UpdateProduct<'a> {
    pub fn new(id: &'a ProductId, updates: &'a DomainUpdateProduct) -> Self {
        Self {
            id: id.as_str(),
            product_name: updates.product_name.as_str(),
            brand_name: updates.brand_name.as_ref().map(|b| b.as_str()),
            specifications: updates.specifications.as_deref(),
            price: updates.price,
            category: updates.category.as_ref().map(|c| c.as_str()),
            product_image: updates.product_image.as_ref().map(|u| u.as_str()),
            material_code: updates.material_code.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_store_document() {
        let doc: Product = serde_json::from_value(json!({
            "_id": "p-1",
            "_createdDate": "2024-03-01T10:00:00Z",
            "productName": "Oak Laminate",
            "brandName": " ",
            "price": 32000,
            "category": "laminate",
            "productImage": "not-a-url"
        }))
        .unwrap();

        let product = DomainProduct::try_from(doc).unwrap();

        assert_eq!(product.id.as_str(), "p-1");
        assert!(product.brand_name.is_none());
        assert_eq!(product.price, Some(32000.0));
        assert_eq!(product.category.unwrap().as_str(), "laminate");
        assert!(product.product_image.is_none());
        assert!(product.created_at.is_some());
    }

    #[test]
    fn rejects_document_without_name() {
        let doc: Product =
            serde_json::from_value(json!({ "_id": "p-1", "productName": "" })).unwrap();
        assert_eq!(
            DomainProduct::try_from(doc),
            Err(TypeConstraintError::EmptyString)
        );
    }

    #[test]
    fn update_payload_carries_id_and_nulls() {
        let id = ProductId::new("p-9").unwrap();
        let updates = DomainUpdateProduct {
            product_name: ProductName::new("Tile").unwrap(),
            brand_name: None,
            specifications: None,
            price: Some(1.5),
            category: None,
            product_image: None,
            material_code: None,
        };

        let value = serde_json::to_value(UpdateProduct::new(&id, &updates)).unwrap();

        assert_eq!(value["_id"], "p-9");
        assert_eq!(value["productName"], "Tile");
        assert!(value["brandName"].is_null());
        assert!(value.as_object().unwrap().contains_key("brandName"));
    }
}
