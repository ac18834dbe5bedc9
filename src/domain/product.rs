//! Catalog products and the in-memory facet filter applied to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{BrandName, CategorySlug, ProductId, ProductName, ResourceUrl};

/// Sentinel facet value meaning "no filter" for category and brand.
pub const ALL_FACET: &str = "전체";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub product_name: ProductName,
    pub brand_name: Option<BrandName>,
    /// Free-text size code, e.g. `600x600`.
    pub specifications: Option<String>,
    /// Unit price in whole currency.
    pub price: Option<f64>,
    pub category: Option<CategorySlug>,
    pub product_image: Option<ResourceUrl>,
    pub material_code: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewProduct {
    pub id: ProductId,
    pub product_name: ProductName,
    pub brand_name: Option<BrandName>,
    pub specifications: Option<String>,
    pub price: Option<f64>,
    pub category: Option<CategorySlug>,
    pub product_image: Option<ResourceUrl>,
    pub material_code: Option<String>,
}

/// Mutable product fields; the id is carried separately by the caller.
#[derive(Clone, Debug, Deserialize)]
pub struct UpdateProduct {
    pub product_name: ProductName,
    pub brand_name: Option<BrandName>,
    pub specifications: Option<String>,
    pub price: Option<f64>,
    pub category: Option<CategorySlug>,
    pub product_image: Option<ResourceUrl>,
    pub material_code: Option<String>,
}

impl From<NewProduct> for UpdateProduct {
    fn from(value: NewProduct) -> Self {
        Self {
            product_name: value.product_name,
            brand_name: value.brand_name,
            specifications: value.specifications,
            price: value.price,
            category: value.category,
            product_image: value.product_image,
            material_code: value.material_code,
        }
    }
}

/// Facets applied to a fetched product list.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn category(mut self, slug: impl Into<String>) -> Self {
        self.category = Some(slug.into());
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Lower-cased search term, or `None` when blank.
    fn normalized_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }

    fn matches(&self, product: &Product, term: Option<&str>) -> bool {
        if let Some(term) = term {
            let hit = contains_ci(product.product_name.as_str(), term)
                || product
                    .brand_name
                    .as_ref()
                    .is_some_and(|brand| contains_ci(brand.as_str(), term))
                || product
                    .specifications
                    .as_deref()
                    .is_some_and(|spec| contains_ci(spec, term));
            if !hit {
                return false;
            }
        }

        facet_matches(
            self.category.as_deref(),
            product.category.as_ref().map(|slug| slug.as_str()),
        ) && facet_matches(
            self.brand.as_deref(),
            product.brand_name.as_ref().map(|brand| brand.as_str()),
        )
    }
}

fn contains_ci(haystack: &str, lowered_term: &str) -> bool {
    haystack.to_lowercase().contains(lowered_term)
}

/// Returns `true` when the facet is unset, blank, the sentinel, or an exact match.
pub fn facet_matches(facet: Option<&str>, value: Option<&str>) -> bool {
    match facet.map(str::trim) {
        None | Some("") | Some(ALL_FACET) => true,
        Some(expected) => value == Some(expected),
    }
}

/// Keeps the products matching every facet, preserving input order.
pub fn filter_products(products: &[Product], filter: &ProductFilter) -> Vec<Product> {
    let term = filter.normalized_term();
    products
        .iter()
        .filter(|product| filter.matches(product, term.as_deref()))
        .cloned()
        .collect()
}

/// Distinct brand names present in `products`, sorted.
pub fn brand_facets(products: &[Product]) -> Vec<String> {
    let mut brands: Vec<String> = products
        .iter()
        .filter_map(|product| product.brand_name.as_ref())
        .map(|brand| brand.as_str().to_string())
        .collect();
    brands.sort();
    brands.dedup();
    brands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, brand: Option<&str>, spec: Option<&str>, cat: &str) -> Product {
        Product {
            id: ProductId::new(id).unwrap(),
            product_name: ProductName::new(name).unwrap(),
            brand_name: brand.map(|b| BrandName::new(b).unwrap()),
            specifications: spec.map(str::to_string),
            price: Some(10000.0),
            category: Some(CategorySlug::new(cat).unwrap()),
            product_image: None,
            material_code: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("1", "Oak Laminate", Some("Hansol"), Some("1200x190"), "laminate"),
            product("2", "Stone Tile", Some("Dongwha"), Some("600x600"), "tile"),
            product("3", "Walnut Veneer", Some("Hansol"), Some("900x90"), "wood"),
            product("4", "Grey Deco", None, Some("OAK-600"), "tile"),
        ]
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let result = filter_products(&catalog(), &ProductFilter::new());
        assert_eq!(ids(&result), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn search_matches_any_text_field_case_insensitively() {
        let result = filter_products(&catalog(), &ProductFilter::new().search("oak"));
        assert_eq!(ids(&result), vec!["1", "4"]);

        let result = filter_products(&catalog(), &ProductFilter::new().search("HANSOL"));
        assert_eq!(ids(&result), vec!["1", "3"]);
    }

    #[test]
    fn facets_are_combined_with_and() {
        let filter = ProductFilter::new().category("tile").search("600");
        assert_eq!(ids(&filter_products(&catalog(), &filter)), vec!["2", "4"]);

        let filter = ProductFilter::new().category("tile").brand("Dongwha");
        assert_eq!(ids(&filter_products(&catalog(), &filter)), vec!["2"]);
    }

    #[test]
    fn sentinel_disables_facet() {
        let filter = ProductFilter::new().category(ALL_FACET).brand(ALL_FACET);
        assert_eq!(filter_products(&catalog(), &filter).len(), 4);
    }

    #[test]
    fn brand_facet_excludes_unbranded_products() {
        let filter = ProductFilter::new().brand("Hansol");
        assert_eq!(ids(&filter_products(&catalog(), &filter)), vec!["1", "3"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let filter = ProductFilter::new().search("a");
        let once = filter_products(&catalog(), &filter);
        let twice = filter_products(&once, &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn brand_facets_are_distinct_and_sorted() {
        assert_eq!(brand_facets(&catalog()), vec!["Dongwha", "Hansol"]);
    }
}
