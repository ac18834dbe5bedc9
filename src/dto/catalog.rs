//! DTOs for the public catalog pages.

use serde::{Deserialize, Serialize};

use crate::domain::category::{CategoryGroup, ProductCategory};
use crate::domain::product::{Product, ProductFilter};
use crate::domain::sample_pdf::BrandSamplePdf;

/// Query string of the product search page.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductQuery {
    /// Free-text term matched against name, brand and specifications.
    #[serde(default)]
    pub search: Option<String>,
    /// Category slug, or `전체` for all.
    #[serde(default)]
    pub category: Option<String>,
    /// Brand name, or `전체` for all.
    #[serde(default)]
    pub brand: Option<String>,
}

impl From<&ProductQuery> for ProductFilter {
    fn from(query: &ProductQuery) -> Self {
        ProductFilter {
            search: query.search.clone(),
            category: query.category.clone(),
            brand: query.brand.clone(),
        }
    }
}

/// Data required to render the product search page.
#[derive(Debug, Serialize)]
pub struct ProductsPageData {
    pub products: Vec<Product>,
    /// Category facet in display order.
    pub categories: Vec<ProductCategory>,
    /// Distinct brand names, sorted.
    pub brands: Vec<String>,
    pub query: ProductQuery,
}

#[derive(Debug, Serialize)]
pub struct ProductDetailData {
    pub product: Product,
    pub category: Option<ProductCategory>,
    pub formatted_price: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesPageData {
    pub groups: Vec<CategoryGroup>,
}

/// Query string of the sample book page.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SampleBooksQuery {
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SampleBooksPageData {
    pub samples: Vec<BrandSamplePdf>,
    /// Brands of the active sample books, sorted.
    pub brands: Vec<String>,
    /// Categories of the active sample books, sorted.
    pub categories: Vec<String>,
    pub query: SampleBooksQuery,
}
