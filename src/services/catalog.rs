//! Services backing the public catalog: search, detail, categories, sample books.

use crate::domain::category::{group_by_category, sort_categories};
use crate::domain::product::{ProductFilter, brand_facets, filter_products};
use crate::domain::sample_pdf::visible_samples;
use crate::domain::types::ProductId;
use crate::dto::catalog::{
    CategoriesPageData, ProductDetailData, ProductQuery, ProductsPageData, SampleBooksPageData,
    SampleBooksQuery,
};
use crate::formatting::format_currency;
use crate::repository::{CategoryReader, ProductReader, SamplePdfReader};
use crate::services::{ServiceError, ServiceResult};

/// Loads the product list narrowed by the search page facets.
pub async fn load_products_page<R>(repo: &R, query: ProductQuery) -> ServiceResult<ProductsPageData>
where
    R: ProductReader + CategoryReader + ?Sized,
{
    let products = repo.list_products().await.map_err(|err| {
        log::error!("Failed to list products: {err}");
        err
    })?;
    let mut categories = repo.list_categories().await.map_err(|err| {
        log::error!("Failed to list categories: {err}");
        err
    })?;
    sort_categories(&mut categories);

    let filter = ProductFilter::from(&query);

    Ok(ProductsPageData {
        products: filter_products(&products, &filter),
        categories,
        brands: brand_facets(&products),
        query,
    })
}

/// Fetches one product with its category, if the slug resolves.
pub async fn load_product_detail<R>(repo: &R, product_id: &str) -> ServiceResult<ProductDetailData>
where
    R: ProductReader + CategoryReader + ?Sized,
{
    let id = ProductId::new(product_id).map_err(|_| ServiceError::NotFound)?;

    let product = repo
        .get_product_by_id(&id)
        .await
        .map_err(|err| {
            log::error!("Failed to load product {id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)?;

    let category = match &product.category {
        Some(slug) => {
            let categories = repo.list_categories().await.map_err(|err| {
                log::error!("Failed to list categories: {err}");
                err
            })?;
            let found = categories
                .into_iter()
                .find(|category| &category.category_slug == slug);
            if found.is_none() {
                log::warn!("Product {id} refers to unknown category {slug}");
            }
            found
        }
        None => None,
    };

    Ok(ProductDetailData {
        formatted_price: product.price.map(format_currency),
        product,
        category,
    })
}

/// Groups every product under its category, uncategorized last.
pub async fn load_categories_page<R>(repo: &R) -> ServiceResult<CategoriesPageData>
where
    R: ProductReader + CategoryReader + ?Sized,
{
    let categories = repo.list_categories().await.map_err(|err| {
        log::error!("Failed to list categories: {err}");
        err
    })?;
    let products = repo.list_products().await.map_err(|err| {
        log::error!("Failed to list products: {err}");
        err
    })?;

    Ok(CategoriesPageData {
        groups: group_by_category(&categories, &products),
    })
}

/// Active sample books filtered by brand and category.
pub async fn load_sample_books<R>(
    repo: &R,
    query: SampleBooksQuery,
) -> ServiceResult<SampleBooksPageData>
where
    R: SamplePdfReader + ?Sized,
{
    let pdfs = repo.list_sample_pdfs().await.map_err(|err| {
        log::error!("Failed to list sample books: {err}");
        err
    })?;

    let active = visible_samples(&pdfs, None, None);

    let mut brands: Vec<String> = active
        .iter()
        .map(|pdf| pdf.brand_name.as_str().to_string())
        .collect();
    brands.sort();
    brands.dedup();

    let mut categories: Vec<String> = active.iter().filter_map(|pdf| pdf.category.clone()).collect();
    categories.sort();
    categories.dedup();

    Ok(SampleBooksPageData {
        samples: visible_samples(&pdfs, query.brand.as_deref(), query.category.as_deref()),
        brands,
        categories,
        query,
    })
}
