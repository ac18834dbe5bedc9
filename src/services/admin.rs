//! Services behind the admin screens.
//!
//! Every mutation is followed by a full reload of the affected collection so
//! the caller always renders what the store holds.

use sha2::{Digest, Sha256};
use validator::Validate;

use crate::domain::category::{ProductCategory, sort_categories};
use crate::domain::product::Product;
use crate::domain::sample_pdf::{BrandSamplePdf, plan_swap, sort_by_display_order};
use crate::domain::slide::CatalogSlide;
use crate::domain::types::{CategoryId, ProductId, SamplePdfId, SlideId};
use crate::dto::admin::{ListData, SavedData};
use crate::forms::auth::LoginForm;
use crate::forms::category::{SaveCategoryForm, SaveCategoryPayload};
use crate::forms::product::{SaveProductForm, SaveProductPayload};
use crate::forms::sample_pdf::{ReorderSamplePdfForm, SaveSamplePdfForm, SaveSamplePdfPayload};
use crate::forms::slide::{SaveSlideForm, SaveSlidePayload};
use crate::forms::{DeleteQuery, FormError};
use crate::repository::{
    CategoryReader, CategoryWriter, ProductReader, ProductWriter, SamplePdfReader,
    SamplePdfWriter, SlideReader, SlideWriter,
};
use crate::services::{ServiceError, ServiceResult};

/// Compares fixed-size digests, visiting every byte whatever the input.
fn passwords_match(expected: &str, given: &str) -> bool {
    let expected = Sha256::digest(expected.as_bytes());
    let given = Sha256::digest(given.as_bytes());
    expected
        .iter()
        .zip(given.iter())
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

/// Checks the shared admin password.
pub fn login(admin_password: &str, form: LoginForm) -> ServiceResult<()> {
    form.validate().map_err(FormError::from)?;

    if admin_password.is_empty() || !passwords_match(admin_password, &form.password) {
        log::warn!("Rejected admin login attempt");
        return Err(ServiceError::Unauthorized);
    }
    log::info!("Admin logged in");
    Ok(())
}

// Products

pub async fn list_products<R>(repo: &R) -> ServiceResult<ListData<Product>>
where
    R: ProductReader + ?Sized,
{
    let items = repo.list_products().await.map_err(|err| {
        log::error!("Failed to list products: {err}");
        err
    })?;
    Ok(ListData { items })
}

/// Creates the product when the form has no id, updates it otherwise.
pub async fn save_product<R>(repo: &R, form: SaveProductForm) -> ServiceResult<SavedData<Product>>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let payload = SaveProductPayload::try_from(form)?;

    let saved = match payload.id.clone() {
        Some(id) => repo.update_product(&id, &payload.product).await,
        None => repo.create_product(&payload.into_new()).await,
    }
    .map_err(|err| {
        log::error!("Failed to save product: {err}");
        err
    })?;

    let ListData { items } = list_products(repo).await?;
    Ok(SavedData { saved, items })
}

pub async fn delete_product<R>(
    repo: &R,
    product_id: &str,
    query: DeleteQuery,
) -> ServiceResult<ListData<Product>>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    query.ensure_confirmed()?;
    let id = ProductId::new(product_id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_product(&id).await.map_err(|err| {
        log::error!("Failed to delete product {id}: {err}");
        err
    })?;

    list_products(repo).await
}

// Categories

pub async fn list_categories<R>(repo: &R) -> ServiceResult<ListData<ProductCategory>>
where
    R: CategoryReader + ?Sized,
{
    let mut items = repo.list_categories().await.map_err(|err| {
        log::error!("Failed to list categories: {err}");
        err
    })?;
    sort_categories(&mut items);
    Ok(ListData { items })
}

pub async fn save_category<R>(
    repo: &R,
    form: SaveCategoryForm,
) -> ServiceResult<SavedData<ProductCategory>>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    let payload = SaveCategoryPayload::try_from(form)?;

    let saved = match payload.id.clone() {
        Some(id) => repo.update_category(&id, &payload.category).await,
        None => repo.create_category(&payload.into_new()).await,
    }
    .map_err(|err| {
        log::error!("Failed to save category: {err}");
        err
    })?;

    let ListData { items } = list_categories(repo).await?;
    Ok(SavedData { saved, items })
}

/// Products keep their slug; they fall into the uncategorized group afterwards.
pub async fn delete_category<R>(
    repo: &R,
    category_id: &str,
    query: DeleteQuery,
) -> ServiceResult<ListData<ProductCategory>>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    query.ensure_confirmed()?;
    let id = CategoryId::new(category_id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_category(&id).await.map_err(|err| {
        log::error!("Failed to delete category {id}: {err}");
        err
    })?;

    list_categories(repo).await
}

// Slides

pub async fn list_slides<R>(repo: &R) -> ServiceResult<ListData<CatalogSlide>>
where
    R: SlideReader + ?Sized,
{
    let mut items = repo.list_slides().await.map_err(|err| {
        log::error!("Failed to list catalog slides: {err}");
        err
    })?;
    items.sort_by_key(|slide| slide.page_number);
    Ok(ListData { items })
}

pub async fn save_slide<R>(repo: &R, form: SaveSlideForm) -> ServiceResult<SavedData<CatalogSlide>>
where
    R: SlideReader + SlideWriter + ?Sized,
{
    let payload = SaveSlidePayload::try_from(form)?;

    let saved = match payload.id.clone() {
        Some(id) => repo.update_slide(&id, &payload.slide).await,
        None => repo.create_slide(&payload.into_new()).await,
    }
    .map_err(|err| {
        log::error!("Failed to save catalog slide: {err}");
        err
    })?;

    let ListData { items } = list_slides(repo).await?;
    Ok(SavedData { saved, items })
}

pub async fn delete_slide<R>(
    repo: &R,
    slide_id: &str,
    query: DeleteQuery,
) -> ServiceResult<ListData<CatalogSlide>>
where
    R: SlideReader + SlideWriter + ?Sized,
{
    query.ensure_confirmed()?;
    let id = SlideId::new(slide_id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_slide(&id).await.map_err(|err| {
        log::error!("Failed to delete catalog slide {id}: {err}");
        err
    })?;

    list_slides(repo).await
}

// Sample books

pub async fn list_sample_pdfs<R>(repo: &R) -> ServiceResult<ListData<BrandSamplePdf>>
where
    R: SamplePdfReader + ?Sized,
{
    let mut items = repo.list_sample_pdfs().await.map_err(|err| {
        log::error!("Failed to list sample books: {err}");
        err
    })?;
    sort_by_display_order(&mut items);
    Ok(ListData { items })
}

pub async fn save_sample_pdf<R>(
    repo: &R,
    form: SaveSamplePdfForm,
) -> ServiceResult<SavedData<BrandSamplePdf>>
where
    R: SamplePdfReader + SamplePdfWriter + ?Sized,
{
    let payload = SaveSamplePdfPayload::try_from(form)?;

    let saved = match payload.id.clone() {
        Some(id) => repo.update_sample_pdf(&id, &payload.pdf).await,
        None => repo.create_sample_pdf(&payload.into_new()).await,
    }
    .map_err(|err| {
        log::error!("Failed to save sample book: {err}");
        err
    })?;

    let ListData { items } = list_sample_pdfs(repo).await?;
    Ok(SavedData { saved, items })
}

pub async fn delete_sample_pdf<R>(
    repo: &R,
    pdf_id: &str,
    query: DeleteQuery,
) -> ServiceResult<ListData<BrandSamplePdf>>
where
    R: SamplePdfReader + SamplePdfWriter + ?Sized,
{
    query.ensure_confirmed()?;
    let id = SamplePdfId::new(pdf_id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_sample_pdf(&id).await.map_err(|err| {
        log::error!("Failed to delete sample book {id}: {err}");
        err
    })?;

    list_sample_pdfs(repo).await
}

/// Swaps the position of a sample book with its neighbour.
///
/// Both writes are issued together. Moving past either end, or swapping with a
/// neighbour holding the same position, writes nothing.
pub async fn reorder_sample_pdf<R>(
    repo: &R,
    form: ReorderSamplePdfForm,
) -> ServiceResult<ListData<BrandSamplePdf>>
where
    R: SamplePdfReader + SamplePdfWriter + ?Sized,
{
    let id = form.sample_id()?;
    let ListData { items } = list_sample_pdfs(repo).await?;

    if !items.iter().any(|pdf| pdf.id == id) {
        return Err(ServiceError::NotFound);
    }

    let Some((moved, other)) = plan_swap(&items, &id, form.direction) else {
        return Ok(ListData { items });
    };
    if moved.display_order == other.display_order {
        return Ok(ListData { items });
    }

    tokio::try_join!(repo.set_display_order(&moved), repo.set_display_order(&other)).map_err(
        |err| {
            log::error!("Failed to reorder sample book {id}: {err}");
            err
        },
    )?;

    list_sample_pdfs(repo).await
}

#[cfg(feature = "server")]
pub use upload::upload_image;

#[cfg(feature = "server")]
mod upload {
    use crate::domain::types::ResourceUrl;
    use crate::dto::admin::UploadedImageData;
    use crate::forms::upload::UploadImageForm;
    use crate::services::ServiceResult;

    /// Inlines an uploaded image so the editor can preview it before saving.
    pub fn upload_image(form: UploadImageForm) -> ServiceResult<UploadedImageData> {
        let url = ResourceUrl::try_from(form)?;
        Ok(UploadedImageData {
            url: url.into_inner(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_checks_the_password() {
        let form = |password: &str| LoginForm {
            password: password.to_string(),
        };
        assert!(login("secret", form("secret")).is_ok());
        assert!(matches!(
            login("secret", form("wrong")),
            Err(ServiceError::Unauthorized)
        ));
        assert!(matches!(
            login("", form("")),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn password_comparison_ignores_prefixes_and_lengths() {
        assert!(passwords_match("floor-admin", "floor-admin"));
        assert!(!passwords_match("floor-admin", "floor-admin "));
        assert!(!passwords_match("floor-admin", "floor"));
        assert!(!passwords_match("floor-admin", ""));
    }
}
