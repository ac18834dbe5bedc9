use async_trait::async_trait;

use crate::domain::sample_pdf::{
    BrandSamplePdf, DisplayOrderChange, NewBrandSamplePdf, UpdateBrandSamplePdf,
};
use crate::domain::types::SamplePdfId;
use crate::models::collections::BRAND_SAMPLE_PDFS;
use crate::models::sample_pdf::{
    BrandSamplePdf as DbSamplePdf, UpdateBrandSamplePdf as DbUpdateSamplePdf, UpdateDisplayOrder,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::store::DocumentStore;
use crate::repository::{SamplePdfReader, SamplePdfWriter, StoreRepository};

#[async_trait]
impl<S: DocumentStore + ?Sized> SamplePdfReader for StoreRepository<S> {
    async fn list_sample_pdfs(&self) -> RepositoryResult<Vec<BrandSamplePdf>> {
        self.load_all::<DbSamplePdf, BrandSamplePdf>(BRAND_SAMPLE_PDFS)
            .await
    }
}

#[async_trait]
impl<S: DocumentStore + ?Sized> SamplePdfWriter for StoreRepository<S> {
    async fn create_sample_pdf(
        &self,
        new_pdf: &NewBrandSamplePdf,
    ) -> RepositoryResult<BrandSamplePdf> {
        let document = DbSamplePdf::from(new_pdf);
        self.insert::<DbSamplePdf, BrandSamplePdf>(BRAND_SAMPLE_PDFS, &document)
            .await
    }

    async fn update_sample_pdf(
        &self,
        id: &SamplePdfId,
        updates: &UpdateBrandSamplePdf,
    ) -> RepositoryResult<BrandSamplePdf> {
        let changes = DbUpdateSamplePdf::new(id, updates);
        self.patch::<_, DbSamplePdf, BrandSamplePdf>(BRAND_SAMPLE_PDFS, &changes)
            .await
    }

    async fn delete_sample_pdf(&self, id: &SamplePdfId) -> RepositoryResult<()> {
        self.remove(BRAND_SAMPLE_PDFS, id.as_str()).await
    }

    async fn set_display_order(&self, change: &DisplayOrderChange) -> RepositoryResult<()> {
        let changes = UpdateDisplayOrder {
            id: change.id.as_str(),
            display_order: change.display_order,
        };
        self.patch_only(BRAND_SAMPLE_PDFS, &changes).await
    }
}
