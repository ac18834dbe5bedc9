use async_trait::async_trait;

use crate::domain::slide::{CatalogSlide, NewCatalogSlide, UpdateCatalogSlide};
use crate::domain::types::SlideId;
use crate::models::collections::CATALOG_SLIDES;
use crate::models::slide::{CatalogSlide as DbSlide, UpdateCatalogSlide as DbUpdateSlide};
use crate::repository::errors::RepositoryResult;
use crate::repository::store::DocumentStore;
use crate::repository::{SlideReader, SlideWriter, StoreRepository};

#[async_trait]
impl<S: DocumentStore + ?Sized> SlideReader for StoreRepository<S> {
    async fn list_slides(&self) -> RepositoryResult<Vec<CatalogSlide>> {
        self.load_all::<DbSlide, CatalogSlide>(CATALOG_SLIDES).await
    }
}

#[async_trait]
impl<S: DocumentStore + ?Sized> SlideWriter for StoreRepository<S> {
    async fn create_slide(&self, new_slide: &NewCatalogSlide) -> RepositoryResult<CatalogSlide> {
        let document = DbSlide::from(new_slide);
        self.insert::<DbSlide, CatalogSlide>(CATALOG_SLIDES, &document)
            .await
    }

    async fn update_slide(
        &self,
        id: &SlideId,
        updates: &UpdateCatalogSlide,
    ) -> RepositoryResult<CatalogSlide> {
        let changes = DbUpdateSlide::new(id, updates);
        self.patch::<_, DbSlide, CatalogSlide>(CATALOG_SLIDES, &changes)
            .await
    }

    async fn delete_slide(&self, id: &SlideId) -> RepositoryResult<()> {
        self.remove(CATALOG_SLIDES, id.as_str()).await
    }
}
