use async_trait::async_trait;

use crate::domain::category::{NewProductCategory, ProductCategory, UpdateProductCategory};
use crate::domain::types::CategoryId;
use crate::models::category::{
    ProductCategory as DbCategory, UpdateProductCategory as DbUpdateCategory,
};
use crate::models::collections::PRODUCT_CATEGORIES;
use crate::repository::errors::RepositoryResult;
use crate::repository::store::DocumentStore;
use crate::repository::{CategoryReader, CategoryWriter, StoreRepository};

#[async_trait]
impl<S: DocumentStore + ?Sized> CategoryReader for StoreRepository<S> {
    async fn list_categories(&self) -> RepositoryResult<Vec<ProductCategory>> {
        self.load_all::<DbCategory, ProductCategory>(PRODUCT_CATEGORIES)
            .await
    }
}

#[async_trait]
impl<S: DocumentStore + ?Sized> CategoryWriter for StoreRepository<S> {
    async fn create_category(
        &self,
        new_category: &NewProductCategory,
    ) -> RepositoryResult<ProductCategory> {
        let document = DbCategory::from(new_category);
        self.insert::<DbCategory, ProductCategory>(PRODUCT_CATEGORIES, &document)
            .await
    }

    async fn update_category(
        &self,
        id: &CategoryId,
        updates: &UpdateProductCategory,
    ) -> RepositoryResult<ProductCategory> {
        let changes = DbUpdateCategory::new(id, updates);
        self.patch::<_, DbCategory, ProductCategory>(PRODUCT_CATEGORIES, &changes)
            .await
    }

    async fn delete_category(&self, id: &CategoryId) -> RepositoryResult<()> {
        self.remove(PRODUCT_CATEGORIES, id.as_str()).await
    }
}
