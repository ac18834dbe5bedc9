use async_trait::async_trait;

use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::types::ProductId;
use crate::models::collections::PRODUCTS;
use crate::models::product::{Product as DbProduct, UpdateProduct as DbUpdateProduct};
use crate::repository::errors::RepositoryResult;
use crate::repository::store::DocumentStore;
use crate::repository::{ProductReader, ProductWriter, StoreRepository};

#[async_trait]
impl<S: DocumentStore + ?Sized> ProductReader for StoreRepository<S> {
    async fn list_products(&self) -> RepositoryResult<Vec<Product>> {
        self.load_all::<DbProduct, Product>(PRODUCTS).await
    }

    async fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>> {
        self.load_one::<DbProduct, Product>(PRODUCTS, id.as_str())
            .await
    }
}

#[async_trait]
impl<S: DocumentStore + ?Sized> ProductWriter for StoreRepository<S> {
    async fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        let document = DbProduct::from(new_product);
        self.insert::<DbProduct, Product>(PRODUCTS, &document).await
    }

    async fn update_product(
        &self,
        id: &ProductId,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product> {
        let changes = DbUpdateProduct::new(id, updates);
        self.patch::<_, DbProduct, Product>(PRODUCTS, &changes)
            .await
    }

    async fn delete_product(&self, id: &ProductId) -> RepositoryResult<()> {
        self.remove(PRODUCTS, id.as_str()).await
    }
}
