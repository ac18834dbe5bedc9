//! Shared fixtures for integration tests backed by the in-memory store.
#![allow(dead_code)]

use std::sync::Arc;

use flooring_storefront::models::collections::{
    BRAND_SAMPLE_PDFS, CATALOG_SLIDES, PRODUCT_CATEGORIES, PRODUCTS,
};
use flooring_storefront::repository::StoreRepository;
use flooring_storefront::repository::store::{DocumentStore, MemoryDocumentStore};
use serde_json::{Value, json};

/// Fresh store plus a repository over it.
pub struct TestStore {
    store: Arc<MemoryDocumentStore>,
}

impl TestStore {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryDocumentStore::new()),
        }
    }

    /// Store seeded with a small flooring catalog.
    pub async fn seeded() -> Self {
        let test_store = Self::new();
        test_store.seed_catalog().await;
        test_store
    }

    pub fn store(&self) -> &MemoryDocumentStore {
        &self.store
    }

    pub fn repo(&self) -> StoreRepository<MemoryDocumentStore> {
        StoreRepository::new(Arc::clone(&self.store))
    }

    /// Repository as the server holds it.
    pub fn dyn_repo(&self) -> StoreRepository {
        let store: Arc<dyn DocumentStore> = self.store.clone();
        StoreRepository::new(store)
    }

    pub async fn insert(&self, collection: &str, document: Value) {
        self.store.create(collection, document).await.unwrap();
    }

    async fn seed_catalog(&self) {
        for category in [
            json!({ "_id": "cat-tile", "categoryName": "Tile", "categorySlug": "tile", "displayOrder": 2 }),
            json!({ "_id": "cat-laminate", "categoryName": "Laminate", "categorySlug": "laminate", "displayOrder": 1 }),
        ] {
            self.insert(PRODUCT_CATEGORIES, category).await;
        }

        for product in [
            json!({
                "_id": "p-oak",
                "productName": "Natural Oak",
                "brandName": "Hansol",
                "specifications": "8mm laminate, AC4",
                "price": 25000,
                "category": "laminate"
            }),
            json!({
                "_id": "p-walnut",
                "productName": "Dark Walnut",
                "brandName": "LX",
                "specifications": "12mm laminate",
                "price": 32000,
                "category": "laminate"
            }),
            json!({
                "_id": "p-grey",
                "productName": "Grey Porcelain",
                "brandName": "LX",
                "price": 41000,
                "category": "tile"
            }),
            json!({
                "_id": "p-mystery",
                "productName": "Sample Board",
                "category": "discontinued"
            }),
        ] {
            self.insert(PRODUCTS, product).await;
        }

        for (id, brand, order, active) in [
            ("pdf-a", "Hansol", 1, true),
            ("pdf-b", "LX", 2, true),
            ("pdf-c", "Dongwha", 3, false),
        ] {
            self.insert(
                BRAND_SAMPLE_PDFS,
                json!({
                    "_id": id,
                    "brandName": brand,
                    "category": "laminate",
                    "pdfUrl": format!("https://cdn.example.com/{id}.pdf"),
                    "isActive": active,
                    "displayOrder": order
                }),
            )
            .await;
        }

        for page in [3, 1, 2] {
            self.insert(
                CATALOG_SLIDES,
                json!({
                    "_id": format!("slide-{page}"),
                    "pageNumber": page,
                    "pageTitle": format!("Page {page}")
                }),
            )
            .await;
        }
    }
}
