use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{
    category::{NewProductCategory, ProductCategory, UpdateProductCategory},
    chat::{ChatConsultation, ChatMessage, ConsultationStatus, NewChatConsultation, NewChatMessage},
    product::{NewProduct, Product, UpdateProduct},
    sample_pdf::{BrandSamplePdf, DisplayOrderChange, NewBrandSamplePdf, UpdateBrandSamplePdf},
    slide::{CatalogSlide, NewCatalogSlide, UpdateCatalogSlide},
    types::{
        CategoryId, ConsultationId, MessageId, ProductId, SamplePdfId, SessionId, SlideId,
        TypeConstraintError,
    },
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::store::{
    DocumentStore, HttpDocumentStore, MEMORY_STORE_URL, MemoryDocumentStore,
};

pub mod category;
pub mod chat;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod product;
pub mod quote_sessions;
pub mod sample_pdf;
pub mod slide;
pub mod store;

/// Repository backed by a [`DocumentStore`].
///
/// Every read fetches the whole collection; filtering and joins happen
/// in the domain layer.
pub struct StoreRepository<S: ?Sized = dyn DocumentStore> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for StoreRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DocumentStore + ?Sized> StoreRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads a collection, skipping documents that fail domain validation.
    async fn load_all<T, D>(&self, collection: &str) -> RepositoryResult<Vec<D>>
    where
        T: DeserializeOwned,
        D: TryFrom<T, Error = TypeConstraintError>,
    {
        let documents = self.store.get_all(collection).await?;
        let mut items = Vec::with_capacity(documents.len());
        for document in documents {
            let id = document
                .get("_id")
                .and_then(|v| v.as_str())
                .unwrap_or("<missing>")
                .to_string();
            match serde_json::from_value::<T>(document)
                .map_err(RepositoryError::from)
                .and_then(|doc| D::try_from(doc).map_err(RepositoryError::from))
            {
                Ok(item) => items.push(item),
                Err(err) => log::warn!("Skipping malformed document {id} in {collection}: {err}"),
            }
        }
        Ok(items)
    }

    async fn load_one<T, D>(&self, collection: &str, id: &str) -> RepositoryResult<Option<D>>
    where
        T: DeserializeOwned,
        D: TryFrom<T, Error = TypeConstraintError>,
    {
        match self.store.get_by_id(collection, id).await? {
            Some(document) => Ok(Some(decode::<T, D>(document)?)),
            None => Ok(None),
        }
    }

    async fn insert<T, D>(&self, collection: &str, document: &T) -> RepositoryResult<D>
    where
        T: Serialize + DeserializeOwned,
        D: TryFrom<T, Error = TypeConstraintError>,
    {
        let stored = self
            .store
            .create(collection, serde_json::to_value(document)?)
            .await?;
        decode::<T, D>(stored)
    }

    async fn patch<P, T, D>(&self, collection: &str, changes: &P) -> RepositoryResult<D>
    where
        P: Serialize + Sync,
        T: DeserializeOwned,
        D: TryFrom<T, Error = TypeConstraintError>,
    {
        let stored = self
            .store
            .update(collection, serde_json::to_value(changes)?)
            .await?;
        decode::<T, D>(stored)
    }

    async fn patch_only<P>(&self, collection: &str, changes: &P) -> RepositoryResult<()>
    where
        P: Serialize + Sync,
    {
        self.store
            .update(collection, serde_json::to_value(changes)?)
            .await?;
        Ok(())
    }

    async fn remove(&self, collection: &str, id: &str) -> RepositoryResult<()> {
        self.store.delete(collection, id).await
    }
}

impl StoreRepository {
    /// Picks the store implementation from the configured url.
    pub fn connect(
        store_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> RepositoryResult<Self> {
        let store: Arc<dyn DocumentStore> = if store_url == MEMORY_STORE_URL {
            log::info!("Using in-memory collection store");
            Arc::new(MemoryDocumentStore::new())
        } else {
            Arc::new(HttpDocumentStore::new(store_url, api_key, timeout)?)
        };
        Ok(Self::new(store))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryDocumentStore::new()))
    }
}

fn decode<T, D>(document: serde_json::Value) -> RepositoryResult<D>
where
    T: DeserializeOwned,
    D: TryFrom<T, Error = TypeConstraintError>,
{
    let doc = serde_json::from_value::<T>(document)?;
    Ok(D::try_from(doc)?)
}

#[async_trait]
pub trait ProductReader: Send + Sync {
    async fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    async fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>>;
}

#[async_trait]
pub trait ProductWriter: Send + Sync {
    async fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    async fn update_product(
        &self,
        id: &ProductId,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    async fn delete_product(&self, id: &ProductId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait CategoryReader: Send + Sync {
    async fn list_categories(&self) -> RepositoryResult<Vec<ProductCategory>>;
}

#[async_trait]
pub trait CategoryWriter: Send + Sync {
    async fn create_category(
        &self,
        new_category: &NewProductCategory,
    ) -> RepositoryResult<ProductCategory>;
    async fn update_category(
        &self,
        id: &CategoryId,
        updates: &UpdateProductCategory,
    ) -> RepositoryResult<ProductCategory>;
    async fn delete_category(&self, id: &CategoryId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait ChatReader: Send + Sync {
    async fn list_consultations(&self) -> RepositoryResult<Vec<ChatConsultation>>;
    async fn get_consultation_by_session(
        &self,
        session_id: SessionId,
    ) -> RepositoryResult<Option<ChatConsultation>>;
    async fn list_messages(&self) -> RepositoryResult<Vec<ChatMessage>>;
    /// Messages of one session ordered by `sent_at`.
    async fn list_session_messages(
        &self,
        session_id: SessionId,
    ) -> RepositoryResult<Vec<ChatMessage>>;
}

#[async_trait]
pub trait ChatWriter: Send + Sync {
    async fn create_consultation(
        &self,
        consultation: &NewChatConsultation,
    ) -> RepositoryResult<ChatConsultation>;
    async fn update_consultation_status(
        &self,
        id: &ConsultationId,
        status: ConsultationStatus,
    ) -> RepositoryResult<ChatConsultation>;
    async fn create_message(&self, message: &NewChatMessage) -> RepositoryResult<ChatMessage>;
    async fn mark_message_read(&self, id: &MessageId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait SlideReader: Send + Sync {
    async fn list_slides(&self) -> RepositoryResult<Vec<CatalogSlide>>;
}

#[async_trait]
pub trait SlideWriter: Send + Sync {
    async fn create_slide(&self, new_slide: &NewCatalogSlide) -> RepositoryResult<CatalogSlide>;
    async fn update_slide(
        &self,
        id: &SlideId,
        updates: &UpdateCatalogSlide,
    ) -> RepositoryResult<CatalogSlide>;
    async fn delete_slide(&self, id: &SlideId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait SamplePdfReader: Send + Sync {
    async fn list_sample_pdfs(&self) -> RepositoryResult<Vec<BrandSamplePdf>>;
}

#[async_trait]
pub trait SamplePdfWriter: Send + Sync {
    async fn create_sample_pdf(
        &self,
        new_pdf: &NewBrandSamplePdf,
    ) -> RepositoryResult<BrandSamplePdf>;
    async fn update_sample_pdf(
        &self,
        id: &SamplePdfId,
        updates: &UpdateBrandSamplePdf,
    ) -> RepositoryResult<BrandSamplePdf>;
    async fn delete_sample_pdf(&self, id: &SamplePdfId) -> RepositoryResult<()>;
    async fn set_display_order(&self, change: &DisplayOrderChange) -> RepositoryResult<()>;
}
