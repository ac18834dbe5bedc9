//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::category::{NewProductCategory, ProductCategory, UpdateProductCategory};
use crate::domain::chat::{
    ChatConsultation, ChatMessage, ConsultationStatus, NewChatConsultation, NewChatMessage,
};
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::sample_pdf::{
    BrandSamplePdf, DisplayOrderChange, NewBrandSamplePdf, UpdateBrandSamplePdf,
};
use crate::domain::slide::{CatalogSlide, NewCatalogSlide, UpdateCatalogSlide};
use crate::domain::types::{
    CategoryId, ConsultationId, MessageId, ProductId, SamplePdfId, SessionId, SlideId,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CategoryReader, CategoryWriter, ChatReader, ChatWriter, ProductReader, ProductWriter,
    SamplePdfReader, SamplePdfWriter, SlideReader, SlideWriter,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl ProductReader for Repository {
        async fn list_products(&self) -> RepositoryResult<Vec<Product>>;
        async fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>>;
    }

    #[async_trait]
    impl ProductWriter for Repository {
        async fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        async fn update_product(
            &self,
            id: &ProductId,
            updates: &UpdateProduct,
        ) -> RepositoryResult<Product>;
        async fn delete_product(&self, id: &ProductId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl CategoryReader for Repository {
        async fn list_categories(&self) -> RepositoryResult<Vec<ProductCategory>>;
    }

    #[async_trait]
    impl CategoryWriter for Repository {
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
    impl ChatReader for Repository {
        async fn list_consultations(&self) -> RepositoryResult<Vec<ChatConsultation>>;
        async fn get_consultation_by_session(
            &self,
            session_id: SessionId,
        ) -> RepositoryResult<Option<ChatConsultation>>;
        async fn list_messages(&self) -> RepositoryResult<Vec<ChatMessage>>;
        async fn list_session_messages(
            &self,
            session_id: SessionId,
        ) -> RepositoryResult<Vec<ChatMessage>>;
    }

    #[async_trait]
    impl ChatWriter for Repository {
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
    impl SlideReader for Repository {
        async fn list_slides(&self) -> RepositoryResult<Vec<CatalogSlide>>;
    }

    #[async_trait]
    impl SlideWriter for Repository {
        async fn create_slide(&self, new_slide: &NewCatalogSlide) -> RepositoryResult<CatalogSlide>;
        async fn update_slide(
            &self,
            id: &SlideId,
            updates: &UpdateCatalogSlide,
        ) -> RepositoryResult<CatalogSlide>;
        async fn delete_slide(&self, id: &SlideId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl SamplePdfReader for Repository {
        async fn list_sample_pdfs(&self) -> RepositoryResult<Vec<BrandSamplePdf>>;
    }

    #[async_trait]
    impl SamplePdfWriter for Repository {
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
}
