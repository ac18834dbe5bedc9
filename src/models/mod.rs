//! Documents exchanged with the remote collection store, plus configuration.

pub mod category;
pub mod chat;
pub mod config;
pub mod product;
pub mod sample_pdf;
pub mod slide;

/// Collection names as they exist in the remote store.
pub mod collections {
    pub const PRODUCTS: &str = "products";
    pub const PRODUCT_CATEGORIES: &str = "productcategories";
    pub const CHAT_CONSULTATIONS: &str = "chatconsultations";
    pub const CHAT_MESSAGES: &str = "chatmessages";
    pub const CATALOG_SLIDES: &str = "catalogslides";
    pub const BRAND_SAMPLE_PDFS: &str = "brandsamplepdfs";
}
