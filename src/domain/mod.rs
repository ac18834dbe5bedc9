//! Domain entities and client-side state machines of the storefront.

pub mod category;
pub mod chat;
pub mod product;
pub mod quote;
pub mod sample_pdf;
pub mod session;
pub mod slide;
pub mod types;
