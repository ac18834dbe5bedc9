pub mod admin;
pub mod catalog;
pub mod chat;
pub mod errors;
pub mod quote;
pub mod slides;

pub use errors::{ServiceError, ServiceResult};
