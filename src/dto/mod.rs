//! DTO modules that bridge services with the JSON API.

pub mod admin;
pub mod catalog;
pub mod chat;
pub mod quote;
pub mod slides;
