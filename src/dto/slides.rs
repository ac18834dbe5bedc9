use serde::Serialize;

use crate::domain::slide::{CatalogSlide, SlideDeck};

/// Catalog slides in presentation order, starting at the first page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SlideDeckData {
    pub slides: Vec<CatalogSlide>,
    pub current_index: usize,
    pub total: usize,
}

impl From<&SlideDeck> for SlideDeckData {
    fn from(deck: &SlideDeck) -> Self {
        Self {
            slides: deck.slides().to_vec(),
            current_index: deck.current_index(),
            total: deck.len(),
        }
    }
}
