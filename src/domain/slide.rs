//! Catalog slideshow: working-set selection and navigation state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ResourceUrl, SlideId, SlideTitle};

/// Number of slides the viewer is locked to.
pub const DECK_SIZE: usize = 14;
/// Minimum horizontal drag/swipe distance, in pixels, that turns a page.
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CatalogSlide {
    pub id: SlideId,
    /// One-based display position.
    pub page_number: u32,
    pub page_title: SlideTitle,
    pub page_content_summary: Option<String>,
    pub slide_image: Option<ResourceUrl>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug)]
pub struct NewCatalogSlide {
    pub id: SlideId,
    pub page_number: u32,
    pub page_title: SlideTitle,
    pub page_content_summary: Option<String>,
    pub slide_image: Option<ResourceUrl>,
}

#[derive(Clone, Debug)]
pub struct UpdateCatalogSlide {
    pub page_number: u32,
    pub page_title: SlideTitle,
    pub page_content_summary: Option<String>,
    pub slide_image: Option<ResourceUrl>,
}

impl From<NewCatalogSlide> for UpdateCatalogSlide {
    fn from(value: NewCatalogSlide) -> Self {
        Self {
            page_number: value.page_number,
            page_title: value.page_title,
            page_content_summary: value.page_content_summary,
            slide_image: value.slide_image,
        }
    }
}

/// Picks the slides the viewer shows.
///
/// The most recently created `DECK_SIZE` slides form the working set (the last
/// uploaded batch), which is then ordered by `page_number`. Both sorts are
/// stable; slides without a creation time sort as oldest.
pub fn select_deck(slides: &[CatalogSlide]) -> Vec<CatalogSlide> {
    let mut recent = slides.to_vec();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(DECK_SIZE);
    recent.sort_by_key(|slide| slide.page_number);
    recent
}

/// Page-turn direction.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Navigation {
    Next,
    Prev,
}

/// Keys the viewer listens to while mounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationKey {
    ArrowLeft,
    ArrowRight,
    Other,
}

impl From<&str> for NavigationKey {
    fn from(key: &str) -> Self {
        match key {
            "ArrowLeft" => NavigationKey::ArrowLeft,
            "ArrowRight" => NavigationKey::ArrowRight,
            _ => NavigationKey::Other,
        }
    }
}

/// Ordered slides and the index currently on screen.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SlideDeck {
    slides: Vec<CatalogSlide>,
    current_index: usize,
}

impl SlideDeck {
    /// Builds the deck from every stored slide, applying [`select_deck`].
    pub fn from_slides(slides: &[CatalogSlide]) -> Self {
        Self {
            slides: select_deck(slides),
            current_index: 0,
        }
    }

    pub fn slides(&self) -> &[CatalogSlide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Option<&CatalogSlide> {
        self.slides.get(self.current_index)
    }

    fn last_index(&self) -> usize {
        self.slides.len().saturating_sub(1)
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.last_index())
    }

    /// Jumps to `index`, clamped into range.
    pub fn go_to(&mut self, index: usize) -> usize {
        self.current_index = self.clamp(index);
        self.current_index
    }

    /// Advances one slide; stays put on the last one.
    pub fn next(&mut self) -> usize {
        if self.current_index < self.last_index() {
            self.current_index = self.clamp(self.current_index + 1);
        }
        self.current_index
    }

    /// Steps back one slide; stays put on the first one.
    pub fn prev(&mut self) -> usize {
        if self.current_index > 0 {
            self.current_index = self.clamp(self.current_index - 1);
        }
        self.current_index
    }

    pub fn navigate(&mut self, direction: Navigation) -> usize {
        match direction {
            Navigation::Next => self.next(),
            Navigation::Prev => self.prev(),
        }
    }

    pub fn handle_key(&mut self, key: NavigationKey) -> usize {
        match key {
            NavigationKey::ArrowLeft => self.prev(),
            NavigationKey::ArrowRight => self.next(),
            NavigationKey::Other => self.current_index,
        }
    }
}

/// Tracks one mouse drag or touch swipe.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SwipeTracker {
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mouse-down / touch-start.
    pub fn start(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    pub fn is_dragging(&self) -> bool {
        self.start_x.is_some()
    }

    /// Mouse-up / touch-end. Returns the page turn, if the gesture crossed the threshold.
    pub fn finish(&mut self, x: f64) -> Option<Navigation> {
        let start = self.start_x.take()?;
        let delta = start - x;
        if delta > SWIPE_THRESHOLD_PX {
            Some(Navigation::Next)
        } else if delta < -SWIPE_THRESHOLD_PX {
            Some(Navigation::Prev)
        } else {
            None
        }
    }

    /// Mouse leaving the viewer abandons the drag.
    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn slide(page: u32, created_offset: i64) -> CatalogSlide {
        CatalogSlide {
            id: SlideId::new(format!("s{page}")).unwrap(),
            page_number: page,
            page_title: SlideTitle::new(format!("Page {page}")).unwrap(),
            page_content_summary: None,
            slide_image: None,
            created_at: Some(
                Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(created_offset),
            ),
        }
    }

    fn deck_of(count: u32) -> SlideDeck {
        let slides: Vec<_> = (1..=count).map(|p| slide(p, i64::from(p))).collect();
        SlideDeck::from_slides(&slides)
    }

    #[test]
    fn deck_uses_latest_created_then_page_order() {
        // pages 1..=20, page 1 created most recently, page 20 the earliest
        let slides: Vec<_> = (1..=20).map(|p| slide(p, 100 - i64::from(p))).collect();

        let deck = select_deck(&slides);
        let pages: Vec<u32> = deck.iter().map(|s| s.page_number).collect();

        assert_eq!(pages, (1..=14).collect::<Vec<_>>());

        // now the later pages are the newest upload
        let slides: Vec<_> = (1..=20).map(|p| slide(p, i64::from(p))).collect();
        let pages: Vec<u32> = select_deck(&slides).iter().map(|s| s.page_number).collect();

        assert_eq!(pages, (7..=20).collect::<Vec<_>>());
    }

    #[test]
    fn deck_with_fewer_slides_keeps_all() {
        let slides = vec![slide(3, 1), slide(1, 2), slide(2, 3)];
        let pages: Vec<u32> = select_deck(&slides).iter().map(|s| s.page_number).collect();
        assert_eq!(pages, vec![1, 2, 3]);
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut deck = deck_of(3);
        assert_eq!(deck.prev(), 0);
        assert_eq!(deck.next(), 1);
        assert_eq!(deck.next(), 2);
        assert_eq!(deck.next(), 2);
        assert_eq!(deck.go_to(99), 2);
        assert_eq!(deck.go_to(0), 0);
    }

    #[test]
    fn empty_deck_stays_at_zero() {
        let mut deck = SlideDeck::from_slides(&[]);
        assert!(deck.is_empty());
        assert_eq!(deck.next(), 0);
        assert_eq!(deck.prev(), 0);
        assert!(deck.current().is_none());
    }

    #[test]
    fn arrow_keys_navigate() {
        let mut deck = deck_of(5);
        assert_eq!(deck.handle_key(NavigationKey::from("ArrowRight")), 1);
        assert_eq!(deck.handle_key(NavigationKey::from("Enter")), 1);
        assert_eq!(deck.handle_key(NavigationKey::from("ArrowLeft")), 0);
    }

    #[test]
    fn swipe_below_threshold_is_ignored() {
        let mut tracker = SwipeTracker::new();
        tracker.start(200.0);
        assert_eq!(tracker.finish(160.0), None);

        tracker.start(200.0);
        assert_eq!(tracker.finish(120.0), Some(Navigation::Next));

        tracker.start(100.0);
        assert_eq!(tracker.finish(180.0), Some(Navigation::Prev));
    }

    #[test]
    fn finishing_without_start_does_nothing() {
        let mut tracker = SwipeTracker::new();
        assert_eq!(tracker.finish(0.0), None);
        tracker.start(10.0);
        tracker.cancel();
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.finish(500.0), None);
    }

    #[test]
    fn deck_turns_pages_from_swipes() {
        let mut deck = deck_of(4);
        let mut tracker = SwipeTracker::new();
        tracker.start(300.0);
        if let Some(direction) = tracker.finish(100.0) {
            deck.navigate(direction);
        }
        assert_eq!(deck.current_index(), 1);
    }
}
