use crate::domain::slide::SlideDeck;
use crate::dto::slides::SlideDeckData;
use crate::repository::SlideReader;
use crate::services::ServiceResult;

/// Builds the catalog deck from the latest uploaded slides.
pub async fn load_slide_deck<R>(repo: &R) -> ServiceResult<SlideDeckData>
where
    R: SlideReader + ?Sized,
{
    let slides = repo.list_slides().await.map_err(|err| {
        log::error!("Failed to list catalog slides: {err}");
        err
    })?;

    Ok(SlideDeckData::from(&SlideDeck::from_slides(&slides)))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::domain::slide::{CatalogSlide, DECK_SIZE};
    use crate::domain::types::{SlideId, SlideTitle};
    use crate::repository::mock::MockRepository;

    #[tokio::test]
    async fn deck_keeps_latest_batch_in_page_order() {
        let mut repo = MockRepository::new();
        repo.expect_list_slides().returning(|| {
            let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            // An old batch of 14 pages followed by a newer batch of 14.
            Ok((0..(DECK_SIZE as u32 * 2))
                .map(|i| CatalogSlide {
                    id: SlideId::new(format!("s-{i}")).unwrap(),
                    page_number: DECK_SIZE as u32 - (i % DECK_SIZE as u32),
                    page_title: SlideTitle::new(format!("Page {i}")).unwrap(),
                    page_content_summary: None,
                    slide_image: None,
                    created_at: Some(base + Duration::minutes(i64::from(i))),
                })
                .collect())
        });

        let deck = load_slide_deck(&repo).await.unwrap();

        assert_eq!(deck.total, DECK_SIZE);
        assert_eq!(deck.current_index, 0);
        let pages: Vec<u32> = deck.slides.iter().map(|s| s.page_number).collect();
        assert_eq!(pages, (1..=DECK_SIZE as u32).collect::<Vec<_>>());
        assert!(deck.slides.iter().all(|s| {
            let n: u32 = s.id.as_str()[2..].parse().unwrap();
            n >= DECK_SIZE as u32
        }));
    }
}
