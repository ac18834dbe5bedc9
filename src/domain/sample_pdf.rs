//! Brand sample book PDFs and their manual ordering.

use serde::{Deserialize, Serialize};

use crate::domain::product::facet_matches;
use crate::domain::types::{BrandName, ResourceUrl, SamplePdfId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrandSamplePdf {
    pub id: SamplePdfId,
    pub brand_name: BrandName,
    pub category: Option<String>,
    pub thumbnail_image: Option<ResourceUrl>,
    pub pdf_url: ResourceUrl,
    pub description: Option<String>,
    /// Hidden from the storefront when false.
    pub is_active: bool,
    pub display_order: i32,
}

#[derive(Clone, Debug)]
pub struct NewBrandSamplePdf {
    pub id: SamplePdfId,
    pub brand_name: BrandName,
    pub category: Option<String>,
    pub thumbnail_image: Option<ResourceUrl>,
    pub pdf_url: ResourceUrl,
    pub description: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
}

#[derive(Clone, Debug)]
pub struct UpdateBrandSamplePdf {
    pub brand_name: BrandName,
    pub category: Option<String>,
    pub thumbnail_image: Option<ResourceUrl>,
    pub pdf_url: ResourceUrl,
    pub description: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
}

impl From<NewBrandSamplePdf> for UpdateBrandSamplePdf {
    fn from(value: NewBrandSamplePdf) -> Self {
        Self {
            brand_name: value.brand_name,
            category: value.category,
            thumbnail_image: value.thumbnail_image,
            pdf_url: value.pdf_url,
            description: value.description,
            is_active: value.is_active,
            display_order: value.display_order,
        }
    }
}

/// Direction a PDF is moved in the admin list.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// New `display_order` for one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayOrderChange {
    pub id: SamplePdfId,
    pub display_order: i32,
}

/// Stable sort by `display_order`.
pub fn sort_by_display_order(pdfs: &mut [BrandSamplePdf]) {
    pdfs.sort_by_key(|pdf| pdf.display_order);
}

/// Computes the pairwise swap moving `id` one slot in `direction`.
///
/// Only the moved item and its neighbour change; the rest of the list keeps
/// its numbers. Returns `None` when `id` is unknown or already at the edge.
pub fn plan_swap(
    pdfs: &[BrandSamplePdf],
    id: &SamplePdfId,
    direction: MoveDirection,
) -> Option<(DisplayOrderChange, DisplayOrderChange)> {
    let mut ordered = pdfs.to_vec();
    sort_by_display_order(&mut ordered);

    let position = ordered.iter().position(|pdf| &pdf.id == id)?;
    let neighbour = match direction {
        MoveDirection::Up => position.checked_sub(1)?,
        MoveDirection::Down => {
            let next = position + 1;
            if next >= ordered.len() {
                return None;
            }
            next
        }
    };

    let moved = &ordered[position];
    let other = &ordered[neighbour];
    Some((
        DisplayOrderChange {
            id: moved.id.clone(),
            display_order: other.display_order,
        },
        DisplayOrderChange {
            id: other.id.clone(),
            display_order: moved.display_order,
        },
    ))
}

/// Active PDFs matching the brand and category facets, in display order.
pub fn visible_samples(
    pdfs: &[BrandSamplePdf],
    brand: Option<&str>,
    category: Option<&str>,
) -> Vec<BrandSamplePdf> {
    let mut visible: Vec<BrandSamplePdf> = pdfs
        .iter()
        .filter(|pdf| pdf.is_active)
        .filter(|pdf| facet_matches(brand, Some(pdf.brand_name.as_str())))
        .filter(|pdf| facet_matches(category, pdf.category.as_deref()))
        .cloned()
        .collect();
    sort_by_display_order(&mut visible);
    visible
}
