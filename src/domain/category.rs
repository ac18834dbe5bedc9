//! Product categories and category-based grouping of products.

use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::domain::types::{CategoryId, CategoryName, CategorySlug};

/// Label of the trailing group holding products with a missing or unknown slug.
pub const UNCATEGORIZED: &str = "uncategorized";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductCategory {
    pub id: CategoryId,
    pub category_name: CategoryName,
    pub category_slug: CategorySlug,
    pub category_description: Option<String>,
    pub display_order: i32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewProductCategory {
    pub id: CategoryId,
    pub category_name: CategoryName,
    pub category_slug: CategorySlug,
    pub category_description: Option<String>,
    pub display_order: i32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateProductCategory {
    pub category_name: CategoryName,
    pub category_slug: CategorySlug,
    pub category_description: Option<String>,
    pub display_order: i32,
}

impl From<NewProductCategory> for UpdateProductCategory {
    fn from(value: NewProductCategory) -> Self {
        Self {
            category_name: value.category_name,
            category_slug: value.category_slug,
            category_description: value.category_description,
            display_order: value.display_order,
        }
    }
}

/// Products sharing one category slug.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CategoryGroup {
    /// `None` for the uncategorized group.
    pub category: Option<ProductCategory>,
    pub label: String,
    pub products: Vec<Product>,
}

/// Sorts categories by `display_order`, keeping input order for ties.
pub fn sort_categories(categories: &mut [ProductCategory]) {
    categories.sort_by_key(|category| category.display_order);
}

/// Groups products under their category in display order.
///
/// There is no referential integrity between `Product::category` and
/// `ProductCategory::category_slug`; products whose slug is missing or matches
/// no category land in a trailing uncategorized group. Empty groups are kept so
/// every category is listed.
pub fn group_by_category(
    categories: &[ProductCategory],
    products: &[Product],
) -> Vec<CategoryGroup> {
    let mut ordered = categories.to_vec();
    sort_categories(&mut ordered);

    let mut groups: Vec<CategoryGroup> = ordered
        .into_iter()
        .map(|category| CategoryGroup {
            label: category.category_name.as_str().to_string(),
            category: Some(category),
            products: Vec::new(),
        })
        .collect();

    let mut uncategorized = Vec::new();
    for product in products {
        let slot = product.category.as_ref().and_then(|slug| {
            groups.iter_mut().find(|group| {
                group
                    .category
                    .as_ref()
                    .is_some_and(|category| &category.category_slug == slug)
            })
        });
        match slot {
            Some(group) => group.products.push(product.clone()),
            None => uncategorized.push(product.clone()),
        }
    }

    if !uncategorized.is_empty() {
        groups.push(CategoryGroup {
            category: None,
            label: UNCATEGORIZED.to_string(),
            products: uncategorized,
        });
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ProductId, ProductName};

    fn category(slug: &str, order: i32) -> ProductCategory {
        ProductCategory {
            id: CategoryId::new(slug).unwrap(),
            category_name: CategoryName::new(slug.to_uppercase()).unwrap(),
            category_slug: CategorySlug::new(slug).unwrap(),
            category_description: None,
            display_order: order,
        }
    }

    fn product(id: &str, slug: Option<&str>) -> Product {
        Product {
            id: ProductId::new(id).unwrap(),
            product_name: ProductName::new(format!("Product {id}")).unwrap(),
            brand_name: None,
            specifications: None,
            price: None,
            category: slug.map(|s| CategorySlug::new(s).unwrap()),
            product_image: None,
            material_code: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn groups_follow_display_order() {
        let categories = vec![category("wood", 2), category("tile", 1)];
        let products = vec![product("1", Some("wood")), product("2", Some("tile"))];

        let groups = group_by_category(&categories, &products);

        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["TILE", "WOOD"]);
        assert_eq!(groups[0].products[0].id.as_str(), "2");
    }

    #[test]
    fn dangling_slugs_degrade_to_uncategorized() {
        let categories = vec![category("tile", 1)];
        let products = vec![
            product("1", Some("tile")),
            product("2", Some("carpet")),
            product("3", None),
        ];

        let groups = group_by_category(&categories, &products);

        assert_eq!(groups.len(), 2);
        let last = groups.last().unwrap();
        assert!(last.category.is_none());
        assert_eq!(last.label, UNCATEGORIZED);
        assert_eq!(last.products.len(), 2);
    }

    #[test]
    fn no_uncategorized_group_when_everything_matches() {
        let groups = group_by_category(&[category("tile", 1)], &[product("1", Some("tile"))]);
        assert_eq!(groups.len(), 1);
    }
}
