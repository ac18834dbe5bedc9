//! Quote wizard operations.
//!
//! Wizards are kept server-side per visitor; these services only read the
//! product catalog and never write to the collection store.

use validator::Validate;

use crate::domain::product::Product;
use crate::domain::quote::{QuoteStep, QuoteWizard};
use crate::domain::types::ProductId;
use crate::dto::quote::QuotePageData;
use crate::forms::FormError;
use crate::forms::quote::{QuoteAreaForm, QuoteCustomerForm, QuoteProductForm, QuoteQuantityForm};
use crate::repository::ProductReader;
use crate::services::{ServiceError, ServiceResult};

async fn fetch_product<R>(repo: &R, id: &ProductId) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(id)
        .await
        .map_err(|err| {
            log::error!("Failed to load product {id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

/// Starts a fresh wizard with the chosen product preselected.
pub async fn start_quote<R>(repo: &R, form: QuoteProductForm) -> ServiceResult<QuoteWizard>
where
    R: ProductReader + ?Sized,
{
    let id = form.product_id()?;
    let product = fetch_product(repo, &id).await?;
    Ok(QuoteWizard::seeded(&product))
}

/// Adds a product to the selection; selecting twice changes nothing.
pub async fn add_quote_product<R>(
    repo: &R,
    wizard: &mut QuoteWizard,
    form: QuoteProductForm,
) -> ServiceResult<QuotePageData>
where
    R: ProductReader + ?Sized,
{
    ensure_editable(wizard)?;
    let id = form.product_id()?;
    if !wizard.contains(&id) {
        let product = fetch_product(repo, &id).await?;
        wizard.add_product(&product);
    }
    Ok(QuotePageData::from(&*wizard))
}

pub fn remove_quote_product(
    wizard: &mut QuoteWizard,
    form: QuoteProductForm,
) -> ServiceResult<QuotePageData> {
    ensure_editable(wizard)?;
    let id = form.product_id()?;
    wizard.remove_product(&id);
    Ok(QuotePageData::from(&*wizard))
}

/// Overrides the quantity of one selected product.
pub fn set_quote_quantity(
    wizard: &mut QuoteWizard,
    form: QuoteQuantityForm,
) -> ServiceResult<QuotePageData> {
    ensure_editable(wizard)?;
    let id = form.product_id()?;
    if !wizard.set_quantity(&id, form.quantity) {
        return Err(ServiceError::NotFound);
    }
    Ok(QuotePageData::from(&*wizard))
}

pub fn set_quote_area(wizard: &mut QuoteWizard, form: QuoteAreaForm) -> ServiceResult<QuotePageData> {
    ensure_editable(wizard)?;
    wizard.set_area(form.area);
    Ok(QuotePageData::from(&*wizard))
}

pub fn set_quote_customer(
    wizard: &mut QuoteWizard,
    form: QuoteCustomerForm,
) -> ServiceResult<QuotePageData> {
    ensure_editable(wizard)?;
    form.validate().map_err(FormError::from)?;
    wizard.set_customer(form.into());
    Ok(QuotePageData::from(&*wizard))
}

/// Advances one step. Validation errors stay on the wizard for redisplay.
pub fn next_step(wizard: &mut QuoteWizard) -> ServiceResult<QuotePageData> {
    if wizard.step == QuoteStep::CustomerInfo {
        return submit_quote(wizard);
    }
    ensure_editable(wizard)?;
    wizard.next().map_err(ServiceError::QuoteValidation)?;
    Ok(QuotePageData::from(&*wizard))
}

pub fn back_step(wizard: &mut QuoteWizard) -> ServiceResult<QuotePageData> {
    wizard.back();
    Ok(QuotePageData::from(&*wizard))
}

/// Final submission from the customer step.
///
/// Repeating it after success returns the same confirmation.
pub fn submit_quote(wizard: &mut QuoteWizard) -> ServiceResult<QuotePageData> {
    match wizard.step {
        QuoteStep::Submitted => {}
        QuoteStep::CustomerInfo => {
            wizard.next().map_err(ServiceError::QuoteValidation)?;
            log::info!(
                "Quote submitted with {} item(s), total {}",
                wizard.form.items.len(),
                wizard.total_price()
            );
        }
        step => {
            return Err(ServiceError::Conflict(format!(
                "quote cannot be submitted from step {}",
                step.number()
            )));
        }
    }
    Ok(QuotePageData::from(&*wizard))
}

fn ensure_editable(wizard: &QuoteWizard) -> ServiceResult<()> {
    if wizard.is_submitted() {
        return Err(ServiceError::Conflict(
            "quote has already been submitted".to_string(),
        ));
    }
    Ok(())
}


#[cfg(all(test, feature = "test-mocks"))]
mod mock_tests {
    use super::*;
    use crate::domain::types::{BrandName, ProductName};
    use crate::repository::mock::MockRepository;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: ProductId::new(id).unwrap(),
            product_name: ProductName::new(format!("Floor {id}")).unwrap(),
            brand_name: Some(BrandName::new("LX").unwrap()),
            specifications: None,
            price: Some(price),
            category: None,
            product_image: None,
            material_code: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn repo() -> MockRepository {
        let mut repo = MockRepository::new();
        repo.expect_get_product_by_id().returning(|id| {
            Ok(match id.as_str() {
                "a" => Some(product("a", 10000.0)),
                "b" => Some(product("b", 20000.0)),
                _ => None,
            })
        });
        repo
    }

    fn select(id: &str) -> QuoteProductForm {
        QuoteProductForm {
            product_id: id.to_string(),
        }
    }

    #[tokio::test]
    async fn unknown_product_cannot_start_a_quote() {
        let repo = repo();
        assert!(matches!(
            start_quote(&repo, select("zz")).await,
            Err(ServiceError::NotFound)
        ));
    }

    #[tokio::test]
    async fn full_wizard_walkthrough() {
        let repo = repo();
        let mut wizard = start_quote(&repo, select("a")).await.unwrap();
        assert_eq!(wizard.form.items.len(), 1);

        add_quote_product(&repo, &mut wizard, select("b")).await.unwrap();
        let page = add_quote_product(&repo, &mut wizard, select("b")).await.unwrap();
        assert_eq!(page.items.len(), 2);

        let page = next_step(&mut wizard).unwrap();
        assert_eq!(page.step, QuoteStep::AreaInput);

        set_quote_area(
            &mut wizard,
            QuoteAreaForm {
                area: "2.5".to_string(),
            },
        )
        .unwrap();
        assert!(wizard.form.items.iter().all(|item| item.quantity == 3));

        // 10000 * 3 * 2.5 + 20000 * 3 * 2.5
        let page = next_step(&mut wizard).unwrap();
        assert_eq!(page.step, QuoteStep::CustomerInfo);
        assert_eq!(page.total_price, 225000.0);
        assert_eq!(page.formatted_total, "225,000원");

        set_quote_customer(
            &mut wizard,
            QuoteCustomerForm {
                address: "Busan".to_string(),
                name: "Lee".to_string(),
                phone: "010-9876-5432".to_string(),
                has_elevator: true,
                ..Default::default()
            },
        )
        .unwrap();

        let page = next_step(&mut wizard).unwrap();
        assert_eq!(page.step, QuoteStep::Submitted);
        let confirmation = page.confirmation.unwrap();
        assert_eq!(confirmation.total_price, 225000.0);
        assert_eq!(confirmation.redirect_to, "/");

        let again = submit_quote(&mut wizard).unwrap();
        assert_eq!(again.step, QuoteStep::Submitted);
        assert!(matches!(
            add_quote_product(&repo, &mut wizard, select("a")).await,
            Err(ServiceError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn manual_quantity_applies_to_selected_products_only() {
        let repo = repo();
        let mut wizard = start_quote(&repo, select("a")).await.unwrap();

        let page = set_quote_quantity(
            &mut wizard,
            QuoteQuantityForm {
                product_id: "a".to_string(),
                quantity: 0,
            },
        )
        .unwrap();
        assert_eq!(page.items[0].quantity, 1);

        assert!(matches!(
            set_quote_quantity(
                &mut wizard,
                QuoteQuantityForm {
                    product_id: "b".to_string(),
                    quantity: 4,
                },
            ),
            Err(ServiceError::NotFound)
        ));
    }
}
