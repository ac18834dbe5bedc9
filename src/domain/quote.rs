//! Multi-step quote request wizard.
//!
//! The wizard walks a visitor through three steps (material selection, area
//! input, customer details) and ends in a terminal submitted state. Each forward
//! transition is gated by the validation of the current step; going back is
//! always allowed and clears the recorded errors. The whole state is plain data
//! so it can be kept in the visitor's session between requests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::product::Product;
use crate::domain::types::{BrandName, PhoneNumber, ProductId, ProductName, TypeConstraintError};
use crate::formatting::format_phone_number;

/// Route the confirmation screen sends the visitor to.
pub const REDIRECT_TARGET: &str = "/";
/// Delay before the confirmation screen redirects home.
pub const REDIRECT_DELAY_SECS: u64 = 3;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStep {
    #[default]
    MaterialSelection,
    AreaInput,
    CustomerInfo,
    Submitted,
}

impl QuoteStep {
    /// One-based step number shown to the visitor; `4` once submitted.
    pub fn number(self) -> u8 {
        match self {
            QuoteStep::MaterialSelection => 1,
            QuoteStep::AreaInput => 2,
            QuoteStep::CustomerInfo => 3,
            QuoteStep::Submitted => 4,
        }
    }

    fn following(self) -> Self {
        match self {
            QuoteStep::MaterialSelection => QuoteStep::AreaInput,
            QuoteStep::AreaInput => QuoteStep::CustomerInfo,
            QuoteStep::CustomerInfo | QuoteStep::Submitted => QuoteStep::Submitted,
        }
    }

    fn preceding(self) -> Self {
        match self {
            QuoteStep::MaterialSelection | QuoteStep::AreaInput => QuoteStep::MaterialSelection,
            QuoteStep::CustomerInfo => QuoteStep::AreaInput,
            QuoteStep::Submitted => QuoteStep::Submitted,
        }
    }
}

/// Field-level validation failures blocking a step transition.
#[derive(Clone, Copy, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuoteError {
    #[error("select at least one product")]
    EmptySelection,
    #[error("enter the floor area")]
    EmptyArea,
    #[error("area must be a number greater than zero")]
    InvalidArea,
    #[error("enter the installation address")]
    MissingAddress,
    #[error("enter your name")]
    MissingName,
    #[error("enter your phone number")]
    MissingPhone,
    #[error("phone number must look like 010-0000-0000")]
    InvalidPhoneFormat,
}

impl QuoteError {
    /// Form field the error is displayed next to.
    pub fn field(self) -> &'static str {
        match self {
            QuoteError::EmptySelection => "products",
            QuoteError::EmptyArea | QuoteError::InvalidArea => "area",
            QuoteError::MissingAddress => "address",
            QuoteError::MissingName => "name",
            QuoteError::MissingPhone | QuoteError::InvalidPhoneFormat => "phone",
        }
    }
}

/// Snapshot of the product fields the wizard needs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct QuotedProduct {
    pub id: ProductId,
    pub product_name: ProductName,
    pub brand_name: Option<BrandName>,
    pub price: Option<f64>,
}

impl From<&Product> for QuotedProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            product_name: product.product_name.clone(),
            brand_name: product.brand_name.clone(),
            price: product.price,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct QuoteItem {
    pub product: QuotedProduct,
    /// Always at least one.
    pub quantity: u32,
}

/// Customer details captured on the last step.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerDetails {
    pub address: String,
    pub name: String,
    pub phone: String,
    pub has_elevator: bool,
    pub has_freight_elevator: bool,
    pub notes: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct QuoteFormState {
    pub items: Vec<QuoteItem>,
    /// Raw area input in square metres; parsed on demand.
    pub area: String,
    pub customer: CustomerDetails,
}

impl QuoteFormState {
    /// Area as a positive finite number, if the input parses to one.
    pub fn parsed_area(&self) -> Option<f64> {
        self.area
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|area| area.is_finite() && *area > 0.0)
    }
}

/// Outcome of a successful submission.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct QuoteConfirmation {
    pub total_price: f64,
    pub redirect_to: &'static str,
    pub redirect_after_secs: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct QuoteWizard {
    pub step: QuoteStep,
    pub form: QuoteFormState,
    pub errors: Vec<QuoteError>,
}

impl QuoteWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a wizard with `product` already selected.
    pub fn seeded(product: &Product) -> Self {
        let mut wizard = Self::new();
        wizard.add_product(product);
        wizard
    }

    pub fn is_submitted(&self) -> bool {
        self.step == QuoteStep::Submitted
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.form.items.iter().any(|item| &item.product.id == id)
    }

    /// Appends `product` unless it is already selected. Returns whether it was added.
    pub fn add_product(&mut self, product: &Product) -> bool {
        if self.contains(&product.id) {
            return false;
        }
        let quantity = self.default_quantity();
        self.form.items.push(QuoteItem {
            product: QuotedProduct::from(product),
            quantity,
        });
        true
    }

    /// Drops the entry for `id`. Returns whether something was removed.
    pub fn remove_product(&mut self, id: &ProductId) -> bool {
        let before = self.form.items.len();
        self.form.items.retain(|item| &item.product.id != id);
        before != self.form.items.len()
    }

    /// Adds the product when absent, removes it otherwise.
    pub fn toggle_product(&mut self, product: &Product) {
        if !self.remove_product(&product.id) {
            self.add_product(product);
        }
    }

    /// Manual per-line quantity; stays until the next area change. Clamped to one.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) -> bool {
        match self.form.items.iter_mut().find(|item| &item.product.id == id) {
            Some(item) => {
                item.quantity = quantity.max(1);
                true
            }
            None => false,
        }
    }

    /// Records the area input and resynchronises every quantity to `ceil(area)`.
    ///
    /// Previously set manual quantities are overwritten.
    pub fn set_area(&mut self, area: impl Into<String>) {
        self.form.area = area.into().trim().to_string();
        if self.form.items.is_empty() {
            return;
        }
        if let Some(area) = self.form.parsed_area() {
            let quantity = ceil_quantity(area);
            for item in &mut self.form.items {
                item.quantity = quantity;
            }
        }
    }

    /// Stores customer details, formatting the phone input as typed.
    pub fn set_customer(&mut self, mut details: CustomerDetails) {
        details.phone = format_phone_number(&details.phone);
        self.form.customer = details;
    }

    /// Errors preventing the wizard from leaving `step`.
    pub fn validate_step(&self, step: QuoteStep) -> Vec<QuoteError> {
        let mut errors = Vec::new();
        match step {
            QuoteStep::MaterialSelection => {
                if self.form.items.is_empty() {
                    errors.push(QuoteError::EmptySelection);
                }
            }
            QuoteStep::AreaInput => {
                if self.form.area.trim().is_empty() {
                    errors.push(QuoteError::EmptyArea);
                } else if self.form.parsed_area().is_none() {
                    errors.push(QuoteError::InvalidArea);
                }
            }
            QuoteStep::CustomerInfo => {
                let customer = &self.form.customer;
                if customer.address.trim().is_empty() {
                    errors.push(QuoteError::MissingAddress);
                }
                if customer.name.trim().is_empty() {
                    errors.push(QuoteError::MissingName);
                }
                match PhoneNumber::new(customer.phone.as_str()) {
                    Ok(_) => {}
                    Err(TypeConstraintError::EmptyString) => errors.push(QuoteError::MissingPhone),
                    Err(_) => errors.push(QuoteError::InvalidPhoneFormat),
                }
            }
            QuoteStep::Submitted => {}
        }
        errors
    }

    /// Moves forward one step when the current one validates.
    ///
    /// Leaving the customer step is the final submission.
    pub fn next(&mut self) -> Result<QuoteStep, Vec<QuoteError>> {
        let errors = self.validate_step(self.step);
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(errors);
        }
        self.errors.clear();
        self.step = self.step.following();
        Ok(self.step)
    }

    /// Moves back one step unconditionally, clearing errors. Terminal once submitted.
    pub fn back(&mut self) -> QuoteStep {
        self.errors.clear();
        self.step = self.step.preceding();
        self.step
    }

    /// `Σ price × quantity × area` over the selection.
    ///
    /// Quantity already tracks `ceil(area)`, so area is counted twice. This is
    /// the pricing rule currently in force and is kept as is.
    pub fn total_price(&self) -> f64 {
        let area = self.area_or_zero();
        self.form
            .items
            .iter()
            .map(|item| line_total(item, area))
            .sum()
    }

    /// Area for price arithmetic; anything unparsable counts as zero.
    pub fn area_or_zero(&self) -> f64 {
        self.form
            .area
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|area| area.is_finite())
            .unwrap_or(0.0)
    }

    pub fn confirmation(&self) -> QuoteConfirmation {
        QuoteConfirmation {
            total_price: self.total_price(),
            redirect_to: REDIRECT_TARGET,
            redirect_after_secs: REDIRECT_DELAY_SECS,
        }
    }

    fn default_quantity(&self) -> u32 {
        self.form.parsed_area().map(ceil_quantity).unwrap_or(1)
    }
}

/// Price of a single selection line for the given area.
pub fn line_total(item: &QuoteItem, area: f64) -> f64 {
    item.product.price.unwrap_or(0.0) * f64::from(item.quantity) * area
}

fn ceil_quantity(area: f64) -> u32 {
    let ceiled = area.ceil();
    if ceiled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        (ceiled as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: Option<f64>) -> Product {
        Product {
            id: ProductId::new(id).unwrap(),
            product_name: ProductName::new(format!("Floor {id}")).unwrap(),
            brand_name: None,
            specifications: None,
            price,
            category: None,
            product_image: None,
            material_code: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn customer(phone: &str) -> CustomerDetails {
        CustomerDetails {
            address: "Seoul, Gangnam-gu 1".to_string(),
            name: "Kim".to_string(),
            phone: phone.to_string(),
            ..CustomerDetails::default()
        }
    }

    fn wizard_at_customer_step() -> QuoteWizard {
        let mut wizard = QuoteWizard::seeded(&product("p1", Some(1000.0)));
        wizard.next().unwrap();
        wizard.set_area("10");
        wizard.next().unwrap();
        wizard
    }

    #[test]
    fn step_one_requires_a_product() {
        let mut wizard = QuoteWizard::new();
        assert_eq!(wizard.next(), Err(vec![QuoteError::EmptySelection]));
        assert_eq!(wizard.step, QuoteStep::MaterialSelection);
        assert_eq!(wizard.errors, vec![QuoteError::EmptySelection]);
    }

    #[test]
    fn step_two_distinguishes_empty_and_invalid_area() {
        let mut wizard = QuoteWizard::seeded(&product("p1", None));
        wizard.next().unwrap();

        assert_eq!(wizard.next(), Err(vec![QuoteError::EmptyArea]));
        wizard.set_area("0");
        assert_eq!(wizard.next(), Err(vec![QuoteError::InvalidArea]));
        wizard.set_area("-3");
        assert_eq!(wizard.next(), Err(vec![QuoteError::InvalidArea]));
        wizard.set_area("abc");
        assert_eq!(wizard.next(), Err(vec![QuoteError::InvalidArea]));
        wizard.set_area("12.5");
        assert_eq!(wizard.next(), Ok(QuoteStep::CustomerInfo));
    }

    #[test]
    fn step_three_reports_every_missing_field() {
        let mut wizard = wizard_at_customer_step();
        assert_eq!(
            wizard.next(),
            Err(vec![
                QuoteError::MissingAddress,
                QuoteError::MissingName,
                QuoteError::MissingPhone
            ])
        );
    }

    #[test]
    fn step_three_rejects_wrong_phone_grouping() {
        let mut wizard = wizard_at_customer_step();
        wizard.set_customer(customer("010-123-4567"));
        assert_eq!(wizard.next(), Err(vec![QuoteError::InvalidPhoneFormat]));

        wizard.set_customer(customer("010-1234-5678"));
        assert_eq!(wizard.next(), Ok(QuoteStep::Submitted));
        assert!(wizard.is_submitted());
    }

    #[test]
    fn phone_is_formatted_when_set() {
        let mut wizard = wizard_at_customer_step();
        wizard.set_customer(customer("01098765432"));
        assert_eq!(wizard.form.customer.phone, "010-9876-5432");
    }

    #[test]
    fn back_is_unconditional_and_clears_errors() {
        let mut wizard = wizard_at_customer_step();
        wizard.next().unwrap_err();
        assert!(!wizard.errors.is_empty());

        assert_eq!(wizard.back(), QuoteStep::AreaInput);
        assert!(wizard.errors.is_empty());
        assert_eq!(wizard.back(), QuoteStep::MaterialSelection);
        assert_eq!(wizard.back(), QuoteStep::MaterialSelection);
    }

    #[test]
    fn submitted_is_terminal() {
        let mut wizard = wizard_at_customer_step();
        wizard.set_customer(customer("010-1234-5678"));
        wizard.next().unwrap();

        assert_eq!(wizard.back(), QuoteStep::Submitted);
        assert_eq!(wizard.next(), Ok(QuoteStep::Submitted));
    }

    #[test]
    fn selection_has_no_duplicates() {
        let mut wizard = QuoteWizard::new();
        let oak = product("oak", Some(5.0));
        assert!(wizard.add_product(&oak));
        assert!(!wizard.add_product(&oak));
        assert_eq!(wizard.form.items.len(), 1);

        wizard.toggle_product(&oak);
        assert!(wizard.form.items.is_empty());
        wizard.toggle_product(&oak);
        assert_eq!(wizard.form.items.len(), 1);
        assert!(wizard.remove_product(&oak.id));
        assert!(!wizard.remove_product(&oak.id));
    }

    #[test]
    fn area_change_overwrites_manual_quantities() {
        let mut wizard = QuoteWizard::new();
        wizard.add_product(&product("a", Some(1.0)));
        wizard.add_product(&product("b", Some(1.0)));

        wizard.set_area("3.2");
        assert!(wizard.form.items.iter().all(|item| item.quantity == 4));

        let a = ProductId::new("a").unwrap();
        assert!(wizard.set_quantity(&a, 9));
        assert_eq!(wizard.form.items[0].quantity, 9);

        wizard.set_area("5");
        assert!(wizard.form.items.iter().all(|item| item.quantity == 5));
    }

    #[test]
    fn quantity_is_clamped_to_one() {
        let mut wizard = QuoteWizard::seeded(&product("a", None));
        let id = ProductId::new("a").unwrap();
        wizard.set_quantity(&id, 0);
        assert_eq!(wizard.form.items[0].quantity, 1);
        assert!(!wizard.set_quantity(&ProductId::new("missing").unwrap(), 3));
    }

    #[test]
    fn invalid_area_leaves_quantities_alone() {
        let mut wizard = QuoteWizard::new();
        wizard.add_product(&product("a", Some(1.0)));
        wizard.set_area("2");
        wizard.set_area("oops");
        assert_eq!(wizard.form.items[0].quantity, 2);
    }

    #[test]
    fn products_added_after_area_get_ceil_quantity() {
        let mut wizard = QuoteWizard::new();
        wizard.set_area("7.1");
        wizard.add_product(&product("a", Some(1.0)));
        assert_eq!(wizard.form.items[0].quantity, 8);
    }

    #[test]
    fn total_price_multiplies_price_quantity_and_area() {
        let mut wizard = QuoteWizard::new();
        wizard.add_product(&product("a", Some(1000.0)));
        wizard.add_product(&product("b", Some(250.0)));
        wizard.set_area("2.5");

        // quantity = ceil(2.5) = 3 for both lines
        let expected = 1000.0 * 3.0 * 2.5 + 250.0 * 3.0 * 2.5;
        assert_eq!(wizard.total_price(), expected);
        // Guard against the formula being "simplified" to price × quantity or price × area.
        assert_ne!(wizard.total_price(), 1000.0 * 3.0 + 250.0 * 3.0);
        assert_ne!(wizard.total_price(), 1000.0 * 2.5 + 250.0 * 2.5);
    }

    #[test]
    fn total_price_treats_missing_price_and_area_as_zero() {
        let mut wizard = QuoteWizard::new();
        wizard.add_product(&product("a", None));
        wizard.add_product(&product("b", Some(100.0)));
        assert_eq!(wizard.total_price(), 0.0);

        wizard.set_area("4");
        assert_eq!(wizard.total_price(), 100.0 * 4.0 * 4.0);
    }

    #[test]
    fn confirmation_redirects_home() {
        let wizard = wizard_at_customer_step();
        let confirmation = wizard.confirmation();
        assert_eq!(confirmation.redirect_to, "/");
        assert_eq!(confirmation.redirect_after_secs, REDIRECT_DELAY_SECS);
        assert_eq!(confirmation.total_price, 1000.0 * 10.0 * 10.0);
    }

    #[test]
    fn wizard_survives_json_round_trip() {
        let wizard = wizard_at_customer_step();
        let json = serde_json::to_string(&wizard).unwrap();
        let restored: QuoteWizard = serde_json::from_str(&json).unwrap();
        assert_eq!(wizard, restored);
    }

    #[test]
    fn errors_map_to_fields() {
        assert_eq!(QuoteError::InvalidPhoneFormat.field(), "phone");
        assert_eq!(QuoteError::EmptyArea.field(), "area");
        assert_eq!(QuoteStep::CustomerInfo.number(), 3);
    }
}
