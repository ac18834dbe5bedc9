//! DTOs describing the quote wizard to the client.

use serde::Serialize;

use crate::domain::quote::{
    CustomerDetails, QuoteConfirmation, QuoteError, QuoteStep, QuoteWizard, QuotedProduct,
    line_total,
};
use crate::formatting::format_currency;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl From<QuoteError> for FieldError {
    fn from(error: QuoteError) -> Self {
        Self {
            field: error.field(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuoteLine {
    pub product: QuotedProduct,
    pub quantity: u32,
    pub subtotal: f64,
    pub formatted_subtotal: String,
}

/// Everything the wizard screen shows for the current step.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuotePageData {
    pub step: QuoteStep,
    pub step_number: u8,
    pub items: Vec<QuoteLine>,
    pub area: String,
    pub customer: CustomerDetails,
    pub total_price: f64,
    pub formatted_total: String,
    pub errors: Vec<FieldError>,
    pub confirmation: Option<QuoteConfirmation>,
}

impl From<&QuoteWizard> for QuotePageData {
    fn from(wizard: &QuoteWizard) -> Self {
        let area = wizard.area_or_zero();
        let items = wizard
            .form
            .items
            .iter()
            .map(|item| {
                let subtotal = line_total(item, area);
                QuoteLine {
                    product: item.product.clone(),
                    quantity: item.quantity,
                    subtotal,
                    formatted_subtotal: format_currency(subtotal),
                }
            })
            .collect();
        let total_price = wizard.total_price();

        Self {
            step: wizard.step,
            step_number: wizard.step.number(),
            items,
            area: wizard.form.area.clone(),
            customer: wizard.form.customer.clone(),
            total_price,
            formatted_total: format_currency(total_price),
            errors: wizard.errors.iter().copied().map(FieldError::from).collect(),
            confirmation: wizard.is_submitted().then(|| wizard.confirmation()),
        }
    }
}
