use serde::Deserialize;
use validator::Validate;

use crate::domain::quote::CustomerDetails;
use crate::domain::types::ProductId;
use crate::forms::FormError;

/// Product reference carried by start/select requests.
#[derive(Debug, Deserialize)]
pub struct QuoteProductForm {
    pub product_id: String,
}

impl QuoteProductForm {
    pub fn product_id(&self) -> Result<ProductId, FormError> {
        ProductId::new(self.product_id.as_str()).map_err(|_| FormError::InvalidId)
    }
}

#[derive(Debug, Deserialize)]
pub struct QuoteQuantityForm {
    pub product_id: String,
    pub quantity: u32,
}

impl QuoteQuantityForm {
    pub fn product_id(&self) -> Result<ProductId, FormError> {
        ProductId::new(self.product_id.as_str()).map_err(|_| FormError::InvalidId)
    }
}

/// Raw area text; the wizard decides whether it parses.
#[derive(Debug, Deserialize)]
pub struct QuoteAreaForm {
    #[serde(default)]
    pub area: String,
}

/// Customer step inputs.
///
/// Only lengths are checked on input; required fields are checked when the
/// step is left.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct QuoteCustomerForm {
    #[validate(length(max = 200))]
    pub address: String,
    #[validate(length(max = 50))]
    pub name: String,
    #[validate(length(max = 20))]
    pub phone: String,
    pub has_elevator: bool,
    pub has_freight_elevator: bool,
    #[validate(length(max = 1000))]
    pub notes: String,
}

impl From<QuoteCustomerForm> for CustomerDetails {
    fn from(form: QuoteCustomerForm) -> Self {
        Self {
            address: form.address.trim().to_string(),
            name: form.name.trim().to_string(),
            phone: form.phone,
            has_elevator: form.has_elevator,
            has_freight_elevator: form.has_freight_elevator,
            notes: form.notes.trim().to_string(),
        }
    }
}
