//! Request and response types for checkout session endpoints.
//!
//! Request bodies mirror the widget's callback payloads and are parsed
//! leniently: malformed parts read as absent rather than failing the request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::checkout::{coerce_amount, InitiationPayload, ShippingAddress, ShippingOption};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/checkout/sessions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartCheckoutRequest {
    pub product_name: String,
    /// Product price in minor units; non-numeric values read as 0.
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl StartCheckoutRequest {
    pub fn price(&self) -> i64 {
        self.price.as_ref().map(coerce_amount).unwrap_or(0)
    }

    pub fn quantity(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }
}

/// Body of the shipping-address callback.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressChangeRequest {
    #[serde(default)]
    pub shipping_address: Option<Value>,
}

impl ShippingAddressChangeRequest {
    /// The address, or `None` when absent or not an object.
    pub fn address(&self) -> Option<ShippingAddress> {
        self.shipping_address
            .clone()
            .and_then(|value| serde_json::from_value(value).ok())
    }
}

/// Body of the shipping-option callback.
///
/// Accepts either a bare `shippingOptionReference` or the whole option as
/// `shippingOption`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOptionSelectRequest {
    #[serde(default)]
    pub shipping_option_reference: Option<Value>,
    #[serde(default)]
    pub shipping_option: Option<Value>,
}

impl ShippingOptionSelectRequest {
    pub fn reference(&self) -> Option<String> {
        self.shipping_option_reference
            .as_ref()
            .and_then(Value::as_str)
            .or_else(|| {
                self.shipping_option
                    .as_ref()
                    .and_then(|option| option.get("shippingOptionReference"))
                    .and_then(Value::as_str)
            })
            .map(str::to_string)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of a started session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartCheckoutResponse {
    pub session_id: String,
    pub initiate: InitiationPayload,
}

/// Options offered for the new address.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressChangeResponse {
    pub shipping_options: Vec<ShippingOption>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn start_request_defaults() {
        let req: StartCheckoutRequest =
            serde_json::from_value(json!({ "productName": "Omega Aqua Terra" })).unwrap();
        assert_eq!(req.price(), 0);
        assert_eq!(req.quantity(), 1);
    }

    #[test]
    fn start_request_parses_string_price() {
        let req: StartCheckoutRequest =
            serde_json::from_value(json!({ "productName": "Watch", "price": "15900" })).unwrap();
        assert_eq!(req.price(), 15900);

        let req: StartCheckoutRequest =
            serde_json::from_value(json!({ "productName": "Watch", "price": "abc" })).unwrap();
        assert_eq!(req.price(), 0);
    }

    #[test]
    fn address_that_is_not_an_object_is_absent() {
        let req: ShippingAddressChangeRequest =
            serde_json::from_value(json!({ "shippingAddress": 42 })).unwrap();
        assert!(req.address().is_none());

        let req: ShippingAddressChangeRequest =
            serde_json::from_value(json!({ "shippingAddress": { "country": "SE" } })).unwrap();
        assert_eq!(req.address().unwrap().country_code().as_deref(), Some("SE"));
    }

    #[test]
    fn option_reference_from_either_shape() {
        let req: ShippingOptionSelectRequest =
            serde_json::from_value(json!({ "shippingOptionReference": "express-shipping" })).unwrap();
        assert_eq!(req.reference().as_deref(), Some("express-shipping"));

        let req: ShippingOptionSelectRequest = serde_json::from_value(json!({
            "shippingOption": { "shippingOptionReference": "standard-shipping", "amount": 499 }
        }))
        .unwrap();
        assert_eq!(req.reference().as_deref(), Some("standard-shipping"));

        let req: ShippingOptionSelectRequest =
            serde_json::from_value(json!({ "shippingOptionReference": 7 })).unwrap();
        assert_eq!(req.reference(), None);
    }
}
