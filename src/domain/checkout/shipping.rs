//! Shipping options and their per-destination pricing.

use serde::{Deserialize, Serialize};

use super::amount::{clamp_amount, deserialize_amount, deserialize_lenient_string};

/// Reference of the standard delivery option.
pub const STANDARD_SHIPPING_REFERENCE: &str = "standard-shipping";

/// Reference of the express delivery option.
pub const EXPRESS_SHIPPING_REFERENCE: &str = "express-shipping";

/// Destination country that ships at base price.
pub const DOMESTIC_COUNTRY: &str = "DE";

/// Flat surcharge added to every option for non-domestic destinations.
pub const INTERNATIONAL_SURCHARGE: i64 = 300;

/// A selectable delivery method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
    #[serde(default, deserialize_with = "deserialize_amount")]
    amount: i64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    display_name: String,
    shipping_option_reference: String,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    name: Option<String>,
}

impl ShippingOption {
    /// Creates an option; negative amounts are clamped to zero.
    pub fn new(
        reference: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        amount: i64,
    ) -> Self {
        Self {
            amount: clamp_amount(amount),
            description: description.into(),
            display_name: display_name.into(),
            shipping_option_reference: reference.into(),
            name: None,
        }
    }

    /// Sets the internal name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Price in minor currency units, never negative.
    pub fn amount(&self) -> i64 {
        clamp_amount(self.amount)
    }

    /// Customer-facing description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Customer-facing name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Unique key of the option.
    pub fn reference(&self) -> &str {
        &self.shipping_option_reference
    }

    /// Internal name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn surcharged(&self, country: &str) -> Self {
        Self {
            amount: self.amount().saturating_add(INTERNATIONAL_SURCHARGE),
            description: format!("{} ({})", self.description, country),
            ..self.clone()
        }
    }
}

/// Destination supplied by the payment widget.
///
/// Every field is optional and non-string values are read as absent, so a
/// malformed address never fails to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingAddress {
    #[serde(deserialize_with = "deserialize_lenient_string", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_string", skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_string", skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_string", skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_string", skip_serializing_if = "Option::is_none")]
    pub street_address2: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_string", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_string", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_string", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl ShippingAddress {
    /// Address with only a country set.
    pub fn in_country(country: impl Into<String>) -> Self {
        Self {
            country: Some(country.into()),
            ..Default::default()
        }
    }

    /// Upper-cased country code, or `None` when absent or blank.
    pub fn country_code(&self) -> Option<String> {
        self.country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_uppercase)
    }
}

/// The canonical two-option catalog. Returns fresh values on every call.
pub fn base_shipping_options() -> Vec<ShippingOption> {
    vec![
        ShippingOption::new(
            STANDARD_SHIPPING_REFERENCE,
            "Standard shipping",
            "Delivery within 3-5 business days.",
            499,
        ),
        ShippingOption::new(
            EXPRESS_SHIPPING_REFERENCE,
            "Express shipping",
            "Delivery within 1-2 business days.",
            1299,
        ),
    ]
}

/// Prices the catalog for a destination.
///
/// Non-domestic countries pay [`INTERNATIONAL_SURCHARGE`] on every option and
/// get the country code appended to each description. An absent address or
/// country ships at base price.
pub fn resolve_shipping_options(address: Option<&ShippingAddress>) -> Vec<ShippingOption> {
    let base = base_shipping_options();

    match address.and_then(ShippingAddress::country_code) {
        Some(country) if country != DOMESTIC_COUNTRY => {
            base.iter().map(|option| option.surcharged(&country)).collect()
        }
        _ => base,
    }
}
