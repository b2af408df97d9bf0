//! Priced order lines.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

use super::amount::clamp_amount;
use super::shipping::ShippingOption;

/// Name used for a shipping line when the option carries no usable name.
pub const DEFAULT_SHIPPING_LINE_NAME: &str = "Shipping";

/// One priced entry (product or shipping) contributing to an order total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Display name.
    pub name: String,
    /// Number of units, at least 1.
    pub quantity: u32,
    /// Total for all units in minor currency units.
    pub total_amount: i64,
}

impl LineItem {
    /// Creates a line item.
    ///
    /// # Errors
    ///
    /// `EmptyField` for a blank name, `BelowMinimum` for a zero quantity.
    pub fn new(
        name: impl Into<String>,
        quantity: u32,
        total_amount: i64,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if quantity < 1 {
            return Err(ValidationError::below_minimum("quantity", 1, i64::from(quantity)));
        }

        Ok(Self {
            name,
            quantity,
            total_amount: clamp_amount(total_amount),
        })
    }

    /// Synthesizes the shipping line for a selected option.
    ///
    /// Name falls back from the display name to the internal name to `"Shipping"`.
    pub fn shipping(option: &ShippingOption) -> Self {
        let name = [Some(option.display_name()), option.name()]
            .into_iter()
            .flatten()
            .find(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_SHIPPING_LINE_NAME)
            .to_string();

        Self {
            name,
            quantity: 1,
            total_amount: option.amount(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_valid_item() {
        let item = LineItem::new("Omega Aqua Terra", 1, 15900).unwrap();
        assert_eq!(item.name, "Omega Aqua Terra");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.total_amount, 15900);
    }

    #[test]
    fn new_rejects_zero_quantity() {
        let err = LineItem::new("Watch", 0, 100).unwrap_err();
        assert_eq!(err, ValidationError::below_minimum("quantity", 1, 0));
    }

    #[test]
    fn new_rejects_blank_name() {
        let err = LineItem::new("   ", 1, 100).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("name"));
    }

    #[test]
    fn new_clamps_negative_total() {
        let item = LineItem::new("Watch", 1, -5).unwrap();
        assert_eq!(item.total_amount, 0);
    }

    #[test]
    fn shipping_line_uses_display_name() {
        let option = ShippingOption::new("standard-shipping", "Standard shipping", "3-5 days", 499);
        let line = LineItem::shipping(&option);
        assert_eq!(line.name, "Standard shipping");
        assert_eq!(line.quantity, 1);
        assert_eq!(line.total_amount, 499);
    }

    #[test]
    fn shipping_line_falls_back_to_internal_name() {
        let option = ShippingOption::new("pickup", "", "Store pickup", 0).with_name("Pickup point");
        assert_eq!(LineItem::shipping(&option).name, "Pickup point");
    }

    #[test]
    fn shipping_line_falls_back_to_default_name() {
        let option = ShippingOption::new("pickup", "", "Store pickup", 0);
        assert_eq!(LineItem::shipping(&option).name, DEFAULT_SHIPPING_LINE_NAME);
    }

    #[test]
    fn serializes_camel_case() {
        let item = LineItem::new("Watch", 2, 200).unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "Watch", "quantity": 2, "totalAmount": 200 })
        );
    }
}
