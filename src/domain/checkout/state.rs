//! Per-session checkout context.
//!
//! One `CheckoutState` exists per mounted payment button. It is created when
//! the session starts, mutated by the widget's shipping callbacks, and dropped
//! when the session ends.
//!
//! # Invariant
//!
//! The selected shipping option is stored as a reference and resolved against
//! the current option list on every read, so a selection can never point at
//! an option (or a price) that is no longer offered.

use serde::Serialize;

use super::line_item::LineItem;
use super::shipping::{resolve_shipping_options, ShippingAddress, ShippingOption};

/// Customer profile scopes requested from the widget.
pub const CUSTOMER_PROFILE_SCOPES: [&str; 4] = [
    "profile:email",
    "profile:name",
    "profile:phone",
    "profile:billing_address",
];

/// Shipping mode that lets the customer edit the address in the widget.
pub const EDITABLE_SHIPPING_MODE: &str = "EDITABLE";

/// Result of a shipping-option selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingSelection {
    /// Order total in minor units.
    pub amount: i64,
    /// Product line followed by the shipping line, if an option is selected.
    pub line_items: Vec<LineItem>,
}

/// Payload answering the widget's `initiate` callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiationPayload {
    pub currency: String,
    pub amount: i64,
    pub shipping_config: ShippingConfig,
    pub collect_customer_profile: Vec<String>,
    pub supplementary_purchase_data: SupplementaryPurchaseData,
    pub customer_interaction_config: CustomerInteractionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingConfig {
    pub mode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplementaryPurchaseData {
    pub line_items: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInteractionConfig {
    pub return_url: String,
}

/// Mutable checkout context for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutState {
    base_amount: i64,
    product_line_item: Option<LineItem>,
    shipping_options: Vec<ShippingOption>,
    selected_reference: Option<String>,
}

impl CheckoutState {
    /// Creates a state with an explicit base amount.
    pub fn new(base_amount: i64, product_line_item: Option<LineItem>) -> Self {
        Self {
            base_amount: base_amount.max(0),
            product_line_item,
            shipping_options: Vec::new(),
            selected_reference: None,
        }
    }

    /// Creates a state whose base amount is the product's total.
    pub fn for_product(product: LineItem) -> Self {
        Self::new(product.total_amount, Some(product))
    }

    /// Order amount before shipping.
    pub fn base_amount(&self) -> i64 {
        self.base_amount
    }

    /// The product being bought, if any.
    pub fn product_line_item(&self) -> Option<&LineItem> {
        self.product_line_item.as_ref()
    }

    /// Options currently offered.
    pub fn shipping_options(&self) -> &[ShippingOption] {
        &self.shipping_options
    }

    /// The selected option, resolved against the current list.
    pub fn selected_shipping_option(&self) -> Option<&ShippingOption> {
        self.selected_reference
            .as_deref()
            .and_then(|reference| self.find_option(reference))
    }

    /// Handles the widget's shipping-address change.
    ///
    /// Replaces the offered options. A previous selection survives only if
    /// its reference is still offered, and then carries the new price.
    pub fn change_shipping_address(
        &mut self,
        address: Option<&ShippingAddress>,
    ) -> Vec<ShippingOption> {
        let options = resolve_shipping_options(address);
        self.shipping_options = options.clone();

        if let Some(reference) = self.selected_reference.take() {
            if self.find_option(&reference).is_some() {
                self.selected_reference = Some(reference);
            }
        }

        tracing::debug!(
            country = ?address.and_then(ShippingAddress::country_code),
            options = options.len(),
            selected = ?self.selected_reference,
            "Shipping options resolved"
        );

        options
    }

    /// Handles the widget's shipping-option selection.
    ///
    /// An unknown or absent reference clears the selection and yields the
    /// base total; it is not an error. Repeated calls with the same
    /// reference return the same result.
    pub fn select_shipping_option(&mut self, reference: Option<&str>) -> ShippingSelection {
        self.selected_reference = reference
            .filter(|r| !r.is_empty())
            .filter(|r| self.find_option(r).is_some())
            .map(str::to_string);

        if self.selected_reference.is_none() {
            tracing::debug!(reference = ?reference, "Shipping option not offered, selection cleared");
        }

        ShippingSelection {
            amount: self.total_amount(),
            line_items: self.line_items(),
        }
    }

    /// Base amount plus the selected option's price.
    pub fn total_amount(&self) -> i64 {
        let shipping = self
            .selected_shipping_option()
            .map(ShippingOption::amount)
            .unwrap_or(0);
        self.base_amount.saturating_add(shipping)
    }

    /// Product line followed by the synthesized shipping line.
    pub fn line_items(&self) -> Vec<LineItem> {
        let mut items: Vec<LineItem> = self.product_line_item.iter().cloned().collect();
        if let Some(option) = self.selected_shipping_option() {
            items.push(LineItem::shipping(option));
        }
        items
    }

    /// Builds the payload returned from the widget's `initiate` callback.
    pub fn initiation_payload(
        &self,
        currency: impl Into<String>,
        return_url: impl Into<String>,
    ) -> InitiationPayload {
        InitiationPayload {
            currency: currency.into(),
            amount: self.base_amount,
            shipping_config: ShippingConfig {
                mode: EDITABLE_SHIPPING_MODE.to_string(),
            },
            collect_customer_profile: CUSTOMER_PROFILE_SCOPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            supplementary_purchase_data: SupplementaryPurchaseData {
                line_items: self.product_line_item.iter().cloned().collect(),
            },
            customer_interaction_config: CustomerInteractionConfig {
                return_url: return_url.into(),
            },
        }
    }

    fn find_option(&self, reference: &str) -> Option<&ShippingOption> {
        self.shipping_options
            .iter()
            .find(|option| option.reference() == reference)
    }
}
