//! Checkout shipping recalculation.
//!
//! Answers the embedded payment widget's callbacks:
//! - `shippingaddresschange` -> [`CheckoutState::change_shipping_address`]
//! - `shippingoptionselect` -> [`CheckoutState::select_shipping_option`]
//! - `initiate` -> [`CheckoutState::initiation_payload`]
//!
//! All functions are synchronous and pure over the session's state; the async
//! boundary lives in the HTTP adapter.

mod amount;
mod line_item;
mod shipping;
mod state;

pub use amount::{clamp_amount, coerce_amount, deserialize_amount};
pub use line_item::{LineItem, DEFAULT_SHIPPING_LINE_NAME};
pub use shipping::{
    base_shipping_options, resolve_shipping_options, ShippingAddress, ShippingOption,
    DOMESTIC_COUNTRY, EXPRESS_SHIPPING_REFERENCE, INTERNATIONAL_SURCHARGE,
    STANDARD_SHIPPING_REFERENCE,
};
pub use state::{
    CheckoutState, CustomerInteractionConfig, InitiationPayload, ShippingConfig,
    ShippingSelection, SupplementaryPurchaseData, CUSTOMER_PROFILE_SCOPES,
    EDITABLE_SHIPPING_MODE,
};
