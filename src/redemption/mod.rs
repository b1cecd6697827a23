//! Redemption Rules
//!
//! Per-product quantity limits for the storefront.

pub mod policy;

pub use policy::{
    max_quantity, quantity_hint, units_affordable, QuantityPolicy, DEFAULT_ORDER_CAP,
    DONATION_PRODUCT, SINGLE_PLAY_PRODUCT,
};
