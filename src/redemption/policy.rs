//! Redemption Quantity Policy
//!
//! Computes how many units of a product the current balance may redeem in a
//! single order.

use crate::api::dto::Product;

/// Product name of the donation, which has no per-order cap
pub const DONATION_PRODUCT: &str = "Donation to NPO";

/// Product name of the single-play crane game
pub const SINGLE_PLAY_PRODUCT: &str = "online crane game 1 play";

/// Per-order cap for every other product
pub const DEFAULT_ORDER_CAP: u32 = 100;

/// Quantity rule selected by product identity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuantityPolicy {
    /// Bounded by balance only
    Donation,
    /// At most one unit per order
    SinglePlay,
    /// Bounded by balance and [`DEFAULT_ORDER_CAP`]
    Default,
}

impl QuantityPolicy {
    /// Select the policy by exact product name.
    pub fn for_product(product: &Product) -> Self {
        match product.name.as_str() {
            DONATION_PRODUCT => QuantityPolicy::Donation,
            SINGLE_PLAY_PRODUCT => QuantityPolicy::SinglePlay,
            _ => QuantityPolicy::Default,
        }
    }

    /// Hard per-order cap, if any
    pub fn cap(self) -> Option<u32> {
        match self {
            QuantityPolicy::Donation => None,
            QuantityPolicy::SinglePlay => Some(1),
            QuantityPolicy::Default => Some(DEFAULT_ORDER_CAP),
        }
    }

    /// Extra note appended to the quantity hint
    pub fn note(self) -> Option<&'static str> {
        match self {
            QuantityPolicy::Donation => Some("(No 100-piece cap for donations.)"),
            QuantityPolicy::SinglePlay => Some("(Limited to 1 play per order.)"),
            QuantityPolicy::Default => None,
        }
    }

    /// Whether a successful redemption plays the celebration video
    pub fn plays_celebration(self) -> bool {
        matches!(self, QuantityPolicy::SinglePlay)
    }
}

/// Whole units of `price` covered by `balance`, never negative.
pub fn units_affordable(price: f64, balance: f64) -> u32 {
    if !(price > 0.0) || balance.is_nan() {
        return 0;
    }

    let mut units = (balance / price).floor();
    // Division can round up onto the next integer
    if units * price > balance {
        units -= 1.0;
    }

    if units <= 0.0 {
        0
    } else if units >= u32::MAX as f64 {
        u32::MAX
    } else {
        units as u32
    }
}

/// Largest quantity of `product` redeemable in one order with `balance`.
pub fn max_quantity(product: &Product, balance: f64) -> u32 {
    let by_balance = units_affordable(product.price, balance);

    match QuantityPolicy::for_product(product).cap() {
        Some(cap) => by_balance.min(cap),
        None => by_balance,
    }
}

/// User-facing hint describing the legal quantity range.
pub fn quantity_hint(product: &Product, max: u32) -> String {
    let mut hint = if max == 0 {
        "Not enough points.".to_string()
    } else {
        format!("You can redeem up to {}.", max)
    };

    if let Some(note) = QuantityPolicy::for_product(product).note() {
        hint.push(' ');
        hint.push_str(note);
    }

    hint
}
