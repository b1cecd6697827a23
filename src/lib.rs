//! # Rewards UI
//!
//! Browser client for a points-based rewards service, built with Leptos and
//! compiled to WebAssembly.
//!
//! ## Features
//!
//! - **Sleep chart**: bedtime and wake lines across midnight, hours slept
//! - **Good things feed**: the user's recent records and other people's entries
//! - **Storefront**: per-product quantity limits and point redemption
//! - **Celebration overlay**: single-instance video with autoplay fallback
//!
//! ## Modules
//!
//! - [`sleep`]: Sleep sessions to chart series
//! - [`redemption`]: Quantity policy per product
//! - [`feed`]: Feed normalization
//! - [`overlay`]: Video overlay state machine and its DOM surface
//! - [`api`]: Backend contract and HTTP client
//! - [`controllers`]: Async page orchestration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rewards_ui::api::Product;
//! use rewards_ui::redemption::{max_quantity, quantity_hint};
//!
//! let product = Product {
//!     id: 1,
//!     name: "Donation to NPO".to_string(),
//!     price: 10.0,
//!     description: None,
//!     image: None,
//! };
//!
//! let max = max_quantity(&product, 1520.0);
//! assert_eq!(max, 152);
//! println!("{}", quantity_hint(&product, max));
//! ```

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod controllers;
pub mod feed;
pub mod logging;
pub mod overlay;
pub mod pages;
pub mod redemption;
pub mod sleep;
pub mod state;

// Re-export top-level types for convenience
pub use api::{ClientError, ClientResult, HttpClient, Product, RewardsApi};

pub use config::{ConfigError, UiConfig};

pub use controllers::{DashboardController, StorefrontController, StorefrontError};

pub use overlay::{OverlayController, OverlayEvent, OverlayId, OverlayState, OverlaySurface};

pub use sleep::{normalize, ChartPoint, SleepSession};
