//! Pages
//!
//! Top-level page components for each route.

pub mod dashboard;
pub mod storefront;

pub use dashboard::Dashboard;
pub use storefront::Storefront;
