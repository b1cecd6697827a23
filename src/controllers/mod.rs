//! Page Controllers
//!
//! Async orchestration between the backend and the pure rules. Controllers
//! own their state in a `RefCell` that is never borrowed across an await;
//! pages copy it into signals through `snapshot()`.

pub mod dashboard;
pub mod storefront;

pub use dashboard::{BootReport, DashboardController, DashboardState, Section};
pub use storefront::{
    Celebration, PurchaseOutcome, Selection, StorefrontController, StorefrontError,
    StorefrontState,
};
