//! UI Components
//!
//! Reusable Leptos components for the dashboard and the storefront.

pub mod feed;
pub mod loading;
pub mod nav;
pub mod points_badge;
pub mod product_card;
pub mod redeem_modal;
pub mod sleep_chart;
pub mod toast;

pub use feed::{OthersList, OwnList};
pub use loading::{InlineLoading, Loading};
pub use nav::Nav;
pub use points_badge::{format_points, PointsBadge};
pub use product_card::ProductCard;
pub use redeem_modal::RedeemModal;
pub use sleep_chart::SleepChart;
pub use toast::Toast;
