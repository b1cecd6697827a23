//! Rewards Backend API
//!
//! JSON request/response contract with the rewards backend.
//!
//! # Endpoints
//!
//! - `GET /api/me` - Current point balance
//! - `GET /api/sessions` - Sleep sessions, newest first
//! - `GET /api/good-things?flatten=true&others_limit=N` - Own and others' entries
//! - `GET /api/products` - Redeemable products
//! - `POST /api/redeem` - Redeem `qty` units of a product
//!
//! Controllers only see the [`RewardsApi`] trait; [`HttpClient`] is the
//! browser implementation.

pub mod client;
pub mod dto;
pub mod error;

#[cfg(test)]
pub mod fake;

pub use client::{HttpClient, DEFAULT_API_BASE};
pub use dto::{GoodThingsResponse, MeResponse, Product, RedeemReceipt};
pub use error::{ClientError, ClientResult};

use async_trait::async_trait;

use crate::sleep::SleepSession;

/// Operations the UI needs from the backend
#[async_trait(?Send)]
pub trait RewardsApi {
    async fn me(&self) -> ClientResult<MeResponse>;

    /// Sleep sessions, newest first
    async fn sessions(&self) -> ClientResult<Vec<SleepSession>>;

    async fn good_things(&self, others_limit: u32) -> ClientResult<GoodThingsResponse>;

    async fn products(&self) -> ClientResult<Vec<Product>>;

    /// Redeem `qty` units; the backend rejects over-redemption.
    async fn redeem(&self, product_id: i64, qty: u32) -> ClientResult<RedeemReceipt>;
}
