//! HTTP API Client
//!
//! `RewardsApi` over `fetch`, via `gloo-net`.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use super::dto::{GoodThingsResponse, MeResponse, Product, RedeemReceipt, RedeemRequest};
use super::error::{ClientError, ClientResult};
use super::RewardsApi;
use crate::sleep::SleepSession;

/// Default API base URL (same origin)
pub const DEFAULT_API_BASE: &str = "/api";

/// Local storage key overriding the API base URL
pub const API_URL_STORAGE_KEY: &str = "rewards_api_url";

/// Browser client for the rewards backend
#[derive(Clone, Debug)]
pub struct HttpClient {
    base: String,
}

impl HttpClient {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        read_json(response).await
    }
}

/// Decode a success body, or turn a failure body into `ClientError::Status`
async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let error = ClientError::from_body(status, &body);
        tracing::warn!(status, url = %response.url(), error = %error, "Backend request failed");
        return Err(error);
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::Parse(e.to_string()))
}

#[async_trait(?Send)]
impl RewardsApi for HttpClient {
    async fn me(&self) -> ClientResult<MeResponse> {
        self.get_json("/me").await
    }

    async fn sessions(&self) -> ClientResult<Vec<SleepSession>> {
        self.get_json("/sessions").await
    }

    async fn good_things(&self, others_limit: u32) -> ClientResult<GoodThingsResponse> {
        self.get_json(&format!("/good-things?flatten=true&others_limit={}", others_limit))
            .await
    }

    async fn products(&self) -> ClientResult<Vec<Product>> {
        self.get_json("/products").await
    }

    async fn redeem(&self, product_id: i64, qty: u32) -> ClientResult<RedeemReceipt> {
        let url = self.url("/redeem");
        tracing::debug!(%url, product_id, qty, "POST");

        let response = Request::post(&url)
            .json(&RedeemRequest { product_id, qty })
            .map_err(|e| ClientError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        read_json(response).await
    }
}
