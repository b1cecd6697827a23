//! Data Transfer Objects
//!
//! Request and response types for the rewards backend.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Deserializer, Serialize};

use crate::feed::{FeedItem, OwnRecord};

/// Image shown for products without one
pub const PLACEHOLDER_IMAGE: &str = "assets/placeholder.png";

// ============================================
// USER DTOs
// ============================================

/// `GET /api/me`
#[derive(Clone, Debug, Deserialize)]
pub struct MeResponse {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    /// Current point balance
    pub points: f64,
}

// ============================================
// CATALOG DTOs
// ============================================

/// A redeemable product from `GET /api/products`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Price in points per unit
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    /// Image URL to render: external URLs as-is, local assets made relative.
    pub fn image_src(&self) -> String {
        let src = match self.image.as_deref().map(str::trim) {
            Some(src) if !src.is_empty() => src,
            _ => return PLACEHOLDER_IMAGE.to_string(),
        };

        let lower = src.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            src.to_string()
        } else {
            src.strip_prefix('/').unwrap_or(src).to_string()
        }
    }
}

// ============================================
// REDEEM DTOs
// ============================================

/// `POST /api/redeem` body
#[derive(Debug, Serialize)]
pub struct RedeemRequest {
    pub product_id: i64,
    pub qty: u32,
}

/// `POST /api/redeem` response
#[derive(Clone, Debug, Deserialize)]
pub struct RedeemReceipt {
    #[serde(default)]
    pub order_id: Option<i64>,
    /// Balance after the redemption
    pub remaining_points: f64,
}

// ============================================
// FEED DTOs
// ============================================

/// `GET /api/good-things?flatten=true`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GoodThingsResponse {
    #[serde(default, deserialize_with = "own_records_lenient")]
    pub mine: Vec<OwnRecord>,
    #[serde(default)]
    pub others_flat_objects: Option<Vec<FeedItem>>,
    #[serde(default)]
    pub others_flat: Option<Vec<FeedItem>>,
}

impl GoodThingsResponse {
    /// Other people's items, preferring the structured list.
    pub fn others(&mut self) -> Vec<FeedItem> {
        self.others_flat_objects
            .take()
            .or_else(|| self.others_flat.take())
            .unwrap_or_default()
    }
}

/// Read own records one at a time. A malformed row keeps its place as an
/// empty record instead of failing the whole response.
fn own_records_lenient<'de, D>(deserializer: D) -> Result<Vec<OwnRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();

    Ok(rows
        .into_iter()
        .map(|row| {
            serde_json::from_value(row).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "Malformed own record shown as empty");
                OwnRecord::default()
            })
        })
        .collect())
}

/// Error body sent with non-success responses
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}
