//! Catalog models read from the platform's `product` and `store` tables.

use chrono::{DateTime, Utc};
use serde::Serialize;

use commerce_routes_core::{ProductId, ProductStatus, StoreId};

/// Name reported when the store lookup fails.
pub const DEFAULT_STORE_NAME: &str = "Default Store";

/// A product as listed in the featured products section.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub handle: Option<String>,
    pub thumbnail: Option<String>,
    pub status: ProductStatus,
    pub is_giftcard: bool,
    #[serde(serialize_with = "super::timestamp::serialize")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "super::timestamp::serialize")]
    pub updated_at: DateTime<Utc>,
}

/// Store metadata.
///
/// Optional fields are omitted so the fallback serializes to exactly
/// `{"name":"Default Store"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<StoreId>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_region_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sales_channel_id: Option<String>,
}

impl StoreInfo {
    /// Store used when the lookup fails.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            id: None,
            name: DEFAULT_STORE_NAME.to_string(),
            default_region_id: None,
            default_sales_channel_id: None,
        }
    }
}
