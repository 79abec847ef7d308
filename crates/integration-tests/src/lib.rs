//! Test harness for the commerce routes server.
//!
//! Tests drive the real router with `tower::ServiceExt::oneshot` against
//! [`StubServices`], an in-memory [`CommerceServices`] that records how it was
//! called. No database or network is needed.
//!
//! ```rust,ignore
//! let services = Arc::new(StubServices::default().with_counts(10, 5, 3));
//! let (status, body) = get_json(app(services.clone()), "/admin/custom").await;
//! assert_eq!(status, StatusCode::OK);
//! assert_eq!(body["data"]["products"], 10);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use commerce_routes_core::{ProductId, ProductStatus};
use commerce_routes_server::config::ServerConfig;
use commerce_routes_server::db::RepositoryError;
use commerce_routes_server::models::{EntityCounts, EntityKind, Product, StoreInfo};
use commerce_routes_server::routes;
use commerce_routes_server::services::{CommerceServices, FeaturedProductsFilter};
use commerce_routes_server::state::AppState;

/// Origin allowed on `/store` in [`test_config`].
pub const STORE_ORIGIN: &str = "http://localhost:8000";
/// Origin allowed on `/admin` in [`test_config`].
pub const ADMIN_ORIGIN: &str = "http://localhost:7001";

/// In-memory service facade.
#[derive(Debug, Default)]
pub struct StubServices {
    counts: EntityCounts,
    failing_count: Option<EntityKind>,
    store: Option<StoreInfo>,
    products: Vec<Product>,
    products_fail: bool,
    database_down: bool,
    panics: bool,
    calls: AtomicUsize,
    last_filter: Mutex<Option<FeaturedProductsFilter>>,
    last_store_id: Mutex<Option<String>>,
}

impl StubServices {
    /// Report these entity counts.
    #[must_use]
    pub const fn with_counts(mut self, products: u64, orders: u64, customers: u64) -> Self {
        self.counts = EntityCounts {
            products,
            orders,
            customers,
        };
        self
    }

    /// Fail when counting `kind`.
    #[must_use]
    pub const fn failing_count(mut self, kind: EntityKind) -> Self {
        self.failing_count = Some(kind);
        self
    }

    /// Resolve every store lookup to `store`. Without this, lookups fail.
    #[must_use]
    pub fn with_store(mut self, store: StoreInfo) -> Self {
        self.store = Some(store);
        self
    }

    /// Catalog to list from, in any order.
    #[must_use]
    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    /// Fail the product listing.
    #[must_use]
    pub const fn failing_products(mut self) -> Self {
        self.products_fail = true;
        self
    }

    /// Fail the connection check.
    #[must_use]
    pub const fn database_down(mut self) -> Self {
        self.database_down = true;
        self
    }

    /// Panic inside every count and product listing.
    #[must_use]
    pub const fn panicking(mut self) -> Self {
        self.panics = true;
        self
    }

    /// Number of facade calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Filter passed to the most recent product listing.
    pub fn last_filter(&self) -> Option<FeaturedProductsFilter> {
        *self
            .last_filter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Store id passed to the most recent store lookup.
    pub fn last_store_id(&self) -> Option<String> {
        self.last_store_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    #[allow(clippy::panic)]
    fn maybe_panic(&self, operation: &str) {
        if self.panics {
            panic!("{operation} exploded");
        }
    }
}

fn unavailable() -> RepositoryError {
    RepositoryError::Database(sqlx::Error::PoolTimedOut)
}

impl CommerceServices for StubServices {
    fn count_entities(&self, kind: EntityKind) -> BoxFuture<'_, Result<u64, RepositoryError>> {
        Box::pin(async move {
            self.record_call();
            self.maybe_panic("count");
            if self.failing_count == Some(kind) {
                return Err(unavailable());
            }
            Ok(match kind {
                EntityKind::Product => self.counts.products,
                EntityKind::Order => self.counts.orders,
                EntityKind::Customer => self.counts.customers,
            })
        })
    }

    fn retrieve_store<'a>(
        &'a self,
        store_id: Option<&'a str>,
    ) -> BoxFuture<'a, Result<StoreInfo, RepositoryError>> {
        Box::pin(async move {
            self.record_call();
            *self
                .last_store_id
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = store_id.map(String::from);
            self.store.clone().ok_or(RepositoryError::NotFound)
        })
    }

    fn list_featured_products(
        &self,
        filter: FeaturedProductsFilter,
    ) -> BoxFuture<'_, Result<Vec<Product>, RepositoryError>> {
        Box::pin(async move {
            self.record_call();
            *self
                .last_filter
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = Some(filter);
            self.maybe_panic("product listing");
            if self.products_fail {
                return Err(unavailable());
            }

            let mut products: Vec<Product> = self
                .products
                .iter()
                .filter(|p| !(filter.exclude_gift_cards && p.is_giftcard))
                .cloned()
                .collect();
            products.sort_by_key(|p| p.created_at);
            if filter.newest_first {
                products.reverse();
            }
            products.truncate(usize::from(filter.limit.get()));
            Ok(products)
        })
    }

    fn check_connection(&self) -> BoxFuture<'_, Result<(), RepositoryError>> {
        Box::pin(async move {
            self.record_call();
            if self.database_down {
                Err(unavailable())
            } else {
                Ok(())
            }
        })
    }
}

/// Configuration as loaded in the `test` environment.
///
/// # Panics
///
/// Panics if the fixed test variables stop parsing.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_config() -> ServerConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("DATABASE_URL", "postgres://localhost/commerce_test".to_string()),
        ("STORE_CORS", STORE_ORIGIN.to_string()),
        ("ADMIN_CORS", format!("{ADMIN_ORIGIN},http://localhost:7000")),
        ("AUTH_CORS", ADMIN_ORIGIN.to_string()),
        ("NODE_ENV", "test".to_string()),
    ]);
    ServerConfig::from_lookup(|key| vars.get(key).cloned()).expect("test configuration is valid")
}

/// Router wired to `services`.
pub fn app(services: Arc<StubServices>) -> Router {
    routes::router(AppState::new(test_config(), services))
}

/// A product created at `created_at_millis`.
///
/// # Panics
///
/// Panics if the timestamp is out of range.
#[must_use]
#[allow(clippy::expect_used)]
pub fn product(id: &str, created_at_millis: i64, is_giftcard: bool) -> Product {
    let created_at: DateTime<Utc> =
        DateTime::from_timestamp_millis(created_at_millis).expect("timestamp in range");
    Product {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        subtitle: None,
        description: None,
        handle: Some(id.to_string()),
        thumbnail: None,
        status: ProductStatus::Published,
        is_giftcard,
        created_at,
        updated_at: created_at,
    }
}

/// Send a request and decode the JSON body (`Value::Null` if empty or not JSON).
///
/// # Panics
///
/// Panics if the router fails to produce a response.
#[allow(clippy::expect_used)]
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// `GET uri`.
///
/// # Panics
///
/// Panics if `uri` is invalid.
#[allow(clippy::expect_used)]
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri)
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

/// `POST uri` with a JSON body given as raw text.
///
/// # Panics
///
/// Panics if `uri` is invalid.
#[allow(clippy::expect_used)]
pub async fn post_raw(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request");
    send(app, request).await
}

/// `POST uri` with `body` serialized as JSON.
pub async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    post_raw(app, uri, &body.to_string()).await
}
