//! Database access to the platform's `PostgreSQL` schema.
//!
//! The platform owns the schema and its migrations; this service only reads.
//!
//! ## Tables read
//!
//! - `product` - Catalog products (`is_giftcard`, `status`, soft-deleted via `deleted_at`)
//! - `"order"` - Orders (counted only)
//! - `customer` - Customers (counted only)
//! - `store` - Store metadata
//!
//! Queries are built at runtime (`sqlx::query_as`) rather than with the
//! compile-time macros, since the schema is not available at build time.

pub mod products;
pub mod stats;
pub mod stores;

use std::time::Duration;

use futures::future::BoxFuture;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::models::{EntityCounts, EntityKind, Product, StoreInfo};
use crate::services::{CommerceServices, FeaturedProductsFilter};

pub use products::ProductRepository;
pub use stats::StatsRepository;
pub use stores::StoreRepository;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// [`CommerceServices`] backed by the platform database.
#[derive(Debug, Clone)]
pub struct PgCommerceServices {
    pool: PgPool,
}

impl PgCommerceServices {
    /// Wrap a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl CommerceServices for PgCommerceServices {
    fn count_entities(&self, kind: EntityKind) -> BoxFuture<'_, Result<u64, RepositoryError>> {
        Box::pin(async move { StatsRepository::new(&self.pool).count(kind).await })
    }

    fn entity_counts(&self) -> BoxFuture<'_, Result<EntityCounts, RepositoryError>> {
        Box::pin(async move { StatsRepository::new(&self.pool).snapshot().await })
    }

    fn retrieve_store<'a>(
        &'a self,
        store_id: Option<&'a str>,
    ) -> BoxFuture<'a, Result<StoreInfo, RepositoryError>> {
        Box::pin(async move { StoreRepository::new(&self.pool).retrieve(store_id).await })
    }

    fn list_featured_products(
        &self,
        filter: FeaturedProductsFilter,
    ) -> BoxFuture<'_, Result<Vec<Product>, RepositoryError>> {
        Box::pin(async move { ProductRepository::new(&self.pool).list(filter).await })
    }

    fn check_connection(&self) -> BoxFuture<'_, Result<(), RepositoryError>> {
        Box::pin(async move {
            sqlx::query("SELECT 1").execute(&self.pool).await?;
            Ok(())
        })
    }
}
