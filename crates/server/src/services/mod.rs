//! Service facade over the platform data the custom routes read.
//!
//! Handlers never talk to the database directly. They receive an
//! `Arc<dyn CommerceServices>` through [`AppState`](crate::state::AppState),
//! which is backed by [`PgCommerceServices`](crate::db::PgCommerceServices) in
//! production and by in-memory fakes in tests.
//!
//! # Operations
//!
//! | Operation | Failure handling in routes |
//! |---|---|
//! | `count_entities` / `entity_counts` | 500 on the admin stats route |
//! | `retrieve_store` | swallowed, `StoreInfo::fallback()` substituted |
//! | `list_featured_products` | 500 on the store route |
//! | `check_connection` | 503 on `/health/ready` |

use futures::future::BoxFuture;

use commerce_routes_core::FeaturedLimit;

use crate::db::RepositoryError;
use crate::models::{EntityCounts, EntityKind, Product, StoreInfo};

/// Filter for the featured products listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedProductsFilter {
    /// Maximum number of products to return.
    pub limit: FeaturedLimit,
    /// Leave gift card products out.
    pub exclude_gift_cards: bool,
    /// Newest products first (`created_at DESC`).
    pub newest_first: bool,
}

impl FeaturedProductsFilter {
    /// The featured listing: no gift cards, newest first.
    #[must_use]
    pub const fn new(limit: FeaturedLimit) -> Self {
        Self {
            limit,
            exclude_gift_cards: true,
            newest_first: true,
        }
    }
}

/// Business operations available to the route handlers.
pub trait CommerceServices: Send + Sync + 'static {
    /// Count the rows of one entity kind.
    fn count_entities(&self, kind: EntityKind) -> BoxFuture<'_, Result<u64, RepositoryError>>;

    /// Count every entity kind.
    ///
    /// The default runs the three counts one after another and stops at the
    /// first failure. Implementations may override it to read a consistent
    /// snapshot.
    fn entity_counts(&self) -> BoxFuture<'_, Result<EntityCounts, RepositoryError>> {
        Box::pin(async move {
            let mut counts = EntityCounts::default();
            for kind in EntityKind::ALL {
                counts.set(kind, self.count_entities(kind).await?);
            }
            Ok(counts)
        })
    }

    /// Look up a store by id, or the platform's default store when `store_id` is `None`.
    fn retrieve_store<'a>(
        &'a self,
        store_id: Option<&'a str>,
    ) -> BoxFuture<'a, Result<StoreInfo, RepositoryError>>;

    /// List products matching `filter`.
    fn list_featured_products(
        &self,
        filter: FeaturedProductsFilter,
    ) -> BoxFuture<'_, Result<Vec<Product>, RepositoryError>>;

    /// Verify the backing store is reachable.
    fn check_connection(&self) -> BoxFuture<'_, Result<(), RepositoryError>>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Counts from a fixed table, failing for one kind if asked to.
    struct FixedCounts {
        fail_on: Option<EntityKind>,
        calls: Mutex<Vec<EntityKind>>,
    }

    impl CommerceServices for FixedCounts {
        fn count_entities(&self, kind: EntityKind) -> BoxFuture<'_, Result<u64, RepositoryError>> {
            self.calls.lock().unwrap().push(kind);
            let result = if self.fail_on == Some(kind) {
                Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
            } else {
                Ok(match kind {
                    EntityKind::Product => 10,
                    EntityKind::Order => 5,
                    EntityKind::Customer => 3,
                })
            };
            Box::pin(async move { result })
        }

        fn retrieve_store<'a>(
            &'a self,
            _store_id: Option<&'a str>,
        ) -> BoxFuture<'a, Result<StoreInfo, RepositoryError>> {
            Box::pin(async { Err(RepositoryError::NotFound) })
        }

        fn list_featured_products(
            &self,
            _filter: FeaturedProductsFilter,
        ) -> BoxFuture<'_, Result<Vec<Product>, RepositoryError>> {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn check_connection(&self) -> BoxFuture<'_, Result<(), RepositoryError>> {
            Box::pin(async { Ok(()) })
        }
    }

    #[tokio::test]
    async fn test_default_entity_counts_runs_every_kind() {
        let services = FixedCounts {
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        };
        let counts = services.entity_counts().await.unwrap();
        assert_eq!(counts.products, 10);
        assert_eq!(counts.orders, 5);
        assert_eq!(counts.customers, 3);
        assert_eq!(*services.calls.lock().unwrap(), EntityKind::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_default_entity_counts_stops_at_first_failure() {
        let services = FixedCounts {
            fail_on: Some(EntityKind::Order),
            calls: Mutex::new(Vec::new()),
        };
        assert!(services.entity_counts().await.is_err());
        assert_eq!(
            *services.calls.lock().unwrap(),
            vec![EntityKind::Product, EntityKind::Order]
        );
    }

    #[test]
    fn test_featured_filter_defaults() {
        let filter = FeaturedProductsFilter::new(FeaturedLimit::DEFAULT);
        assert!(filter.exclude_gift_cards);
        assert!(filter.newest_first);
        assert_eq!(filter.limit.get(), 5);
    }
}
