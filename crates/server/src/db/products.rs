//! Product repository.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use commerce_routes_core::{ProductId, ProductStatus};

use super::RepositoryError;
use crate::models::Product;
use crate::services::FeaturedProductsFilter;

#[derive(FromRow)]
struct ProductRow {
    id: ProductId,
    title: String,
    subtitle: Option<String>,
    description: Option<String>,
    handle: Option<String>,
    thumbnail: Option<String>,
    status: String,
    is_giftcard: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<ProductStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("product {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            title: row.title,
            subtitle: row.subtitle,
            description: row.description,
            handle: row.handle,
            thumbnail: row.thumbnail,
            status,
            is_giftcard: row.is_giftcard,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for product listings.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List live products matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row has an unknown status.
    pub async fn list(
        &self,
        filter: FeaturedProductsFilter,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = build_list_query(filter)
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(Product::try_from).collect()
    }
}

fn build_list_query(filter: FeaturedProductsFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(
        r"SELECT id, title, subtitle, description, handle, thumbnail,
       status::text AS status, is_giftcard, created_at, updated_at
FROM product
WHERE deleted_at IS NULL",
    );

    if filter.exclude_gift_cards {
        query.push(" AND is_giftcard = false");
    }

    query.push(if filter.newest_first {
        " ORDER BY created_at DESC"
    } else {
        " ORDER BY created_at ASC"
    });

    query.push(" LIMIT ");
    query.push_bind(filter.limit.as_i64());
    query
}
