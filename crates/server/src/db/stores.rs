//! Store repository.

use sqlx::{FromRow, PgPool};

use commerce_routes_core::StoreId;

use super::RepositoryError;
use crate::models::StoreInfo;

#[derive(FromRow)]
struct StoreRow {
    id: StoreId,
    name: String,
    default_region_id: Option<String>,
    default_sales_channel_id: Option<String>,
}

impl From<StoreRow> for StoreInfo {
    fn from(row: StoreRow) -> Self {
        Self {
            id: Some(row.id),
            name: row.name,
            default_region_id: row.default_region_id,
            default_sales_channel_id: row.default_sales_channel_id,
        }
    }
}

/// Repository for store lookups.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a store by id, or the oldest store when no id is given.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no store matches.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn retrieve(&self, store_id: Option<&str>) -> Result<StoreInfo, RepositoryError> {
        let row = match store_id {
            Some(id) => {
                sqlx::query_as::<_, StoreRow>(
                    r"
                    SELECT id, name, default_region_id, default_sales_channel_id
                    FROM store
                    WHERE id = $1 AND deleted_at IS NULL
                    ",
                )
                .bind(id)
                .fetch_optional(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, StoreRow>(
                    r"
                    SELECT id, name, default_region_id, default_sales_channel_id
                    FROM store
                    WHERE deleted_at IS NULL
                    ORDER BY created_at ASC
                    LIMIT 1
                    ",
                )
                .fetch_optional(self.pool)
                .await?
            }
        };

        row.map(StoreInfo::from).ok_or(RepositoryError::NotFound)
    }
}
