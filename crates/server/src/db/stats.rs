//! Entity counts for the admin dashboard.

use sqlx::{PgConnection, PgPool};

use super::RepositoryError;
use crate::models::{EntityCounts, EntityKind};

/// Repository for dashboard count queries.
pub struct StatsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StatsRepository<'a> {
    /// Create a new stats repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Count the rows of one entity table.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, kind: EntityKind) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        count_on(&mut conn, kind).await
    }

    /// Count every entity table inside one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails; the transaction
    /// is rolled back when dropped.
    pub async fn snapshot(&self) -> Result<EntityCounts, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let mut counts = EntityCounts::default();
        for kind in EntityKind::ALL {
            counts.set(kind, count_on(&mut tx, kind).await?);
        }

        tx.commit().await?;
        Ok(counts)
    }
}

async fn count_on(conn: &mut PgConnection, kind: EntityKind) -> Result<u64, RepositoryError> {
    // Table names come from a closed enum, never from input.
    let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
    let count: i64 = sqlx::query_scalar(&sql).fetch_one(&mut *conn).await?;

    u64::try_from(count)
        .map_err(|_| RepositoryError::DataCorruption(format!("negative {kind} count: {count}")))
}
