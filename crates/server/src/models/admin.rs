//! Admin dashboard models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use commerce_routes_core::{ActionStatus, AdminAction, ReportId};

/// Platform entities the dashboard counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Product,
    Order,
    Customer,
}

impl EntityKind {
    /// All kinds, in dashboard order.
    pub const ALL: [Self; 3] = [Self::Product, Self::Order, Self::Customer];

    /// Quoted table name in the platform schema.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Product => "product",
            // `order` is a reserved word
            Self::Order => "\"order\"",
            Self::Customer => "customer",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Product => write!(f, "product"),
            Self::Order => write!(f, "order"),
            Self::Customer => write!(f, "customer"),
        }
    }
}

/// Row counts for every [`EntityKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntityCounts {
    pub products: u64,
    pub orders: u64,
    pub customers: u64,
}

impl EntityCounts {
    /// Store the count for one kind.
    pub const fn set(&mut self, kind: EntityKind, count: u64) {
        match kind {
            EntityKind::Product => self.products = count,
            EntityKind::Order => self.orders = count,
            EntityKind::Customer => self.customers = count,
        }
    }
}

/// Dashboard statistics returned by `GET /admin/custom`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResult {
    pub products: u64,
    pub orders: u64,
    pub customers: u64,
    #[serde(serialize_with = "super::timestamp::serialize")]
    pub timestamp: DateTime<Utc>,
}

impl StatsResult {
    /// Stamp a set of counts.
    #[must_use]
    pub const fn new(counts: EntityCounts, timestamp: DateTime<Utc>) -> Self {
        Self {
            products: counts.products,
            orders: counts.orders,
            customers: counts.customers,
            timestamp,
        }
    }
}

/// Result of an admin action.
///
/// Only `generate_report` carries a `reportId`.
#[derive(Debug, Clone, Serialize)]
pub struct ActionResult {
    pub action: AdminAction,
    pub status: ActionStatus,
    #[serde(rename = "reportId", skip_serializing_if = "Option::is_none")]
    pub report_id: Option<ReportId>,
    #[serde(serialize_with = "super::timestamp::serialize")]
    pub timestamp: DateTime<Utc>,
}

impl ActionResult {
    /// Run an action as of `now`.
    ///
    /// Cache refreshes complete immediately; reports are scheduled under a
    /// fresh report id.
    #[must_use]
    pub fn perform(action: AdminAction, now: DateTime<Utc>) -> Self {
        match action {
            AdminAction::RefreshCache => Self {
                action,
                status: ActionStatus::Completed,
                report_id: None,
                timestamp: now,
            },
            AdminAction::GenerateReport => Self {
                action,
                status: ActionStatus::Scheduled,
                report_id: Some(ReportId::generate_at(now)),
                timestamp: now,
            },
        }
    }
}
