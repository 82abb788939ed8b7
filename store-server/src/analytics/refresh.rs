//! Periodic dashboard refresh
//!
//! A background task recomputes the dashboard snapshot on a fixed
//! interval and publishes it into [`DashboardCache`]. Handlers serve
//! the cached snapshot without touching the ledger; a stale-by-seconds
//! view is fine for an admin overview.

use super::{Overview, ProductStats, SellerStats};
use crate::ledger::TransactionLedger;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use shared::{Transaction, TransactionStatus};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// How many rows the dashboard rankings keep
const RANKING_LIMIT: usize = 10;

/// One consistent dashboard computation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub overview: Overview,
    pub top_sellers: Vec<SellerStats>,
    pub top_products: Vec<ProductStats>,
}

/// Latest published dashboard snapshot
#[derive(Default)]
pub struct DashboardCache {
    latest: RwLock<Option<Arc<DashboardSnapshot>>>,
}

impl DashboardCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<Arc<DashboardSnapshot>> {
        self.latest.read().clone()
    }

    pub fn store(&self, snapshot: DashboardSnapshot) {
        *self.latest.write() = Some(Arc::new(snapshot));
    }
}

/// Compute a full dashboard from one ledger snapshot.
///
/// The overview sums every status; the rankings cover settled money
/// only, so the same snapshot is filtered once for both.
pub fn compute_snapshot(ledger: &TransactionLedger) -> DashboardSnapshot {
    let transactions = ledger.snapshot();
    let completed: Vec<Transaction> = transactions
        .iter()
        .filter(|tx| tx.status == TransactionStatus::Completed)
        .cloned()
        .collect();
    DashboardSnapshot {
        generated_at: Utc::now(),
        overview: super::overview(&transactions),
        top_sellers: super::top_sellers(&completed, RANKING_LIMIT),
        top_products: super::top_products(&completed, RANKING_LIMIT),
    }
}

/// Refresh loop; runs until the shutdown token fires.
///
/// The first snapshot is published immediately so the dashboard never
/// serves an empty cache after startup.
pub async fn run_dashboard_refresh(
    ledger: Arc<TransactionLedger>,
    cache: Arc<DashboardCache>,
    interval: Duration,
    shutdown: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::info!("Dashboard refresh stopping");
                break;
            }
            _ = ticker.tick() => {
                let snapshot = compute_snapshot(&ledger);
                tracing::debug!(
                    transactions = snapshot.overview.transaction_count,
                    "Dashboard snapshot refreshed"
                );
                cache.store(snapshot);
            }
        }
    }
}
