use std::sync::Arc;
use std::time::Duration;

use crate::analytics::{DashboardCache, run_dashboard_refresh};
use crate::catalog::{CatalogStore, SeedCatalog};
use crate::checkout::{CheckoutService, PaymentGateway};
use crate::core::{BackgroundTasks, Config, TaskKind};
use crate::ledger::TransactionLedger;

/// Server state - shared handles to every service
///
/// `ServerState` is the single composition root. Every service is held
/// behind an `Arc`, so cloning the state is a shallow copy handed to
/// each request handler and background task.
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Config | Immutable configuration |
/// | catalog | Arc<CatalogStore> | Session-immutable catalog |
/// | ledger | Arc<TransactionLedger> | Append-only transaction ledger |
/// | checkout | Arc<CheckoutService> | Checkout orchestrator |
/// | dashboard | Arc<DashboardCache> | Latest dashboard snapshot |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub catalog: Arc<CatalogStore>,
    pub ledger: Arc<TransactionLedger>,
    pub checkout: Arc<CheckoutService>,
    pub dashboard: Arc<DashboardCache>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("catalog_items", &self.catalog.len())
            .field("ledger_len", &self.ledger.len())
            .finish()
    }
}

impl ServerState {
    /// Initialize server state
    ///
    /// Loads the catalog from the seed provider, creates an empty
    /// ledger (a fresh process with no transactions is a valid initial
    /// state), and wires the checkout orchestrator.
    pub async fn initialize(config: &Config) -> crate::core::Result<Self> {
        let catalog = Arc::new(CatalogStore::load(&SeedCatalog).await?);
        let ledger = Arc::new(TransactionLedger::new());

        let gateway = PaymentGateway::new(
            Duration::from_millis(config.gateway_delay_ms),
            Duration::from_millis(config.gateway_timeout_ms),
        );
        let checkout = Arc::new(CheckoutService::new(
            ledger.clone(),
            gateway,
            config.tax_percent,
            config.shipping_flat,
        ));

        let dashboard = Arc::new(DashboardCache::new());

        Ok(Self {
            config: config.clone(),
            catalog,
            ledger,
            checkout,
            dashboard,
        })
    }

    /// Register background tasks and return the running manager
    ///
    /// The dashboard refresh is a read-only periodic task: it derives
    /// every aggregate from one ledger snapshot per tick and never
    /// mutates the ledger.
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();

        let ledger = self.ledger.clone();
        let dashboard = self.dashboard.clone();
        let interval = Duration::from_secs(self.config.refresh_interval_secs);
        let token = tasks.shutdown_token();
        tasks.spawn("dashboard_refresh", TaskKind::Periodic, async move {
            run_dashboard_refresh(ledger, dashboard, interval, token).await;
        });

        tracing::info!(count = tasks.len(), "Background tasks started");
        tasks
    }
}
