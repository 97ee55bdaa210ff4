//! The seeding run: connect, generate every entity, then maintain.

use anyhow::{bail, Context};
use seed_core::{SeedStore, Table};
use seed_populate::{
    create_additional_indexes, update_statistics, verify_data_integrity, Entity,
    IntegrityReport, MaintenanceSummary, PopulateArgs, PopulateError, PopulateMetrics, Populator,
};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::config::SeedConfig;
use crate::connect::{get_database_connection, wait_for_database};

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct SetupReport {
    /// Metrics per entity, in generation order.
    pub generated: Vec<(Entity, PopulateMetrics)>,
    pub indexes: MaintenanceSummary,
    pub statistics: MaintenanceSummary,
    pub integrity: IntegrityReport,
    pub elapsed: Duration,
}

impl SetupReport {
    /// Rows inserted for `entity`, or 0 if it was not generated.
    pub fn rows_inserted(&self, entity: Entity) -> u64 {
        self.generated
            .iter()
            .find(|(e, _)| *e == entity)
            .map_or(0, |(_, metrics)| metrics.rows_inserted)
    }

    pub fn log_summary(&self) {
        info!(
            "Test data setup completed in {:.2} seconds",
            self.elapsed.as_secs_f64()
        );
        for (table, count) in &self.integrity.table_counts {
            match count {
                Some(count) => info!("  - {}: {}", table, count),
                None => info!("  - {}: unknown", table),
            }
        }
        if !self.indexes.failed.is_empty() || !self.statistics.failed.is_empty() {
            info!(
                "Skipped {} index(es) and {} table analysis step(s)",
                self.indexes.failed.len(),
                self.statistics.failed.len()
            );
        }
        if !self.integrity.is_consistent() {
            warn!(
                "Integrity check found orphans: orders={:?}, order_items={:?}",
                self.integrity.orphaned_orders, self.integrity.orphaned_order_items
            );
        }
    }
}

/// Generate all entities in dependency order, then build indexes, refresh
/// statistics and verify integrity.
///
/// Generation errors abort the run. Maintenance never does.
pub async fn populate_and_maintain<S: SeedStore>(
    store: &mut S,
    args: &PopulateArgs,
) -> Result<SetupReport, PopulateError> {
    let started = Instant::now();

    let generated = generate_all(store, args).await?;
    let indexes = create_additional_indexes(store).await;
    let statistics = update_statistics(store).await;
    let integrity = verify_data_integrity(store).await;

    Ok(SetupReport {
        generated,
        indexes,
        statistics,
        integrity,
        elapsed: started.elapsed(),
    })
}

async fn generate_all<S: SeedStore>(
    store: &mut S,
    args: &PopulateArgs,
) -> Result<Vec<(Entity, PopulateMetrics)>, PopulateError> {
    let mut populator = Populator::new(store, args.seed);

    Ok(vec![
        (
            Entity::Users,
            populator.generate_users(args.users_count).await?,
        ),
        (
            Entity::Products,
            populator.generate_products(args.products_count).await?,
        ),
        (
            Entity::Orders,
            populator.generate_orders(args.orders_count).await?,
        ),
        (
            Entity::Reviews,
            populator.generate_reviews(args.reviews_count).await?,
        ),
        (
            Entity::PerformanceRecords,
            populator
                .generate_performance_records(args.performance_records)
                .await?,
        ),
        (
            Entity::Sessions,
            populator.generate_sessions(args.sessions()).await?,
        ),
    ])
}

/// Log what a run would do, without connecting.
pub fn log_dry_run(config: &SeedConfig) {
    let p = &config.populate;
    info!("[DRY-RUN] Connection: {}", config.masked_url());
    info!(
        "[DRY-RUN] Would wait up to {} attempts, {}s apart",
        config.connect_retries, config.connect_retry_delay_secs
    );
    info!("[DRY-RUN] Users: {}", p.users_count);
    info!("[DRY-RUN] Products: {}", p.products_count);
    info!("[DRY-RUN] Orders: {} (1-5 items each)", p.orders_count);
    info!("[DRY-RUN] Reviews: {}", p.reviews_count);
    info!("[DRY-RUN] Performance records: {}", p.performance_records);
    info!("[DRY-RUN] Sessions: {}", p.sessions());
    info!(
        "[DRY-RUN] Tables verified afterwards: {}",
        Table::ALL.map(|t| t.name()).join(", ")
    );
}

/// Run the whole job against the configured MySQL server.
///
/// The connection is closed whether or not generation succeeds.
pub async fn run_setup(config: &SeedConfig) -> anyhow::Result<SetupReport> {
    info!("Starting test data setup: {}", config);

    if !wait_for_database(config).await {
        bail!(
            "MySQL at {} did not become reachable after {} attempts",
            config.masked_url(),
            config.connect_retries.max(1)
        );
    }

    let mut store = get_database_connection(config).await?;
    let result = populate_and_maintain(&mut store, &config.populate).await;

    if let Err(e) = store.disconnect().await {
        warn!("Failed to close MySQL connection: {}", e);
    }

    let report = result.context("Test data setup failed")?;
    report.log_summary();
    Ok(report)
}
