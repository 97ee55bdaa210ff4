//! Post-load maintenance: secondary indexes, statistics and integrity checks.
//!
//! None of these steps can fail a run. Index and statistics failures are
//! logged and skipped; integrity findings are reported, not enforced.

use seed_core::{SeedStore, Table, ADDITIONAL_INDEXES};
use tracing::{info, warn};

/// Outcome of a best-effort maintenance step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceSummary {
    pub succeeded: Vec<String>,
    /// `(target, error message)` for each skipped item.
    pub failed: Vec<(String, String)>,
}

impl MaintenanceSummary {
    fn record(&mut self, target: &str, result: anyhow::Result<()>) -> bool {
        match result {
            Ok(()) => {
                self.succeeded.push(target.to_string());
                true
            }
            Err(e) => {
                self.failed.push((target.to_string(), format!("{e:#}")));
                false
            }
        }
    }
}

/// Create every index of [`ADDITIONAL_INDEXES`], skipping any that fail.
pub async fn create_additional_indexes<S: SeedStore>(store: &mut S) -> MaintenanceSummary {
    info!("Creating additional indexes for performance testing...");

    let mut summary = MaintenanceSummary::default();
    for index in &ADDITIONAL_INDEXES {
        let result = store.create_index(index).await;
        if summary.record(index.name, result) {
            info!("Created index: {}", index.name);
        } else if let Some((_, error)) = summary.failed.last() {
            warn!(
                "Index creation failed for {} (may already exist): {}",
                index.name, error
            );
        }
    }
    summary
}

/// Refresh optimizer statistics for every table, skipping any that fail.
pub async fn update_statistics<S: SeedStore>(store: &mut S) -> MaintenanceSummary {
    info!("Updating table statistics...");

    let mut summary = MaintenanceSummary::default();
    for table in Table::ALL {
        let result = store.analyze_table(table).await;
        if summary.record(table.name(), result) {
            info!("Analyzed table: {}", table);
        } else if let Some((_, error)) = summary.failed.last() {
            warn!("Table analysis failed for {}: {}", table, error);
        }
    }
    summary
}

/// Row counts and orphan counts observed after the load.
///
/// `None` means the count query itself failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    pub table_counts: Vec<(Table, Option<u64>)>,
    pub orphaned_orders: Option<u64>,
    pub orphaned_order_items: Option<u64>,
}

impl IntegrityReport {
    /// Observed row count of `table`, if it could be read.
    pub fn count(&self, table: Table) -> Option<u64> {
        self.table_counts
            .iter()
            .find(|(t, _)| *t == table)
            .and_then(|(_, count)| *count)
    }

    /// True when both orphan checks ran and found nothing.
    pub fn is_consistent(&self) -> bool {
        self.orphaned_orders == Some(0) && self.orphaned_order_items == Some(0)
    }
}

/// Report row counts and orphaned rows. Never mutates the store.
pub async fn verify_data_integrity<S: SeedStore>(store: &mut S) -> IntegrityReport {
    info!("Verifying data integrity...");

    let mut report = IntegrityReport::default();
    for table in Table::ALL {
        let count = match store.count_rows(table).await {
            Ok(count) => {
                info!("{}: {} records", table, count);
                Some(count)
            }
            Err(e) => {
                warn!("Counting rows of {} failed: {:#}", table, e);
                None
            }
        };
        report.table_counts.push((table, count));
    }

    report.orphaned_orders = match store.count_orphaned_orders().await {
        Ok(count) => {
            info!("Orphaned orders: {}", count);
            Some(count)
        }
        Err(e) => {
            warn!("Orphaned order check failed: {:#}", e);
            None
        }
    };

    report.orphaned_order_items = match store.count_orphaned_order_items().await {
        Ok(count) => {
            info!("Orphaned order items: {}", count);
            Some(count)
        }
        Err(e) => {
            warn!("Orphaned order item check failed: {:#}", e);
            None
        }
    };

    report
}
