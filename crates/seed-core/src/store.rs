//! SeedStore trait definition.
//!
//! This trait abstracts over the database that receives the generated data,
//! so the batching and maintenance logic is written once and runs unchanged
//! against MySQL or the in-memory store used by tests.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::index::IndexDefinition;
use crate::rows::{
    OrderItemRow, OrderRow, PerformanceRow, ProductRow, ReviewRow, SessionRow, UserRow,
};
use crate::table::Table;

/// An active product together with its current unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveProduct {
    pub id: u64,
    pub price: Decimal,
}

/// Database boundary used by the populator and the maintenance steps.
///
/// Every `insert_*` method writes the whole slice in one transaction and
/// commits it before returning. Empty slices are a no-op.
///
/// # Usage Pattern
///
/// Callers use generics so all calls are statically dispatched:
///
/// ```ignore
/// pub async fn run<S: SeedStore>(store: &mut S) -> anyhow::Result<()> {
///     let users = store.active_user_ids().await?;
///     // ...
/// }
/// ```
#[async_trait::async_trait]
pub trait SeedStore: Send {
    /// Next free primary key for `table` (`MAX(id) + 1`, or 1 when empty).
    async fn next_id(&mut self, table: Table) -> Result<u64>;

    /// Ids of every row in `categories`.
    async fn category_ids(&mut self) -> Result<Vec<u64>>;

    /// Ids of users with `is_active` set.
    async fn active_user_ids(&mut self) -> Result<Vec<u64>>;

    /// Ids and prices of products with `is_active` set.
    async fn active_products(&mut self) -> Result<Vec<ActiveProduct>>;

    async fn insert_users(&mut self, rows: &[UserRow]) -> Result<u64>;

    async fn insert_products(&mut self, rows: &[ProductRow]) -> Result<u64>;

    /// Insert orders and their items in the same transaction.
    async fn insert_orders(&mut self, orders: &[OrderRow], items: &[OrderItemRow])
        -> Result<u64>;

    async fn insert_reviews(&mut self, rows: &[ReviewRow]) -> Result<u64>;

    async fn insert_sessions(&mut self, rows: &[SessionRow]) -> Result<u64>;

    async fn insert_performance_records(&mut self, rows: &[PerformanceRow]) -> Result<u64>;

    /// Create one secondary index.
    async fn create_index(&mut self, index: &IndexDefinition) -> Result<()>;

    /// Recompute the optimizer statistics of one table.
    async fn analyze_table(&mut self, table: Table) -> Result<()>;

    async fn count_rows(&mut self, table: Table) -> Result<u64>;

    /// Orders whose `user_id` matches no user.
    async fn count_orphaned_orders(&mut self) -> Result<u64>;

    /// Order items whose `order_id` matches no order.
    async fn count_orphaned_order_items(&mut self) -> Result<u64>;
}
