//! In-memory [`SeedStore`] for tests that run without a database.
//!
//! Rows are kept in plain vectors. Failures can be injected for individual
//! indexes, tables being analyzed, or inserts into one table.

use anyhow::{anyhow, bail, Result};
use seed_core::{
    ActiveProduct, IndexDefinition, OrderItemRow, OrderRow, PerformanceRow, ProductRow,
    ReviewRow, SeedStore, SessionRow, Table, UserRow,
};
use std::collections::HashSet;

/// Vector-backed store. Fields are public so tests can inspect rows.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub categories: Vec<u64>,
    pub users: Vec<UserRow>,
    pub products: Vec<ProductRow>,
    pub orders: Vec<OrderRow>,
    pub order_items: Vec<OrderItemRow>,
    pub reviews: Vec<ReviewRow>,
    pub sessions: Vec<SessionRow>,
    pub performance_records: Vec<PerformanceRow>,
    indexes: HashSet<&'static str>,
    analyzed: Vec<Table>,
    batches: Vec<(Table, usize)>,
    failing_indexes: HashSet<&'static str>,
    failing_analyze: HashSet<Table>,
    failing_inserts: Option<Table>,
}

impl MemoryStore {
    /// A store whose `categories` table holds the given ids.
    pub fn with_categories(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            categories: ids.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Every committed batch as `(table, rows)`, in commit order.
    pub fn batches(&self) -> &[(Table, usize)] {
        &self.batches
    }

    /// Names of the indexes created so far.
    pub fn indexes(&self) -> &HashSet<&'static str> {
        &self.indexes
    }

    /// Tables analyzed so far, in order.
    pub fn analyzed(&self) -> &[Table] {
        &self.analyzed
    }

    /// Make creation of the named index fail.
    pub fn fail_index(&mut self, name: &'static str) {
        self.failing_indexes.insert(name);
    }

    /// Make `ANALYZE` of `table` fail.
    pub fn fail_analyze(&mut self, table: Table) {
        self.failing_analyze.insert(table);
    }

    /// Make every insert into `table` fail.
    pub fn fail_inserts_into(&mut self, table: Table) {
        self.failing_inserts = Some(table);
    }

    fn commit(&mut self, table: Table, rows: usize) -> Result<()> {
        if self.failing_inserts == Some(table) {
            bail!("injected insert failure for table '{table}'");
        }
        self.batches.push((table, rows));
        Ok(())
    }

    fn next_free(ids: impl Iterator<Item = u64>) -> u64 {
        ids.max().map_or(1, |max| max + 1)
    }
}

#[async_trait::async_trait]
impl SeedStore for MemoryStore {
    async fn next_id(&mut self, table: Table) -> Result<u64> {
        match table {
            Table::Users => Ok(Self::next_free(self.users.iter().map(|u| u.id))),
            Table::Products => Ok(Self::next_free(self.products.iter().map(|p| p.id))),
            Table::Orders => Ok(Self::next_free(self.orders.iter().map(|o| o.id))),
            Table::Categories => Ok(Self::next_free(self.categories.iter().copied())),
            other => Err(anyhow!("table '{other}' has no explicit ids in memory")),
        }
    }

    async fn category_ids(&mut self) -> Result<Vec<u64>> {
        Ok(self.categories.clone())
    }

    async fn active_user_ids(&mut self) -> Result<Vec<u64>> {
        Ok(self
            .users
            .iter()
            .filter(|u| u.is_active)
            .map(|u| u.id)
            .collect())
    }

    async fn active_products(&mut self) -> Result<Vec<ActiveProduct>> {
        Ok(self
            .products
            .iter()
            .filter(|p| p.is_active)
            .map(|p| ActiveProduct {
                id: p.id,
                price: p.price,
            })
            .collect())
    }

    async fn insert_users(&mut self, rows: &[UserRow]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }
        self.commit(Table::Users, rows.len())?;
        self.users.extend_from_slice(rows);
        Ok(rows.len() as u64)
    }

    async fn insert_products(&mut self, rows: &[ProductRow]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }
        self.commit(Table::Products, rows.len())?;
        self.products.extend_from_slice(rows);
        Ok(rows.len() as u64)
    }

    async fn insert_orders(&mut self, orders: &[OrderRow], items: &[OrderItemRow]) -> Result<u64> {
        if orders.is_empty() {
            return Ok(0);
        }
        self.commit(Table::Orders, orders.len())?;
        self.orders.extend_from_slice(orders);
        self.order_items.extend_from_slice(items);
        Ok(orders.len() as u64)
    }

    async fn insert_reviews(&mut self, rows: &[ReviewRow]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }
        self.commit(Table::Reviews, rows.len())?;
        self.reviews.extend_from_slice(rows);
        Ok(rows.len() as u64)
    }

    async fn insert_sessions(&mut self, rows: &[SessionRow]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }
        self.commit(Table::UserSessions, rows.len())?;
        self.sessions.extend_from_slice(rows);
        Ok(rows.len() as u64)
    }

    async fn insert_performance_records(&mut self, rows: &[PerformanceRow]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }
        self.commit(Table::PerformanceTest, rows.len())?;
        self.performance_records.extend_from_slice(rows);
        Ok(rows.len() as u64)
    }

    async fn create_index(&mut self, index: &IndexDefinition) -> Result<()> {
        if self.failing_indexes.contains(index.name) {
            bail!("injected failure creating index '{}'", index.name);
        }
        if !self.indexes.insert(index.name) {
            bail!("Duplicate key name '{}'", index.name);
        }
        Ok(())
    }

    async fn analyze_table(&mut self, table: Table) -> Result<()> {
        if self.failing_analyze.contains(&table) {
            bail!("injected failure analyzing '{table}'");
        }
        self.analyzed.push(table);
        Ok(())
    }

    async fn count_rows(&mut self, table: Table) -> Result<u64> {
        let count = match table {
            Table::Users => self.users.len(),
            Table::Products => self.products.len(),
            Table::Orders => self.orders.len(),
            Table::OrderItems => self.order_items.len(),
            Table::Reviews => self.reviews.len(),
            Table::Categories => self.categories.len(),
            Table::UserSessions => self.sessions.len(),
            Table::PerformanceTest => self.performance_records.len(),
        };
        Ok(count as u64)
    }

    async fn count_orphaned_orders(&mut self) -> Result<u64> {
        let users: HashSet<u64> = self.users.iter().map(|u| u.id).collect();
        Ok(self
            .orders
            .iter()
            .filter(|o| !users.contains(&o.user_id))
            .count() as u64)
    }

    async fn count_orphaned_order_items(&mut self) -> Result<u64> {
        let orders: HashSet<u64> = self.orders.iter().map(|o| o.id).collect();
        Ok(self
            .order_items
            .iter()
            .filter(|i| !orders.contains(&i.order_id))
            .count() as u64)
    }
}
