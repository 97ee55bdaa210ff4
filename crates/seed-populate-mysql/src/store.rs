//! [`SeedStore`] implementation over a single MySQL connection.

use anyhow::{bail, Context, Result};
use mysql_async::{prelude::*, Conn, TxOpts};
use rust_decimal::Decimal;
use seed_core::{
    ActiveProduct, IndexDefinition, OrderItemRow, OrderRow, PerformanceRow, ProductRow,
    ReviewRow, SeedStore, SessionRow, Table, UserRow,
};
use std::str::FromStr;
use tracing::debug;

use crate::args::MySQLConnectArgs;
use crate::error::MySQLSeedError;
use crate::insert::{insert_batch, InsertRow};

/// `CREATE INDEX` statement for an index definition.
pub fn create_index_sql(index: &IndexDefinition) -> String {
    format!(
        "CREATE INDEX `{}` ON `{}` ({})",
        index.name,
        index.table.name(),
        index.parts.join(", ")
    )
}

/// Count orders whose user no longer exists.
pub const ORPHANED_ORDERS_SQL: &str = "SELECT COUNT(*) FROM `orders` o \
     LEFT JOIN `users` u ON o.user_id = u.id \
     WHERE u.id IS NULL";

/// Count order items whose order no longer exists.
pub const ORPHANED_ORDER_ITEMS_SQL: &str = "SELECT COUNT(*) FROM `order_items` oi \
     LEFT JOIN `orders` o ON oi.order_id = o.id \
     WHERE o.id IS NULL";

/// A seeding session on one MySQL connection.
pub struct MySQLStore {
    conn: Conn,
}

impl MySQLStore {
    /// Open a single connection. Does not retry.
    pub async fn connect(args: &MySQLConnectArgs) -> Result<Self, MySQLSeedError> {
        debug!(
            "Connecting to MySQL at {}:{} (database: {})",
            args.mysql_host, args.mysql_port, args.mysql_database
        );
        let conn = Conn::new(args.opts()).await?;
        Ok(Self { conn })
    }

    /// Open a single connection from a `mysql://` URL.
    pub async fn connect_url(url: &str) -> Result<Self, MySQLSeedError> {
        let conn = Conn::from_url(url).await?;
        Ok(Self { conn })
    }

    /// Run `SELECT 1` on the connection.
    pub async fn ping(&mut self) -> Result<(), MySQLSeedError> {
        let _: Option<i32> = self.conn.query_first("SELECT 1").await?;
        Ok(())
    }

    /// Close the connection gracefully.
    pub async fn disconnect(self) -> Result<(), MySQLSeedError> {
        self.conn.disconnect().await?;
        Ok(())
    }

    async fn insert_in_transaction<R: InsertRow + Sync>(&mut self, rows: &[R]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }
        let mut tx = self.conn.start_transaction(TxOpts::default()).await?;
        let inserted = insert_batch(&mut tx, rows).await?;
        tx.commit().await?;
        Ok(inserted)
    }

    async fn count(&mut self, sql: &str) -> Result<u64> {
        let count: Option<u64> = self.conn.query_first(sql).await?;
        Ok(count.unwrap_or(0))
    }
}

#[async_trait::async_trait]
impl SeedStore for MySQLStore {
    async fn next_id(&mut self, table: Table) -> Result<u64> {
        let sql = format!("SELECT COALESCE(MAX(id), 0) + 1 FROM `{}`", table.name());
        let next: Option<u64> = self.conn.query_first(sql).await?;
        Ok(next.unwrap_or(1))
    }

    async fn category_ids(&mut self) -> Result<Vec<u64>> {
        let ids: Vec<u64> = self
            .conn
            .query("SELECT id FROM `categories` ORDER BY id")
            .await?;
        Ok(ids)
    }

    async fn active_user_ids(&mut self) -> Result<Vec<u64>> {
        let ids: Vec<u64> = self
            .conn
            .query("SELECT id FROM `users` WHERE is_active = TRUE ORDER BY id")
            .await?;
        Ok(ids)
    }

    async fn active_products(&mut self) -> Result<Vec<ActiveProduct>> {
        let rows: Vec<(u64, String)> = self
            .conn
            .query(
                "SELECT id, CAST(price AS CHAR) FROM `products` \
                 WHERE is_active = TRUE ORDER BY id",
            )
            .await?;

        rows.into_iter()
            .map(|(id, price)| {
                let price = Decimal::from_str(&price).map_err(|_| MySQLSeedError::InvalidValue {
                    column: "products.price",
                    value: price.clone(),
                })?;
                Ok(ActiveProduct { id, price })
            })
            .collect()
    }

    async fn insert_users(&mut self, rows: &[UserRow]) -> Result<u64> {
        self.insert_in_transaction(rows).await
    }

    async fn insert_products(&mut self, rows: &[ProductRow]) -> Result<u64> {
        self.insert_in_transaction(rows).await
    }

    async fn insert_orders(&mut self, orders: &[OrderRow], items: &[OrderItemRow]) -> Result<u64> {
        if orders.is_empty() {
            return Ok(0);
        }
        let mut tx = self.conn.start_transaction(TxOpts::default()).await?;
        let inserted = insert_batch(&mut tx, orders).await?;
        insert_batch(&mut tx, items).await?;
        tx.commit().await?;
        Ok(inserted)
    }

    async fn insert_reviews(&mut self, rows: &[ReviewRow]) -> Result<u64> {
        self.insert_in_transaction(rows).await
    }

    async fn insert_sessions(&mut self, rows: &[SessionRow]) -> Result<u64> {
        self.insert_in_transaction(rows).await
    }

    async fn insert_performance_records(&mut self, rows: &[PerformanceRow]) -> Result<u64> {
        self.insert_in_transaction(rows).await
    }

    async fn create_index(&mut self, index: &IndexDefinition) -> Result<()> {
        self.conn.query_drop(create_index_sql(index)).await?;
        Ok(())
    }

    async fn analyze_table(&mut self, table: Table) -> Result<()> {
        // ANALYZE reports problems as result rows rather than errors.
        let rows: Vec<(String, String, String, String)> = self
            .conn
            .query(format!("ANALYZE TABLE `{}`", table.name()))
            .await
            .with_context(|| format!("ANALYZE TABLE {table}"))?;

        if let Some((_, _, _, message)) = rows
            .iter()
            .find(|(_, _, kind, _)| kind.eq_ignore_ascii_case("error"))
        {
            bail!("ANALYZE TABLE {table} reported: {message}");
        }
        Ok(())
    }

    async fn count_rows(&mut self, table: Table) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM `{}`", table.name());
        self.count(&sql).await
    }

    async fn count_orphaned_orders(&mut self) -> Result<u64> {
        self.count(ORPHANED_ORDERS_SQL).await
    }

    async fn count_orphaned_order_items(&mut self) -> Result<u64> {
        self.count(ORPHANED_ORDER_ITEMS_SQL).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed_core::ADDITIONAL_INDEXES;

    #[test]
    fn test_create_index_sql() {
        let sql = create_index_sql(&ADDITIONAL_INDEXES[1]);
        assert_eq!(
            sql,
            "CREATE INDEX `idx_orders_date_status` ON `orders` (order_date, status)"
        );
    }

    #[test]
    fn test_functional_index_sql() {
        let sql = create_index_sql(&ADDITIONAL_INDEXES[0]);
        assert!(sql.starts_with("CREATE INDEX `idx_performance_json` ON `performance_test` ((CAST("));
        assert!(sql.contains("json_data->>'$.category'"));
    }

    #[test]
    fn test_orphan_queries_use_left_join() {
        assert!(ORPHANED_ORDERS_SQL.contains("LEFT JOIN `users` u ON o.user_id = u.id"));
        assert!(ORPHANED_ORDERS_SQL.ends_with("WHERE u.id IS NULL"));
        assert!(ORPHANED_ORDER_ITEMS_SQL.contains("LEFT JOIN `orders` o ON oi.order_id = o.id"));
        assert!(ORPHANED_ORDER_ITEMS_SQL.ends_with("WHERE o.id IS NULL"));
    }
}
