//! Batched populator that generates rows and writes them to a [`SeedStore`].

use seed_core::{
    Batch, BatchPlan, OrderItemRow, OrderRow, PerformanceRow, ProductRow, ReviewRow, SeedStore,
    SessionRow, Table, UserRow,
};
use seed_generator::{DataGenerator, ReferencePool};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::error::{store_error, PopulateError};

/// Metrics from a populate operation.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of rows inserted.
    pub rows_inserted: u64,
    /// Number of child rows inserted alongside (order items).
    pub child_rows_inserted: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating data.
    pub generation_duration: Duration,
    /// Time spent inserting data.
    pub insert_duration: Duration,
    /// Number of batches executed.
    pub batch_count: u64,
}

impl PopulateMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// An entity kind the populator generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Users,
    Products,
    Orders,
    Reviews,
    PerformanceRecords,
    Sessions,
}

impl Entity {
    pub fn label(&self) -> &'static str {
        match self {
            Entity::Users => "users",
            Entity::Products => "products",
            Entity::Orders => "orders",
            Entity::Reviews => "reviews",
            Entity::PerformanceRecords => "performance records",
            Entity::Sessions => "sessions",
        }
    }

    /// Progress is logged whenever the running total is a multiple of this.
    pub fn milestone(&self) -> u64 {
        match self {
            Entity::Users | Entity::Reviews | Entity::Sessions => 5_000,
            Entity::Products | Entity::Orders => 2_000,
            Entity::PerformanceRecords => 10_000,
        }
    }
}

/// Rows per committed batch for each entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSizes {
    pub users: usize,
    pub products: usize,
    pub orders: usize,
    pub reviews: usize,
    pub performance: usize,
    pub sessions: usize,
}

impl Default for BatchSizes {
    fn default() -> Self {
        Self {
            users: 1000,
            products: 1000,
            orders: 500,
            reviews: 1000,
            performance: 2000,
            sessions: 1000,
        }
    }
}

impl BatchSizes {
    pub fn for_entity(&self, entity: Entity) -> usize {
        match entity {
            Entity::Users => self.users,
            Entity::Products => self.products,
            Entity::Orders => self.orders,
            Entity::Reviews => self.reviews,
            Entity::PerformanceRecords => self.performance,
            Entity::Sessions => self.sessions,
        }
    }
}

/// Tracks timing, batch counts and progress logging for one generator run.
struct Progress {
    entity: Entity,
    target: u64,
    started: Instant,
    metrics: PopulateMetrics,
}

impl Progress {
    fn start(entity: Entity, target: u64, batch_size: usize) -> Self {
        info!(
            "Generating {} {} (batch size: {})",
            target,
            entity.label(),
            batch_size
        );
        Self {
            entity,
            target,
            started: Instant::now(),
            metrics: PopulateMetrics::default(),
        }
    }

    fn generated(&mut self, elapsed: Duration) {
        self.metrics.generation_duration += elapsed;
    }

    fn inserted(&mut self, batch: Batch, rows: u64, children: u64, elapsed: Duration) {
        self.metrics.insert_duration += elapsed;
        self.metrics.rows_inserted += rows;
        self.metrics.child_rows_inserted += children;
        self.metrics.batch_count += 1;

        debug!(
            "{} batch {} complete: {} rows inserted, {} remaining",
            self.entity.label(),
            self.metrics.batch_count,
            rows,
            self.target - batch.end()
        );

        if batch.end() % self.entity.milestone() == 0 {
            info!("Generated {} {}...", batch.end(), self.entity.label());
        }
    }

    fn finish(mut self) -> PopulateMetrics {
        self.metrics.total_duration = self.started.elapsed();
        info!(
            "Generated {} {} in {:?} ({:.2} rows/sec)",
            self.metrics.rows_inserted,
            self.entity.label(),
            self.metrics.total_duration,
            self.metrics.rows_per_second()
        );
        self.metrics
    }
}

/// Populator that generates entity rows and inserts them batch by batch.
///
/// Every batch is committed before the next one is generated, so a failure
/// leaves earlier batches durable and the rest ungenerated.
pub struct Populator<'a, S: SeedStore> {
    store: &'a mut S,
    generator: DataGenerator,
    batch_sizes: BatchSizes,
}

impl<'a, S: SeedStore> Populator<'a, S> {
    /// Create a populator writing to `store`. `seed` fixes the RNG.
    pub fn new(store: &'a mut S, seed: Option<u64>) -> Self {
        Self::with_generator(store, DataGenerator::new(seed))
    }

    /// Create a populator around an existing generator.
    pub fn with_generator(store: &'a mut S, generator: DataGenerator) -> Self {
        Self {
            store,
            generator,
            batch_sizes: BatchSizes::default(),
        }
    }

    /// Override the per-entity batch sizes.
    pub fn with_batch_sizes(mut self, batch_sizes: BatchSizes) -> Self {
        self.batch_sizes = batch_sizes;
        self
    }

    pub fn batch_sizes(&self) -> &BatchSizes {
        &self.batch_sizes
    }

    /// Generate `count` users with consecutive ids after the current maximum.
    pub async fn generate_users(&mut self, count: u64) -> Result<PopulateMetrics, PopulateError> {
        let batch_size = self.batch_sizes.for_entity(Entity::Users);
        let mut progress = Progress::start(Entity::Users, count, batch_size);
        if count == 0 {
            return Ok(progress.finish());
        }

        let first_id = self
            .store
            .next_id(Table::Users)
            .await
            .map_err(store_error("Reading next user id"))?;

        for batch in BatchPlan::new(count, batch_size) {
            let gen_start = Instant::now();
            let rows: Vec<UserRow> = (batch.offset..batch.end())
                .map(|i| self.generator.user(first_id + i))
                .collect();
            progress.generated(gen_start.elapsed());

            let insert_start = Instant::now();
            let inserted = self
                .store
                .insert_users(&rows)
                .await
                .map_err(store_error("Inserting users"))?;
            progress.inserted(batch, inserted, 0, insert_start.elapsed());
        }

        Ok(progress.finish())
    }

    /// Generate `count` products, each in an existing category.
    pub async fn generate_products(
        &mut self,
        count: u64,
    ) -> Result<PopulateMetrics, PopulateError> {
        let batch_size = self.batch_sizes.for_entity(Entity::Products);
        let mut progress = Progress::start(Entity::Products, count, batch_size);
        if count == 0 {
            return Ok(progress.finish());
        }

        let categories = self
            .store
            .category_ids()
            .await
            .map_err(store_error("Reading category ids"))?;
        let categories =
            ReferencePool::new(categories).ok_or(PopulateError::MissingReferences {
                entity: "products",
                table: Table::Categories,
            })?;
        let first_id = self
            .store
            .next_id(Table::Products)
            .await
            .map_err(store_error("Reading next product id"))?;

        for batch in BatchPlan::new(count, batch_size) {
            let gen_start = Instant::now();
            let rows: Vec<ProductRow> = (batch.offset..batch.end())
                .map(|i| self.generator.product(first_id + i, &categories))
                .collect();
            progress.generated(gen_start.elapsed());

            let insert_start = Instant::now();
            let inserted = self
                .store
                .insert_products(&rows)
                .await
                .map_err(store_error("Inserting products"))?;
            progress.inserted(batch, inserted, 0, insert_start.elapsed());
        }

        Ok(progress.finish())
    }

    /// Generate `count` orders for active users, each with 1 to 5 items of
    /// active products. Orders and their items share a transaction.
    pub async fn generate_orders(&mut self, count: u64) -> Result<PopulateMetrics, PopulateError> {
        let batch_size = self.batch_sizes.for_entity(Entity::Orders);
        let mut progress = Progress::start(Entity::Orders, count, batch_size);
        if count == 0 {
            return Ok(progress.finish());
        }

        let users = self.active_users("orders").await?;
        let products = self
            .store
            .active_products()
            .await
            .map_err(store_error("Reading active products"))?;
        let products = ReferencePool::new(products).ok_or(PopulateError::MissingReferences {
            entity: "orders",
            table: Table::Products,
        })?;
        let first_id = self
            .store
            .next_id(Table::Orders)
            .await
            .map_err(store_error("Reading next order id"))?;

        for batch in BatchPlan::new(count, batch_size) {
            let gen_start = Instant::now();
            let mut orders: Vec<OrderRow> = Vec::with_capacity(batch.len as usize);
            let mut items: Vec<OrderItemRow> = Vec::new();
            for i in batch.offset..batch.end() {
                let (order, order_items) = self.generator.order(first_id + i, &users, &products);
                orders.push(order);
                items.extend(order_items);
            }
            progress.generated(gen_start.elapsed());

            let insert_start = Instant::now();
            let inserted = self
                .store
                .insert_orders(&orders, &items)
                .await
                .map_err(store_error("Inserting orders"))?;
            progress.inserted(batch, inserted, items.len() as u64, insert_start.elapsed());
        }

        Ok(progress.finish())
    }

    /// Generate `count` reviews by active users of active products.
    pub async fn generate_reviews(&mut self, count: u64) -> Result<PopulateMetrics, PopulateError> {
        let batch_size = self.batch_sizes.for_entity(Entity::Reviews);
        let mut progress = Progress::start(Entity::Reviews, count, batch_size);
        if count == 0 {
            return Ok(progress.finish());
        }

        let users = self.active_users("reviews").await?;
        let products = self
            .store
            .active_products()
            .await
            .map_err(store_error("Reading active products"))?;
        let products = ReferencePool::new(products.into_iter().map(|p| p.id).collect())
            .ok_or(PopulateError::MissingReferences {
                entity: "reviews",
                table: Table::Products,
            })?;

        for batch in BatchPlan::new(count, batch_size) {
            let gen_start = Instant::now();
            let rows: Vec<ReviewRow> = (0..batch.len)
                .map(|_| self.generator.review(&users, &products))
                .collect();
            progress.generated(gen_start.elapsed());

            let insert_start = Instant::now();
            let inserted = self
                .store
                .insert_reviews(&rows)
                .await
                .map_err(store_error("Inserting reviews"))?;
            progress.inserted(batch, inserted, 0, insert_start.elapsed());
        }

        Ok(progress.finish())
    }

    /// Generate `count` rows of the standalone performance table.
    pub async fn generate_performance_records(
        &mut self,
        count: u64,
    ) -> Result<PopulateMetrics, PopulateError> {
        let batch_size = self.batch_sizes.for_entity(Entity::PerformanceRecords);
        let mut progress = Progress::start(Entity::PerformanceRecords, count, batch_size);

        for batch in BatchPlan::new(count, batch_size) {
            let gen_start = Instant::now();
            let rows: Vec<PerformanceRow> = (batch.offset..batch.end())
                .map(|i| self.generator.performance_record(i + 1))
                .collect();
            progress.generated(gen_start.elapsed());

            let insert_start = Instant::now();
            let inserted = self
                .store
                .insert_performance_records(&rows)
                .await
                .map_err(store_error("Inserting performance records"))?;
            progress.inserted(batch, inserted, 0, insert_start.elapsed());
        }

        Ok(progress.finish())
    }

    /// Generate `count` sessions for active users.
    pub async fn generate_sessions(&mut self, count: u64) -> Result<PopulateMetrics, PopulateError> {
        let batch_size = self.batch_sizes.for_entity(Entity::Sessions);
        let mut progress = Progress::start(Entity::Sessions, count, batch_size);
        if count == 0 {
            return Ok(progress.finish());
        }

        let users = self.active_users("sessions").await?;

        for batch in BatchPlan::new(count, batch_size) {
            let gen_start = Instant::now();
            let rows: Vec<SessionRow> = (0..batch.len)
                .map(|_| self.generator.session(&users))
                .collect();
            progress.generated(gen_start.elapsed());

            let insert_start = Instant::now();
            let inserted = self
                .store
                .insert_sessions(&rows)
                .await
                .map_err(store_error("Inserting sessions"))?;
            progress.inserted(batch, inserted, 0, insert_start.elapsed());
        }

        Ok(progress.finish())
    }

    async fn active_users(
        &mut self,
        entity: &'static str,
    ) -> Result<ReferencePool<u64>, PopulateError> {
        let users = self
            .store
            .active_user_ids()
            .await
            .map_err(store_error("Reading active users"))?;
        ReferencePool::new(users).ok_or(PopulateError::MissingReferences {
            entity,
            table: Table::Users,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::collections::HashSet;

    fn populator(store: &mut MemoryStore) -> Populator<'_, MemoryStore> {
        let generator = DataGenerator::new(Some(42))
            .with_reference_time(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap());
        Populator::with_generator(store, generator)
    }

    #[test]
    fn test_metrics() {
        let metrics = PopulateMetrics {
            rows_inserted: 1000,
            total_duration: Duration::from_secs(10),
            ..Default::default()
        };

        assert_eq!(metrics.rows_per_second(), 100.0);
    }

    #[tokio::test]
    async fn test_zero_count_runs_no_batch() {
        let mut store = MemoryStore::with_categories(1..=3);
        let metrics = populator(&mut store).generate_users(0).await.unwrap();

        assert_eq!(metrics.rows_inserted, 0);
        assert_eq!(metrics.batch_count, 0);
        assert!(store.batches().is_empty());
    }

    #[tokio::test]
    async fn test_count_below_batch_size_is_one_partial_batch() {
        let mut store = MemoryStore::with_categories(1..=3);
        let metrics = populator(&mut store).generate_users(7).await.unwrap();

        assert_eq!(metrics.rows_inserted, 7);
        assert_eq!(metrics.batch_count, 1);
        assert_eq!(store.batches(), &[(Table::Users, 7)]);
    }

    #[tokio::test]
    async fn test_exact_count_across_batches() {
        let mut store = MemoryStore::with_categories(1..=3);
        let sizes = BatchSizes {
            products: 4,
            ..BatchSizes::default()
        };
        let metrics = populator(&mut store)
            .with_batch_sizes(sizes)
            .generate_products(10)
            .await
            .unwrap();

        assert_eq!(metrics.batch_count, 3);
        assert_eq!(store.products.len(), 10);
        let sizes: Vec<usize> = store.batches().iter().map(|(_, n)| *n).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
    }

    #[tokio::test]
    async fn test_user_ids_continue_after_existing_rows() {
        let mut store = MemoryStore::with_categories(1..=3);
        populator(&mut store).generate_users(3).await.unwrap();
        populator(&mut store).generate_users(2).await.unwrap();

        let ids: Vec<u64> = store.users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        let names: HashSet<&str> = store.users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names.len(), 5);
    }

    #[tokio::test]
    async fn test_orders_reference_existing_rows() {
        let mut store = MemoryStore::with_categories(1..=3);
        {
            let mut populator = populator(&mut store).with_batch_sizes(BatchSizes {
                orders: 3,
                ..BatchSizes::default()
            });
            populator.generate_users(20).await.unwrap();
            populator.generate_products(10).await.unwrap();
            let metrics = populator.generate_orders(8).await.unwrap();
            assert_eq!(metrics.rows_inserted, 8);
            assert_eq!(metrics.batch_count, 3);
        }

        let active_users: HashSet<u64> = store
            .users
            .iter()
            .filter(|u| u.is_active)
            .map(|u| u.id)
            .collect();
        let order_ids: HashSet<u64> = store.orders.iter().map(|o| o.id).collect();
        let product_ids: HashSet<u64> = store.products.iter().map(|p| p.id).collect();

        assert_eq!(store.orders.len(), 8);
        for order in &store.orders {
            assert!(active_users.contains(&order.user_id));
            let sum: Decimal = store
                .order_items
                .iter()
                .filter(|i| i.order_id == order.id)
                .map(|i| i.total_price)
                .sum();
            assert_eq!(order.total_amount, sum.round_dp(2));
        }
        for item in &store.order_items {
            assert!(order_ids.contains(&item.order_id));
            assert!(product_ids.contains(&item.product_id));
        }
    }

    #[tokio::test]
    async fn test_products_without_categories_fail() {
        let mut store = MemoryStore::default();
        let err = populator(&mut store).generate_products(5).await.unwrap_err();
        assert!(matches!(
            err,
            PopulateError::MissingReferences {
                table: Table::Categories,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_zero_orders_without_users_succeeds() {
        let mut store = MemoryStore::default();
        let metrics = populator(&mut store).generate_orders(0).await.unwrap();
        assert_eq!(metrics.rows_inserted, 0);
    }

    #[tokio::test]
    async fn test_insert_failure_aborts() {
        let mut store = MemoryStore::with_categories(1..=3);
        store.fail_inserts_into(Table::Reviews);
        let mut populator = populator(&mut store);
        populator.generate_users(5).await.unwrap();
        populator.generate_products(5).await.unwrap();

        let err = populator.generate_reviews(5).await.unwrap_err();
        assert!(matches!(err, PopulateError::Store { .. }));
        assert!(err.to_string().contains("Inserting reviews"));
    }

    #[tokio::test]
    async fn test_sessions_and_performance_counts() {
        let mut store = MemoryStore::with_categories(1..=3);
        {
            let mut populator = populator(&mut store);
            populator.generate_users(4).await.unwrap();
            populator.generate_sessions(9).await.unwrap();
            populator.generate_performance_records(13).await.unwrap();
        }
        assert_eq!(store.sessions.len(), 9);
        assert_eq!(store.performance_records.len(), 13);
        assert!(store.performance_records[12]
            .test_data
            .starts_with("Performance test record 13: "));
    }
}
