//! Core types for the mysql-perf-seed data loader.
//!
//! This crate provides the foundational types shared by the generator,
//! the store-agnostic populator and the MySQL backend:
//!
//! - [`rows`] - One plain struct per entity table
//! - [`Table`] - The catalogue of tables the loader writes to or inspects
//! - [`IndexDefinition`] - Supplementary secondary indexes created after load
//! - [`BatchPlan`] - Splits a target row count into fixed-size batches
//! - [`SeedStore`] - The database boundary every backend implements
//!
//! # Architecture
//!
//! ```text
//! seed-core (this crate)
//!    │
//!    ├─── seed-generator       (builds rows from a seeded RNG)
//!    │
//!    ├─── seed-populate        (batches rows into any SeedStore)
//!    │
//!    └─── seed-populate-mysql  (implements SeedStore for MySQL)
//! ```

pub mod batch;
pub mod index;
pub mod rows;
pub mod store;
pub mod table;

// Re-exports for convenience
pub use batch::{Batch, BatchPlan};
pub use index::{IndexDefinition, ADDITIONAL_INDEXES};
pub use rows::{
    OrderItemRow, OrderRow, OrderStatus, PaymentMethod, PaymentStatus, PerformanceRow,
    ProductRow, ReviewRow, SessionRow, UserRow,
};
pub use store::{ActiveProduct, SeedStore};
pub use table::Table;
