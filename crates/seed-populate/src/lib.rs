//! Batched population and post-load maintenance for mysql-perf-seed.
//!
//! This crate is backend-agnostic: everything here is generic over
//! [`seed_core::SeedStore`], so the MySQL backend and the in-memory store
//! share one implementation of batching, reference lookup and maintenance.

pub mod args;
pub mod error;
pub mod maintenance;
pub mod memory;
pub mod populator;

pub use args::PopulateArgs;
pub use error::PopulateError;
pub use maintenance::{
    create_additional_indexes, update_statistics, verify_data_integrity, IntegrityReport,
    MaintenanceSummary,
};
pub use memory::MemoryStore;
pub use populator::{BatchSizes, Entity, PopulateMetrics, Populator};
