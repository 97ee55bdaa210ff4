//! MySQL backend for mysql-perf-seed.
//!
//! [`MySQLStore`] implements [`seed_core::SeedStore`] on a single
//! `mysql_async` connection. Every batch is one multi-row INSERT inside its
//! own transaction.

pub mod args;
pub mod error;
pub mod insert;
pub mod store;

pub use args::MySQLConnectArgs;
pub use error::MySQLSeedError;
pub use store::MySQLStore;
