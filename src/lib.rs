//! mysql-perf-seed
//!
//! Fills a MySQL database with referentially consistent synthetic data for
//! load and performance testing, then adds secondary indexes, refreshes
//! table statistics and checks integrity.
//!
//! # CLI Usage
//!
//! ```bash
//! # Default volumes against the `mysql` host
//! mysql-perf-seed
//!
//! # Small reproducible run
//! mysql-perf-seed --users-count 100 --products-count 50 --orders-count 200 \
//!   --reviews-count 100 --performance-records 1000 --seed 42
//!
//! # Print the resolved configuration only
//! DRY_RUN=true mysql-perf-seed
//! ```

pub mod config;
pub mod connect;
pub mod logging;
pub mod retry;
pub mod setup;

pub use config::SeedConfig;
pub use connect::{get_database_connection, wait_for_database};
pub use retry::{retry_with_fixed_delay, wait_until_ready, RetryError, RetryPolicy};
pub use setup::{populate_and_maintain, run_setup, SetupReport};
