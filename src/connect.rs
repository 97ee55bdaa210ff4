//! Waiting for MySQL and opening the seeding connection.

use anyhow::Context;
use seed_populate_mysql::{MySQLConnectArgs, MySQLSeedError, MySQLStore};
use tracing::info;

use crate::config::SeedConfig;
use crate::retry::wait_until_ready;

/// Block until MySQL accepts a connection and answers `SELECT 1`.
///
/// Gives up after `connect_retries` attempts and returns false. Failed
/// attempts are logged, never returned.
pub async fn wait_for_database(config: &SeedConfig) -> bool {
    info!("Waiting for MySQL at {}...", config.masked_url());
    let ready = wait_until_ready(&config.retry_policy(), |_| probe(&config.mysql)).await;
    if ready {
        info!("MySQL is ready!");
    }
    ready
}

/// Open the connection used for the whole run. Does not retry.
pub async fn get_database_connection(config: &SeedConfig) -> anyhow::Result<MySQLStore> {
    MySQLStore::connect(&config.mysql)
        .await
        .with_context(|| format!("Failed to connect to {}", config.masked_url()))
}

async fn probe(args: &MySQLConnectArgs) -> Result<(), MySQLSeedError> {
    let mut store = MySQLStore::connect(args).await?;
    store.ping().await?;
    store.disconnect().await
}
