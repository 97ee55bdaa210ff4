//! Connector behaviour when no MySQL server is listening.

use clap::Parser;
use mysql_perf_seed::{get_database_connection, run_setup, wait_for_database, SeedConfig};

fn unreachable_config(retries: &str) -> SeedConfig {
    SeedConfig::try_parse_from([
        "mysql-perf-seed",
        "--mysql-host",
        "127.0.0.1",
        "--mysql-port",
        "1",
        "--mysql-password",
        "secret",
        "--connect-retries",
        retries,
        "--connect-retry-delay-secs",
        "0",
    ])
    .unwrap()
}

#[tokio::test]
async fn test_wait_for_database_gives_up() {
    let config = unreachable_config("2");
    assert!(!wait_for_database(&config).await);
}

#[tokio::test]
async fn test_connection_error_hides_password() {
    let config = unreachable_config("1");
    let err = match get_database_connection(&config).await {
        Ok(_) => panic!("connected to a closed port"),
        Err(e) => e,
    };

    let message = format!("{err:#}");
    assert!(message.contains("127.0.0.1:1"));
    assert!(!message.contains("secret"));
}

#[tokio::test]
async fn test_run_setup_fails_when_unreachable() {
    let config = unreachable_config("2");
    let err = match run_setup(&config).await {
        Ok(_) => panic!("setup succeeded without a database"),
        Err(e) => e,
    };

    let message = format!("{err:#}");
    assert!(message.contains("did not become reachable after 2 attempts"));
    assert!(!message.contains("secret"));
}
