//! CLI argument definitions for the target data volumes.

use clap::Args;

/// Target row counts per entity plus the optional RNG seed.
///
/// Every option can also be supplied through the environment variable
/// named in its `env` attribute.
#[derive(Args, Clone, Debug)]
pub struct PopulateArgs {
    /// Number of users to generate
    #[arg(long, env = "USERS_COUNT", default_value = "10000")]
    pub users_count: u64,

    /// Number of products to generate
    #[arg(long, env = "PRODUCTS_COUNT", default_value = "5000")]
    pub products_count: u64,

    /// Number of orders to generate (each with 1-5 items)
    #[arg(long, env = "ORDERS_COUNT", default_value = "25000")]
    pub orders_count: u64,

    /// Number of reviews to generate
    #[arg(long, env = "REVIEWS_COUNT", default_value = "15000")]
    pub reviews_count: u64,

    /// Number of performance_test records to generate
    #[arg(long, env = "PERFORMANCE_RECORDS", default_value = "100000")]
    pub performance_records: u64,

    /// Number of user sessions to generate (default: half the user count)
    #[arg(long, env = "SESSIONS_COUNT")]
    pub sessions_count: Option<u64>,

    /// Random seed for reproducible data (default: seeded from entropy)
    #[arg(long, env = "SEED")]
    pub seed: Option<u64>,
}

impl PopulateArgs {
    /// Sessions to generate: the explicit count, or half the users.
    pub fn sessions(&self) -> u64 {
        self.sessions_count.unwrap_or(self.users_count / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        populate: PopulateArgs,
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::try_parse_from(["test"]).unwrap();
        assert_eq!(cli.populate.users_count, 10_000);
        assert_eq!(cli.populate.products_count, 5_000);
        assert_eq!(cli.populate.orders_count, 25_000);
        assert_eq!(cli.populate.reviews_count, 15_000);
        assert_eq!(cli.populate.performance_records, 100_000);
        assert_eq!(cli.populate.sessions(), 5_000);
    }

    #[test]
    fn test_explicit_sessions_count() {
        let cli = TestCli::try_parse_from(["test", "--users-count", "11", "--sessions-count", "3"])
            .unwrap();
        assert_eq!(cli.populate.sessions(), 3);
    }

    #[test]
    fn test_sessions_default_rounds_down() {
        let cli = TestCli::try_parse_from(["test", "--users-count", "11"]).unwrap();
        assert_eq!(cli.populate.sessions(), 5);
    }
}
