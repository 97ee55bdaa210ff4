//! Catalogue of the tables the loader touches.

use std::fmt;

/// A table in the performance-test database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Products,
    Orders,
    OrderItems,
    Reviews,
    Categories,
    UserSessions,
    PerformanceTest,
}

impl Table {
    /// Every table, in the order statistics and counts are reported.
    pub const ALL: [Table; 8] = [
        Table::Users,
        Table::Products,
        Table::Orders,
        Table::OrderItems,
        Table::Reviews,
        Table::Categories,
        Table::UserSessions,
        Table::PerformanceTest,
    ];

    /// SQL name of the table.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Products => "products",
            Table::Orders => "orders",
            Table::OrderItems => "order_items",
            Table::Reviews => "reviews",
            Table::Categories => "categories",
            Table::UserSessions => "user_sessions",
            Table::PerformanceTest => "performance_test",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
