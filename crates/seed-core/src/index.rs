//! Supplementary secondary indexes created after the bulk load.

use crate::table::Table;

/// A secondary index definition.
///
/// `parts` are key parts in SQL syntax: plain column names or, for functional
/// indexes, a parenthesised expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDefinition {
    pub name: &'static str,
    pub table: Table,
    pub parts: &'static [&'static str],
}

/// Indexes created by the post-load maintenance step, in creation order.
pub const ADDITIONAL_INDEXES: [IndexDefinition; 7] = [
    IndexDefinition {
        name: "idx_performance_json",
        table: Table::PerformanceTest,
        parts: &["(CAST(json_data->>'$.category' AS CHAR(8)) COLLATE utf8mb4_bin)"],
    },
    IndexDefinition {
        name: "idx_orders_date_status",
        table: Table::Orders,
        parts: &["order_date", "status"],
    },
    IndexDefinition {
        name: "idx_reviews_rating_date",
        table: Table::Reviews,
        parts: &["rating", "created_at"],
    },
    IndexDefinition {
        name: "idx_users_country_age",
        table: Table::Users,
        parts: &["country", "age"],
    },
    IndexDefinition {
        name: "idx_products_price_category",
        table: Table::Products,
        parts: &["price", "category_id"],
    },
    IndexDefinition {
        name: "idx_order_items_product_quantity",
        table: Table::OrderItems,
        parts: &["product_id", "quantity"],
    },
    IndexDefinition {
        name: "idx_sessions_expires_active",
        table: Table::UserSessions,
        parts: &["expires_at", "is_active"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_index_names_are_unique() {
        let names: HashSet<_> = ADDITIONAL_INDEXES.iter().map(|i| i.name).collect();
        assert_eq!(names.len(), ADDITIONAL_INDEXES.len());
    }

    #[test]
    fn test_every_index_has_parts() {
        assert!(ADDITIONAL_INDEXES.iter().all(|i| !i.parts.is_empty()));
    }
}
