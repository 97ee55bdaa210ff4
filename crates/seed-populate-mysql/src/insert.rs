//! Batched INSERT logic for MySQL population.
//!
//! Each batch becomes a single multi-row `INSERT ... VALUES (...), (...)`
//! statement with positional parameters.

use crate::error::MySQLSeedError;
use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use mysql_async::{prelude::*, Params, Transaction, Value};
use rust_decimal::Decimal;
use seed_core::{
    OrderItemRow, OrderRow, PerformanceRow, ProductRow, ReviewRow, SessionRow, Table, UserRow,
};

/// A row type that maps onto the columns of one table.
pub trait InsertRow {
    const TABLE: Table;
    /// Columns written, in parameter order.
    const COLUMNS: &'static [&'static str];

    /// Append this row's values in `COLUMNS` order.
    fn push_params(&self, params: &mut Vec<Value>);
}

/// Build a multi-row INSERT statement with `row_count` placeholder groups.
pub fn build_insert_sql(table: Table, columns: &[&str], row_count: usize) -> String {
    let col_placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
    let row_template = format!("({})", col_placeholders.join(", "));
    let rows_template: Vec<&str> = (0..row_count).map(|_| row_template.as_str()).collect();

    format!(
        "INSERT INTO `{}` ({}) VALUES {}",
        table.name(),
        columns
            .iter()
            .map(|c| format!("`{c}`"))
            .collect::<Vec<_>>()
            .join(", "),
        rows_template.join(", ")
    )
}

/// Positional parameters for `rows`, row-major.
pub fn insert_params<R: InsertRow>(rows: &[R]) -> Vec<Value> {
    let mut params = Vec::with_capacity(rows.len() * R::COLUMNS.len());
    for row in rows {
        row.push_params(&mut params);
    }
    params
}

/// Insert a batch of rows inside an open transaction.
pub async fn insert_batch<R: InsertRow + Sync>(
    tx: &mut Transaction<'_>,
    rows: &[R],
) -> Result<u64, MySQLSeedError> {
    if rows.is_empty() {
        return Ok(0);
    }

    let sql = build_insert_sql(R::TABLE, R::COLUMNS, rows.len());
    tx.exec_drop(&sql, Params::Positional(insert_params(rows)))
        .await?;

    Ok(rows.len() as u64)
}

fn datetime(dt: &DateTime<Utc>) -> Value {
    Value::Date(
        dt.year() as u16,
        dt.month() as u8,
        dt.day() as u8,
        dt.hour() as u8,
        dt.minute() as u8,
        dt.second() as u8,
        dt.nanosecond() / 1000, // MySQL uses microseconds
    )
}

fn date(d: &NaiveDate) -> Value {
    Value::Date(d.year() as u16, d.month() as u8, d.day() as u8, 0, 0, 0, 0)
}

// Decimal - sent as text so MySQL parses it exactly
fn decimal(d: &Decimal) -> Value {
    Value::Bytes(d.to_string().into_bytes())
}

fn text(s: &str) -> Value {
    Value::Bytes(s.as_bytes().to_vec())
}

// MySQL uses TINYINT(1)
fn boolean(b: bool) -> Value {
    Value::Int(if b { 1 } else { 0 })
}

fn id(v: u64) -> Value {
    Value::UInt(v)
}

impl InsertRow for UserRow {
    const TABLE: Table = Table::Users;
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "username",
        "email",
        "password_hash",
        "first_name",
        "last_name",
        "age",
        "country",
        "city",
        "created_at",
        "is_active",
        "last_login",
    ];

    fn push_params(&self, params: &mut Vec<Value>) {
        params.extend([
            id(self.id),
            text(&self.username),
            text(&self.email),
            text(&self.password_hash),
            text(&self.first_name),
            text(&self.last_name),
            Value::Int(self.age.into()),
            text(&self.country),
            text(&self.city),
            datetime(&self.created_at),
            boolean(self.is_active),
            self.last_login.as_ref().map_or(Value::NULL, datetime),
        ]);
    }
}

impl InsertRow for ProductRow {
    const TABLE: Table = Table::Products;
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "description",
        "price",
        "category_id",
        "stock_quantity",
        "created_at",
        "is_active",
        "weight",
        "dimensions",
        "brand",
        "sku",
    ];

    fn push_params(&self, params: &mut Vec<Value>) {
        params.extend([
            id(self.id),
            text(&self.name),
            text(&self.description),
            decimal(&self.price),
            id(self.category_id),
            Value::Int(self.stock_quantity.into()),
            datetime(&self.created_at),
            boolean(self.is_active),
            decimal(&self.weight),
            text(&self.dimensions),
            text(&self.brand),
            text(&self.sku),
        ]);
    }
}

impl InsertRow for OrderRow {
    const TABLE: Table = Table::Orders;
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "user_id",
        "order_date",
        "total_amount",
        "status",
        "shipping_address",
        "payment_method",
        "payment_status",
        "created_at",
        "updated_at",
    ];

    fn push_params(&self, params: &mut Vec<Value>) {
        params.extend([
            id(self.id),
            id(self.user_id),
            datetime(&self.order_date),
            decimal(&self.total_amount),
            text(self.status.as_str()),
            text(&self.shipping_address),
            text(self.payment_method.as_str()),
            text(self.payment_status.as_str()),
            datetime(&self.created_at),
            datetime(&self.updated_at),
        ]);
    }
}

impl InsertRow for OrderItemRow {
    const TABLE: Table = Table::OrderItems;
    const COLUMNS: &'static [&'static str] = &[
        "order_id",
        "product_id",
        "quantity",
        "price_per_unit",
        "total_price",
    ];

    fn push_params(&self, params: &mut Vec<Value>) {
        params.extend([
            id(self.order_id),
            id(self.product_id),
            Value::Int(self.quantity.into()),
            decimal(&self.price_per_unit),
            decimal(&self.total_price),
        ]);
    }
}

impl InsertRow for ReviewRow {
    const TABLE: Table = Table::Reviews;
    const COLUMNS: &'static [&'static str] = &[
        "user_id",
        "product_id",
        "rating",
        "comment",
        "created_at",
        "updated_at",
        "is_verified",
    ];

    fn push_params(&self, params: &mut Vec<Value>) {
        params.extend([
            id(self.user_id),
            id(self.product_id),
            Value::Int(self.rating.into()),
            text(&self.comment),
            datetime(&self.created_at),
            datetime(&self.updated_at),
            boolean(self.is_verified),
        ]);
    }
}

impl InsertRow for SessionRow {
    const TABLE: Table = Table::UserSessions;
    const COLUMNS: &'static [&'static str] = &[
        "user_id",
        "session_token",
        "created_at",
        "expires_at",
        "is_active",
        "ip_address",
        "user_agent",
    ];

    fn push_params(&self, params: &mut Vec<Value>) {
        params.extend([
            id(self.user_id),
            text(&self.session_token),
            datetime(&self.created_at),
            datetime(&self.expires_at),
            boolean(self.is_active),
            text(&self.ip_address),
            text(&self.user_agent),
        ]);
    }
}

impl InsertRow for PerformanceRow {
    const TABLE: Table = Table::PerformanceTest;
    const COLUMNS: &'static [&'static str] = &[
        "test_data",
        "number_value",
        "decimal_value",
        "date_value",
        "datetime_value",
        "random_string",
        "json_data",
        "blob_data",
    ];

    fn push_params(&self, params: &mut Vec<Value>) {
        params.extend([
            text(&self.test_data),
            Value::Int(self.number_value),
            decimal(&self.decimal_value),
            date(&self.date_value),
            datetime(&self.datetime_value),
            text(&self.random_string),
            text(&self.json_data.to_string()),
            Value::Bytes(self.blob_data.clone()),
        ]);
    }
}
