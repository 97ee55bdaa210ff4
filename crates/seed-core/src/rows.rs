//! Row types for each generated entity.
//!
//! Rows are plain data: they are produced by the generator, handed to a
//! [`crate::SeedStore`] for one batch insert and then dropped.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub country: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
}

/// A row of the `products` table.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category_id: u64,
    pub stock_quantity: u32,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
    pub weight: Decimal,
    pub dimensions: String,
    pub brand: String,
    pub sku: String,
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
    BankTransfer,
    CashOnDelivery,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::Paypal,
        PaymentMethod::BankTransfer,
        PaymentMethod::CashOnDelivery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::CashOnDelivery => "cash_on_delivery",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Pending,
        PaymentStatus::Paid,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

/// A row of the `orders` table.
///
/// `total_amount` is the sum of the `total_price` of the order's items,
/// rounded to two decimal places, at generation time.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub id: u64,
    pub user_id: u64,
    pub order_date: DateTime<Utc>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row of the `order_items` table.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRow {
    pub order_id: u64,
    pub product_id: u64,
    pub quantity: u32,
    pub price_per_unit: Decimal,
    pub total_price: Decimal,
}

/// A row of the `reviews` table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRow {
    pub user_id: u64,
    pub product_id: u64,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_verified: bool,
}

/// A row of the `user_sessions` table.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRow {
    pub user_id: u64,
    pub session_token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
    pub ip_address: String,
    pub user_agent: String,
}

/// A row of the wide-column `performance_test` table.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRow {
    pub test_data: String,
    pub number_value: i64,
    pub decimal_value: Decimal,
    pub date_value: NaiveDate,
    pub datetime_value: DateTime<Utc>,
    pub random_string: String,
    pub json_data: serde_json::Value,
    pub blob_data: Vec<u8>,
}
