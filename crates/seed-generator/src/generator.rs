//! Main data generator producing one row per call for each entity.

use chrono::{DateTime, Duration, Utc};
use fake::faker::address::en::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::company::en::CatchPhrase;
use fake::faker::lorem::en::Paragraph;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use seed_core::{
    ActiveProduct, OrderItemRow, OrderRow, OrderStatus, PaymentMethod, PaymentStatus,
    PerformanceRow, ProductRow, ReviewRow, SessionRow, UserRow,
};
use sha2::{Digest, Sha256};
use std::net::Ipv4Addr;

use crate::performance::{blob_payload, json_payload};
use crate::reviews::comment_for_rating;
use crate::sampler::{pick_from, random_alphanumeric, ReferencePool, SkewedBool};
use crate::time::{date_within, datetime_within};

/// `is_active` for users and products: 97.5% true.
pub const ACCOUNT_ACTIVE: SkewedBool = SkewedBool::new(0.05, true);
/// `is_verified` for reviews: 35% true.
pub const REVIEW_VERIFIED: SkewedBool = SkewedBool::new(0.7, false);
/// `is_active` for sessions: 40% true.
pub const SESSION_ACTIVE: SkewedBool = SkewedBool::new(0.8, false);

/// Probability that a user has a `last_login` timestamp.
const LAST_LOGIN_PROBABILITY: f64 = 0.8;

pub const COUNTRIES: [&str; 10] = [
    "USA",
    "Canada",
    "UK",
    "Germany",
    "France",
    "Japan",
    "Australia",
    "Brazil",
    "India",
    "China",
];

pub const BRANDS: [&str; 10] = [
    "TechCorp",
    "InnovateCo",
    "QualityBrand",
    "BestChoice",
    "PremiumLine",
    "ValueMax",
    "ProSeries",
    "EliteGoods",
    "SmartTech",
    "EcoFriendly",
];

pub const USER_AGENTS: [&str; 5] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 15_0 like Mac OS X) AppleWebKit/605.1.15",
    "Mozilla/5.0 (Android 11; Mobile; rv:68.0) Gecko/68.0 Firefox/88.0",
];

const SESSION_TOKEN_LEN: usize = 64;
const RANDOM_STRING_LEN: usize = 50;

/// Data generator for every entity table.
///
/// Timestamps are drawn relative to a reference instant captured at
/// construction, so a seeded generator with a fixed reference time is fully
/// deterministic.
pub struct DataGenerator {
    rng: StdRng,
    now: DateTime<Utc>,
}

impl DataGenerator {
    /// Create a generator. Without a seed the RNG is seeded from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            now: Utc::now(),
        }
    }

    /// Replace the reference instant that relative timestamps are drawn from.
    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn reference_time(&self) -> DateTime<Utc> {
        self.now
    }

    /// Build the user with primary key `id`.
    pub fn user(&mut self, id: u64) -> UserRow {
        let password_hash = self.password_hash();
        let first_name: String = FirstName().fake_with_rng(&mut self.rng);
        let last_name: String = LastName().fake_with_rng(&mut self.rng);
        let age = self.rng.gen_range(18..=80);
        let country = pick_from(&mut self.rng, &COUNTRIES).to_string();
        let city: String = CityName().fake_with_rng(&mut self.rng);
        let created_at = self.within(Duration::days(2 * 365));
        let is_active = ACCOUNT_ACTIVE.sample(&mut self.rng);
        let last_login = if self.rng.gen_bool(LAST_LOGIN_PROBABILITY) {
            Some(self.within(Duration::days(30)))
        } else {
            None
        };

        UserRow {
            id,
            username: format!("user_{id}"),
            email: format!("user_{id}@example.com"),
            password_hash,
            first_name,
            last_name,
            age,
            country,
            city,
            created_at,
            is_active,
            last_login,
        }
    }

    /// Build the product with primary key `id` in one of `categories`.
    pub fn product(&mut self, id: u64, categories: &ReferencePool<u64>) -> ProductRow {
        let catch_phrase: String = CatchPhrase().fake_with_rng(&mut self.rng);
        let description = self.text(200);
        let price = self.cents(999, 99_999);
        let category_id = *categories.pick(&mut self.rng);
        let stock_quantity = self.rng.gen_range(0..=1000);
        let created_at = self.within(Duration::days(365));
        let is_active = ACCOUNT_ACTIVE.sample(&mut self.rng);
        let weight = self.cents(10, 5_000);
        let dimensions = format!(
            "{}x{}x{}cm",
            self.rng.gen_range(10..=200),
            self.rng.gen_range(10..=200),
            self.rng.gen_range(10..=200)
        );
        let brand = pick_from(&mut self.rng, &BRANDS).to_string();

        ProductRow {
            id,
            name: format!("Product {id}: {catch_phrase}"),
            description,
            price,
            category_id,
            stock_quantity,
            created_at,
            is_active,
            weight,
            dimensions,
            brand,
            sku: format!("SKU{id:06}"),
        }
    }

    /// Build the order with primary key `id` and its 1 to 5 items.
    ///
    /// The order total is the exact sum of the item totals, rounded to two
    /// decimal places.
    pub fn order(
        &mut self,
        id: u64,
        users: &ReferencePool<u64>,
        products: &ReferencePool<ActiveProduct>,
    ) -> (OrderRow, Vec<OrderItemRow>) {
        let user_id = *users.pick(&mut self.rng);

        let item_count = self.rng.gen_range(1..=5);
        let mut items = Vec::with_capacity(item_count);
        let mut total = Decimal::ZERO;

        for _ in 0..item_count {
            let product = *products.pick(&mut self.rng);
            let quantity: u32 = self.rng.gen_range(1..=3);
            let total_price = product.price * Decimal::from(quantity);
            total += total_price;

            items.push(OrderItemRow {
                order_id: id,
                product_id: product.id,
                quantity,
                price_per_unit: product.price,
                total_price,
            });
        }

        let order = OrderRow {
            id,
            user_id,
            order_date: self.within(Duration::days(365)),
            total_amount: total.round_dp(2),
            status: *pick_from(&mut self.rng, &OrderStatus::ALL),
            shipping_address: self.address(),
            payment_method: *pick_from(&mut self.rng, &PaymentMethod::ALL),
            payment_status: *pick_from(&mut self.rng, &PaymentStatus::ALL),
            created_at: self.within(Duration::days(365)),
            updated_at: self.within(Duration::days(365)),
        };

        (order, items)
    }

    /// Build a review by one of `users` for one of `products`.
    pub fn review(
        &mut self,
        users: &ReferencePool<u64>,
        products: &ReferencePool<u64>,
    ) -> ReviewRow {
        let user_id = *users.pick(&mut self.rng);
        let product_id = *products.pick(&mut self.rng);
        let rating = self.rng.gen_range(1..=5);
        let comment = comment_for_rating(&mut self.rng, rating).to_string();

        ReviewRow {
            user_id,
            product_id,
            rating,
            comment,
            created_at: self.within(Duration::days(365)),
            updated_at: self.within(Duration::days(365)),
            is_verified: REVIEW_VERIFIED.sample(&mut self.rng),
        }
    }

    /// Build a session for one of `users`.
    pub fn session(&mut self, users: &ReferencePool<u64>) -> SessionRow {
        let user_id = *users.pick(&mut self.rng);
        let session_token = random_alphanumeric(&mut self.rng, SESSION_TOKEN_LEN);
        let created_at = self.within(Duration::days(30));
        let expires_at = created_at + Duration::hours(self.rng.gen_range(1..=24));
        let is_active = SESSION_ACTIVE.sample(&mut self.rng);
        let ip_address = Ipv4Addr::from(self.rng.gen::<u32>()).to_string();
        let user_agent = pick_from(&mut self.rng, &USER_AGENTS).to_string();

        SessionRow {
            user_id,
            session_token,
            created_at,
            expires_at,
            is_active,
            ip_address,
            user_agent,
        }
    }

    /// Build the `record_number`-th performance record (1-based).
    pub fn performance_record(&mut self, record_number: u64) -> PerformanceRow {
        let text = self.text(100);

        PerformanceRow {
            test_data: format!("Performance test record {record_number}: {text}"),
            number_value: self.rng.gen_range(1..=1_000_000),
            decimal_value: self.cents(1, 999_999),
            date_value: date_within(&mut self.rng, self.now, Duration::days(5 * 365)),
            datetime_value: self.within(Duration::days(2 * 365)),
            random_string: random_alphanumeric(&mut self.rng, RANDOM_STRING_LEN),
            json_data: json_payload(&mut self.rng, record_number),
            blob_data: blob_payload(&mut self.rng),
        }
    }

    fn within(&mut self, window: Duration) -> DateTime<Utc> {
        datetime_within(&mut self.rng, self.now, window)
    }

    /// Uniform two-decimal amount between `min` and `max` cents.
    fn cents(&mut self, min: i64, max: i64) -> Decimal {
        Decimal::new(self.rng.gen_range(min..=max), 2)
    }

    fn password_hash(&mut self) -> String {
        let secret: [u8; 32] = self.rng.gen();
        hex::encode(Sha256::digest(secret))
    }

    fn address(&mut self) -> String {
        let number: String = BuildingNumber().fake_with_rng(&mut self.rng);
        let street: String = StreetName().fake_with_rng(&mut self.rng);
        let city: String = CityName().fake_with_rng(&mut self.rng);
        let state: String = StateAbbr().fake_with_rng(&mut self.rng);
        let zip: String = ZipCode().fake_with_rng(&mut self.rng);
        format!("{number} {street}\n{city}, {state} {zip}")
    }

    /// Lorem text cut at a word boundary to at most `max_chars` characters.
    fn text(&mut self, max_chars: usize) -> String {
        let paragraph: String = Paragraph(1..3).fake_with_rng(&mut self.rng);
        truncate_words(&paragraph, max_chars)
    }
}

fn truncate_words(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut out = String::new();
    for word in text.split_whitespace() {
        let extra = if out.is_empty() { 0 } else { 1 };
        // Leave room for the closing period.
        if out.chars().count() + extra + word.chars().count() + 1 > max_chars {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    let trimmed = out.trim_end_matches(|c: char| !c.is_alphanumeric());
    format!("{trimmed}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn generator(seed: u64) -> DataGenerator {
        DataGenerator::new(Some(seed))
            .with_reference_time(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap())
    }

    fn products() -> ReferencePool<ActiveProduct> {
        ReferencePool::new(vec![
            ActiveProduct {
                id: 1,
                price: Decimal::new(1999, 2),
            },
            ActiveProduct {
                id: 2,
                price: Decimal::new(333, 2),
            },
            ActiveProduct {
                id: 3,
                price: Decimal::new(99_999, 2),
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_user_fields() {
        let mut generator = generator(42);
        let user = generator.user(7);

        assert_eq!(user.username, "user_7");
        assert_eq!(user.email, "user_7@example.com");
        assert_eq!(user.password_hash.len(), 64);
        assert!(user.password_hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert!((18..=80).contains(&user.age));
        assert!(COUNTRIES.contains(&user.country.as_str()));
        assert!(user.created_at <= generator.reference_time());
    }

    #[test]
    fn test_product_fields() {
        let mut generator = generator(42);
        let categories = ReferencePool::new(vec![10u64, 20]).unwrap();
        let product = generator.product(42, &categories);

        assert!(product.name.starts_with("Product 42: "));
        assert!(product.name.len() > "Product 42: ".len());
        assert_eq!(product.sku, "SKU000042");
        assert!(product.description.chars().count() <= 200);
        assert!(product.price >= Decimal::new(999, 2));
        assert!(product.price <= Decimal::new(99_999, 2));
        assert_eq!(product.price.scale(), 2);
        assert!(categories.contains(&product.category_id));
        assert!(BRANDS.contains(&product.brand.as_str()));
        assert!(product.dimensions.ends_with("cm"));
    }

    #[test]
    fn test_order_total_matches_items() {
        let mut generator = generator(42);
        let users = ReferencePool::new(vec![1u64, 2, 3]).unwrap();
        let products = products();

        for id in 1..=200 {
            let (order, items) = generator.order(id, &users, &products);

            assert!((1..=5).contains(&items.len()));
            let sum: Decimal = items.iter().map(|i| i.total_price).sum();
            assert_eq!(order.total_amount, sum.round_dp(2));

            for item in &items {
                assert_eq!(item.order_id, order.id);
                assert!((1..=3).contains(&item.quantity));
                assert_eq!(item.total_price, item.price_per_unit * Decimal::from(item.quantity));
                assert!([1, 2, 3].contains(&item.product_id));
            }
            assert!(users.contains(&order.user_id));
        }
    }

    #[test]
    fn test_review_comment_matches_rating() {
        let mut generator = generator(42);
        let users = ReferencePool::new(vec![1u64]).unwrap();
        let products = ReferencePool::new(vec![5u64]).unwrap();

        for _ in 0..200 {
            let review = generator.review(&users, &products);
            assert!((1..=5).contains(&review.rating));
            let pool = crate::reviews::RatingBand::of(review.rating).templates();
            assert!(pool.contains(&review.comment.as_str()));
        }
    }

    #[test]
    fn test_session_fields() {
        let mut generator = generator(42);
        let users = ReferencePool::new(vec![4u64]).unwrap();
        let session = generator.session(&users);

        assert_eq!(session.user_id, 4);
        assert_eq!(session.session_token.len(), 64);
        let lifetime = session.expires_at - session.created_at;
        assert!(lifetime >= Duration::hours(1) && lifetime <= Duration::hours(24));
        assert!(session.ip_address.parse::<Ipv4Addr>().is_ok());
        assert!(USER_AGENTS.contains(&session.user_agent.as_str()));
    }

    #[test]
    fn test_performance_record_fields() {
        let mut generator = generator(42);
        let record = generator.performance_record(3);

        assert!(record.test_data.starts_with("Performance test record 3: "));
        assert!((1..=1_000_000).contains(&record.number_value));
        assert!(record.decimal_value >= Decimal::new(1, 2));
        assert_eq!(record.random_string.len(), 50);
        assert_eq!(record.json_data["id"], 3);
        assert!((10..=100).contains(&record.blob_data.len()));
    }

    #[test]
    fn test_deterministic_generation() {
        let mut gen1 = generator(42);
        let mut gen2 = generator(42);

        assert_eq!(gen1.user(1), gen2.user(1));
        assert_eq!(gen1.performance_record(1), gen2.performance_record(1));
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut gen1 = generator(1);
        let mut gen2 = generator(2);
        assert_ne!(gen1.user(1).password_hash, gen2.user(1).password_hash);
    }

    #[test]
    fn test_truncate_words() {
        assert_eq!(truncate_words("short text", 200), "short text");
        let long = "alpha beta gamma delta epsilon zeta eta theta";
        let cut = truncate_words(long, 20);
        assert!(cut.chars().count() <= 20);
        assert!(cut.ends_with('.'));
        assert!(cut.starts_with("alpha beta"));
    }
}
