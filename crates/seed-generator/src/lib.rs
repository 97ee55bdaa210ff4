//! Synthetic row generator for the mysql-perf-seed data loader.
//!
//! This crate provides the [`DataGenerator`] which builds one row at a time
//! for every entity table. Foreign keys are drawn from [`ReferencePool`]s the
//! caller fetched from the database, so every generated row references
//! something that exists.
//!
//! # Example
//!
//! ```rust
//! use seed_generator::{DataGenerator, ReferencePool};
//!
//! let mut generator = DataGenerator::new(Some(42));
//! let user = generator.user(1);
//! assert_eq!(user.username, "user_1");
//!
//! let users = ReferencePool::new(vec![user.id]).unwrap();
//! let session = generator.session(&users);
//! assert_eq!(session.user_id, 1);
//! ```
//!
//! # Randomized field policies
//!
//! - Flags such as `is_active` use a [`SkewedBool`] rather than a fair coin
//! - Review comments come from a template pool chosen by rating band
//! - Money amounts are exact two-decimal `rust_decimal::Decimal` values

pub mod generator;
pub mod performance;
pub mod reviews;
pub mod sampler;
pub mod time;

// Re-exports for convenience
pub use generator::{DataGenerator, ACCOUNT_ACTIVE, REVIEW_VERIFIED, SESSION_ACTIVE};
pub use reviews::{comment_for_rating, RatingBand};
pub use sampler::{random_alphanumeric, ReferencePool, SkewedBool};
