//! Review comment templates, partitioned by rating band.

use rand::Rng;

use crate::sampler::pick_from;

pub const POSITIVE_COMMENTS: [&str; 5] = [
    "Great product! Really satisfied with the quality.",
    "Good value for money. Would recommend.",
    "Excellent customer service and fast delivery.",
    "Product quality could be better.",
    "Amazing! Exceeded my expectations.",
];

pub const NEUTRAL_COMMENTS: [&str; 2] = [
    "Decent product but took too long to arrive.",
    "Perfect! Exactly what I was looking for.",
];

pub const NEGATIVE_COMMENTS: [&str; 3] = [
    "Not bad, but there are better alternatives.",
    "Outstanding quality and great price.",
    "Disappointed with the product quality.",
];

/// Sentiment band a rating falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingBand {
    Positive,
    Neutral,
    Negative,
}

impl RatingBand {
    /// 4 and above is positive, exactly 3 is neutral, anything lower negative.
    pub fn of(rating: u8) -> Self {
        match rating {
            r if r >= 4 => RatingBand::Positive,
            3 => RatingBand::Neutral,
            _ => RatingBand::Negative,
        }
    }

    pub fn templates(&self) -> &'static [&'static str] {
        match self {
            RatingBand::Positive => &POSITIVE_COMMENTS,
            RatingBand::Neutral => &NEUTRAL_COMMENTS,
            RatingBand::Negative => &NEGATIVE_COMMENTS,
        }
    }
}

/// Pick a comment from the template pool matching `rating`.
pub fn comment_for_rating<R: Rng + ?Sized>(rng: &mut R, rating: u8) -> &'static str {
    *pick_from(rng, RatingBand::of(rating).templates())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rating_bands() {
        assert_eq!(RatingBand::of(5), RatingBand::Positive);
        assert_eq!(RatingBand::of(4), RatingBand::Positive);
        assert_eq!(RatingBand::of(3), RatingBand::Neutral);
        assert_eq!(RatingBand::of(2), RatingBand::Negative);
        assert_eq!(RatingBand::of(1), RatingBand::Negative);
    }

    #[test]
    fn test_comment_comes_from_matching_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        for rating in 1..=5u8 {
            for _ in 0..50 {
                let comment = comment_for_rating(&mut rng, rating);
                let pool = RatingBand::of(rating).templates();
                assert!(pool.contains(&comment), "{comment:?} not in pool for {rating}");
            }
        }
    }

    #[test]
    fn test_pools_are_disjoint() {
        for c in POSITIVE_COMMENTS {
            assert!(!NEUTRAL_COMMENTS.contains(&c));
            assert!(!NEGATIVE_COMMENTS.contains(&c));
        }
        for c in NEUTRAL_COMMENTS {
            assert!(!NEGATIVE_COMMENTS.contains(&c));
        }
    }
}
