//! Small sampling primitives shared by the row builders.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Boolean sampler with a skewed, non-uniform distribution.
///
/// A uniform draw is compared against `threshold` first. Below the threshold
/// the result is a fair coin flip, otherwise it is `fallback`. With
/// `threshold = 0.05` and `fallback = true` this yields `true` 97.5% of the
/// time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkewedBool {
    threshold: f64,
    fallback: bool,
}

impl SkewedBool {
    /// Create a sampler. Thresholds outside `[0, 1]` behave like the
    /// nearest bound.
    pub const fn new(threshold: f64, fallback: bool) -> Self {
        Self {
            threshold,
            fallback,
        }
    }

    /// Draw one value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        if rng.gen::<f64>() < self.threshold {
            rng.gen_bool(0.5)
        } else {
            self.fallback
        }
    }

    /// Probability that [`Self::sample`] returns `true`.
    pub fn true_probability(&self) -> f64 {
        let threshold = self.threshold.clamp(0.0, 1.0);
        let coin = threshold * 0.5;
        if self.fallback {
            coin + (1.0 - threshold)
        } else {
            coin
        }
    }
}

/// Non-empty set of values that foreign keys are drawn from uniformly.
#[derive(Debug, Clone)]
pub struct ReferencePool<T> {
    values: Vec<T>,
}

impl<T> ReferencePool<T> {
    /// Build a pool, or `None` when there is nothing to reference.
    pub fn new(values: Vec<T>) -> Option<Self> {
        if values.is_empty() {
            None
        } else {
            Some(Self { values })
        }
    }

    /// Pick one value uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        &self.values[rng.gen_range(0..self.values.len())]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Never true for a constructed pool.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.values.contains(value)
    }
}

/// Random string of ASCII letters and digits.
pub fn random_alphanumeric<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

/// Pick one element of a non-empty constant list.
pub(crate) fn pick_from<'a, T, R: Rng + ?Sized>(rng: &mut R, values: &'a [T]) -> &'a T {
    &values[rng.gen_range(0..values.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_true_probability() {
        assert!((SkewedBool::new(0.05, true).true_probability() - 0.975).abs() < 1e-12);
        assert!((SkewedBool::new(0.7, false).true_probability() - 0.35).abs() < 1e-12);
        assert!((SkewedBool::new(0.8, false).true_probability() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_is_clamped() {
        assert_eq!(SkewedBool::new(-1.0, true).true_probability(), 1.0);
        assert_eq!(SkewedBool::new(2.0, true).true_probability(), 0.5);
    }

    #[test]
    fn test_empirical_skew_matches() {
        let mut rng = StdRng::seed_from_u64(42);
        let sampler = SkewedBool::new(0.7, false);
        let draws = 20_000;
        let trues = (0..draws).filter(|_| sampler.sample(&mut rng)).count();
        let freq = trues as f64 / draws as f64;
        assert!((freq - 0.35).abs() < 0.02, "frequency was {freq}");
    }

    #[test]
    fn test_zero_threshold_always_fallback() {
        let mut rng = StdRng::seed_from_u64(7);
        let sampler = SkewedBool::new(0.0, true);
        assert!((0..1000).all(|_| sampler.sample(&mut rng)));
    }

    #[test]
    fn test_empty_pool_is_rejected() {
        assert!(ReferencePool::<u64>::new(vec![]).is_none());
    }

    #[test]
    fn test_pool_picks_members() {
        let mut rng = StdRng::seed_from_u64(1);
        let pool = ReferencePool::new(vec![3u64, 5, 8]).unwrap();
        for _ in 0..100 {
            assert!(pool.contains(pool.pick(&mut rng)));
        }
    }

    #[test]
    fn test_random_alphanumeric() {
        let mut rng = StdRng::seed_from_u64(9);
        let s = random_alphanumeric(&mut rng, 64);
        assert_eq!(s.len(), 64);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
