//! Timestamp and date generators relative to a reference instant.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;

/// Random timestamp in `[now - window, now]`, with second precision.
pub fn datetime_within<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
    window: Duration,
) -> DateTime<Utc> {
    let end_ts = now.timestamp();
    let start_ts = end_ts - window.num_seconds().max(0);
    let random_ts = rng.gen_range(start_ts..=end_ts);
    DateTime::from_timestamp(random_ts, 0).unwrap_or(now)
}

/// Random calendar date in `[today - window, today]`.
pub fn date_within<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
    window: Duration,
) -> NaiveDate {
    let today = now.date_naive();
    let days = window.num_days().max(0);
    let back = rng.gen_range(0..=days);
    today - Duration::days(back)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_datetime_within_window() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = reference();
        for _ in 0..200 {
            let dt = datetime_within(&mut rng, now, Duration::days(30));
            assert!(dt <= now);
            assert!(dt >= now - Duration::days(30));
        }
    }

    #[test]
    fn test_zero_window_is_now() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = reference();
        assert_eq!(datetime_within(&mut rng, now, Duration::zero()), now);
    }

    #[test]
    fn test_date_within_window() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = reference();
        for _ in 0..200 {
            let d = date_within(&mut rng, now, Duration::days(5 * 365));
            assert!(d <= now.date_naive());
            assert!(d >= now.date_naive() - Duration::days(5 * 365));
        }
    }
}
