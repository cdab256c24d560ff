// src/data/random.rs - Primitive generators over an injectable random source

//! Scalar random values used by every entity factory.
//!
//! All randomness flows through [`Generator`], which owns the RNG and the
//! reference instant date windows are anchored to. Tests build one with
//! [`Generator::seeded`] and a fixed anchor; the binary uses
//! [`Generator::from_entropy`].

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::money::{Currency, Money};
use crate::utils::Time;

/// Rejected arguments to a primitive generator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RandomError {
    #[error("invalid range [{min}, {max}]")]
    InvalidRange { min: String, max: String },
    #[error("no cent value lies between {min} and {max}")]
    EmptyCurrencyRange { min: f64, max: f64 },
    #[error("cannot pick from an empty collection")]
    EmptyCollection,
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
}

pub type RandomResult<T> = std::result::Result<T, RandomError>;

/// Largest cent magnitude an `f64` holds exactly (2^53)
const MAX_CENTS: f64 = 9_007_199_254_740_992.0;

/// Random source plus generation context
#[derive(Debug, Clone)]
pub struct Generator<R: Rng = StdRng> {
    rng: R,
    anchor: DateTime<Utc>,
    currency: Currency,
}

impl Generator<StdRng> {
    /// Deterministic generator; the anchor defaults to the current second
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator backed by OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Generator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            anchor: Time::now_secs(),
            currency: Currency::default(),
        }
    }

    /// Fix the instant "now" that history and horizon windows hang off
    pub fn with_anchor(mut self, anchor: DateTime<Utc>) -> Self {
        self.anchor = anchor;
        self
    }

    /// Move the anchor of a generator already in use
    pub fn set_anchor(&mut self, anchor: DateTime<Utc>) {
        self.anchor = anchor;
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Integer in `[min, max]`, both ends inclusive
    pub fn random_int(&mut self, min: i64, max: i64) -> RandomResult<i64> {
        if min > max {
            return Err(RandomError::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(self.rng.gen_range(min..=max))
    }

    /// Amount in `[min, max]` with cent precision
    ///
    /// The draw is made over whole cents between `ceil(min * 100)` and
    /// `floor(max * 100)`, so rounding can never push the result outside
    /// the requested bounds.
    pub fn random_currency(&mut self, min: f64, max: f64) -> RandomResult<f64> {
        self.random_money(min, max).map(|money| money.amount())
    }

    /// Like [`random_currency`](Self::random_currency), labelled with the generator's currency
    pub fn random_money(&mut self, min: f64, max: f64) -> RandomResult<Money> {
        let cents = self.random_cents(min, max)?;
        Ok(Money::from_cents(cents, self.currency))
    }

    fn random_cents(&mut self, min: f64, max: f64) -> RandomResult<i64> {
        let invalid = || RandomError::InvalidRange {
            min: min.to_string(),
            max: max.to_string(),
        };
        let representable = |v: f64| v.is_finite() && (v * 100.0).abs() <= MAX_CENTS;
        if !representable(min) || !representable(max) || min > max {
            return Err(invalid());
        }
        // Scaling by 100 is inexact (1.1 * 100 = 110.00000000000001), so
        // nudge each end until the cent value itself sits inside the bounds.
        let mut low = (min * 100.0).ceil() as i64;
        while let Some(prev) = low.checked_sub(1).filter(|c| *c as f64 / 100.0 >= min) {
            low = prev;
        }
        while (low as f64 / 100.0) < min {
            low = low.checked_add(1).ok_or_else(invalid)?;
        }
        let mut high = (max * 100.0).floor() as i64;
        while let Some(next) = high.checked_add(1).filter(|c| *c as f64 / 100.0 <= max) {
            high = next;
        }
        while (high as f64 / 100.0) > max {
            high = high.checked_sub(1).ok_or_else(invalid)?;
        }
        if low > high {
            return Err(RandomError::EmptyCurrencyRange { min, max });
        }
        Ok(self.rng.gen_range(low..=high))
    }

    /// Uniformly selected element; empty input is an error
    pub fn pick_one<'a, T>(&mut self, collection: &'a [T]) -> RandomResult<&'a T> {
        if collection.is_empty() {
            return Err(RandomError::EmptyCollection);
        }
        Ok(&collection[self.rng.gen_range(0..collection.len())])
    }

    /// Copying variant of [`pick_one`](Self::pick_one) for vocabulary tables
    pub fn pick<T: Copy>(&mut self, collection: &[T]) -> RandomResult<T> {
        self.pick_one(collection).copied()
    }

    /// Up to `amount` distinct elements, in random order
    pub fn sample<'a, T>(&mut self, collection: &'a [T], amount: usize) -> Vec<&'a T> {
        collection.choose_multiple(&mut self.rng, amount).collect()
    }

    /// Instant uniformly distributed in `[start, end]`, at whole-second resolution
    pub fn random_date(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RandomResult<DateTime<Utc>> {
        if start > end {
            return Err(RandomError::InvalidDateRange { start, end });
        }
        let offset = self.rng.gen_range(0..=(end - start).num_seconds());
        Ok(start + Duration::seconds(offset))
    }

    /// Instant within the last `days` days before the anchor
    pub fn date_in_past(&mut self, days: i64) -> RandomResult<DateTime<Utc>> {
        let end = self.anchor;
        self.random_date(end - Time::duration_days(days), end)
    }

    /// Instant within `[anchor - back_days, anchor + ahead_days]`
    pub fn date_around_anchor(
        &mut self,
        back_days: i64,
        ahead_days: i64,
    ) -> RandomResult<DateTime<Utc>> {
        let anchor = self.anchor;
        self.random_date(
            anchor - Time::duration_days(back_days),
            anchor + Time::duration_days(ahead_days),
        )
    }

    /// Bernoulli draw
    pub fn chance(&mut self, probability: f64) -> RandomResult<bool> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(RandomError::InvalidProbability(probability));
        }
        Ok(self.rng.gen_bool(probability))
    }

    /// String of `len` characters drawn from `alphabet`
    pub fn random_string(&mut self, alphabet: &[u8], len: usize) -> RandomResult<String> {
        (0..len)
            .map(|_| self.pick(alphabet).map(char::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> Generator {
        Generator::seeded(7).with_anchor(Time::from_secs(1_700_000_000))
    }

    #[test]
    fn test_random_int_bounds() {
        let mut gen = generator();
        for _ in 0..1000 {
            let v = gen.random_int(-3, 3).unwrap();
            assert!((-3..=3).contains(&v));
        }
        assert_eq!(gen.random_int(5, 5).unwrap(), 5);
    }

    #[test]
    fn test_random_int_rejects_inverted_range() {
        let mut gen = generator();
        assert!(matches!(
            gen.random_int(10, 1),
            Err(RandomError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_random_currency_bounds_and_precision() {
        let mut gen = generator();
        let bounds = [(0.0, 1.0), (0.29, 0.31), (199.995, 200.004), (1000.0, 250000.0)];
        for (min, max) in bounds {
            for _ in 0..500 {
                let v = gen.random_currency(min, max).unwrap();
                assert!(v >= min && v <= max, "{} outside [{}, {}]", v, min, max);
                let scaled = v * 100.0;
                assert!((scaled - scaled.round()).abs() < 1e-6, "{} has more than 2 decimals", v);
            }
        }
    }

    #[test]
    fn test_random_currency_without_cent_in_range() {
        let mut gen = generator();
        assert!(matches!(
            gen.random_currency(0.001, 0.009),
            Err(RandomError::EmptyCurrencyRange { .. })
        ));
        assert!(gen.random_currency(2.0, 1.0).is_err());
        assert!(gen.random_currency(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_random_currency_rejects_unrepresentable_bounds() {
        let mut gen = generator();
        for (min, max) in [(0.0, 1e17), (-1e17, 0.0), (f64::MIN, f64::MAX), (1e300, 1e301)] {
            assert!(
                matches!(gen.random_currency(min, max), Err(RandomError::InvalidRange { .. })),
                "[{}, {}] should be rejected",
                min,
                max
            );
        }

        let v = gen.random_currency(0.0, 1e13).unwrap();
        assert!((0.0..=1e13).contains(&v));
    }

    #[test]
    fn test_random_money_uses_generator_currency() {
        let mut gen = generator().with_currency(Currency::Cad);
        let money = gen.random_money(10.0, 20.0).unwrap();
        assert_eq!(money.currency, Currency::Cad);
        assert!((1000..=2000).contains(&money.cents));
    }

    #[test]
    fn test_pick_one_empty_collection() {
        let mut gen = generator();
        let empty: [u8; 0] = [];
        assert_eq!(gen.pick_one(&empty), Err(RandomError::EmptyCollection));
        assert_eq!(*gen.pick_one(&[42]).unwrap(), 42);
    }

    #[test]
    fn test_pick_one_reaches_every_element() {
        let mut gen = generator();
        let items = ["a", "b", "c", "d"];
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(gen.pick(&items).unwrap());
        }
        assert_eq!(seen.len(), items.len());
    }

    #[test]
    fn test_random_date_range() {
        let mut gen = generator();
        let start = Time::from_secs(1_600_000_000);
        let end = Time::from_secs(1_600_086_400);
        for _ in 0..500 {
            let d = gen.random_date(start, end).unwrap();
            assert!(d >= start && d <= end);
        }
        assert_eq!(gen.random_date(start, start).unwrap(), start);
        assert!(matches!(
            gen.random_date(end, start),
            Err(RandomError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_date_windows_follow_anchor() {
        let mut gen = generator();
        let anchor = gen.anchor();
        for _ in 0..100 {
            let past = gen.date_in_past(30).unwrap();
            assert!(past <= anchor && past >= anchor - Duration::days(30));
            let around = gen.date_around_anchor(7, 14).unwrap();
            assert!(around >= anchor - Duration::days(7));
            assert!(around <= anchor + Duration::days(14));
        }
    }

    #[test]
    fn test_chance_validates_probability() {
        let mut gen = generator();
        assert!(gen.chance(1.0).unwrap());
        assert!(!gen.chance(0.0).unwrap());
        assert!(gen.chance(1.5).is_err());
    }

    #[test]
    fn test_seeded_generators_agree() {
        let mut a = generator();
        let mut b = generator();
        for _ in 0..50 {
            assert_eq!(a.random_int(0, 1_000_000).unwrap(), b.random_int(0, 1_000_000).unwrap());
        }
    }

    #[test]
    fn test_sample_is_distinct() {
        let mut gen = generator();
        let items = [1, 2, 3, 4, 5];
        let picked = gen.sample(&items, 3);
        assert_eq!(picked.len(), 3);
        let unique: std::collections::HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), 3);
        assert_eq!(gen.sample(&items, 10).len(), 5);
    }

    #[test]
    fn test_random_string_alphabet() {
        let mut gen = generator();
        let s = gen.random_string(b"AB", 12).unwrap();
        assert_eq!(s.len(), 12);
        assert!(s.chars().all(|c| c == 'A' || c == 'B'));
    }
}
