//! Property-Based Tests — Domain Layer Invariants
//!
//! Uses `proptest` to verify that the timing and settlement core maintains
//! its invariants across random inputs.

use proptest::prelude::*;
use rust_decimal::Decimal;

use binopt_engine::domain::clock;
use binopt_engine::domain::duration::TradeDuration;
use binopt_engine::domain::expiry::compute_expiry;
use binopt_engine::domain::outcome::{Direction, Outcome, resolve};
use binopt_engine::domain::payout::payout;

// ── Clock Properties ────────────────────────────────────────

proptest! {
    /// Remaining seconds in the current minute is always in [1, 60].
    #[test]
    fn remaining_always_in_unit_candle(t in 0i64..4_000_000_000) {
        let remaining = clock::remaining_seconds_in_minute(t);
        prop_assert!((1..=60).contains(&remaining));
    }

    /// The end of the current minute is minute-aligned and strictly after t.
    #[test]
    fn end_of_minute_aligned_and_after(t in 0i64..4_000_000_000) {
        let boundary = clock::end_of_current_minute(t);
        prop_assert_eq!(boundary % 60, 0);
        prop_assert!(boundary > t);
        prop_assert!(boundary - t <= 60);
    }
}

// ── Expiry Scheduler Properties ─────────────────────────────

proptest! {
    /// Expiry is always minute-aligned, strictly after entry, and inside
    /// the (d·60, d·60 + 60] window for whole-minute durations.
    #[test]
    fn expiry_invariants(
        entry in 0i64..4_000_000_000,
        minutes in 1u32..240,
        threshold in 0i64..60,
    ) {
        let duration = TradeDuration::from_minutes(minutes).unwrap();
        let s = compute_expiry(entry, duration, threshold);

        prop_assert_eq!(s.expiry % 60, 0);
        prop_assert!(s.expiry > entry);

        let delta = s.expiry - entry;
        let base = i64::from(minutes) * 60;
        prop_assert!(delta > base && delta <= base + 60);
    }

    /// The threshold never affects the computed expiry, only the flag.
    #[test]
    fn threshold_has_no_schedule_effect(
        entry in 0i64..4_000_000_000,
        minutes in 1u32..240,
        t1 in 0i64..60,
        t2 in 0i64..60,
    ) {
        let duration = TradeDuration::from_minutes(minutes).unwrap();
        let a = compute_expiry(entry, duration, t1);
        let b = compute_expiry(entry, duration, t2);
        prop_assert_eq!(a.expiry, b.expiry);
        prop_assert_eq!(a.candle_boundary, b.candle_boundary);
    }

    /// Scheduling is deterministic: identical inputs, identical outputs.
    #[test]
    fn expiry_deterministic(entry in 0i64..4_000_000_000, secs in 1u32..14_400) {
        let duration = TradeDuration::from_secs(secs).unwrap();
        let a = compute_expiry(entry, duration, 20);
        let b = compute_expiry(entry, duration, 20);
        prop_assert_eq!(a, b);
    }

    /// Sub-minute durations resolve exactly at the candle boundary.
    #[test]
    fn sub_minute_resolves_at_boundary(entry in 0i64..4_000_000_000, secs in 1u32..60) {
        let duration = TradeDuration::from_secs(secs).unwrap();
        let s = compute_expiry(entry, duration, 20);
        prop_assert_eq!(s.expiry, s.candle_boundary);
    }
}

// ── Outcome / Payout Properties ─────────────────────────────

proptest! {
    /// When prices differ, CALL and PUT resolve to opposite outcomes.
    #[test]
    fn call_and_put_are_antisymmetric(
        entry in 1u64..1_000_000,
        exit in 1u64..1_000_000,
    ) {
        prop_assume!(entry != exit);
        let entry = Decimal::from(entry);
        let exit = Decimal::from(exit);
        let call = resolve(Direction::Call, entry, exit);
        let put = resolve(Direction::Put, entry, exit);
        prop_assert_ne!(call, put);
    }

    /// Ties lose under both directions.
    #[test]
    fn ties_always_lose(price in 1u64..1_000_000) {
        let price = Decimal::from(price);
        prop_assert_eq!(resolve(Direction::Call, price, price), Outcome::Lost);
        prop_assert_eq!(resolve(Direction::Put, price, price), Outcome::Lost);
    }

    /// A losing payout is exactly zero; a winning payout is never below
    /// the stake and is rounded to the currency scale.
    #[test]
    fn payout_bounds(
        stake_cents in 1u64..100_000_000,
        rate_bps in 1u32..10_000,
    ) {
        let stake = Decimal::new(stake_cents as i64, 2);
        let rate = Decimal::new(i64::from(rate_bps), 2);

        prop_assert_eq!(payout(stake, rate, Outcome::Lost), Decimal::ZERO);

        let won = payout(stake, rate, Outcome::Won);
        prop_assert!(won >= stake);
        prop_assert!(won.scale() <= 2);
    }
}
