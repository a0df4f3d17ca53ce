//! Payout arithmetic.
//!
//! Money is `Decimal` end to end; floats never touch an amount. Currency
//! rounding is half-up (midpoint away from zero) to 2 decimal places,
//! applied once at the payout boundary.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::domain::outcome::Outcome;

/// Decimal places of the smallest currency unit.
pub const CURRENCY_SCALE: u32 = 2;

/// Rounds an amount to the smallest currency unit, half-up.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Profit on a winning stake: `stake · rate / 100`, rounded to currency.
pub fn profit(stake: Decimal, profit_rate_percent: Decimal) -> Decimal {
    round_currency(stake * profit_rate_percent / dec!(100))
}

/// Total payout for a settled order.
///
/// Won: stake plus profit (the raw, unrounded profit is added and the total
/// rounded once, so the payout never accumulates two rounding steps).
/// Lost: zero; the stake is forfeited.
pub fn payout(stake: Decimal, profit_rate_percent: Decimal, outcome: Outcome) -> Decimal {
    match outcome {
        Outcome::Won => round_currency(stake + stake * profit_rate_percent / dec!(100)),
        Outcome::Lost | Outcome::Pending => Decimal::ZERO,
    }
}
