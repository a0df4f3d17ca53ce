//! Trade direction and win/loss resolution.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::error::EngineError;

/// Direction of a binary-option wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Bet that the price rises over the trade window.
    Call,
    /// Bet that the price falls over the trade window.
    Put,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CALL" => Ok(Self::Call),
            "PUT" => Ok(Self::Put),
            _ => Err(EngineError::InvalidDirection(s.to_string())),
        }
    }
}

/// Lifecycle outcome of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Not yet settled.
    Pending,
    /// Stake returned plus profit.
    Won,
    /// Stake forfeited.
    Lost,
}

impl Outcome {
    /// Whether this outcome is terminal.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Won => write!(f, "WON"),
            Self::Lost => write!(f, "LOST"),
        }
    }
}

/// Resolves an order from its entry and exit prices.
///
/// CALL wins iff exit > entry; PUT wins iff exit < entry. Equality loses
/// under both directions: ties favor the house. No-tie is policy, not an
/// oversight.
///
/// Pure and idempotent; the caller guarantees single invocation per order
/// by checking order state first.
pub fn resolve(direction: Direction, entry_price: Decimal, exit_price: Decimal) -> Outcome {
    let won = match direction {
        Direction::Call => exit_price > entry_price,
        Direction::Put => exit_price < entry_price,
    };
    if won { Outcome::Won } else { Outcome::Lost }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_call_wins_when_price_rises() {
        assert_eq!(resolve(Direction::Call, dec!(100), dec!(101)), Outcome::Won);
    }

    #[test]
    fn test_call_loses_when_price_falls() {
        assert_eq!(resolve(Direction::Call, dec!(100), dec!(99)), Outcome::Lost);
    }

    #[test]
    fn test_put_wins_when_price_falls() {
        assert_eq!(resolve(Direction::Put, dec!(100), dec!(99)), Outcome::Won);
    }

    #[test]
    fn test_put_loses_when_price_rises() {
        assert_eq!(resolve(Direction::Put, dec!(100), dec!(101)), Outcome::Lost);
    }

    #[test]
    fn test_ties_lose_both_ways() {
        assert_eq!(resolve(Direction::Call, dec!(100), dec!(100)), Outcome::Lost);
        assert_eq!(resolve(Direction::Put, dec!(100), dec!(100)), Outcome::Lost);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("CALL".parse::<Direction>().unwrap(), Direction::Call);
        assert_eq!("put".parse::<Direction>().unwrap(), Direction::Put);
        assert_eq!(" Call ".parse::<Direction>().unwrap(), Direction::Call);
        assert!(matches!(
            "STRADDLE".parse::<Direction>(),
            Err(EngineError::InvalidDirection(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Direction::Call.to_string(), "CALL");
        assert_eq!(Outcome::Pending.to_string(), "PENDING");
        assert_eq!(Outcome::Won.to_string(), "WON");
    }

    #[test]
    fn test_terminal() {
        assert!(!Outcome::Pending.is_terminal());
        assert!(Outcome::Won.is_terminal());
        assert!(Outcome::Lost.is_terminal());
    }
}
