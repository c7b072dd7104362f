//! Conversions between raw on-chain integers and decimal token amounts.
//!
//! A [`TokenAmount`] keeps the raw `U256` together with its decimals, so
//! normalizing a balance never drops a digit. Configured values arrive as
//! [`Decimal`] and are lifted into the same fixed-point form. Conversion to
//! `f64` happens once, in [`to_score`], rounded to nearest.

use std::{cmp::Ordering, fmt};

use alloy_primitives::U256;
use rust_decimal::Decimal;

use crate::{Result, StrategyError};

/// Largest precision whose unit `10^decimals` fits in 256 bits.
pub const MAX_DECIMALS: u8 = 77;

fn unit(decimals: u8) -> U256 {
    debug_assert!(decimals <= MAX_DECIMALS);
    U256::from(10u8).pow(U256::from(decimals))
}

fn checked_unit(decimals: u8) -> Result<U256> {
    if decimals > MAX_DECIMALS {
        return Err(StrategyError::NumericOverflow(format!(
            "10^{decimals} does not fit in 256 bits"
        )));
    }
    Ok(unit(decimals))
}

/// Exact fixed-point amount, `raw / 10^decimals`.
#[derive(Clone, Copy, Debug)]
pub struct TokenAmount {
    raw: U256,
    decimals: u8,
}

impl TokenAmount {
    pub const ZERO: Self = Self {
        raw: U256::ZERO,
        decimals: 0,
    };

    pub fn new(raw: U256, decimals: u8) -> Result<Self> {
        checked_unit(decimals)?;
        Ok(Self { raw, decimals })
    }

    pub fn from_whole(whole: u64) -> Self {
        Self {
            raw: U256::from(whole),
            decimals: 0,
        }
    }

    /// Lifts a configured decimal. Negative values have no token amount.
    pub fn from_decimal(value: Decimal) -> Result<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(StrategyError::NumericOverflow(format!(
                "negative amount {value} has no raw representation"
            )));
        }
        Self::new(
            U256::from(value.mantissa().unsigned_abs()),
            value.scale() as u8,
        )
    }

    pub fn raw(&self) -> U256 {
        self.raw
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    fn split(&self) -> (U256, U256) {
        self.raw.div_rem(unit(self.decimals))
    }

    fn rescaled(&self, decimals: u8) -> Result<U256> {
        self.raw
            .checked_mul(unit(decimals - self.decimals))
            .ok_or_else(|| {
                StrategyError::NumericOverflow(format!("{self} at {decimals} decimals"))
            })
    }

    pub fn checked_add(self, other: Self) -> Result<Self> {
        let decimals = self.decimals.max(other.decimals);
        self.rescaled(decimals)?
            .checked_add(other.rescaled(decimals)?)
            .map(|raw| Self { raw, decimals })
            .ok_or_else(|| StrategyError::NumericOverflow(format!("{self} + {other}")))
    }

    /// Product of two amounts. Digits beyond [`MAX_DECIMALS`] are truncated.
    pub fn checked_mul(self, other: Self) -> Result<Self> {
        let raw = self
            .raw
            .checked_mul(other.raw)
            .ok_or_else(|| StrategyError::NumericOverflow(format!("{self} x {other}")))?;
        let decimals = u16::from(self.decimals) + u16::from(other.decimals);
        Ok(match u8::try_from(decimals) {
            Ok(decimals) if decimals <= MAX_DECIMALS => Self { raw, decimals },
            _ => Self {
                raw: raw / unit((decimals - u16::from(MAX_DECIMALS)) as u8),
                decimals: MAX_DECIMALS,
            },
        })
    }

    /// Base units at `decimals` precision. `round_up` picks the ceiling when
    /// digits finer than `10^-decimals` are dropped, otherwise they truncate.
    pub fn to_raw(&self, decimals: u8, round_up: bool) -> Result<U256> {
        checked_unit(decimals)?;
        if decimals >= self.decimals {
            return self.rescaled(decimals);
        }
        let (quotient, remainder) = self.raw.div_rem(unit(self.decimals - decimals));
        if round_up && !remainder.is_zero() {
            // quotient < U256::MAX / 10, cannot wrap
            Ok(quotient + U256::from(1u8))
        } else {
            Ok(quotient)
        }
    }

    pub fn to_f64(&self) -> Result<f64> {
        format!("{}e-{}", self.raw, self.decimals)
            .parse::<f64>()
            .ok()
            .filter(|score| score.is_finite())
            .ok_or_else(|| {
                StrategyError::NumericOverflow(format!("{self} is not representable as f64"))
            })
    }
}

impl PartialEq for TokenAmount {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TokenAmount {}

impl PartialOrd for TokenAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TokenAmount {
    fn cmp(&self, other: &Self) -> Ordering {
        let (whole, fraction) = self.split();
        let (other_whole, other_fraction) = other.split();
        whole.cmp(&other_whole).then_with(|| {
            // each fraction is below 10^decimals, so aligning stays under 10^77
            let decimals = self.decimals.max(other.decimals);
            let fraction = fraction * unit(decimals - self.decimals);
            let other_fraction = other_fraction * unit(decimals - other.decimals);
            fraction.cmp(&other_fraction)
        })
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (whole, fraction) = self.split();
        if fraction.is_zero() {
            return write!(f, "{whole}");
        }
        let digits = format!("{:0>width$}", fraction.to_string(), width = self.decimals as usize);
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

/// Converts `raw / 10^decimals` into a [`TokenAmount`]. Exact.
pub fn normalize(raw: U256, decimals: u8) -> Result<TokenAmount> {
    TokenAmount::new(raw, decimals)
}

/// Scales an amount back to base units, truncating finer digits.
pub fn denormalize(amount: TokenAmount, decimals: u8) -> Result<U256> {
    amount.to_raw(decimals, false)
}

/// Smallest raw balance that is at least `minimum` tokens.
pub fn min_raw_balance(minimum: Decimal, decimals: u8) -> Result<U256> {
    TokenAmount::from_decimal(minimum)?.to_raw(decimals, true)
}

/// Applies a strategy weight before the final conversion.
pub fn apply_multiplier(amount: TokenAmount, multiplier: Decimal) -> Result<TokenAmount> {
    amount.checked_mul(TokenAmount::from_decimal(multiplier)?)
}

/// Final conversion into the score domain.
pub fn to_score(amount: TokenAmount) -> Result<f64> {
    amount.to_f64()
}
