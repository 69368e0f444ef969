//! Fixed-point scale handling.
//!
//! The protocol represents all on-chain amounts as integers at one of
//! three decimal scales. Conversions must be exact in both directions:
//! raw values converted here are later re-encoded and submitted as bid
//! parameters, and an off-by-one unit can make the transaction revert.
//! Binary floating point is therefore never used for amounts.

use anyhow::{Context, Result};
use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, One, RoundingMode};

// ---------------------------------------------------------------------------
// Scales
// ---------------------------------------------------------------------------

/// A fixed-point decimal scale used by the protocol's contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// 18 decimal places: collateral amounts, token allowances.
    Wad,
    /// 27 decimal places: prices (debt token per unit of collateral).
    Ray,
    /// 45 decimal places: debt amounts.
    Rad,
}

impl Scale {
    /// Number of decimal places at this scale.
    pub fn digits(self) -> i64 {
        match self {
            Scale::Wad => 18,
            Scale::Ray => 27,
            Scale::Rad => 45,
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Convert a raw on-chain integer string into its exact decimal value.
pub fn to_decimal(raw: &str, scale: Scale) -> Result<BigDecimal> {
    let digits: BigInt = raw
        .trim()
        .parse()
        .with_context(|| format!("invalid raw integer amount: {raw:?}"))?;
    Ok(BigDecimal::new(digits, scale.digits()))
}

/// Encode a decimal value as a raw integer string at the given scale.
///
/// Truncates toward zero, never rounds up: a bid must not request more
/// collateral or accept a worse price than was computed.
pub fn from_decimal(value: &BigDecimal, scale: Scale) -> String {
    let (digits, _) = value
        .with_scale_round(scale.digits(), RoundingMode::Down)
        .into_bigint_and_exponent();
    digits.to_string()
}

/// The effectively unlimited allowance value: 2^256 - 1 as an integer
/// string, the largest amount an ERC-20 approval can carry.
pub fn unlimited_allowance() -> String {
    ((BigInt::one() << 256usize) - BigInt::one()).to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
