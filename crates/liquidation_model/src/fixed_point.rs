//! Truncating fixed-point helpers
//!
//! Amounts live in 256 bits; every product is formed in 512 bits and only
//! narrowed once the value is final. All divisions round toward zero, which
//! for unsigned values means rounding down.

use primitive_types::{U256, U512};

use crate::{LiquidationError, TermsViolation, PERCENTAGE_FACTOR};

pub type MathResult<T> = Result<T, LiquidationError>;

/// Lift a 256-bit value into the 512-bit working width
#[inline]
pub fn widen(value: U256) -> U512 {
    U512::from(value)
}

/// Bring a 512-bit value back to 256 bits, failing if it does not fit
#[inline]
pub fn narrow(value: U512) -> MathResult<U256> {
    U256::try_from(value).map_err(|_| LiquidationError::ArithmeticOverflow)
}

/// 10^decimals in the working width
pub fn pow10(decimals: u8) -> MathResult<U512> {
    U512::from(10u8)
        .checked_pow(U512::from(decimals))
        .ok_or(LiquidationError::ArithmeticOverflow)
}

/// Checked product of two 512-bit values
#[inline]
pub fn mul(a: U512, b: U512) -> MathResult<U512> {
    a.checked_mul(b).ok_or(LiquidationError::ArithmeticOverflow)
}

/// Truncating quotient; a zero divisor is reported as malformed reserve terms
#[inline]
pub fn div_floor(numerator: U512, denominator: U512) -> MathResult<U512> {
    numerator
        .checked_div(denominator)
        .ok_or(LiquidationError::InvalidReserveTerms(TermsViolation::ZeroDivisor))
}

/// value * bps / 10_000, rounded down
pub fn percent_mul(value: U512, bps: u16) -> MathResult<U512> {
    let scaled = mul(value, U512::from(bps))?;
    div_floor(scaled, U512::from(PERCENTAGE_FACTOR))
}

/// value * 10_000 / bps, rounded down
pub fn percent_div(value: U512, bps: u16) -> MathResult<U512> {
    let scaled = mul(value, U512::from(PERCENTAGE_FACTOR))?;
    div_floor(scaled, U512::from(bps))
}
