// ============================================================================
// Number
// Arbitrary-precision decimal value carried on the working stack
// ============================================================================

use super::config::{self, NumericConfig, RoundingMode};
use super::errors::{NumericError, NumericResult};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Immutable decimal value.
///
/// Backed by `rust_decimal::Decimal` (96-bit mantissa, scale 0..=28).
/// Arithmetic between two `Number`s is exact as long as the result fits in
/// 28 significant digits; nothing here rounds implicitly to the configured
/// precision. Scaling happens only through [`Number::rounded`] and
/// [`Number::with_precision`].
///
/// # Example
/// ```
/// use rpn_engine::numeric::{Number, NumericConfig};
///
/// let price: Number = "19.99".parse().unwrap();
/// let qty = Number::from(3);
/// let total = price.checked_mul(qty).unwrap();
/// assert_eq!(total.to_string(), "59.97");
///
/// let third = Number::from(1).checked_div(Number::from(3)).unwrap();
/// assert_eq!(third.rounded(&NumericConfig::DEFAULT).to_string(), "0.3333333333");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct Number(Decimal);

impl Number {
    pub const ZERO: Self = Self(Decimal::ZERO);
    pub const ONE: Self = Self(Decimal::ONE);
    pub const ONE_HUNDRED: Self = Self(Decimal::ONE_HUNDRED);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Parse an exact decimal string.
    ///
    /// # Errors
    /// - `PrecisionLoss` if the text carries more digits than the backend can
    ///   hold without rounding
    /// - `InvalidInput` for anything that is not a plain decimal literal
    pub fn parse(text: &str) -> NumericResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(NumericError::InvalidInput);
        }

        Decimal::from_str_exact(text).map(Self).map_err(|err| {
            use rust_decimal::Error;
            match err {
                Error::Underflow | Error::ScaleExceedsMaximumPrecision(_) => {
                    NumericError::PrecisionLoss
                },
                Error::ExceedsMaximumPossibleValue | Error::LessThanMinimumPossibleValue => {
                    NumericError::Overflow
                },
                _ => NumericError::InvalidInput,
            }
        })
    }

    /// Approximate a binary floating-point value.
    ///
    /// **Lossy.** The decimal keeps the shortest digits that round-trip the
    /// `f64`, not the exact binary fraction, and every digit past ~15
    /// significant places is noise from the float computation. Reserved for
    /// transcendental results where no exact decimal algorithm exists.
    ///
    /// # Errors
    /// - `NotFinite` for NaN and infinities
    /// - `Overflow` for magnitudes beyond the decimal range
    pub fn from_f64_lossy(value: f64) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::NotFinite);
        }
        Decimal::from_f64(value)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Digits right of the decimal point as written (not normalized).
    #[inline]
    pub fn scale(&self) -> u32 {
        self.0.scale()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        self.0.fract().is_zero()
    }

    /// Lossy conversion for float-based computations.
    pub fn to_f64(&self) -> Option<f64> {
        self.0.to_f64()
    }

    /// Whole, non-negative values that fit in a `u32`.
    pub fn to_u32(&self) -> Option<u32> {
        if self.is_integer() {
            self.0.to_u32()
        } else {
            None
        }
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    pub fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        self.0
            .checked_mul(rhs.0)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Quotient carried to the backend's full 28 digits; callers that need a
    /// presentation scale apply [`Number::rounded`] afterwards.
    pub fn checked_div(self, rhs: Self) -> NumericResult<Self> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        self.0
            .checked_div(rhs.0)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Integer power by repeated squaring.
    pub fn checked_powi(self, exponent: u32) -> NumericResult<Self> {
        let mut result = Self::ONE;
        let mut base = self;
        let mut remaining = exponent;

        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.checked_mul(base)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.checked_mul(base)?;
            }
        }

        Ok(result)
    }

    // ========================================================================
    // Scaling
    // ========================================================================

    /// Round to `config.precision` digits with `config.rounding`, padding with
    /// trailing zeros so the value always carries exactly that scale.
    pub fn rounded(&self, config: &NumericConfig) -> Self {
        self.scaled(config.precision, config.rounding)
    }

    /// [`Number::rounded`] against the process-wide configuration.
    pub fn with_precision(&self) -> Self {
        self.rounded(&config::snapshot())
    }

    /// Round (or pad) to an explicit scale.
    pub fn scaled(&self, scale: u32, mode: RoundingMode) -> Self {
        let mut value = self.0.round_dp_with_strategy(scale, mode.strategy());
        if value.scale() < scale {
            value.rescale(scale);
        }
        Self(value)
    }

    /// Text at an explicit scale.
    pub fn format_scaled(&self, scale: u32, mode: RoundingMode) -> String {
        self.scaled(scale, mode).to_string()
    }

    /// Same value with trailing fractional zeros removed.
    pub fn normalize(&self) -> Self {
        Self(self.0.normalize())
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Neg for Number {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<Decimal> for Number {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<Number> for Decimal {
    fn from(value: Number) -> Self {
        value.0
    }
}

impl FromStr for Number {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number({})", self.0)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ============================================================================
// Tests
// ============================================================================
