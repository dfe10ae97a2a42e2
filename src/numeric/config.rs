// ============================================================================
// Numeric Configuration
// Precision and rounding policy shared by formatting and scaled results
// ============================================================================

use super::errors::{NumericError, NumericResult};
use parking_lot::RwLock;
use rust_decimal::RoundingStrategy;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest scale the decimal backend can hold.
pub const MAX_PRECISION: u32 = 28;

/// Precision used until a caller changes it.
pub const DEFAULT_PRECISION: u32 = 10;

// ============================================================================
// Rounding Mode
// ============================================================================

/// Closed set of rounding policies applied when a value is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoundingMode {
    /// Away from zero
    Up,
    /// Toward zero (truncate)
    Down,
    /// Toward positive infinity
    Ceiling,
    /// Toward negative infinity
    Floor,
    /// Nearest neighbour, ties away from zero
    #[default]
    HalfUp,
    /// Nearest neighbour, ties toward zero
    HalfDown,
    /// Nearest neighbour, ties to the even neighbour (banker's rounding)
    HalfEven,
}

impl RoundingMode {
    /// Every supported mode, in display order.
    pub const ALL: [RoundingMode; 7] = [
        RoundingMode::Up,
        RoundingMode::Down,
        RoundingMode::Ceiling,
        RoundingMode::Floor,
        RoundingMode::HalfUp,
        RoundingMode::HalfDown,
        RoundingMode::HalfEven,
    ];

    /// Canonical upper-snake-case name.
    pub fn name(&self) -> &'static str {
        match self {
            RoundingMode::Up => "UP",
            RoundingMode::Down => "DOWN",
            RoundingMode::Ceiling => "CEILING",
            RoundingMode::Floor => "FLOOR",
            RoundingMode::HalfUp => "HALF_UP",
            RoundingMode::HalfDown => "HALF_DOWN",
            RoundingMode::HalfEven => "HALF_EVEN",
        }
    }

    pub(crate) fn strategy(&self) -> RoundingStrategy {
        match self {
            RoundingMode::Up => RoundingStrategy::AwayFromZero,
            RoundingMode::Down => RoundingStrategy::ToZero,
            RoundingMode::Ceiling => RoundingStrategy::ToPositiveInfinity,
            RoundingMode::Floor => RoundingStrategy::ToNegativeInfinity,
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfDown => RoundingStrategy::MidpointTowardZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoundingMode {
    type Err = NumericError;

    /// Accepts `HALF_UP`, `half-up`, `HalfUp` and similar spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_uppercase())
            .collect();

        RoundingMode::ALL
            .into_iter()
            .find(|mode| mode.name().replace('_', "") == normalized)
            .ok_or(NumericError::UnknownRoundingMode)
    }
}

// ============================================================================
// Configuration Value
// ============================================================================

/// Precision (scale) and rounding policy, passed explicitly to the code paths
/// that scale results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumericConfig {
    /// Digits kept right of the decimal point
    pub precision: u32,

    /// Policy applied to the discarded digits
    pub rounding: RoundingMode,
}

impl NumericConfig {
    pub const DEFAULT: Self = Self {
        precision: DEFAULT_PRECISION,
        rounding: RoundingMode::HalfUp,
    };

    /// Create a validated configuration.
    ///
    /// # Errors
    /// Returns `InvalidPrecision` if `precision` exceeds [`MAX_PRECISION`].
    pub fn new(precision: u32, rounding: RoundingMode) -> NumericResult<Self> {
        let config = Self {
            precision,
            rounding,
        };
        config.validate()?;
        Ok(config)
    }

    /// Builder method: set precision
    pub fn with_precision(mut self, precision: u32) -> NumericResult<Self> {
        self.precision = precision;
        self.validate()?;
        Ok(self)
    }

    /// Builder method: set rounding mode
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn validate(&self) -> NumericResult<()> {
        if self.precision > MAX_PRECISION {
            return Err(NumericError::InvalidPrecision);
        }
        Ok(())
    }
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ============================================================================
// Process-wide Configuration
// ============================================================================

// Both fields live behind one lock so readers always see a consistent pair.
static GLOBAL: RwLock<NumericConfig> = parking_lot::const_rwlock(NumericConfig::DEFAULT);

/// Current process-wide configuration as one consistent snapshot.
pub fn snapshot() -> NumericConfig {
    *GLOBAL.read()
}

/// Current process-wide precision.
pub fn precision() -> u32 {
    GLOBAL.read().precision
}

/// Current process-wide rounding mode.
pub fn rounding_mode() -> RoundingMode {
    GLOBAL.read().rounding
}

/// Set the process-wide precision.
///
/// # Errors
/// Returns `InvalidPrecision` if `precision` exceeds [`MAX_PRECISION`]; the
/// current setting is left unchanged.
pub fn set_precision(precision: u32) -> NumericResult<()> {
    update(|config| config.with_precision(precision)).map(|_| ())
}

/// Set the process-wide rounding mode.
pub fn set_rounding_mode(rounding: RoundingMode) {
    GLOBAL.write().rounding = rounding;
    tracing::debug!(%rounding, "rounding mode updated");
}

/// Replace the whole process-wide configuration.
pub fn replace(config: NumericConfig) -> NumericResult<NumericConfig> {
    update(|_| Ok(config))
}

/// Read-modify-write the process-wide configuration under a single write lock.
///
/// Returns the previous configuration. If `f` fails nothing is written.
pub fn update<F>(f: F) -> NumericResult<NumericConfig>
where
    F: FnOnce(NumericConfig) -> NumericResult<NumericConfig>,
{
    let mut guard = GLOBAL.write();
    let previous = *guard;
    let next = f(previous)?;
    next.validate()?;
    *guard = next;
    drop(guard);

    tracing::debug!(
        precision = next.precision,
        rounding = %next.rounding,
        "numeric configuration updated"
    );
    Ok(previous)
}
