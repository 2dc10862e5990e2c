// ============================================================================
// Decimal Input
// Dual text/native input type and normalization to exact decimal operands
// ============================================================================

use super::errors::{NumericError, NumericResult};
use crate::sigfig::counter;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A numeric input, either decimal text or a native float.
///
/// Text is the precision-preserving path: `"1.0"` carries 2 significant
/// figures, while `1.0f64` renders as `"1"` and carries 1. Integer inputs
/// convert through exact text and never touch floating point.
///
/// # Example
/// ```ignore
/// use sigdec::DecimalInput;
///
/// assert_eq!(sigdec::sigfigs_of("1.0")?, 2);
/// assert_eq!(sigdec::sigfigs_of(1.0)?, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DecimalInput {
    /// Decimal text: sign, integer part, optional fraction, optional exponent
    Text(String),
    /// Native float; trailing-zero precision is lost at the source
    Native(f64),
}

impl DecimalInput {
    /// Returns true if this input came in as text.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, DecimalInput::Text(_))
    }

    /// The original text, if this input came in as text.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DecimalInput::Text(s) => Some(s),
            DecimalInput::Native(_) => None,
        }
    }

    /// Scan this input into validated decimal parts.
    ///
    /// Native values go through the platform's shortest-roundtrip rendering,
    /// which for Rust floats is always positional (no exponent).
    ///
    /// # Errors
    /// Returns `InvalidInput` for non-finite natives and malformed text.
    pub(crate) fn parts(&self) -> NumericResult<DecimalParts> {
        match self {
            DecimalInput::Text(s) => scan(s),
            DecimalInput::Native(x) => {
                if !x.is_finite() {
                    return Err(NumericError::InvalidInput(x.to_string()));
                }
                scan(&x.to_string())
            },
        }
    }
}

impl fmt::Display for DecimalInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecimalInput::Text(s) => f.write_str(s),
            DecimalInput::Native(x) => write!(f, "{}", x),
        }
    }
}

impl From<&str> for DecimalInput {
    fn from(value: &str) -> Self {
        DecimalInput::Text(value.to_string())
    }
}

impl From<String> for DecimalInput {
    fn from(value: String) -> Self {
        DecimalInput::Text(value)
    }
}

impl From<f64> for DecimalInput {
    fn from(value: f64) -> Self {
        DecimalInput::Native(value)
    }
}

// f32 converts through its own shortest rendering; widening to f64 first
// would surface binary noise digits (0.1f32 as f64 != 0.1).
impl From<f32> for DecimalInput {
    fn from(value: f32) -> Self {
        if value.is_finite() {
            DecimalInput::Text(value.to_string())
        } else {
            DecimalInput::Native(value as f64)
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for DecimalInput {
                fn from(value: $t) -> Self {
                    DecimalInput::Text(value.to_string())
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32, u64);

// ============================================================================
// Decimal Parts
// ============================================================================

/// Validated scan of a decimal text: sign, digit runs, exponent.
///
/// This is the source of truth for significant-figure and decimal-place
/// counting; the exact `Decimal` value is derived from it separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DecimalParts {
    pub negative: bool,
    /// Digits before the separator (may be empty, e.g. ".5")
    pub int_digits: String,
    /// Digits after the separator; `None` when there is no separator,
    /// `Some("")` for a trailing separator ("100.")
    pub frac_digits: Option<String>,
    /// Power-of-ten exponent; 0 when absent
    pub exponent: i32,
}

impl DecimalParts {
    /// True when every mantissa digit is zero (or absent).
    pub fn is_zero(&self) -> bool {
        self.int_digits.bytes().all(|b| b == b'0')
            && self
                .frac_digits
                .as_deref()
                .map_or(true, |f| f.bytes().all(|b| b == b'0'))
    }
}

/// Scan decimal text into parts.
///
/// Accepted syntax is ASCII only: optional sign, digits with at most one
/// separator, optional `e`/`E` exponent with optional sign. At least one
/// mantissa digit is required.
fn scan(text: &str) -> NumericResult<DecimalParts> {
    let invalid = || NumericError::InvalidInput(text.to_string());

    let s = text.trim();
    if s.is_empty() || !s.is_ascii() {
        return Err(invalid());
    }

    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(pos) => {
            let exp_str = &s[pos + 1..];
            let trimmed = exp_str.strip_prefix('+').unwrap_or(exp_str);
            let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let exp: i32 = trimmed.parse().map_err(|_| invalid())?;
            (&s[..pos], exp)
        },
        None => (s, 0),
    };

    let (int_digits, frac_digits) = match mantissa.find('.') {
        Some(pos) => (&mantissa[..pos], Some(&mantissa[pos + 1..])),
        None => (mantissa, None),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_digits) || !frac_digits.map_or(true, all_digits) {
        return Err(invalid());
    }
    if int_digits.is_empty() && frac_digits.map_or(true, str::is_empty) {
        return Err(invalid());
    }

    Ok(DecimalParts {
        negative,
        int_digits: int_digits.to_string(),
        frac_digits: frac_digits.map(str::to_string),
        exponent,
    })
}

// ============================================================================
// Normalized Operands
// ============================================================================

/// A normalized operand: the exact decimal value plus the precision
/// metadata of its originating representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Operand {
    pub value: Decimal,
    pub sigfigs: u32,
    pub decimal_places: u32,
}

/// Normalize an input into an exact decimal operand.
///
/// # Errors
/// Returns `InvalidInput` for malformed text, non-finite natives, and
/// values outside the decimal capability's representable range.
pub(crate) fn normalize(input: &DecimalInput) -> NumericResult<Operand> {
    let parts = input.parts()?;
    let value = decimal_from_parts(&parts).ok_or_else(|| match input {
        DecimalInput::Text(s) => NumericError::InvalidInput(s.clone()),
        DecimalInput::Native(x) => NumericError::InvalidInput(x.to_string()),
    })?;
    Ok(Operand {
        value,
        sigfigs: counter::count_parts(&parts),
        decimal_places: counter::places_parts(&parts),
    })
}

/// Build the exact decimal value from scanned parts.
///
/// Returns `None` when the value falls outside the capability's range.
fn decimal_from_parts(parts: &DecimalParts) -> Option<Decimal> {
    if parts.is_zero() {
        return Some(Decimal::ZERO);
    }

    let mut canonical = String::with_capacity(parts.int_digits.len() + 8);
    if parts.negative {
        canonical.push('-');
    }
    if parts.int_digits.is_empty() {
        canonical.push('0');
    } else {
        canonical.push_str(&parts.int_digits);
    }
    if let Some(frac) = parts.frac_digits.as_deref() {
        if !frac.is_empty() {
            canonical.push('.');
            canonical.push_str(frac);
        }
    }

    if parts.exponent != 0 {
        canonical.push('e');
        canonical.push_str(&parts.exponent.to_string());
        Decimal::from_scientific(&canonical).ok()
    } else {
        Decimal::from_str(&canonical).ok()
    }
}
