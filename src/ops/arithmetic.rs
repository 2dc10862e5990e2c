// ============================================================================
// Arithmetic Operations
// Exact decimal arithmetic with sigfig-convention result formatting
// ============================================================================

use crate::engine::rounding::{
    format_decimal_places, format_decimal_sigfigs, validate_sigfigs, RoundMode, DEFAULT_THRESHOLD,
};
use crate::numeric::{normalize, DecimalInput, NumericError, NumericResult, Operand};
use crate::sigfig::resolver::{decimal_places_for_add_sub, sigfigs_for_mul_div};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`percentage`].
///
/// Defaults to derived precision with the `%` suffix appended. A bare
/// sigfig count converts via `From<u32>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PercentageOptions {
    /// Significant figures of the result; derived from the operands when
    /// `None`
    pub sigfigs: Option<u32>,
    /// Append a trailing `%` to the formatted result
    pub append_percent: bool,
}

impl Default for PercentageOptions {
    fn default() -> Self {
        Self {
            sigfigs: None,
            append_percent: true,
        }
    }
}

impl From<u32> for PercentageOptions {
    fn from(sigfigs: u32) -> Self {
        Self {
            sigfigs: Some(sigfigs),
            ..Self::default()
        }
    }
}

// ============================================================================
// Addition / Subtraction
// ============================================================================

/// Add two values.
///
/// Without an override the result keeps the decimal places of the
/// least-precise operand, per the addition convention (`add(1.23, "4.5")`
/// is `"5.7"`); with `sigfigs` it is rounded half-up to that many
/// significant figures instead.
///
/// # Errors
/// - `InvalidInput` if either operand is not a finite decimal
/// - `InvalidArgument` if `sigfigs` is `Some(0)`
/// - `InvalidResult` if the exact sum leaves the representable range
pub fn add(
    a: impl Into<DecimalInput>,
    b: impl Into<DecimalInput>,
    sigfigs: Option<u32>,
) -> NumericResult<String> {
    validate_override(sigfigs)?;
    let x = normalize(&a.into())?;
    let y = normalize(&b.into())?;
    let sum = x
        .value
        .checked_add(y.value)
        .ok_or(NumericError::InvalidResult(RANGE_OVERFLOW))?;
    Ok(format_add_sub(&sum, &x, &y, sigfigs))
}

/// Subtract `b` from `a`. Same precision rules as [`add`].
///
/// # Errors
/// Same as [`add`].
pub fn sub(
    a: impl Into<DecimalInput>,
    b: impl Into<DecimalInput>,
    sigfigs: Option<u32>,
) -> NumericResult<String> {
    validate_override(sigfigs)?;
    let x = normalize(&a.into())?;
    let y = normalize(&b.into())?;
    let difference = x
        .value
        .checked_sub(y.value)
        .ok_or(NumericError::InvalidResult(RANGE_OVERFLOW))?;
    Ok(format_add_sub(&difference, &x, &y, sigfigs))
}

fn format_add_sub(result: &Decimal, x: &Operand, y: &Operand, sigfigs: Option<u32>) -> String {
    match sigfigs {
        Some(n) => format_sigfig(result, n),
        None => {
            let places = decimal_places_for_add_sub(&[*x, *y]);
            format_decimal_places(result, places)
        },
    }
}

// ============================================================================
// Multiplication / Division
// ============================================================================

/// Multiply two values.
///
/// The result keeps the significant figures of the least-precise operand
/// (`mul(100, 2.5)` is `"3e+2"`), unless overridden.
///
/// # Errors
/// - `InvalidInput` if either operand is not a finite decimal
/// - `InvalidArgument` if `sigfigs` is `Some(0)`
/// - `InvalidResult` if the exact product leaves the representable range
pub fn mul(
    a: impl Into<DecimalInput>,
    b: impl Into<DecimalInput>,
    sigfigs: Option<u32>,
) -> NumericResult<String> {
    validate_override(sigfigs)?;
    let x = normalize(&a.into())?;
    let y = normalize(&b.into())?;
    let product = x
        .value
        .checked_mul(y.value)
        .ok_or(NumericError::InvalidResult(RANGE_OVERFLOW))?;
    Ok(format_mul_div(&product, &x, &y, sigfigs))
}

/// Divide `a` by `b`. Same precision rules as [`mul`].
///
/// # Errors
/// - `DivisionByZero` if `b` is exactly zero (takes priority over an
///   unparsable `a`)
/// - otherwise same as [`mul`]
pub fn div(
    a: impl Into<DecimalInput>,
    b: impl Into<DecimalInput>,
    sigfigs: Option<u32>,
) -> NumericResult<String> {
    validate_override(sigfigs)?;
    let y = normalize(&b.into())?;
    if y.value.is_zero() {
        return Err(NumericError::DivisionByZero("division by zero"));
    }
    let x = normalize(&a.into())?;
    let quotient = x
        .value
        .checked_div(y.value)
        .ok_or(NumericError::InvalidResult(RANGE_OVERFLOW))?;
    Ok(format_mul_div(&quotient, &x, &y, sigfigs))
}

/// Remainder of `a / b`, taking the dividend's sign.
///
/// # Errors
/// - `DivisionByZero` (zero-modulus message) if `b` is exactly zero
/// - otherwise same as [`mul`]
pub fn modulo(
    a: impl Into<DecimalInput>,
    b: impl Into<DecimalInput>,
    sigfigs: Option<u32>,
) -> NumericResult<String> {
    validate_override(sigfigs)?;
    let y = normalize(&b.into())?;
    if y.value.is_zero() {
        return Err(NumericError::DivisionByZero("modulus is zero"));
    }
    let x = normalize(&a.into())?;
    let remainder = x
        .value
        .checked_rem(y.value)
        .ok_or(NumericError::InvalidResult(RANGE_OVERFLOW))?;
    Ok(format_mul_div(&remainder, &x, &y, sigfigs))
}

/// Floor division: the quotient rounded toward negative infinity
/// (`int_div(7, -2)` is `"-4"`).
///
/// Computed from the exact remainder, so the floor decision never sits on
/// a quotient-rounding boundary.
///
/// # Errors
/// - `DivisionByZero` if `b` is exactly zero
/// - otherwise same as [`mul`]
pub fn int_div(
    a: impl Into<DecimalInput>,
    b: impl Into<DecimalInput>,
    sigfigs: Option<u32>,
) -> NumericResult<String> {
    validate_override(sigfigs)?;
    let y = normalize(&b.into())?;
    if y.value.is_zero() {
        return Err(NumericError::DivisionByZero("division by zero"));
    }
    let x = normalize(&a.into())?;

    let remainder = x
        .value
        .checked_rem(y.value)
        .ok_or(NumericError::InvalidResult(RANGE_OVERFLOW))?;
    // (a - rem) is an exact multiple of b, so this division is exact
    let truncated = x
        .value
        .checked_sub(remainder)
        .and_then(|exact| exact.checked_div(y.value))
        .ok_or(NumericError::InvalidResult(RANGE_OVERFLOW))?;
    let quotient = if !remainder.is_zero()
        && x.value.is_sign_negative() != y.value.is_sign_negative()
    {
        truncated
            .checked_sub(Decimal::ONE)
            .ok_or(NumericError::InvalidResult(RANGE_OVERFLOW))?
    } else {
        truncated
    };
    Ok(format_mul_div(&quotient, &x, &y, sigfigs))
}

fn format_mul_div(result: &Decimal, x: &Operand, y: &Operand, sigfigs: Option<u32>) -> String {
    let n = sigfigs.unwrap_or_else(|| sigfigs_for_mul_div(&[*x, *y]));
    format_sigfig(result, n)
}

// ============================================================================
// Power / Root / Absolute Value
// ============================================================================

/// Raise `base` to `exponent`.
///
/// Integer exponents use exact decimal exponentiation; non-integer
/// exponents fall back to a float approximation with a finiteness check.
/// Default precision follows the mul/div rule over both operands.
///
/// # Errors
/// - `InvalidInput` if either operand is not a finite decimal
/// - `InvalidArgument` if `sigfigs` is `Some(0)`
/// - `InvalidResult` if the result is non-finite (e.g. `0^-1`) or leaves
///   the representable range
pub fn pow(
    base: impl Into<DecimalInput>,
    exponent: impl Into<DecimalInput>,
    sigfigs: Option<u32>,
) -> NumericResult<String> {
    validate_override(sigfigs)?;
    let x = normalize(&base.into())?;
    let y = normalize(&exponent.into())?;

    let result = if y.value.is_integer() {
        let exp = y
            .value
            .to_i64()
            .ok_or(NumericError::InvalidResult(RANGE_OVERFLOW))?;
        x.value
            .checked_powi(exp)
            .ok_or(NumericError::InvalidResult(NON_FINITE))?
    } else {
        let approx = x
            .value
            .to_f64()
            .ok_or(NumericError::InvalidResult(NON_FINITE))?
            .powf(y.value.to_f64().ok_or(NumericError::InvalidResult(NON_FINITE))?);
        if !approx.is_finite() {
            return Err(NumericError::InvalidResult(NON_FINITE));
        }
        Decimal::from_f64_retain(approx).ok_or(NumericError::InvalidResult(RANGE_OVERFLOW))?
    };
    Ok(format_mul_div(&result, &x, &y, sigfigs))
}

/// Square root of a value at its own significant-figure count (unary
/// precision rule), unless overridden.
///
/// # Errors
/// - `InvalidDomain` for negative input
/// - `InvalidInput` if the value is not a finite decimal
/// - `InvalidArgument` if `sigfigs` is `Some(0)`
pub fn sqrt(value: impl Into<DecimalInput>, sigfigs: Option<u32>) -> NumericResult<String> {
    validate_override(sigfigs)?;
    let x = normalize(&value.into())?;
    if x.value.is_sign_negative() {
        return Err(NumericError::InvalidDomain("square root of a negative value"));
    }
    let root = x
        .value
        .sqrt()
        .ok_or(NumericError::InvalidDomain("square root of a negative value"))?;
    Ok(format_sigfig(&root, sigfigs.unwrap_or(x.sigfigs)))
}

/// Absolute value at the input's own significant-figure count, unless
/// overridden.
///
/// # Errors
/// - `InvalidInput` if the value is not a finite decimal
/// - `InvalidArgument` if `sigfigs` is `Some(0)`
pub fn abs(value: impl Into<DecimalInput>, sigfigs: Option<u32>) -> NumericResult<String> {
    validate_override(sigfigs)?;
    let x = normalize(&value.into())?;
    Ok(format_sigfig(&x.value.abs(), sigfigs.unwrap_or(x.sigfigs)))
}

// ============================================================================
// Percentage
// ============================================================================

/// Format `part` as a percentage of `whole`.
///
/// # Errors
/// - `DivisionByZero` (zero-whole message) if `whole` is exactly zero
/// - `InvalidInput` if either operand is not a finite decimal
/// - `InvalidArgument` if the requested sigfig count is zero
/// - `InvalidResult` if the ratio leaves the representable range
///
/// # Example
/// ```ignore
/// assert_eq!(sigdec::percentage("1", "3", PercentageOptions::default())?, "33%");
/// assert_eq!(sigdec::percentage("1", "3", 4u32)?, "33.33%");
/// ```
pub fn percentage(
    part: impl Into<DecimalInput>,
    whole: impl Into<DecimalInput>,
    options: impl Into<PercentageOptions>,
) -> NumericResult<String> {
    let options = options.into();
    validate_override(options.sigfigs)?;
    let y = normalize(&whole.into())?;
    if y.value.is_zero() {
        return Err(NumericError::DivisionByZero("percentage whole is zero"));
    }
    let x = normalize(&part.into())?;
    let ratio = x
        .value
        .checked_div(y.value)
        .and_then(|q| q.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(NumericError::InvalidResult(RANGE_OVERFLOW))?;
    let mut out = format_mul_div(&ratio, &x, &y, options.sigfigs);
    if options.append_percent {
        out.push('%');
    }
    Ok(out)
}

// ============================================================================
// Shared Helpers
// ============================================================================

const RANGE_OVERFLOW: &str = "result exceeds the representable decimal range";
const NON_FINITE: &str = "result is not a finite number";

fn format_sigfig(result: &Decimal, sigfigs: u32) -> String {
    format_decimal_sigfigs(result, sigfigs, RoundMode::Threshold(DEFAULT_THRESHOLD))
}

fn validate_override(sigfigs: Option<u32>) -> NumericResult<()> {
    match sigfigs {
        Some(n) => validate_sigfigs(n),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_tracks_decimal_places() {
        assert_eq!(add(1.23, 4.5, None).unwrap(), "5.7");
        assert_eq!(add(123, 4.567, None).unwrap(), "128");
        assert_eq!(add("0.125", "0.2", None).unwrap(), "0.3");
    }

    #[test]
    fn test_add_with_override_uses_sigfigs() {
        assert_eq!(add(1.23, 4.5, Some(3)).unwrap(), "5.73");
        assert_eq!(add(123, 4.567, Some(6)).unwrap(), "127.567");
    }

    #[test]
    fn test_sub() {
        assert_eq!(sub("5.73", "0.5", None).unwrap(), "5.2");
        assert_eq!(sub("4", "6", None).unwrap(), "-2");
        assert_eq!(sub("1.00", "0.993", Some(2)).unwrap(), "0.0070");
    }

    #[test]
    fn test_mul_tracks_sigfigs() {
        assert_eq!(mul(100, 2.5, None).unwrap(), "3e+2");
        assert_eq!(mul("1.50", "2.0", None).unwrap(), "3.0");
        assert_eq!(mul("4.56", "1.4", None).unwrap(), "6.4");
    }

    #[test]
    fn test_div() {
        assert_eq!(div("10.0", "4.0", None).unwrap(), "2.5");
        assert_eq!(div(1, 3, None).unwrap(), "0.3");
        assert_eq!(div("1.000", "3.000", None).unwrap(), "0.3333");
    }

    #[test]
    fn test_div_by_zero() {
        assert_eq!(
            div(5, 0, None),
            Err(NumericError::DivisionByZero("division by zero"))
        );
        // divisor check takes priority over the unparsable dividend
        assert_eq!(
            div("garbage", 0, None),
            Err(NumericError::DivisionByZero("division by zero"))
        );
    }

    #[test]
    fn test_modulo() {
        assert_eq!(modulo(7, 3, None).unwrap(), "1");
        assert_eq!(modulo(-7, 3, None).unwrap(), "-1");
        assert_eq!(modulo("7.5", "2", None).unwrap(), "2");
        assert_eq!(
            modulo(7, 0, None),
            Err(NumericError::DivisionByZero("modulus is zero"))
        );
    }

    #[test]
    fn test_int_div_floors_toward_negative_infinity() {
        assert_eq!(int_div(7, 2, None).unwrap(), "3");
        assert_eq!(int_div(7, -2, None).unwrap(), "-4");
        assert_eq!(int_div(-7, 2, None).unwrap(), "-4");
        assert_eq!(int_div(-7, -2, None).unwrap(), "3");
        assert_eq!(int_div(6, 3, None).unwrap(), "2");
        assert_eq!(
            int_div(1, 0, None),
            Err(NumericError::DivisionByZero("division by zero"))
        );
    }

    #[test]
    fn test_pow_integer_exponent_exact() {
        assert_eq!(pow(2, 10, None).unwrap(), "1e+3");
        assert_eq!(pow("2.0", "10", Some(4)).unwrap(), "1024");
        assert_eq!(pow("2.5", "2", None).unwrap(), "6");
        assert_eq!(pow("2.5", "2.0", None).unwrap(), "6.3");
        assert_eq!(pow(2, -2, Some(2)).unwrap(), "0.25");
    }

    #[test]
    fn test_pow_non_integer_exponent_approximates() {
        assert_eq!(pow(4, "0.5", Some(3)).unwrap(), "2.00");
        assert_eq!(pow("27", "0.5", Some(4)).unwrap(), "5.196");
    }

    #[test]
    fn test_pow_non_finite_results() {
        assert_eq!(pow(0, -1, None), Err(NumericError::InvalidResult(NON_FINITE)));
        assert_eq!(
            pow(0, "-0.5", None),
            Err(NumericError::InvalidResult(NON_FINITE))
        );
        assert_eq!(
            pow(-8, "0.5", None),
            Err(NumericError::InvalidResult(NON_FINITE))
        );
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(sqrt("4.0", None).unwrap(), "2.0");
        assert_eq!(sqrt("2", Some(5)).unwrap(), "1.4142");
        assert_eq!(sqrt("0", None).unwrap(), "0");
        assert!(matches!(sqrt("-1", None), Err(NumericError::InvalidDomain(_))));
    }

    #[test]
    fn test_abs() {
        assert_eq!(abs("-1.50", None).unwrap(), "1.50");
        assert_eq!(abs("-250", Some(2)).unwrap(), "2.5e+2");
        assert_eq!(abs(3, None).unwrap(), "3");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage("50.0", "200.0", PercentageOptions::default()).unwrap(), "25.0%");
        assert_eq!(percentage("1", "3", 4u32).unwrap(), "33.33%");
        assert_eq!(
            percentage(
                "1",
                "3",
                PercentageOptions {
                    sigfigs: Some(2),
                    append_percent: false
                }
            )
            .unwrap(),
            "33"
        );
        assert_eq!(
            percentage(1, 0, PercentageOptions::default()),
            Err(NumericError::DivisionByZero("percentage whole is zero"))
        );
    }

    #[test]
    fn test_invalid_operands() {
        assert!(matches!(add("abc", 1, None), Err(NumericError::InvalidInput(_))));
        assert!(matches!(mul(1, f64::NAN, None), Err(NumericError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_sigfig_override_rejected() {
        assert!(matches!(add(1, 2, Some(0)), Err(NumericError::InvalidArgument(_))));
        assert!(matches!(sqrt(4, Some(0)), Err(NumericError::InvalidArgument(_))));
    }
}
