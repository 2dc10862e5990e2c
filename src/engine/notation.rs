// ============================================================================
// Notation Formatter
// Scientific and engineering notation built on the rounding engine
// ============================================================================

use super::rounding::{
    push_digits, push_exponent, render_exponential, rounded_digits, validate_sigfigs, RoundMode,
    DEFAULT_THRESHOLD,
};
use crate::numeric::{normalize, DecimalInput, NumericResult, Operand};

/// Format a value in scientific notation: `[-]D.DDD...e[+/-]EXP` with
/// exactly `sigfigs` coefficient digits.
///
/// When `sigfigs` is `None`, the significant-figure count of the input
/// representation is used, so `"1.50"` renders as `"1.50e+0"`.
/// Zero renders as `"0e+0"` (zero-padded coefficient when `sigfigs` is
/// given).
///
/// # Errors
/// - `InvalidArgument` if `sigfigs` is `Some(0)`
/// - `InvalidInput` if the value is not a finite decimal
///
/// # Example
/// ```ignore
/// assert_eq!(sigdec::to_scientific("0.00250", None)?, "2.50e-3");
/// assert_eq!(sigdec::to_scientific(1234, Some(2))?, "1.2e+3");
/// ```
pub fn to_scientific(value: impl Into<DecimalInput>, sigfigs: Option<u32>) -> NumericResult<String> {
    let operand = normalize(&value.into())?;
    let n = resolve_sigfigs(sigfigs, &operand)?;
    if operand.value.is_zero() {
        return Ok(zero_exponential(n));
    }
    let (digits, mag) = rounded_digits(&operand.value, n, RoundMode::Threshold(DEFAULT_THRESHOLD));
    Ok(render_exponential(operand.value.is_sign_negative(), &digits, mag))
}

/// Format a value in engineering notation: scientific notation with the
/// exponent constrained to a multiple of 3 and the coefficient in
/// `[1, 1000)`.
///
/// The coefficient is laid out from the digit sequence rounded at
/// `sigfigs`; when the integer width exceeds `sigfigs`, layout zeros fill
/// the remainder (`0.000123` at 2 sigfigs is `"120e-6"`).
///
/// # Errors
/// - `InvalidArgument` if `sigfigs` is `Some(0)`
/// - `InvalidInput` if the value is not a finite decimal
///
/// # Example
/// ```ignore
/// assert_eq!(sigdec::to_engineering(0.000123, None)?, "123e-6");
/// assert_eq!(sigdec::to_engineering(44000, Some(2))?, "44e+3");
/// ```
pub fn to_engineering(
    value: impl Into<DecimalInput>,
    sigfigs: Option<u32>,
) -> NumericResult<String> {
    let operand = normalize(&value.into())?;
    let n = resolve_sigfigs(sigfigs, &operand)?;
    if operand.value.is_zero() {
        return Ok(zero_exponential(n));
    }
    let (mut digits, mag) =
        rounded_digits(&operand.value, n, RoundMode::Threshold(DEFAULT_THRESHOLD));
    let exponent = mag.div_euclid(3) * 3;
    let int_len = (mag - exponent) as usize + 1;
    while digits.len() < int_len {
        digits.push(0);
    }

    let mut out = String::new();
    if operand.value.is_sign_negative() {
        out.push('-');
    }
    push_digits(&mut out, &digits[..int_len]);
    if digits.len() > int_len {
        out.push('.');
        push_digits(&mut out, &digits[int_len..]);
    }
    push_exponent(&mut out, exponent);
    Ok(out)
}

fn resolve_sigfigs(requested: Option<u32>, operand: &Operand) -> NumericResult<u32> {
    match requested {
        Some(n) => {
            validate_sigfigs(n)?;
            Ok(n)
        },
        None => Ok(operand.sigfigs),
    }
}

fn zero_exponential(sigfigs: u32) -> String {
    let mut out = String::from("0");
    if sigfigs > 1 {
        out.push('.');
        for _ in 1..sigfigs {
            out.push('0');
        }
    }
    out.push_str("e+0");
    out
}
