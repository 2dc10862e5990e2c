// ============================================================================
// Rounding Engine
// Digit-level rounding, truncation, and fixed/exponential layout selection
// ============================================================================

use crate::numeric::{normalize, DecimalInput, NumericError, NumericResult};
use rust_decimal::{Decimal, RoundingStrategy};
use smallvec::SmallVec;

/// Decision-digit threshold used when none is supplied: a decision digit of
/// exactly 5 rounds away from zero (round-half-up).
pub const DEFAULT_THRESHOLD: u8 = 5;

/// Magnitude at and above which output switches to exponential layout.
pub(crate) const EXP_UPPER_MAG: i32 = 21;

/// Magnitude at and below which output switches to exponential layout.
pub(crate) const EXP_LOWER_MAG: i32 = -7;

/// Largest fractional scale the decimal capability can carry.
const MAX_SCALE: u32 = 28;

/// Digit buffer for one rounded coefficient. Inline for every realistic
/// precision request.
pub(crate) type DigitVec = SmallVec<[u8; 32]>;

/// Round direction policy for the digit engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RoundMode {
    /// Round away from zero when the decision digit is >= the threshold
    Threshold(u8),
    /// Never round away from zero (threshold-10 equivalent)
    Truncate,
}

// ============================================================================
// Public API
// ============================================================================

/// Round a value to `sigfigs` significant figures with an explicit
/// round-direction threshold.
///
/// The digit at 0-based index `sigfigs` of the value's digit sequence is
/// the decision digit (0 when absent); it rounds away from zero when
/// `decision >= threshold`, strictly. Sign is handled independently of
/// magnitude. Output switches to exponential layout when fixed layout
/// would imply extra significant figures (e.g. `round(250, 2, 5)` is
/// `"2.5e+2"`, never `"250"`).
///
/// # Errors
/// - `InvalidArgument` if `sigfigs` is zero or `threshold` exceeds 9
/// - `InvalidInput` if the value is not a finite decimal
///
/// # Example
/// ```ignore
/// assert_eq!(sigdec::round(123.456, 3, 3)?, "124");
/// assert_eq!(sigdec::round(123.256, 3, 3)?, "123");
/// ```
pub fn round(value: impl Into<DecimalInput>, sigfigs: u32, threshold: u8) -> NumericResult<String> {
    validate_sigfigs(sigfigs)?;
    validate_threshold(threshold)?;
    let operand = normalize(&value.into())?;
    Ok(format_decimal_sigfigs(&operand.value, sigfigs, RoundMode::Threshold(threshold)))
}

/// Round a value to `sigfigs` significant figures, half-up.
///
/// Equivalent to [`round`] at the default threshold of 5.
///
/// # Errors
/// - `InvalidArgument` if `sigfigs` is zero
/// - `InvalidInput` if the value is not a finite decimal
pub fn to_sigfigs(value: impl Into<DecimalInput>, sigfigs: u32) -> NumericResult<String> {
    round(value, sigfigs, DEFAULT_THRESHOLD)
}

/// Truncate a value to `sigfigs` significant figures (round toward zero).
///
/// # Errors
/// - `InvalidArgument` if `sigfigs` is zero
/// - `InvalidInput` if the value is not a finite decimal
pub fn truncate(value: impl Into<DecimalInput>, sigfigs: u32) -> NumericResult<String> {
    validate_sigfigs(sigfigs)?;
    let operand = normalize(&value.into())?;
    Ok(format_decimal_sigfigs(&operand.value, sigfigs, RoundMode::Truncate))
}

/// Format a value with exactly `places` digits after the decimal
/// separator, rounding half-up. Zero pads to the full place count
/// (`to_decimal_places(0, 2)` is `"0.00"`).
///
/// # Errors
/// Returns `InvalidInput` if the value is not a finite decimal.
pub fn to_decimal_places(value: impl Into<DecimalInput>, places: u32) -> NumericResult<String> {
    let operand = normalize(&value.into())?;
    Ok(format_decimal_places(&operand.value, places))
}

// ============================================================================
// Validation
// ============================================================================

pub(crate) fn validate_sigfigs(sigfigs: u32) -> NumericResult<()> {
    if sigfigs == 0 {
        return Err(NumericError::InvalidArgument(
            "sigfigs must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_threshold(threshold: u8) -> NumericResult<()> {
    if threshold > 9 {
        return Err(NumericError::InvalidArgument(
            "threshold must be an integer between 0 and 9".to_string(),
        ));
    }
    Ok(())
}

// ============================================================================
// Digit Engine
// ============================================================================

/// Exact digit sequence of a nonzero decimal's mantissa, with the decimal
/// magnitude (power of ten of the most significant digit).
pub(crate) fn digits_of(d: &Decimal) -> (DigitVec, i32) {
    debug_assert!(!d.is_zero());
    let mantissa = d.mantissa().unsigned_abs();
    let scale = d.scale() as i32;
    let mut digits = DigitVec::new();
    digits.extend(mantissa.to_string().bytes().map(|b| b - b'0'));
    let mag = digits.len() as i32 - 1 - scale;
    (digits, mag)
}

/// Round a nonzero decimal's digit sequence to exactly `sigfigs` digits.
///
/// Returns the kept digits (right-padded with zeros when fewer exist) and
/// the possibly carry-bumped magnitude. The mantissa digits are exact, so
/// the decision digit is never pre-rounded.
pub(crate) fn rounded_digits(d: &Decimal, sigfigs: u32, mode: RoundMode) -> (DigitVec, i32) {
    let n = sigfigs as usize;

    // Fast path: the default threshold is exactly the capability's
    // round-half-away-from-zero, when the implied scale is in range.
    if mode == RoundMode::Threshold(DEFAULT_THRESHOLD) {
        let (_, mag) = digits_of(d);
        let dp = i64::from(sigfigs) - 1 - i64::from(mag);
        if (0..=i64::from(MAX_SCALE)).contains(&dp) {
            let rounded = d
                .abs()
                .round_dp_with_strategy(dp as u32, RoundingStrategy::MidpointAwayFromZero);
            let (mut digits, mag) = digits_of(&rounded);
            // A full carry appends one zero beyond the target count
            digits.truncate(n);
            while digits.len() < n {
                digits.push(0);
            }
            return (digits, mag);
        }
    }

    let (mut digits, mut mag) = digits_of(d);
    let decision = digits.get(n).copied().unwrap_or(0);
    let round_up = match mode {
        RoundMode::Threshold(threshold) => {
            if threshold != DEFAULT_THRESHOLD {
                tracing::debug!(
                    "threshold {} rounding: decision digit {} -> round_up={}",
                    threshold,
                    decision,
                    decision >= threshold
                );
            }
            decision >= threshold
        },
        RoundMode::Truncate => false,
    };
    digits.truncate(n);
    while digits.len() < n {
        digits.push(0);
    }
    if round_up {
        increment(&mut digits, &mut mag);
    }
    (digits, mag)
}

/// Increment a digit vector by one unit in its last place, renormalizing
/// to a new leading digit on full carry (99 -> 10 with magnitude + 1).
fn increment(digits: &mut DigitVec, mag: &mut i32) {
    for i in (0..digits.len()).rev() {
        if digits[i] < 9 {
            digits[i] += 1;
            return;
        }
        digits[i] = 0;
    }
    digits.insert(0, 1);
    digits.pop();
    *mag += 1;
}

// ============================================================================
// Rendering
// ============================================================================

/// Format a decimal at `sigfigs` significant figures under the given mode.
pub(crate) fn format_decimal_sigfigs(d: &Decimal, sigfigs: u32, mode: RoundMode) -> String {
    if d.is_zero() {
        return "0".to_string();
    }
    let (digits, mag) = rounded_digits(d, sigfigs, mode);
    render_sigfig(d.is_sign_negative(), &digits, mag, sigfigs)
}

/// Format a decimal with exactly `places` fraction digits, half-up.
pub(crate) fn format_decimal_places(d: &Decimal, places: u32) -> String {
    if d.is_zero() {
        return zero_with_places(places);
    }
    let (digits, mag) = digits_of(d);
    if mag >= EXP_UPPER_MAG {
        // Beyond the fixed-notation band: exponential at natural precision
        let mut digits = digits;
        while digits.len() > 1 && digits.last() == Some(&0) {
            digits.pop();
        }
        return render_exponential(d.is_sign_negative(), &digits, mag);
    }
    let rounded = d
        .abs()
        .round_dp_with_strategy(places.min(MAX_SCALE), RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return zero_with_places(places);
    }
    let mut out = String::new();
    if d.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&rounded.to_string());
    pad_places(&mut out, places);
    out
}

/// Select fixed vs exponential layout for a sigfig-rounded coefficient.
///
/// Exponential wins when fixed layout would need integer trailing zeros
/// beyond the kept digits, or when the magnitude leaves the fixed band.
fn render_sigfig(negative: bool, digits: &[u8], mag: i32, sigfigs: u32) -> String {
    if i64::from(mag) + 1 > i64::from(sigfigs) || mag >= EXP_UPPER_MAG || mag <= EXP_LOWER_MAG {
        render_exponential(negative, digits, mag)
    } else {
        render_fixed(negative, digits, mag)
    }
}

fn render_fixed(negative: bool, digits: &[u8], mag: i32) -> String {
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if mag < 0 {
        out.push_str("0.");
        for _ in 0..(-mag - 1) {
            out.push('0');
        }
        push_digits(&mut out, digits);
    } else {
        let int_len = mag as usize + 1;
        push_digits(&mut out, &digits[..int_len]);
        if digits.len() > int_len {
            out.push('.');
            push_digits(&mut out, &digits[int_len..]);
        }
    }
    out
}

pub(crate) fn render_exponential(negative: bool, digits: &[u8], mag: i32) -> String {
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push((b'0' + digits[0]) as char);
    if digits.len() > 1 {
        out.push('.');
        push_digits(&mut out, &digits[1..]);
    }
    push_exponent(&mut out, mag);
    out
}

pub(crate) fn push_digits(out: &mut String, digits: &[u8]) {
    for &digit in digits {
        out.push((b'0' + digit) as char);
    }
}

/// Append `e` plus an always-signed exponent (`e+0`, `e-6`).
pub(crate) fn push_exponent(out: &mut String, exponent: i32) {
    out.push('e');
    out.push(if exponent < 0 { '-' } else { '+' });
    out.push_str(&exponent.unsigned_abs().to_string());
}

fn zero_with_places(places: u32) -> String {
    let mut out = String::from("0");
    if places > 0 {
        out.push('.');
        for _ in 0..places {
            out.push('0');
        }
    }
    out
}

fn pad_places(out: &mut String, places: u32) {
    if places == 0 {
        return;
    }
    let frac_len = match out.find('.') {
        Some(pos) => (out.len() - pos - 1) as u32,
        None => {
            out.push('.');
            0
        },
    };
    for _ in frac_len..places {
        out.push('0');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    #[test]
    fn test_round_half_up_fast_path() {
        assert_eq!(round("5.73", 2, 5).unwrap(), "5.7");
        assert_eq!(round("5.75", 2, 5).unwrap(), "5.8");
        assert_eq!(round("0.04532", 2, 5).unwrap(), "0.045");
        assert_eq!(round("-2.5", 1, 5).unwrap(), "-3");
    }

    #[test]
    fn test_round_custom_threshold() {
        assert_eq!(round("123.456", 3, 3).unwrap(), "124");
        assert_eq!(round("123.256", 3, 3).unwrap(), "123");
        assert_eq!(round("123.456", 3, 5).unwrap(), "123");
        assert_eq!(round("129", 2, 9).unwrap(), "1.3e+2");
        assert_eq!(round("128", 2, 9).unwrap(), "1.2e+2");
    }

    #[test]
    fn test_threshold_zero_always_increments() {
        assert_eq!(round("5", 1, 0).unwrap(), "6");
        assert_eq!(round("1.21", 2, 0).unwrap(), "1.3");
    }

    #[test]
    fn test_round_carry_switches_to_exponential() {
        assert_eq!(round("99", 2, 5).unwrap(), "99");
        assert_eq!(round("99.5", 2, 5).unwrap(), "1.0e+2");
        assert_eq!(round("0.95", 1, 5).unwrap(), "1");
        assert_eq!(round("999999", 3, 5).unwrap(), "1.00e+6");
    }

    #[test]
    fn test_round_pads_to_requested_precision() {
        assert_eq!(round("5", 3, 5).unwrap(), "5.00");
        assert_eq!(round("0.5", 2, 5).unwrap(), "0.50");
        assert_eq!(round("1e2", 3, 5).unwrap(), "100");
    }

    #[test]
    fn test_round_integer_overflow_of_precision_goes_exponential() {
        assert_eq!(round("250", 1, 5).unwrap(), "3e+2");
        assert_eq!(round("250", 2, 5).unwrap(), "2.5e+2");
        assert_eq!(round("250", 3, 5).unwrap(), "250");
    }

    #[test]
    fn test_round_small_magnitudes() {
        assert_eq!(round("0.000001234", 2, 5).unwrap(), "0.0000012");
        assert_eq!(round("0.0000001234", 2, 5).unwrap(), "1.2e-7");
    }

    #[test]
    fn test_round_zero() {
        assert_eq!(round("0", 3, 5).unwrap(), "0");
        assert_eq!(round("0.000", 1, 5).unwrap(), "0");
    }

    #[test]
    fn test_round_validates_arguments() {
        assert!(matches!(round("1", 0, 5), Err(NumericError::InvalidArgument(_))));
        assert!(matches!(round("1", 2, 10), Err(NumericError::InvalidArgument(_))));
    }

    #[test]
    fn test_truncate_never_rounds_up() {
        assert_eq!(truncate("999", 2).unwrap(), "9.9e+2");
        assert_eq!(truncate("5.79", 2).unwrap(), "5.7");
        assert_eq!(truncate("-5.79", 2).unwrap(), "-5.7");
        assert_eq!(truncate("5.79", 4).unwrap(), "5.790");
    }

    #[test]
    fn test_to_decimal_places() {
        assert_eq!(to_decimal_places("127.567", 0).unwrap(), "128");
        assert_eq!(to_decimal_places("5.73", 1).unwrap(), "5.7");
        assert_eq!(to_decimal_places("5", 2).unwrap(), "5.00");
        assert_eq!(to_decimal_places("-0.004", 2).unwrap(), "0.00");
        assert_eq!(to_decimal_places("0", 3).unwrap(), "0.000");
    }

    #[test]
    fn test_to_decimal_places_beyond_capability_scale_pads() {
        let out = to_decimal_places("0.5", 30).unwrap();
        assert_eq!(out.len(), 2 + 30);
        assert!(out.starts_with("0.5"));
        assert!(out.ends_with("00"));
    }

    #[test]
    fn test_decimal_places_band_switchover() {
        assert_eq!(to_decimal_places("2.5e22", 2).unwrap(), "2.5e+22");
        assert_eq!(
            to_decimal_places("100000000000000000000", 0).unwrap(),
            "100000000000000000000"
        );
    }

    #[test]
    fn test_increment_carry() {
        let mut digits: DigitVec = SmallVec::from_slice(&[9, 9]);
        let mut mag = 1;
        increment(&mut digits, &mut mag);
        assert_eq!(digits.as_slice(), &[1, 0]);
        assert_eq!(mag, 2);

        let mut digits: DigitVec = SmallVec::from_slice(&[1, 9]);
        let mut mag = 1;
        increment(&mut digits, &mut mag);
        assert_eq!(digits.as_slice(), &[2, 0]);
        assert_eq!(mag, 1);
    }

    // Parse an engine output string back to a decimal for comparisons
    fn parse_out(s: &str) -> Decimal {
        let unsigned = s.strip_prefix('-').unwrap_or(s);
        let d = if unsigned.contains(['e', 'E']) {
            Decimal::from_scientific(unsigned).unwrap()
        } else {
            Decimal::from_str(unsigned).unwrap()
        };
        if s.starts_with('-') {
            -d
        } else {
            d
        }
    }

    proptest! {
        // Rounding at n sigfigs yields a representation counting n sigfigs,
        // except integers whose trailing zeros are insignificant by
        // convention ("100" counts 1).
        #[test]
        fn prop_round_preserves_sigfig_count(
            mantissa in -9_999_999_999i64..9_999_999_999i64,
            scale in 0u32..12,
            n in 1u32..10,
        ) {
            let value = Decimal::new(mantissa, scale);
            prop_assume!(!value.is_zero());
            let out = round(value.to_string(), n, DEFAULT_THRESHOLD).unwrap();
            if out.contains(['.', 'e']) || !out.ends_with('0') {
                prop_assert_eq!(crate::sigfig::sigfigs_of(out.as_str()).unwrap(), n);
            }
        }

        // round is idempotent at a fixed precision
        #[test]
        fn prop_round_idempotent(
            mantissa in -9_999_999_999i64..9_999_999_999i64,
            scale in 0u32..12,
            n in 1u32..10,
        ) {
            let value = Decimal::new(mantissa, scale);
            let once = round(value.to_string(), n, DEFAULT_THRESHOLD).unwrap();
            let twice = round(once.as_str(), n, DEFAULT_THRESHOLD).unwrap();
            prop_assert_eq!(once, twice);
        }

        // Lower thresholds round up at least as often as higher ones
        #[test]
        fn prop_threshold_monotonic(
            mantissa in 1i64..9_999_999_999i64,
            scale in 0u32..12,
            n in 1u32..8,
            low in 0u8..10,
            high in 0u8..10,
        ) {
            prop_assume!(low < high);
            let value = Decimal::new(mantissa, scale);
            prop_assume!(!value.is_zero());
            let text = value.to_string();
            let at_low = parse_out(&round(text.as_str(), n, low).unwrap());
            let at_high = parse_out(&round(text.as_str(), n, high).unwrap());
            prop_assert!(at_low >= at_high);
        }

        // Threshold 9 rounds up only on a 9 decision digit; threshold 0
        // always rounds up; truncation never does.
        #[test]
        fn prop_threshold_extremes(
            mantissa in 1i64..9_999_999_999i64,
            scale in 0u32..12,
            n in 1u32..8,
        ) {
            let value = Decimal::new(mantissa, scale);
            prop_assume!(!value.is_zero());
            let text = value.to_string();
            let truncated = parse_out(&round(text.as_str(), n, 9).unwrap());
            let lowest = parse_out(&round(text.as_str(), n, 0).unwrap());
            let plain = parse_out(&truncate(text.as_str(), n).unwrap());
            prop_assert!(truncated >= plain);
            prop_assert!(lowest > plain);
        }
    }
}
