// ============================================================================
// Significant-Figure Counter
// Counts significant figures and decimal places of a textual representation
// ============================================================================

use crate::numeric::{DecimalInput, DecimalParts, NumericResult};

/// Count the significant figures of a value.
///
/// Counting follows physical-science convention over the value's textual
/// representation:
/// - zero counts as 1
/// - in scientific form, only the coefficient counts
/// - with a separator, leading zeros are insignificant and trailing
///   fraction zeros are significant ("1.230" is 4, "0.0050" is 2)
/// - without a separator, both leading and trailing zeros are
///   insignificant ("100" is 1, but "100." is 3)
///
/// Native input loses trailing-zero information at the source (`1.0f64`
/// renders "1"); text is the precision-preserving path.
///
/// # Errors
/// Returns `InvalidInput` if the value is not a finite decimal.
///
/// # Example
/// ```ignore
/// assert_eq!(sigdec::sigfigs_of("1.230")?, 4);
/// assert_eq!(sigdec::sigfigs_of(100)?, 1);
/// ```
pub fn sigfigs_of(value: impl Into<DecimalInput>) -> NumericResult<u32> {
    let input = value.into();
    Ok(count_parts(&input.parts()?))
}

/// Count the digits after the decimal separator of a value's
/// representation, exponent-adjusted.
///
/// Integer-valued and separator-free representations count 0; an exponent
/// shifts the count ("1.5e-3" is 0.0015, so 4). For native input the count
/// is taken from the platform's shortest rendering (best-effort).
pub fn digits_after_decimal(value: impl Into<DecimalInput>) -> NumericResult<u32> {
    let input = value.into();
    Ok(places_parts(&input.parts()?))
}

/// Sigfig count over scanned parts. The exponent never participates:
/// scientific form counts its coefficient only.
pub(crate) fn count_parts(parts: &DecimalParts) -> u32 {
    if parts.is_zero() {
        return 1;
    }
    let int_digits = parts.int_digits.trim_start_matches('0');
    match parts.frac_digits.as_deref() {
        Some(frac) => {
            if int_digits.is_empty() {
                let frac = frac.trim_start_matches('0');
                (frac.len() as u32).max(1)
            } else {
                (int_digits.len() + frac.len()) as u32
            }
        },
        None => {
            let digits = int_digits.trim_end_matches('0');
            (digits.len() as u32).max(1)
        },
    }
}

/// Effective decimal places over scanned parts:
/// `max(0, fraction_len - exponent)`.
pub(crate) fn places_parts(parts: &DecimalParts) -> u32 {
    let frac_len = parts.frac_digits.as_deref().map_or(0, str::len) as i64;
    (frac_len - i64::from(parts.exponent)).max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_counts_one() {
        assert_eq!(sigfigs_of("0").unwrap(), 1);
        assert_eq!(sigfigs_of("0.000").unwrap(), 1);
        assert_eq!(sigfigs_of("-0").unwrap(), 1);
        assert_eq!(sigfigs_of(0.0).unwrap(), 1);
    }

    #[test]
    fn test_trailing_fraction_zeros_significant() {
        assert_eq!(sigfigs_of("1.230").unwrap(), 4);
        assert_eq!(sigfigs_of("10.0").unwrap(), 3);
        assert_eq!(sigfigs_of("0.0050").unwrap(), 2);
    }

    #[test]
    fn test_integer_trailing_zeros_insignificant() {
        assert_eq!(sigfigs_of("100").unwrap(), 1);
        assert_eq!(sigfigs_of(100).unwrap(), 1);
        assert_eq!(sigfigs_of("1200").unwrap(), 2);
        assert_eq!(sigfigs_of("10001").unwrap(), 5);
    }

    #[test]
    fn test_trailing_separator_marks_zeros_significant() {
        assert_eq!(sigfigs_of("100.").unwrap(), 3);
    }

    #[test]
    fn test_leading_zeros_insignificant() {
        assert_eq!(sigfigs_of("0.25").unwrap(), 2);
        assert_eq!(sigfigs_of("007").unwrap(), 1);
        assert_eq!(sigfigs_of("0.00120").unwrap(), 3);
    }

    #[test]
    fn test_scientific_counts_coefficient_only() {
        assert_eq!(sigfigs_of("1.50e8").unwrap(), 3);
        assert_eq!(sigfigs_of("100e5").unwrap(), 1);
        assert_eq!(sigfigs_of("2e-7").unwrap(), 1);
    }

    #[test]
    fn test_native_loses_trailing_zeros() {
        assert_eq!(sigfigs_of(1.0).unwrap(), 1);
        assert_eq!(sigfigs_of(1.25).unwrap(), 3);
        assert_eq!(sigfigs_of(0.000123).unwrap(), 3);
    }

    #[test]
    fn test_rejects_non_finite_and_garbage() {
        assert!(sigfigs_of(f64::NAN).is_err());
        assert!(sigfigs_of(f64::NEG_INFINITY).is_err());
        assert!(sigfigs_of("12three").is_err());
    }

    #[test]
    fn test_digits_after_decimal() {
        assert_eq!(digits_after_decimal("1.50").unwrap(), 2);
        assert_eq!(digits_after_decimal("123").unwrap(), 0);
        assert_eq!(digits_after_decimal("100.").unwrap(), 0);
        assert_eq!(digits_after_decimal(4.567).unwrap(), 3);
    }

    #[test]
    fn test_digits_after_decimal_exponent_adjusted() {
        assert_eq!(digits_after_decimal("1.5e-3").unwrap(), 4);
        assert_eq!(digits_after_decimal("1.5e3").unwrap(), 0);
        assert_eq!(digits_after_decimal("15e-2").unwrap(), 2);
    }
}
