// ============================================================================
// Variadic Reducers
// max/min over mixed inputs with invalid-element filtering
// ============================================================================

use crate::engine::rounding::{
    format_decimal_sigfigs, validate_sigfigs, RoundMode, DEFAULT_THRESHOLD,
};
use crate::numeric::{normalize, DecimalInput, NumericError, NumericResult, Operand};

/// Largest value in `values`.
///
/// Elements that fail to parse (non-finite natives, malformed text) are
/// silently skipped. The extremum is selected by exact comparison over the
/// unrounded survivors; only the selected value is then rounded, at
/// `sigfigs` or the minimum sigfig count across the surviving original
/// representations.
///
/// # Errors
/// - `NoValidInput` if no element survives filtering
/// - `InvalidArgument` if `sigfigs` is `Some(0)`
///
/// # Example
/// ```ignore
/// let values = [1.into(), "invalid".into(), 3.into()];
/// assert_eq!(sigdec::max(&values, None)?, "3");
/// ```
pub fn max(values: &[DecimalInput], sigfigs: Option<u32>) -> NumericResult<String> {
    extremum(values, sigfigs, true)
}

/// Smallest value in `values`. Same filtering and precision rules as
/// [`max`].
///
/// # Errors
/// Same as [`max`].
pub fn min(values: &[DecimalInput], sigfigs: Option<u32>) -> NumericResult<String> {
    extremum(values, sigfigs, false)
}

fn extremum(values: &[DecimalInput], sigfigs: Option<u32>, pick_max: bool) -> NumericResult<String> {
    if let Some(n) = sigfigs {
        validate_sigfigs(n)?;
    }

    let mut survivors: Vec<Operand> = Vec::with_capacity(values.len());
    for value in values {
        match normalize(value) {
            Ok(operand) => survivors.push(operand),
            Err(_) => tracing::debug!("skipping unusable reducer element {}", value),
        }
    }
    if survivors.is_empty() {
        return Err(NumericError::NoValidInput);
    }

    let n = sigfigs
        .unwrap_or_else(|| survivors.iter().map(|operand| operand.sigfigs).min().unwrap_or(1));
    // Exact comparison first; candidates are never pre-rounded. Ties keep
    // the earliest survivor.
    let chosen = survivors
        .iter()
        .skip(1)
        .fold(&survivors[0], |best, candidate| {
            let beats = if pick_max {
                candidate.value > best.value
            } else {
                candidate.value < best.value
            };
            if beats {
                candidate
            } else {
                best
            }
        });
    Ok(format_decimal_sigfigs(&chosen.value, n, RoundMode::Threshold(DEFAULT_THRESHOLD)))
}
