// ============================================================================
// Precision Resolver
// Derives output precision for n-ary arithmetic operations
// ============================================================================

use crate::numeric::Operand;

/// Decimal places for an addition/subtraction result: the least-precise
/// operand wins. Any integer-valued operand short-circuits to 0.
pub(crate) fn decimal_places_for_add_sub(operands: &[Operand]) -> u32 {
    let mut places = u32::MAX;
    for operand in operands {
        if operand.decimal_places == 0 {
            return 0;
        }
        places = places.min(operand.decimal_places);
    }
    if places == u32::MAX {
        0
    } else {
        places
    }
}

/// Significant figures for a multiplication/division result: the operand
/// with the fewest sigfigs wins.
pub(crate) fn sigfigs_for_mul_div(operands: &[Operand]) -> u32 {
    operands.iter().map(|operand| operand.sigfigs).min().unwrap_or(1)
}
