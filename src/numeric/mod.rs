// ============================================================================
// Numeric Module
// Decimal capability boundary: errors, input typing, operand normalization
// ============================================================================
//
// This module provides:
// - DecimalInput: dual text/native input sum type
// - Operand: normalized exact decimal + precision metadata (crate-internal)
// - NumericError: error kinds for all operations
//
// Design principles:
// - Text input preserves trailing-zero precision; native input cannot
// - The arbitrary-precision decimal capability (rust_decimal) is confined
//   behind this boundary; the rest of the crate speaks digits and strings
// - All fallible paths return Result (no panics)

mod errors;
mod input;

pub use errors::{NumericError, NumericResult};
pub use input::DecimalInput;

pub(crate) use input::{normalize, DecimalParts, Operand};
