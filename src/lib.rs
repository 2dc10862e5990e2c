// ============================================================================
// Sigdec Library
// Significant-figures-aware decimal arithmetic and formatting engine
// ============================================================================

//! # Sigdec
//!
//! Decimal arithmetic and formatting that preserves precision according to
//! physical-science significant-figure conventions.
//!
//! ## Features
//!
//! - **Sigfig counting** from textual representations, preserving
//!   trailing-zero precision ("1.0" is 2 sigfigs, `1.0f64` is 1)
//! - **Precision-resolving arithmetic**: add/sub track decimal places of
//!   the least-precise operand, mul/div track its significant figures
//! - **Threshold-configurable rounding** with exact digit-level decisions
//!   (a decision digit >= the threshold rounds away from zero)
//! - **Scientific and engineering notation** with exact coefficient widths
//! - **Decimal-exact internals** via `rust_decimal`; no binary
//!   floating-point rounding error in any arithmetic path
//!
//! ## Example
//!
//! ```rust
//! use sigdec::prelude::*;
//!
//! // Addition keeps the decimal places of the least-precise operand
//! assert_eq!(add("1.23", "4.5", None).unwrap(), "5.7");
//!
//! // Multiplication keeps the sigfigs of the least-precise operand,
//! // switching notation rather than implying precision
//! assert_eq!(mul(100, 2.5, None).unwrap(), "3e+2");
//!
//! // Text input preserves trailing zeros; native input cannot
//! assert_eq!(sigfigs_of("1.230").unwrap(), 4);
//! assert_eq!(sigfigs_of(1.23).unwrap(), 3);
//!
//! // Threshold-configurable rounding: 4 rounds up at threshold 3
//! assert_eq!(round(123.456, 3, 3).unwrap(), "124");
//!
//! // Engineering notation constrains exponents to multiples of three
//! assert_eq!(to_engineering(0.000123, None).unwrap(), "123e-6");
//! ```

pub mod engine;
pub mod numeric;
pub mod ops;
pub mod sigfig;

pub use engine::notation::{to_engineering, to_scientific};
pub use engine::rounding::{round, to_decimal_places, to_sigfigs, truncate, DEFAULT_THRESHOLD};
pub use numeric::{DecimalInput, NumericError, NumericResult};
pub use ops::{abs, add, div, int_div, max, min, modulo, mul, percentage, pow, sqrt, sub, PercentageOptions};
pub use sigfig::{digits_after_decimal, sigfigs_of};

// Re-exports for convenience
pub mod prelude {
    pub use crate::engine::notation::{to_engineering, to_scientific};
    pub use crate::engine::rounding::{
        round, to_decimal_places, to_sigfigs, truncate, DEFAULT_THRESHOLD,
    };
    pub use crate::numeric::{DecimalInput, NumericError, NumericResult};
    pub use crate::ops::{
        abs, add, div, int_div, max, min, modulo, mul, percentage, pow, sqrt, sub,
        PercentageOptions,
    };
    pub use crate::sigfig::{digits_after_decimal, sigfigs_of};
}
