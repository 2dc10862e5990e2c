// ============================================================================
// Operations Module
// Arithmetic operations layer over the sigfig and rounding engines
// ============================================================================

mod arithmetic;
mod reducers;

pub use arithmetic::{
    abs, add, div, int_div, modulo, mul, percentage, pow, sqrt, sub, PercentageOptions,
};
pub use reducers::{max, min};
