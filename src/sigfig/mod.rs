// ============================================================================
// Sigfig Module
// Significant-figure counting and n-ary precision resolution
// ============================================================================

pub mod counter;
pub(crate) mod resolver;

pub use counter::{digits_after_decimal, sigfigs_of};
