// ============================================================================
// Engine Module
// Contains the core rounding and notation formatting logic
// ============================================================================

pub mod notation;
pub mod rounding;

pub use notation::{to_engineering, to_scientific};
pub use rounding::{round, to_decimal_places, to_sigfigs, truncate, DEFAULT_THRESHOLD};
