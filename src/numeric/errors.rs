// ============================================================================
// Numeric Errors
// Error types for sigfig arithmetic and formatting operations
// ============================================================================

use std::fmt;

/// Errors that can occur while parsing, computing, or formatting values.
///
/// Callers are expected to branch on the variant, not on the message text.
/// The payload carries context for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Operand could not be parsed as a finite decimal
    InvalidInput(String),
    /// Control parameter (sigfigs, places, threshold) outside its valid range
    InvalidArgument(String),
    /// Zero divisor, modulus, or percentage whole
    DivisionByZero(&'static str),
    /// Operation undefined for the given operand (e.g. negative square root)
    InvalidDomain(&'static str),
    /// Computed value is not finite or not representable
    InvalidResult(&'static str),
    /// Variadic reducer was left with no usable elements
    NoValidInput,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::InvalidInput(value) => {
                write!(f, "invalid input: could not parse {value:?} as a finite decimal")
            },
            NumericError::InvalidArgument(constraint) => {
                write!(f, "invalid argument: {constraint}")
            },
            NumericError::DivisionByZero(site) => write!(f, "{site}"),
            NumericError::InvalidDomain(reason) => write!(f, "{reason}"),
            NumericError::InvalidResult(reason) => write!(f, "{reason}"),
            NumericError::NoValidInput => write!(f, "no valid numeric inputs"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
