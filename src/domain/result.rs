//! Result type alias for LexShield

use super::errors::LexShieldError;

/// Result type alias for LexShield operations
///
/// # Examples
///
/// ```
/// use lexshield::domain::result::Result;
/// use lexshield::domain::errors::LexShieldError;
///
/// fn failing_function() -> Result<()> {
///     Err(LexShieldError::Validation("Invalid input".to_string()))
/// }
///
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, LexShieldError>;
