//! Result type alias for Veil
//!
//! This module provides a convenient Result type alias that uses VeilError
//! as the error type.

use super::errors::VeilError;

/// Result type alias for Veil operations
///
/// # Examples
///
/// ```
/// use veil::domain::result::Result;
/// use veil::domain::errors::VeilError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(VeilError::InvalidInput("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, VeilError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::VeilError;

    #[test]
    fn test_result_ok() {
        let result: Result<i32> = Ok(42);
        assert!(result.is_ok());
        if let Ok(value) = result {
            assert_eq!(value, 42);
        }
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(VeilError::InvalidInput("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
