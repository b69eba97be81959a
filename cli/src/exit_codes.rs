//! # Exit Codes
//!
//! Exit codes for the ftheader CLI, so scripts and CI jobs can tell a
//! missing header apart from a broken invocation.

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// General error (unspecified)
pub const EXIT_ERROR: i32 = 1;

/// Configuration error (missing identity or email, unreadable config file)
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// A check failed: a file lacks a header, or holds too many functions
pub const EXIT_CHECK_FAILED: i32 = 5;

/// Invalid input (bad arguments, unreadable paths, etc.)
pub const EXIT_INVALID_INPUT: i32 = 6;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_CONFIG_ERROR,
            EXIT_CHECK_FAILED,
            EXIT_INVALID_INPUT,
        ];

        for (i, &code1) in codes.iter().enumerate() {
            for (j, &code2) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(code1, code2, "Exit codes {} and {} are not unique", i, j);
                }
            }
        }
    }

    #[test]
    fn test_success_is_zero() {
        assert_eq!(EXIT_SUCCESS, 0);
    }

    #[test]
    fn test_error_codes_are_positive() {
        assert!(EXIT_ERROR > 0);
        assert!(EXIT_CONFIG_ERROR > 0);
        assert!(EXIT_CHECK_FAILED > 0);
        assert!(EXIT_INVALID_INPUT > 0);
    }
}
