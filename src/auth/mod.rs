//! Token verification for the workspace archive download.
//!
//! Implements constant-time comparison to mitigate timing attacks.

use subtle::ConstantTimeEq;

/// Check a caller-supplied token against the configured download token.
///
/// An unset expected token means the endpoint is disabled and every
/// request is rejected.
pub fn verify_download_token(provided: Option<&str>, expected: Option<&str>) -> bool {
    match (provided, expected) {
        (Some(provided), Some(expected)) => constant_time_compare(provided, expected),
        _ => false,
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    // Constant-time comparison
    a_bytes.ct_eq(b_bytes).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("test-token-123", "test-token-123"));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("test-token-123", "test-token-124"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "much-longer-token"));
    }

    #[test]
    fn test_verify_rejects_when_unconfigured() {
        assert!(!verify_download_token(Some("anything"), None));
        assert!(!verify_download_token(None, None));
    }

    #[test]
    fn test_verify_rejects_missing_token() {
        assert!(!verify_download_token(None, Some("secret")));
    }

    #[test]
    fn test_verify_accepts_match() {
        assert!(verify_download_token(Some("secret"), Some("secret")));
    }
}
