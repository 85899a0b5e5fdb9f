const MAX_ERROR_LENGTH: usize = 2_000;

/// Cap a backend error body so a misbehaving service cannot flood the terminal.
pub fn truncate_error(error: &str) -> String {
    if error.len() <= MAX_ERROR_LENGTH {
        error.to_string()
    } else {
        let mut end = MAX_ERROR_LENGTH;
        while !error.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated {} bytes]", &error[..end], error.len() - end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_error_unchanged() {
        assert_eq!(truncate_error("Not Found"), "Not Found");
    }

    #[test]
    fn test_long_error_truncated() {
        let body = "x".repeat(2_500);
        let out = truncate_error(&body);
        assert!(out.starts_with(&"x".repeat(2_000)));
        assert!(out.ends_with("[truncated 500 bytes]"));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let body = format!("{}é{}", "a".repeat(1_999), "b".repeat(100));
        let out = truncate_error(&body);
        assert!(out.starts_with(&"a".repeat(1_999)));
        assert!(!out.contains('é'));
    }
}
