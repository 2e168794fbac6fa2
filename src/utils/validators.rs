//! Syntactic checks for URLs, expiry dates and short codes.
//!
//! All checks are pattern-based only. They do not resolve hosts and do not
//! verify calendar validity.

use regex::Regex;
use std::sync::LazyLock;

/// Permissive URL pattern: optional `http(s)://`, hostname with a TLD or a
/// dotted IPv4 address, then optional port, path, query and fragment.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(https?://)?",
        r"((([a-z0-9]([a-z0-9-]*[a-z0-9])*)\.)+[a-z]{2,}|",
        r"(([0-9]{1,3}\.){3}[0-9]{1,3}))",
        r"(:[0-9]+)?(/[-a-z0-9%_.~+]*)*",
        r"(\?[&a-z0-9%_.~+=-]*)?",
        r"(#[-a-z0-9_]*)?$",
    ))
    .unwrap()
});

/// `DD/MM/YYYY`, day 01-31, month 01-12, years 19xx or 20xx.
pub(crate) static EXPIRED_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0[1-9]|[12][0-9]|3[01])[- /.](0[1-9]|1[012])[- /.](19|20)[0-9]{2}$").unwrap()
});

static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{1,22}$").unwrap());

/// Returns true if `input` looks like a URL.
pub fn validate_url(input: &str) -> bool {
    URL_REGEX.is_match(input)
}

/// Returns true if `input` has the `DD/MM/YYYY` shape.
///
/// `31/02/2024` passes: only the digit ranges are checked.
pub fn validate_date(input: &str) -> bool {
    EXPIRED_DATE_REGEX.is_match(input)
}

/// Returns true if `input` can be a stored short code (1-22 alphanumerics).
pub fn validate_code(input: &str) -> bool {
    CODE_REGEX.is_match(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_common_forms() {
        for url in [
            "https://example.com",
            "http://example.com/",
            "HTTPS://EXAMPLE.COM/Path",
            "example.com",
            "sub.domain-name.co.uk/a/b.html",
            "https://example.com:8443/path/to%20file?q=1&x=y#top",
            "http://192.168.0.1:8080/admin",
        ] {
            assert!(validate_url(url), "expected valid: {url}");
        }
    }

    #[test]
    fn test_validate_url_rejects_garbage() {
        for url in [
            "",
            "not a url",
            "ftp://example.com",
            "https://localhost",
            "https://-example.com",
            "javascript:alert(1)",
            "https://example.com/<script>",
        ] {
            assert!(!validate_url(url), "expected invalid: {url}");
        }
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("01/01/2024"));
        assert!(validate_date("31/12/1999"));
        assert!(validate_date("15-06-2030"));
        assert!(validate_date("15.06.2030"));
    }

    #[test]
    fn test_validate_date_is_syntactic_only() {
        assert!(validate_date("31/02/2024"));
    }

    #[test]
    fn test_validate_date_rejects_malformed() {
        assert!(!validate_date("2024-01-01"));
        assert!(!validate_date("32/01/2024"));
        assert!(!validate_date("00/01/2024"));
        assert!(!validate_date("01/13/2024"));
        assert!(!validate_date("01/01/2124"));
        assert!(!validate_date("1/1/2024"));
        assert!(!validate_date("x01/01/2024"));
    }

    #[test]
    fn test_validate_code() {
        assert!(validate_code("a"));
        assert!(validate_code("aB3xY9"));
        assert!(validate_code("abcdefghijklmnopqrstuv"));
    }

    #[test]
    fn test_validate_code_rejects() {
        assert!(!validate_code(""));
        assert!(!validate_code("abcdefghijklmnopqrstuvw"));
        assert!(!validate_code("ab/cd"));
        assert!(!validate_code("ab-cd"));
        assert!(!validate_code("abc.html"));
    }
}
