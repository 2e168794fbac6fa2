//! Short code generation.
//!
//! Codes are derived from 128 bits of OS entropy, base62-encoded most
//! significant digit first and truncated to [`CODE_LENGTH`] characters.
//! Truncation keeps the leading digits, so the first character is skewed
//! towards the low end of the alphabet; the remaining five are close to
//! uniform.

/// Base62 digits in ascending value order.
pub const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of every generated code.
pub const CODE_LENGTH: usize = 6;

const ENTROPY_BYTES: usize = 16;

/// Codes shadowed by fixed routes; never issued.
pub const RESERVED_CODES: &[&str] = &["health"];

/// Returns true if `code` collides with a fixed route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Generates a random short code.
///
/// # Errors
///
/// Returns the underlying error if the system random number generator fails.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code()?;
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> Result<String, getrandom::Error> {
    let mut buffer = [0u8; ENTROPY_BYTES];
    getrandom::fill(&mut buffer)?;
    Ok(code_from_entropy(buffer))
}

/// Derives a code from raw entropy.
pub fn code_from_entropy(entropy: [u8; ENTROPY_BYTES]) -> String {
    let mut code = encode_base62(u128::from_be_bytes(entropy));
    code.truncate(CODE_LENGTH);
    while code.len() < CODE_LENGTH {
        code.push('0');
    }
    code
}

/// Encodes `value` in base62 without padding.
pub fn encode_base62(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(22);
    while value > 0 {
        digits.push(BASE62_ALPHABET[(value % 62) as usize]);
        value /= 62;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_names_are_reserved() {
        assert!(is_reserved("health"));
        assert!(!is_reserved("Health"));
        assert!(!is_reserved("abc123"));
    }
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        for _ in 0..200 {
            assert_eq!(generate_code().unwrap().len(), CODE_LENGTH);
        }
    }

    #[test]
    fn test_generate_code_base62_characters() {
        for _ in 0..200 {
            let code = generate_code().unwrap();
            assert!(code.bytes().all(|b| BASE62_ALPHABET.contains(&b)), "{code}");
        }
    }

    #[test]
    fn test_generate_code_produces_distinct_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code().unwrap()).collect();
        assert!(codes.len() > 990);
    }

    #[test]
    fn test_encode_base62_known_values() {
        assert_eq!(encode_base62(0), "0");
        assert_eq!(encode_base62(61), "z");
        assert_eq!(encode_base62(62), "10");
        assert_eq!(encode_base62(3843), "zz");
        assert_eq!(encode_base62(u128::MAX), "7n42DGM5Tflk9n8mt7Fhc7");
    }

    #[test]
    fn test_code_from_entropy_truncates_leading_digits() {
        assert_eq!(code_from_entropy([0xff; 16]), "7n42DG");
    }

    #[test]
    fn test_code_from_entropy_pads_tiny_values() {
        let mut entropy = [0u8; 16];
        entropy[15] = 62;
        assert_eq!(code_from_entropy(entropy), "100000");
    }
}
