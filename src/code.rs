//! Unlock codes revealed by solved rooms.

use std::fmt;

use rand::Rng;

/// Length of a randomly generated unlock code.
pub const CODE_LEN: usize = 8;

/// Characters a random unlock code is drawn from.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Which characters a room's code uses, and so how player input is
/// normalized before comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeAlphabet {
    /// Decimal digits only (derived sequence codes).
    Digits,
    /// `A-Z` and `0-9`; input is upper-cased before comparing.
    UpperAlphanumeric,
}

impl CodeAlphabet {
    /// Normalizes raw player input for comparison against a stored code.
    pub fn normalize(self, input: &str) -> String {
        let trimmed = input.trim();
        match self {
            CodeAlphabet::Digits => trimmed.to_string(),
            CodeAlphabet::UpperAlphanumeric => trimmed.to_ascii_uppercase(),
        }
    }
}

/// A code bound to one solved puzzle instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnlockCode(String);

impl UnlockCode {
    /// Draws a fresh `CODE_LEN`-character code from `CODE_ALPHABET`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..CODE_LEN)
            .map(|_| char::from(CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())]))
            .collect();
        Self(code)
    }

    /// Wraps a derived digit string.
    pub fn from_digits(digits: String) -> Self {
        Self(digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares normalized player input against this code.
    pub fn matches(&self, input: &str, alphabet: CodeAlphabet) -> bool {
        alphabet.normalize(input) == self.0
    }
}

impl fmt::Display for UnlockCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_generated_codes_are_fixed_length_alphanumeric() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let code = UnlockCode::generate(&mut rng);
            assert_eq!(code.as_str().len(), CODE_LEN);
            assert!(
                code.as_str().bytes().all(|b| CODE_ALPHABET.contains(&b)),
                "Code {code} has a character outside the alphabet"
            );
        }
    }

    #[test]
    fn test_generated_codes_are_rerandomized() {
        let mut rng = StdRng::seed_from_u64(42);
        let first = UnlockCode::generate(&mut rng);
        let second = UnlockCode::generate(&mut rng);
        assert_ne!(first, second, "Two draws returned the same code");
    }

    #[test]
    fn test_alphanumeric_match_ignores_case_and_whitespace() {
        let code = UnlockCode("AB12CD34".to_string());
        assert!(code.matches("ab12cd34", CodeAlphabet::UpperAlphanumeric));
        assert!(code.matches("  AB12cd34\n", CodeAlphabet::UpperAlphanumeric));
        assert!(!code.matches("AB12CD35", CodeAlphabet::UpperAlphanumeric));
        assert!(!code.matches("AB12CD3", CodeAlphabet::UpperAlphanumeric));
    }

    #[test]
    fn test_digit_match_is_exact_after_trim() {
        let code = UnlockCode::from_digits("120".to_string());
        assert!(code.matches(" 120 ", CodeAlphabet::Digits));
        assert!(!code.matches("1200", CodeAlphabet::Digits));
        assert!(!code.matches("021", CodeAlphabet::Digits));
    }
}
