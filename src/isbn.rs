//! ISBN-10 / ISBN-13 shape and check-digit verification.
//!
//! Classification happens once at construction; the verify methods then
//! answer questions about the classified value without re-parsing.
//!
//! ## Lenient vs Strict
//!
//! [`Isbn::new`] accepts hyphenated or bare digit strings (a doubled
//! hyphen disqualifies the value). [`Isbn::new_strict`] additionally
//! requires the hyphenated form with exactly four (ISBN-10) or five
//! (ISBN-13) groups.
//!
//! ```
//! use komono::isbn::Isbn;
//!
//! assert!(Isbn::new("978-4-06-519981-7").is_valid());
//! assert!(Isbn::new("9784065199817").is_valid());
//! assert!(!Isbn::new("978-4-06-519981-0").is_valid()); // bad check digit
//! assert!(!Isbn::new_strict("9784065199817").verify(false)); // hyphens required
//! ```

use regex::Regex;
use std::sync::LazyLock;

// Lenient: digit count decides the standard, hyphen placement is free
// within the overall length bounds.
static ISBN13_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(978|979)[0-9]{10}$").unwrap());
static ISBN13_HYPHENATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9][-0-9]{11,15}[0-9]$").unwrap());
static ISBN10_BARE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{9}[0-9X]$").unwrap());
static ISBN10_HYPHENATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9][-0-9]{8,11}[0-9X]$").unwrap());

// Strict: the registered group structure, hyphens mandatory.
static ISBN13_STRICT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(978|979)-[0-9]{1,5}-[0-9]{1,7}-[0-9]{1,7}-[0-9]$").unwrap());
static ISBN10_STRICT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,5}-[0-9]{1,7}-[0-9]{1,7}-[0-9X]$").unwrap());

/// A classified ISBN candidate.
#[derive(Debug, Clone)]
pub struct Isbn {
    /// Input with hyphens stripped.
    normalized: String,
    isbn13: bool,
    isbn10: bool,
}

impl Isbn {
    /// Classify `value` leniently: hyphens are optional, but a doubled
    /// hyphen disqualifies the whole value.
    pub fn new(value: &str) -> Self {
        let normalized: String = value.replace('-', "");

        let mut isbn13 = false;
        let mut isbn10 = false;
        if !value.contains("--") {
            if ISBN13_BARE.is_match(&normalized) {
                isbn13 = ISBN13_HYPHENATED.is_match(value);
            } else if ISBN10_BARE.is_match(&normalized) {
                isbn10 = ISBN10_HYPHENATED.is_match(value);
            }
        }

        Self {
            normalized,
            isbn13,
            isbn10,
        }
    }

    /// Classify `value` strictly: the hyphenated registered form only.
    pub fn new_strict(value: &str) -> Self {
        // Length checks keep the regexes from scanning obvious non-ISBNs.
        let isbn13 = value.len() == 17 && ISBN13_STRICT.is_match(value);
        let isbn10 = !isbn13 && value.len() == 13 && ISBN10_STRICT.is_match(value);

        Self {
            normalized: value.replace('-', ""),
            isbn13,
            isbn10,
        }
    }

    /// Shorthand for `verify(true)`: shape and check digit both correct.
    pub fn is_valid(&self) -> bool {
        self.verify(true)
    }

    /// Whether this is a current-standard (13 digit) ISBN, optionally
    /// also verifying the check digit.
    pub fn is_isbn13(&self, check_digit: bool) -> bool {
        self.isbn13 && self.verify(check_digit)
    }

    /// Whether this is an old-standard (10 digit) ISBN, optionally also
    /// verifying the check digit.
    pub fn is_isbn10(&self, check_digit: bool) -> bool {
        self.isbn10 && self.verify(check_digit)
    }

    /// Whether the value matched either standard's shape; with
    /// `check_digit` the final digit must also be the computed one.
    pub fn verify(&self, check_digit: bool) -> bool {
        if !check_digit {
            return self.isbn13 || self.isbn10;
        }

        if self.isbn13 {
            self.normalized[12..] == self.check_digit_13()
        } else if self.isbn10 {
            self.normalized[9..] == self.check_digit_10()
        } else {
            false
        }
    }

    /// ISBN-13 check digit: digits weighted 1,3,1,3,... mod 10.
    fn check_digit_13(&self) -> String {
        let sum: u32 = self
            .digits()
            .take(12)
            .enumerate()
            .map(|(i, d)| if i % 2 == 0 { d } else { d * 3 })
            .sum();

        match 10 - sum % 10 {
            10 => "0".to_string(),
            d => d.to_string(),
        }
    }

    /// ISBN-10 check digit: digits weighted 10,9,...,2 mod 11, with `X`
    /// standing for 10.
    fn check_digit_10(&self) -> String {
        let sum: u32 = self
            .digits()
            .take(9)
            .enumerate()
            .map(|(i, d)| d * (10 - i as u32))
            .sum();

        match 11 - sum % 11 {
            10 => "X".to_string(),
            11 => "0".to_string(),
            d => d.to_string(),
        }
    }

    fn digits(&self) -> impl Iterator<Item = u32> + '_ {
        self.normalized.chars().filter_map(|c| c.to_digit(10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_isbn13_hyphenated() {
        let isbn = Isbn::new("978-4-06-519981-7");
        assert!(isbn.is_valid());
        assert!(isbn.is_isbn13(true));
        assert!(!isbn.is_isbn10(false));
    }

    #[test]
    fn valid_isbn13_bare() {
        assert!(Isbn::new("9784065199817").is_valid());
    }

    #[test]
    fn isbn13_with_wrong_check_digit() {
        let isbn = Isbn::new("978-4-06-519981-0");
        assert!(isbn.verify(false), "shape is still a 13-digit ISBN");
        assert!(!isbn.verify(true));
        assert!(!isbn.is_valid());
    }

    #[test]
    fn valid_isbn10_hyphenated() {
        let isbn = Isbn::new("4-06-519981-6");
        assert!(isbn.is_valid());
        assert!(isbn.is_isbn10(true));
        assert!(!isbn.is_isbn13(false));
    }

    #[test]
    fn isbn10_with_x_check_digit() {
        // 0-8044-2957-X is the canonical X-suffixed example.
        assert!(Isbn::new("0-8044-2957-X").is_valid());
        assert!(Isbn::new("080442957X").is_valid());
    }

    #[test]
    fn doubled_hyphen_is_rejected() {
        assert!(!Isbn::new("978-4--06-519981-7").verify(false));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(!Isbn::new("not an isbn").verify(false));
        assert!(!Isbn::new("").verify(false));
        assert!(!Isbn::new("12345").verify(false));
    }

    #[test]
    fn strict_requires_hyphens() {
        assert!(Isbn::new_strict("978-4-06-519981-7").is_valid());
        assert!(!Isbn::new_strict("9784065199817").verify(false));
    }

    #[test]
    fn strict_isbn10() {
        assert!(Isbn::new_strict("4-06-519981-6").is_valid());
        assert!(!Isbn::new_strict("4065199816").verify(false));
    }

    #[test]
    fn strict_rejects_misplaced_hyphens() {
        // Right characters, wrong group count.
        assert!(!Isbn::new_strict("97-84-06-519981-7").is_isbn13(false));
    }

    #[test]
    fn isbn10_japanese_group() {
        assert!(Isbn::new("4-10-109205-2").is_valid());
    }

    #[test]
    fn isbn10_check_digit_zero_case() {
        // Weighted sum ≡ 0 (mod 11) maps to check digit 0, not 11.
        assert!(Isbn::new("1-234-56783-0").is_valid());
    }
}
