//! Domain models: database rows, request/response types, shared validation

pub mod auth;
pub mod author;
pub mod book;
pub mod fine;
pub mod gd;
pub mod librarian;
pub mod publisher;
pub mod reservation;
pub mod student;

use once_cell::sync::Lazy;
use regex::Regex;

/// ISBN: 10 to 13 numeric digits
pub static ISBN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10,13}$").unwrap());

/// Phone: digits with optional leading + and separators
pub static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9][0-9\-\s]{6,19}$").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isbn_pattern_accepts_10_to_13_digits() {
        assert!(ISBN_RE.is_match("9780439554930"));
        assert!(ISBN_RE.is_match("0439554930"));
        assert!(!ISBN_RE.is_match("978-0439554930"));
        assert!(!ISBN_RE.is_match("97804395549301"));
        assert!(!ISBN_RE.is_match("abc"));
    }

    #[test]
    fn phone_pattern_accepts_common_formats() {
        assert!(PHONE_RE.is_match("9876543210"));
        assert!(PHONE_RE.is_match("+44-20-7946-0000"));
        assert!(!PHONE_RE.is_match("12345"));
        assert!(!PHONE_RE.is_match("phone"));
    }
}
