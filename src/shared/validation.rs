use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Characters dropped from display names before building an identifier.
    /// Everything except ASCII letters, digits, whitespace and hyphens.
    pub static ref SLUG_STRIP_REGEX: Regex = Regex::new(r"[^a-zA-Z0-9\s-]").unwrap();

    /// Whitespace runs collapsed into a single separator
    pub static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();

    /// Unquoted SQL identifier accepted for schema and table names
    /// - Valid: "settings", "works_index", "_tmp2"
    /// - Invalid: "works-index", "2works", "works index", "works\"index"
    pub static ref SQL_IDENTIFIER_REGEX: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").unwrap();
}
