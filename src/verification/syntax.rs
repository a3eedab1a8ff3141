//! Pattern-based syntax check, the first and cheapest pipeline stage.

use once_cell::sync::Lazy;
use regex::Regex;

/// Permissive address shape: a local part and a domain separated by a single
/// `@`, with at least one dot in the domain. Deliberately looser than RFC
/// 5321; tightening this pattern would change observable classifications for
/// common real-world addresses that strict parsers reject.
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .expect("Email shape pattern failed to compile. This is a bug.")
});

/// Returns `true` when `address` matches the permissive `local@domain.tld`
/// shape. Pure function; empty and malformed input simply return `false`.
pub fn is_valid_syntax(address: &str) -> bool {
    EMAIL_SHAPE.is_match(address)
}
