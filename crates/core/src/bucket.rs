//! Bucket name grammar
//!
//! Checks a candidate bucket name against the store's naming rules before any
//! network call is made. Every rule is evaluated independently so the user
//! sees all problems at once.

use std::fmt;

/// Minimum bucket name length
pub const MIN_LEN: usize = 3;

/// Maximum bucket name length
pub const MAX_LEN: usize = 63;

/// Reserved prefix for internationalized domain labels
const PUNYCODE_PREFIX: &str = "xn--";

/// A single bucket naming rule that a candidate broke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Length outside 3..=63
    Length,
    /// Character other than lowercase letter, digit, `.` or `-`
    Charset,
    /// First or last character is not a lowercase letter or digit
    Boundary,
    /// Only digits and dots, which reads as an IP address
    IpAddress,
    /// Starts with `xn--`
    PunycodePrefix,
    /// Two or more dots in a row
    ConsecutiveDots,
    /// `.-` or `-.` somewhere in the name
    DotNextToDash,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Violation::Length => "must be between 3 and 63 characters long",
            Violation::Charset => {
                "may contain only lowercase letters, numbers, dots (.) and hyphens (-)"
            }
            Violation::Boundary => "must begin and end with a lowercase letter or number",
            Violation::IpAddress => "must not be formatted as an IP address",
            Violation::PunycodePrefix => "must not begin with 'xn--'",
            Violation::ConsecutiveDots => "must not contain consecutive dots",
            Violation::DotNextToDash => "must not place a dot next to a hyphen",
        };
        f.write_str(msg)
    }
}

/// Check `name` against every bucket naming rule
///
/// Returns the violated rules in a stable order; an empty list means the
/// name is valid.
pub fn validate(name: &str) -> Vec<Violation> {
    let mut violations = Vec::new();

    let len = name.chars().count();
    if !(MIN_LEN..=MAX_LEN).contains(&len) {
        violations.push(Violation::Length);
    }

    if !name.chars().all(is_allowed_char) {
        violations.push(Violation::Charset);
    }

    let boundary_ok = match (name.chars().next(), name.chars().last()) {
        (Some(first), Some(last)) => is_lower_alnum(first) && is_lower_alnum(last),
        _ => false,
    };
    if !boundary_ok {
        violations.push(Violation::Boundary);
    }

    if name.chars().all(|c| c.is_ascii_digit() || c == '.') {
        violations.push(Violation::IpAddress);
    }

    if name.starts_with(PUNYCODE_PREFIX) {
        violations.push(Violation::PunycodePrefix);
    }

    if name.contains("..") {
        violations.push(Violation::ConsecutiveDots);
    }

    if name.contains(".-") || name.contains("-.") {
        violations.push(Violation::DotNextToDash);
    }

    violations
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-'
}

fn is_lower_alnum(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}
