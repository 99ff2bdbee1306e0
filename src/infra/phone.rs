//! Loose phone-number comparison.
//!
//! Two numbers match when their digits agree once formatting is stripped,
//! or when both carry at least [`MIN_MATCH`] digits and the longer one ends
//! with the shorter (a country or trunk prefix on one side only).

/// Fewest trailing digits that must agree for a suffix match.
const MIN_MATCH: usize = 7;

/// Strips everything but dialable digits.
///
/// Separators (spaces, dashes, dots, parentheses, slashes) and a leading
/// `+` are dropped. Letters and other symbols are dropped too.
pub fn normalize_phone_number(number: &str) -> String {
    number.chars().filter(char::is_ascii_digit).collect()
}

/// Compares two phone numbers ignoring formatting.
pub fn phone_numbers_equal(a: &str, b: &str) -> bool {
    let a = normalize_phone_number(a);
    let b = normalize_phone_number(b);

    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }

    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    short.len() >= MIN_MATCH && long.ends_with(short.as_str())
}
