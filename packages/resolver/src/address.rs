//! ZIP and city/state recovery from free-form addresses.
//!
//! Facility addresses arrive in loosely structured one-line form,
//! typically `"Street, City, ST ZIP"`. This module extracts the pieces
//! the resolver can work with: a standalone 5-digit ZIP token, or the
//! city and state from their expected comma positions.

use regex::Regex;
use std::sync::LazyLock;

/// Regex for a standalone 5-digit ZIP token.
static ZIP_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{5})\b").expect("valid regex"));

/// Address values that carry no usable location.
static SKIP_VALUES: &[&str] = &["", "N/A", "NA", "NONE", "UNKNOWN"];

fn is_skippable(address: &str) -> bool {
    let trimmed = address.trim();
    SKIP_VALUES
        .iter()
        .any(|v| trimmed.eq_ignore_ascii_case(v))
}

/// Extracts a 5-digit ZIP code from a free-form address.
///
/// Prefers the conventional position (the `"State ZIP"` segment after
/// the second comma); falls back to the first standalone 5-digit token
/// anywhere in the string.
#[must_use]
pub fn extract_zip(address: &str) -> Option<String> {
    if is_skippable(address) {
        return None;
    }

    // Common format: "Street, City, State ZIP"
    let parts: Vec<&str> = address.split(',').collect();
    if parts.len() >= 3 {
        for word in parts[2].split_whitespace() {
            if word.len() == 5 && word.chars().all(|c| c.is_ascii_digit()) {
                return Some(word.to_string());
            }
        }
    }

    ZIP_TOKEN_RE
        .captures(address)
        .map(|caps| caps[1].to_string())
}

/// Recovers (city, state) from the fixed comma positions of a one-line
/// address: city is the second segment, state the first two letters of
/// the third.
#[must_use]
pub fn extract_city_state(address: &str) -> Option<(String, String)> {
    if is_skippable(address) {
        return None;
    }

    let parts: Vec<&str> = address.split(',').collect();
    if parts.len() < 3 {
        return None;
    }

    let city = parts[1].trim();
    let state: String = parts[2].trim().chars().take(2).collect();
    if city.is_empty() || state.len() != 2 || !state.chars().all(char::is_alphabetic) {
        return None;
    }

    Some((city.to_string(), state.to_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_zip_from_conventional_position() {
        assert_eq!(
            extract_zip("800 E Carpenter St, Springfield, IL 62769"),
            Some("62769".to_string())
        );
    }

    #[test]
    fn extracts_zip_token_anywhere() {
        assert_eq!(
            extract_zip("Clinic at 60622 W Division"),
            Some("60622".to_string())
        );
    }

    #[test]
    fn ignores_longer_digit_runs() {
        assert_eq!(extract_zip("PO Box 123456789"), None);
    }

    #[test]
    fn skips_placeholder_addresses() {
        assert_eq!(extract_zip("N/A"), None);
        assert_eq!(extract_zip(""), None);
        assert_eq!(extract_city_state("UNKNOWN"), None);
    }

    #[test]
    fn recovers_city_state_from_commas() {
        assert_eq!(
            extract_city_state("1 Hospital Dr, Peoria, IL"),
            Some(("Peoria".to_string(), "IL".to_string()))
        );
    }

    #[test]
    fn lowercase_state_is_uppercased() {
        assert_eq!(
            extract_city_state("1 Main St, Rockford, il 61101"),
            Some(("Rockford".to_string(), "IL".to_string()))
        );
    }

    #[test]
    fn too_few_segments_yields_nothing() {
        assert_eq!(extract_city_state("Springfield IL"), None);
    }
}
