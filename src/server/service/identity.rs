//! Company registry lookup and name matching.

use crate::server::util::similarity;

/// Minimum similarity for a registered name to count as a match.
pub const NAME_MATCH_THRESHOLD: f64 = 0.9;

/// Looks up the company name registered under `registration_number`.
///
/// There is no registry integration yet: numbers containing `sample` resolve to
/// `SAMPLE COMPANY` and everything else to an empty name.
pub fn verify_registration_number(registration_number: &str) -> String {
    if registration_number.contains("sample") {
        "SAMPLE COMPANY".to_string()
    } else {
        String::new()
    }
}

/// Compares two company names case-insensitively.
pub fn is_similar_company_name(a: &str, b: &str) -> bool {
    similarity::ratio(&a.to_lowercase(), &b.to_lowercase()) >= NAME_MATCH_THRESHOLD
}
