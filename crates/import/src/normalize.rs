//! Header normalization for deterministic matching: trim, collapse internal
//! whitespace, lowercase.

/// Normalize a header for comparison.
#[must_use]
pub fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Compact form used by the substring tier: the normalized header with
/// everything but letters and digits removed, so `company_name`,
/// `Company Name` and `company-name` all compare equal there.
#[must_use]
pub fn compact_header(header: &str) -> String {
    normalize_header(header)
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}
