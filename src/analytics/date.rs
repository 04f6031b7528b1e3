use crate::ga4::DIMENSION_FALLBACK;

/// Converts GA4's compact `YYYYMMDD` date dimension to `YYYY-MM-DD`.
///
/// Anything that is not exactly eight ASCII digits is passed through
/// unchanged (GA4 emits placeholders such as `(other)`); empty input
/// becomes the fallback sentinel.
pub fn format_ga_date(raw: &str) -> String {
    if raw.is_empty() {
        return DIMENSION_FALLBACK.to_string();
    }
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw.to_string();
    }
    format!("{}-{}-{}", &raw[0..4], &raw[4..6], &raw[6..8])
}
