//! Canonical page paths shared by every locale.

use super::locale::Locale;
use crate::ga4::DIMENSION_FALLBACK;

/// Cleans a raw GA4 path: drops query/fragment, ensures a leading slash and
/// strips a single trailing slash. Empty or `(not set)` input becomes `/`.
pub fn sanitize_raw_path(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() || value == DIMENSION_FALLBACK {
        return "/".to_string();
    }

    let end = value.find(['?', '#']).unwrap_or(value.len());
    let without_query = &value[..end];

    let mut path = if without_query.starts_with('/') {
        without_query.to_string()
    } else {
        format!("/{without_query}")
    };

    if path != "/" && path.ends_with('/') {
        path.pop();
    }

    if path.is_empty() {
        "/".to_string()
    } else {
        path
    }
}

/// Analytics key for a logical page: the sanitized path with any leading
/// locale segment removed. `/en/about-us`, `/ru/about-us` and `/about-us`
/// all normalize to `/about-us`.
pub fn normalize_path(raw: &str) -> String {
    let sanitized = sanitize_raw_path(raw);
    let mut segments = sanitized.split('/').filter(|s| !s.is_empty());

    let Some(first) = segments.next() else {
        return "/".to_string();
    };

    // Locale prefixes are matched exactly; `/EN/x` is not a localized path.
    if Locale::parse(first).is_some_and(|locale| locale.as_str() == first) {
        let rest: Vec<&str> = segments.collect();
        if rest.is_empty() {
            return "/".to_string();
        }
        return format!("/{}", rest.join("/"));
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_variants_share_a_key() {
        assert_eq!(normalize_path("/en/about-us"), "/about-us");
        assert_eq!(normalize_path("/ru/about-us"), "/about-us");
        assert_eq!(normalize_path("/about-us"), "/about-us");
        assert_eq!(normalize_path("/uz/careers/"), "/careers");
    }

    #[test]
    fn root_forms_collapse_to_slash() {
        for raw in ["/", "", "(not set)", "  ", "/en", "/en/", "/ru?x=1", "#top", "?q"] {
            assert_eq!(normalize_path(raw), "/", "input {raw:?}");
        }
    }

    #[test]
    fn strips_query_fragment_and_trailing_slash() {
        assert_eq!(sanitize_raw_path("/en/portfolio/?utm=1"), "/en/portfolio");
        assert_eq!(sanitize_raw_path("blog/post#comments"), "/blog/post");
        assert_eq!(sanitize_raw_path(" /careers/ "), "/careers");
        assert_eq!(sanitize_raw_path("/"), "/");
    }

    #[test]
    fn non_locale_prefixes_are_kept() {
        assert_eq!(normalize_path("/blog/en/post"), "/blog/en/post");
        assert_eq!(normalize_path("/english/page"), "/english/page");
        assert_eq!(normalize_path("/EN/page"), "/EN/page");
    }

    #[test]
    fn normalization_is_idempotent() {
        let inputs = [
            "/en/about-us",
            "/ru/",
            "about-us/",
            "(not set)",
            "/portfolio?x=1#y",
            "//double//slash/",
        ];
        for raw in inputs {
            let once = normalize_path(raw);
            assert_eq!(normalize_path(&once), once, "input {raw:?}");
        }
    }
}
