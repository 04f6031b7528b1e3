//! Turns dashboard query parameters into GA4 date ranges and dimension filters.
//!
//! Invalid input never fails a request: a malformed custom range falls back
//! to the 30-day preset and an unknown locale falls back to `all`.

use chrono::NaiveDate;
use serde::Serialize;

use super::locale::LocaleFilter;
use crate::ga4::{DateRange, FilterExpression};

pub const EVENT_BUTTON_CLICK: &str = "button_click";
pub const EVENT_FORM_SUBMIT: &str = "form_submit";

/// Query parameters accepted by `GET /api/analytics`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyticsQuery {
    pub range: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub locale: Option<String>,
}

impl AnalyticsQuery {
    /// Builds the query from decoded `key=value` pairs. The first occurrence
    /// of a key wins; repeats and unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "range" => &mut query.range,
                "startDate" => &mut query.start_date,
                "endDate" => &mut query.end_date,
                "locale" => &mut query.locale,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RangePreset {
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "custom")]
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFilters {
    pub preset: RangePreset,
    pub start_date: String,
    pub end_date: String,
    pub locale: LocaleFilter,
}

impl ResolvedFilters {
    fn relative(preset: RangePreset, start_marker: &str, locale: LocaleFilter) -> Self {
        Self {
            preset,
            start_date: start_marker.to_string(),
            end_date: "today".to_string(),
            locale,
        }
    }

    pub fn date_ranges(&self) -> Vec<DateRange> {
        vec![DateRange {
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }]
    }

    /// `pagePath BEGINS_WITH /{locale}` when a locale is selected.
    pub fn page_path_filter(&self) -> Option<FilterExpression> {
        self.locale
            .locale()
            .map(|locale| FilterExpression::begins_with("pagePath", format!("/{locale}")))
    }

    /// Exact `eventName` match, narrowed by the locale custom dimension when a
    /// locale is selected.
    pub fn interaction_filter(&self, event_name: &str) -> FilterExpression {
        let mut expressions = vec![FilterExpression::exact("eventName", event_name)];
        if let Some(locale) = self.locale.locale() {
            expressions.push(FilterExpression::exact(
                "customEvent:locale",
                locale.as_str(),
            ));
        }
        FilterExpression::and(expressions)
    }
}

/// Strict `YYYY-MM-DD` that is also a real calendar date.
fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    shape_ok && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

pub fn resolve_filters(query: &AnalyticsQuery) -> ResolvedFilters {
    let locale = LocaleFilter::parse(query.locale.as_deref());

    match query.range.as_deref() {
        Some("7d") => ResolvedFilters::relative(RangePreset::Last7Days, "7daysAgo", locale),
        Some("custom") => match (query.start_date.as_deref(), query.end_date.as_deref()) {
            (Some(start), Some(end)) if is_iso_date(start) && is_iso_date(end) => {
                ResolvedFilters {
                    preset: RangePreset::Custom,
                    start_date: start.to_string(),
                    end_date: end.to_string(),
                    locale,
                }
            }
            _ => ResolvedFilters::relative(RangePreset::Last30Days, "30daysAgo", locale),
        },
        _ => ResolvedFilters::relative(RangePreset::Last30Days, "30daysAgo", locale),
    }
}
