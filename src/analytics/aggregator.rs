//! Interaction row aggregation
//!
//! Turns raw `button_click` / `form_submit` report rows into a summary with
//! five parallel groupings (by id, locale, date, normalized path and raw
//! path). Every grouping sums to the same `total`.
//!
//! Ordering is deterministic: counts descending with ties broken by
//! ascending key, except `byDate`, which is chronological.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use super::locale::locale_label;
use super::models::{
    DateCount, EventKey, IdCount, InteractionEvent, InteractionKind, InteractionSummary,
    KeyBreakdown, LocaleCount, NormalizedPathCount, RawPathCount,
};
use super::path::{normalize_path, sanitize_raw_path};
use super::queries::InteractionRow;
use crate::ga4::Row;

impl InteractionKind {
    pub fn event_name(self) -> &'static str {
        match self {
            InteractionKind::Button => super::filters::EVENT_BUTTON_CLICK,
            InteractionKind::Form => super::filters::EVENT_FORM_SUBMIT,
        }
    }

    fn event_key(self, row: &InteractionRow) -> EventKey {
        match self {
            InteractionKind::Button => EventKey::ElementId(row.element_id.clone()),
            InteractionKind::Form => EventKey::FormId(row.form_id.clone()),
        }
    }

    fn breakdown(self, counts: Vec<IdCount>) -> KeyBreakdown {
        match self {
            InteractionKind::Button => KeyBreakdown::ByElementId(counts),
            InteractionKind::Form => KeyBreakdown::ByFormId(counts),
        }
    }
}

impl InteractionEvent {
    pub fn from_interaction_row(row: &InteractionRow, kind: InteractionKind) -> Self {
        let raw_page_path = sanitize_raw_path(row.effective_page_path());
        let normalized_page_path = normalize_path(&raw_page_path);

        Self {
            key: kind.event_key(row),
            locale: row.locale,
            raw_page_path,
            normalized_page_path,
            date: row.date.clone(),
            event_count: row.event_count,
        }
    }
}

/// Sorts grouped counts descending, breaking ties by ascending key.
fn ranked<K: Ord>(grouped: HashMap<K, u64>) -> Vec<(K, u64)> {
    let mut entries: Vec<(K, u64)> = grouped.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

/// Counts come from upstream, so sums saturate instead of overflowing.
fn accumulate<K: Hash + Eq>(grouped: &mut HashMap<K, u64>, key: K, count: u64) {
    let slot = grouped.entry(key).or_insert(0);
    *slot = slot.saturating_add(count);
}

fn accumulate_ordered<'a>(grouped: &mut BTreeMap<&'a str, u64>, key: &'a str, count: u64) {
    let slot = grouped.entry(key).or_insert(0);
    *slot = slot.saturating_add(count);
}

/// Date series in ascending date order; dates without events are absent.
pub(crate) fn date_series<'a, I>(events: I) -> Vec<DateCount>
where
    I: IntoIterator<Item = &'a InteractionEvent>,
{
    let mut by_date: BTreeMap<&str, u64> = BTreeMap::new();
    for event in events {
        accumulate_ordered(&mut by_date, event.date.as_str(), event.event_count);
    }
    by_date
        .into_iter()
        .map(|(date, event_count)| DateCount {
            date: date.to_string(),
            event_count,
        })
        .collect()
}

/// Aggregates raw interaction report rows of the given kind.
pub fn map_interaction_rows(rows: &[Row], kind: InteractionKind) -> InteractionSummary {
    let events: Vec<InteractionEvent> = rows
        .iter()
        .map(InteractionRow::from_row)
        .map(|row| InteractionEvent::from_interaction_row(&row, kind))
        .collect();

    summarize(events, kind)
}

/// Builds the groupings over already-normalized events.
pub fn summarize(events: Vec<InteractionEvent>, kind: InteractionKind) -> InteractionSummary {
    let mut by_key: HashMap<&str, u64> = HashMap::new();
    let mut by_locale: HashMap<&'static str, u64> = HashMap::new();
    let mut by_page_normalized: HashMap<&str, u64> = HashMap::new();
    let mut by_page_raw: HashMap<&str, u64> = HashMap::new();
    let mut total = 0u64;

    for event in &events {
        let count = event.event_count;
        total = total.saturating_add(count);
        accumulate(&mut by_key, event.key.id(), count);
        accumulate(&mut by_locale, locale_label(event.locale), count);
        accumulate(&mut by_page_normalized, event.normalized_page_path.as_str(), count);
        accumulate(&mut by_page_raw, event.raw_page_path.as_str(), count);
    }

    let by_key = ranked(by_key)
        .into_iter()
        .map(|(id, event_count)| IdCount {
            id: id.to_string(),
            event_count,
        })
        .collect();
    let by_locale = ranked(by_locale)
        .into_iter()
        .map(|(locale, event_count)| LocaleCount { locale, event_count })
        .collect();
    let by_page_normalized = ranked(by_page_normalized)
        .into_iter()
        .map(|(path, event_count)| NormalizedPathCount {
            normalized_page_path: path.to_string(),
            event_count,
        })
        .collect();
    let by_page_raw = ranked(by_page_raw)
        .into_iter()
        .map(|(path, event_count)| RawPathCount {
            raw_page_path: path.to_string(),
            event_count,
        })
        .collect();
    let by_date = date_series(&events);

    InteractionSummary {
        kind,
        total,
        by_key: kind.breakdown(by_key),
        by_locale,
        by_date,
        by_page_normalized,
        by_page_raw,
        rows: events,
        dedicated: BTreeMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::locale::Locale;
    use serde_json::json;

    fn button_row(id: &str, locale: &str, path: &str, date: &str, count: u64) -> Row {
        Row::new(
            ["button_click", id, "(not set)", locale, path, "(not set)", date],
            [count.to_string()],
        )
    }

    fn form_row(id: &str, locale: &str, path: &str, custom_path: &str, date: &str, count: u64) -> Row {
        Row::new(
            ["form_submit", "(not set)", id, locale, path, custom_path, date],
            [count.to_string()],
        )
    }

    #[test]
    fn ties_break_alphabetically() {
        let rows = vec![
            button_row("b", "en", "/", "20240101", 5),
            button_row("a", "en", "/", "20240101", 5),
            button_row("c", "en", "/", "20240101", 3),
        ];

        let summary = map_interaction_rows(&rows, InteractionKind::Button);

        assert_eq!(
            summary.by_key.counts(),
            &[
                IdCount { id: "a".into(), event_count: 5 },
                IdCount { id: "b".into(), event_count: 5 },
                IdCount { id: "c".into(), event_count: 3 },
            ]
        );
    }

    #[test]
    fn groupings_sum_to_total() {
        let rows = vec![
            button_row("btn_home_contact_now", "en", "/en/", "20240102", 3),
            button_row("btn_home_contact_now", "ru", "/ru/", "20240101", 5),
            button_row("btn_cta", "XX", "/uz/portfolio/", "20240101", 2),
            button_row("btn_cta", "", "/portfolio?ref=nav", "(other)", 7),
            button_row("btn_cta", "uz", "/uz/portfolio", "20240103", 0),
        ];

        let summary = map_interaction_rows(&rows, InteractionKind::Button);
        let sum = |counts: Vec<u64>| counts.into_iter().sum::<u64>();

        assert_eq!(summary.total, 17);
        assert_eq!(summary.rows.len(), 5);
        assert_eq!(sum(summary.by_key.counts().iter().map(|c| c.event_count).collect()), 17);
        assert_eq!(sum(summary.by_locale.iter().map(|c| c.event_count).collect()), 17);
        assert_eq!(sum(summary.by_date.iter().map(|c| c.event_count).collect()), 17);
        assert_eq!(sum(summary.by_page_normalized.iter().map(|c| c.event_count).collect()), 17);
        assert_eq!(sum(summary.by_page_raw.iter().map(|c| c.event_count).collect()), 17);
    }

    #[test]
    fn locale_outside_the_set_groups_under_fallback() {
        let rows = vec![
            button_row("x", "RU", "/ru/", "20240101", 4),
            button_row("x", "de", "/", "20240101", 4),
            button_row("x", "", "/", "20240101", 1),
        ];

        let summary = map_interaction_rows(&rows, InteractionKind::Button);

        assert_eq!(
            summary.by_locale,
            vec![
                LocaleCount { locale: "(not set)", event_count: 5 },
                LocaleCount { locale: "ru", event_count: 4 },
            ]
        );
        assert_eq!(summary.rows[0].locale, Some(Locale::Ru));
        assert_eq!(summary.rows[1].locale, None);
    }

    #[test]
    fn paths_group_raw_and_normalized() {
        let rows = vec![
            button_row("x", "en", "/en/about-us/", "20240101", 2),
            button_row("x", "ru", "/ru/about-us", "20240101", 3),
            button_row("x", "en", "/about-us?ref=1", "20240101", 3),
        ];

        let summary = map_interaction_rows(&rows, InteractionKind::Button);

        assert_eq!(
            summary.by_page_normalized,
            vec![NormalizedPathCount { normalized_page_path: "/about-us".into(), event_count: 8 }]
        );
        assert_eq!(
            summary.by_page_raw,
            vec![
                RawPathCount { raw_page_path: "/about-us".into(), event_count: 3 },
                RawPathCount { raw_page_path: "/ru/about-us".into(), event_count: 3 },
                RawPathCount { raw_page_path: "/en/about-us".into(), event_count: 2 },
            ]
        );
    }

    #[test]
    fn dates_sort_ascending() {
        let rows = vec![
            button_row("x", "en", "/", "20240103", 9),
            button_row("x", "en", "/", "20240101", 1),
            button_row("x", "en", "/", "20240102", 4),
            button_row("x", "en", "/", "20240101", 1),
        ];

        let summary = map_interaction_rows(&rows, InteractionKind::Button);
        let dates: Vec<(&str, u64)> = summary
            .by_date
            .iter()
            .map(|d| (d.date.as_str(), d.event_count))
            .collect();

        assert_eq!(dates, vec![("2024-01-01", 2), ("2024-01-02", 4), ("2024-01-03", 9)]);
    }

    #[test]
    fn form_rows_fall_back_to_custom_page_path() {
        let rows = vec![form_row("form_about_us", "uz", "(not set)", "/uz/about-us/", "20240105", 2)];

        let summary = map_interaction_rows(&rows, InteractionKind::Form);
        let event = &summary.rows[0];

        assert_eq!(event.key, EventKey::FormId("form_about_us".into()));
        assert_eq!(event.raw_page_path, "/uz/about-us");
        assert_eq!(event.normalized_page_path, "/about-us");
        assert_eq!(event.date, "2024-01-05");
    }

    #[test]
    fn oversized_counts_saturate() {
        let rows = vec![
            button_row("x", "en", "/", "20240101", u64::MAX),
            button_row("x", "en", "/", "20240101", 5),
        ];

        let summary = map_interaction_rows(&rows, InteractionKind::Button);

        assert_eq!(summary.total, u64::MAX);
        assert_eq!(summary.by_key.counts()[0].event_count, u64::MAX);
        assert_eq!(summary.by_locale[0].event_count, u64::MAX);
        assert_eq!(summary.by_date[0].event_count, u64::MAX);
        assert_eq!(summary.by_page_raw[0].event_count, u64::MAX);
    }

    #[test]
    fn empty_input_yields_empty_summary() {
        let summary = map_interaction_rows(&[], InteractionKind::Form);
        assert_eq!(summary.total, 0);
        assert!(summary.rows.is_empty());
        assert!(summary.by_locale.is_empty());
        assert!(summary.by_date.is_empty());
        assert_eq!(summary.by_key, KeyBreakdown::ByFormId(Vec::new()));
    }

    #[test]
    fn serializes_kind_specific_field_names() {
        let buttons = map_interaction_rows(
            &[button_row("btn", "en", "/en/", "20240101", 1)],
            InteractionKind::Button,
        );
        let forms = map_interaction_rows(
            &[form_row("form", "xx", "/ru/careers", "(not set)", "20240101", 1)],
            InteractionKind::Form,
        );

        let buttons = serde_json::to_value(&buttons).unwrap();
        let forms = serde_json::to_value(&forms).unwrap();

        assert_eq!(buttons["byElementId"], json!([{ "id": "btn", "eventCount": 1 }]));
        assert_eq!(
            buttons["rows"][0],
            json!({
                "elementId": "btn",
                "locale": "en",
                "rawPagePath": "/en",
                "normalizedPagePath": "/",
                "date": "2024-01-01",
                "eventCount": 1
            })
        );
        assert!(buttons.get("byFormId").is_none());
        assert!(buttons.get("kind").is_none());

        assert_eq!(forms["byFormId"], json!([{ "id": "form", "eventCount": 1 }]));
        assert_eq!(forms["rows"][0]["formId"], json!("form"));
        assert_eq!(forms["rows"][0]["locale"], json!("(not set)"));
        assert_eq!(forms["byPageNormalized"], json!([{ "normalizedPagePath": "/careers", "eventCount": 1 }]));
        assert_eq!(forms["dedicated"], json!({}));
    }
}
