//! Dedicated metrics: specific buttons and forms reported by name.

use std::collections::BTreeMap;

use super::aggregator::date_series;
use super::locale::LOCALES;
use super::models::{DedicatedMetric, InteractionEvent, InteractionKind, InteractionSummary, LocaleCount};

/// Identifies one UI element on one logical page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedicatedMetricDefinition {
    pub key: &'static str,
    pub match_id: &'static str,
    pub match_normalized_path: &'static str,
    pub label: &'static str,
}

pub static DEDICATED_BUTTONS: &[DedicatedMetricDefinition] = &[DedicatedMetricDefinition {
    key: "homeContactNow",
    match_id: "btn_home_contact_now",
    match_normalized_path: "/",
    label: "Home Contact Now Clicks",
}];

pub static DEDICATED_FORMS: &[DedicatedMetricDefinition] = &[
    DedicatedMetricDefinition {
        key: "homeMain",
        match_id: "form_home_main",
        match_normalized_path: "/",
        label: "Home Main Form Submissions",
    },
    DedicatedMetricDefinition {
        key: "aboutUs",
        match_id: "form_about_us",
        match_normalized_path: "/about-us",
        label: "About Us Form Submissions",
    },
    DedicatedMetricDefinition {
        key: "careers",
        match_id: "careers-form-section",
        match_normalized_path: "/careers",
        label: "Careers Form Submissions",
    },
    DedicatedMetricDefinition {
        key: "portfolio",
        match_id: "form_portfolio",
        match_normalized_path: "/portfolio",
        label: "Portfolio Form Submissions",
    },
];

pub fn definitions_for(kind: InteractionKind) -> &'static [DedicatedMetricDefinition] {
    match kind {
        InteractionKind::Button => DEDICATED_BUTTONS,
        InteractionKind::Form => DEDICATED_FORMS,
    }
}

impl DedicatedMetricDefinition {
    /// Both the id and the normalized page must match; ids are reused across pages.
    pub fn matches(&self, event: &InteractionEvent) -> bool {
        event.key.id() == self.match_id && event.normalized_page_path == self.match_normalized_path
    }
}

fn saturating_total<'a>(events: impl Iterator<Item = &'a InteractionEvent>) -> u64 {
    events.fold(0, |acc, e| acc.saturating_add(e.event_count))
}

pub fn build_dedicated_metric(
    events: &[InteractionEvent],
    definition: &DedicatedMetricDefinition,
) -> DedicatedMetric {
    let scoped: Vec<&InteractionEvent> = events.iter().filter(|e| definition.matches(e)).collect();

    let total = saturating_total(scoped.iter().copied());

    // Every locale is present, in fixed order, so the dashboard table keeps its shape.
    let by_locale = LOCALES
        .into_iter()
        .map(|locale| LocaleCount {
            locale: locale.as_str(),
            event_count: saturating_total(
                scoped.iter().copied().filter(|e| e.locale == Some(locale)),
            ),
        })
        .collect();

    DedicatedMetric {
        key: definition.key,
        id: definition.match_id,
        label: definition.label,
        normalized_page_path: definition.match_normalized_path,
        total,
        by_locale,
        by_date: date_series(scoped.iter().copied()),
    }
}

/// Dedicated metrics for every definition of the summary's kind, keyed by name.
pub fn dedicated_metrics(summary: &InteractionSummary) -> BTreeMap<&'static str, DedicatedMetric> {
    definitions_for(summary.kind)
        .iter()
        .map(|definition| (definition.key, build_dedicated_metric(&summary.rows, definition)))
        .collect()
}
