//! Response models for the analytics dashboard.
//!
//! Everything here is built fresh per request and serialized as camelCase
//! JSON for the dashboard UI.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use super::filters::{RangePreset, ResolvedFilters};
use super::locale::{locale_label, Locale, LocaleFilter};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub range: RangeInfo,
    pub filters: FiltersInfo,
    pub overview: Overview,
    pub pages: PageBreakdown,
    pub interactions: Interactions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeInfo {
    pub preset: RangePreset,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FiltersInfo {
    pub locale: LocaleFilter,
}

impl From<&ResolvedFilters> for RangeInfo {
    fn from(filters: &ResolvedFilters) -> Self {
        Self {
            preset: filters.preset,
            start_date: filters.start_date.clone(),
            end_date: filters.end_date.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub active_users: u64,
    pub screen_page_views: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PageBreakdown {
    pub raw: Vec<RawPageStat>,
    pub normalized: Vec<NormalizedPageStat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPageStat {
    pub raw_page_path: String,
    pub normalized_page_path: String,
    pub active_users: u64,
    pub screen_page_views: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPageStat {
    pub normalized_page_path: String,
    pub active_users: u64,
    pub screen_page_views: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interactions {
    pub button_clicks: InteractionSummary,
    pub form_submissions: InteractionSummary,
}

/// Which interaction event a summary covers. Buttons are keyed by
/// `element_id`, forms by `form_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Button,
    Form,
}

/// The per-row identifier; serializes as `elementId` or `formId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKey {
    ElementId(String),
    FormId(String),
}

impl EventKey {
    pub fn id(&self) -> &str {
        match self {
            EventKey::ElementId(id) | EventKey::FormId(id) => id,
        }
    }
}

/// One interaction report row after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionEvent {
    #[serde(flatten)]
    pub key: EventKey,
    #[serde(serialize_with = "serialize_locale")]
    pub locale: Option<Locale>,
    pub raw_page_path: String,
    pub normalized_page_path: String,
    pub date: String,
    pub event_count: u64,
}

fn serialize_locale<S: Serializer>(locale: &Option<Locale>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(locale_label(*locale))
}

/// Per-id ranking; serializes as `byElementId` or `byFormId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyBreakdown {
    ByElementId(Vec<IdCount>),
    ByFormId(Vec<IdCount>),
}

impl KeyBreakdown {
    pub fn counts(&self) -> &[IdCount] {
        match self {
            KeyBreakdown::ByElementId(counts) | KeyBreakdown::ByFormId(counts) => counts,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionSummary {
    #[serde(skip)]
    pub kind: InteractionKind,
    pub total: u64,
    pub rows: Vec<InteractionEvent>,
    #[serde(flatten)]
    pub by_key: KeyBreakdown,
    pub by_locale: Vec<LocaleCount>,
    pub by_date: Vec<DateCount>,
    pub by_page_normalized: Vec<NormalizedPathCount>,
    pub by_page_raw: Vec<RawPathCount>,
    pub dedicated: BTreeMap<&'static str, DedicatedMetric>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdCount {
    pub id: String,
    pub event_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleCount {
    pub locale: &'static str,
    pub event_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateCount {
    pub date: String,
    pub event_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPathCount {
    pub normalized_page_path: String,
    pub event_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPathCount {
    pub raw_page_path: String,
    pub event_count: u64,
}

/// A named interaction reported on its own, across every locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DedicatedMetric {
    pub key: &'static str,
    pub id: &'static str,
    pub label: &'static str,
    pub normalized_page_path: &'static str,
    pub total: u64,
    pub by_locale: Vec<LocaleCount>,
    pub by_date: Vec<DateCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeSummary {
    pub active_users_last_30_minutes: u64,
}
