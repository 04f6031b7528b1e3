//! Report query shapes and their typed row views.
//!
//! GA4 returns dimension and metric values by position, with the meaning
//! fixed by the order in the request. Each query below defines its column
//! order and the matching `from_row` constructor; nothing else in the crate
//! indexes rows by position.

use super::date::format_ga_date;
use super::filters::ResolvedFilters;
use super::locale::Locale;
use crate::ga4::{
    Dimension, Metric, OrderBy, ReportResponse, Row, RunRealtimeReportRequest, RunReportRequest,
    DIMENSION_FALLBACK,
};

pub const REPORT_ROW_LIMIT: u64 = 5000;

const METRIC_ACTIVE_USERS: &str = "activeUsers";
const METRIC_SCREEN_PAGE_VIEWS: &str = "screenPageViews";
const METRIC_EVENT_COUNT: &str = "eventCount";

const INTERACTION_DIMENSIONS: [&str; 7] = [
    "eventName",
    "customEvent:element_id",
    "customEvent:form_id",
    "customEvent:locale",
    "pagePath",
    "customEvent:page_path",
    "date",
];

fn metrics(names: &[&str]) -> Vec<Metric> {
    names.iter().copied().map(Metric::new).collect()
}

/// Site-wide totals for the selected range.
pub fn overview_request(filters: &ResolvedFilters) -> RunReportRequest {
    RunReportRequest {
        date_ranges: filters.date_ranges(),
        metrics: metrics(&[METRIC_ACTIVE_USERS, METRIC_SCREEN_PAGE_VIEWS]),
        dimension_filter: filters.page_path_filter(),
        ..Default::default()
    }
}

/// Users and views per raw page path.
pub fn pages_request(filters: &ResolvedFilters) -> RunReportRequest {
    RunReportRequest {
        date_ranges: filters.date_ranges(),
        dimensions: vec![Dimension::new("pagePath")],
        metrics: metrics(&[METRIC_ACTIVE_USERS, METRIC_SCREEN_PAGE_VIEWS]),
        dimension_filter: filters.page_path_filter(),
        order_bys: vec![OrderBy::metric_desc(METRIC_SCREEN_PAGE_VIEWS)],
        limit: Some(REPORT_ROW_LIMIT),
    }
}

/// Event counts for one interaction event (`button_click` / `form_submit`).
pub fn interaction_request(filters: &ResolvedFilters, event_name: &str) -> RunReportRequest {
    RunReportRequest {
        date_ranges: filters.date_ranges(),
        dimensions: INTERACTION_DIMENSIONS.iter().copied().map(Dimension::new).collect(),
        metrics: metrics(&[METRIC_EVENT_COUNT]),
        dimension_filter: Some(filters.interaction_filter(event_name)),
        limit: Some(REPORT_ROW_LIMIT),
        ..Default::default()
    }
}

/// Active users over the last 30 minutes. Never filtered.
pub fn realtime_request() -> RunRealtimeReportRequest {
    RunRealtimeReportRequest {
        metrics: metrics(&[METRIC_ACTIVE_USERS]),
        ..Default::default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverviewRow {
    pub active_users: u64,
    pub screen_page_views: u64,
}

impl OverviewRow {
    /// Totals come back as a single dimensionless row; an empty report means zero.
    pub fn from_report(report: &ReportResponse) -> Self {
        report
            .first_row()
            .map(|row| Self {
                active_users: row.metric(0),
                screen_page_views: row.metric(1),
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRow {
    pub page_path: String,
    pub active_users: u64,
    pub screen_page_views: u64,
}

impl PageRow {
    pub fn from_row(row: &Row) -> Self {
        Self {
            page_path: row.dimension(0).to_string(),
            active_users: row.metric(0),
            screen_page_views: row.metric(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRow {
    pub element_id: String,
    pub form_id: String,
    /// `None` when the locale dimension is missing or outside the fixed set.
    pub locale: Option<Locale>,
    pub page_path: String,
    pub custom_page_path: String,
    /// ISO `YYYY-MM-DD`, or the raw value when GA4 sent a placeholder.
    pub date: String,
    pub event_count: u64,
}

impl InteractionRow {
    pub fn from_row(row: &Row) -> Self {
        let locale_raw = row.dimension(3).to_lowercase();
        // Column 0 (`eventName`) is pinned by the request filter.
        Self {
            element_id: row.dimension(1).to_string(),
            form_id: row.dimension(2).to_string(),
            locale: Locale::parse(&locale_raw).filter(|l| l.as_str() == locale_raw),
            page_path: row.dimension(4).to_string(),
            custom_page_path: row.dimension(5).to_string(),
            date: format_ga_date(row.dimension(6)),
            event_count: row.metric(0),
        }
    }

    /// Prefer GA4's built-in `pagePath` when it looks like a path; events
    /// emitted with only the custom parameter fall back to `page_path`.
    pub fn effective_page_path(&self) -> &str {
        if self.page_path != DIMENSION_FALLBACK && self.page_path.starts_with('/') {
            &self.page_path
        } else {
            &self.custom_page_path
        }
    }
}

pub fn realtime_active_users(report: &ReportResponse) -> u64 {
    report.first_row().map(|row| row.metric(0)).unwrap_or(0)
}
