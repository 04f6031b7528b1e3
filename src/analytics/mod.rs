//! GA4 dashboard analytics
//!
//! Resolves dashboard filters into GA4 report queries and turns the returned
//! rows into locale-aware, path-normalized, date-bucketed summaries.
//!
//! Pipeline: `filters` → `queries` (request builders and typed row views) →
//! `aggregator` / `pages` → `dedicated` → `report`.

pub mod aggregator;
pub mod date;
pub mod dedicated;
pub mod filters;
pub mod locale;
pub mod models;
pub mod pages;
pub mod path;
pub mod queries;
pub mod report;

pub use aggregator::map_interaction_rows;
pub use date::format_ga_date;
pub use dedicated::{build_dedicated_metric, DedicatedMetricDefinition, DEDICATED_BUTTONS, DEDICATED_FORMS};
pub use filters::{resolve_filters, AnalyticsQuery, RangePreset, ResolvedFilters};
pub use locale::{Locale, LocaleFilter, LOCALES};
pub use models::{AnalyticsReport, InteractionKind, InteractionSummary, RealtimeSummary};
pub use pages::map_page_rows;
pub use path::normalize_path;
pub use report::{build_analytics_report, fetch_realtime_users};
