//! Report orchestration: query GA4, then reshape rows for the dashboard.

use tracing::debug;

use super::aggregator::map_interaction_rows;
use super::dedicated::dedicated_metrics;
use super::filters::ResolvedFilters;
use super::models::{
    AnalyticsReport, FiltersInfo, InteractionKind, InteractionSummary, Interactions, Overview,
    RealtimeSummary,
};
use super::pages::map_page_rows;
use super::queries::{
    interaction_request, overview_request, pages_request, realtime_active_users, realtime_request,
    OverviewRow,
};
use crate::ga4::{Ga4Result, ReportResponse, ReportService};

fn interaction_summary(report: &ReportResponse, kind: InteractionKind) -> InteractionSummary {
    let mut summary = map_interaction_rows(&report.rows, kind);
    summary.dedicated = dedicated_metrics(&summary);
    summary
}

/// Runs the four dashboard queries concurrently and assembles the report.
///
/// Any failed query fails the whole report; nothing partial is returned.
pub async fn build_analytics_report(
    service: &dyn ReportService,
    filters: &ResolvedFilters,
) -> Ga4Result<AnalyticsReport> {
    let overview_req = overview_request(filters);
    let pages_req = pages_request(filters);
    let buttons_req = interaction_request(filters, InteractionKind::Button.event_name());
    let forms_req = interaction_request(filters, InteractionKind::Form.event_name());

    let (overview, pages, buttons, forms) = tokio::try_join!(
        service.run_report(&overview_req),
        service.run_report(&pages_req),
        service.run_report(&buttons_req),
        service.run_report(&forms_req),
    )?;

    debug!(
        pages = pages.rows.len(),
        button_rows = buttons.rows.len(),
        form_rows = forms.rows.len(),
        "GA4 reports received"
    );

    let overview = OverviewRow::from_report(&overview);

    Ok(AnalyticsReport {
        range: filters.into(),
        filters: FiltersInfo {
            locale: filters.locale,
        },
        overview: Overview {
            active_users: overview.active_users,
            screen_page_views: overview.screen_page_views,
        },
        pages: map_page_rows(&pages.rows),
        interactions: Interactions {
            button_clicks: interaction_summary(&buttons, InteractionKind::Button),
            form_submissions: interaction_summary(&forms, InteractionKind::Form),
        },
    })
}

/// Active users over the last 30 minutes, unfiltered.
pub async fn fetch_realtime_users(service: &dyn ReportService) -> Ga4Result<RealtimeSummary> {
    let report = service.run_realtime_report(&realtime_request()).await?;
    Ok(RealtimeSummary {
        active_users_last_30_minutes: realtime_active_users(&report),
    })
}
