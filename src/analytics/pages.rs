use std::cmp::Ordering;
use std::collections::HashMap;

use super::models::{NormalizedPageStat, PageBreakdown, RawPageStat};
use super::path::{normalize_path, sanitize_raw_path};
use super::queries::PageRow;
use crate::ga4::Row;

/// Views descending, then active users descending, then path ascending.
fn by_traffic(a: (u64, u64, &str), b: (u64, u64, &str)) -> Ordering {
    b.0.cmp(&a.0)
        .then_with(|| b.1.cmp(&a.1))
        .then_with(|| a.2.cmp(b.2))
}

/// Splits the page report into a per-raw-path view and a per-logical-page
/// view that sums every locale variant of the same page.
pub fn map_page_rows(rows: &[Row]) -> PageBreakdown {
    let mut raw = Vec::with_capacity(rows.len());
    let mut normalized: HashMap<String, NormalizedPageStat> = HashMap::new();

    for row in rows.iter().map(PageRow::from_row) {
        let raw_page_path = sanitize_raw_path(&row.page_path);
        let normalized_page_path = normalize_path(&raw_page_path);

        let entry = normalized
            .entry(normalized_page_path.clone())
            .or_insert_with(|| NormalizedPageStat {
                normalized_page_path: normalized_page_path.clone(),
                active_users: 0,
                screen_page_views: 0,
            });
        entry.active_users = entry.active_users.saturating_add(row.active_users);
        entry.screen_page_views = entry.screen_page_views.saturating_add(row.screen_page_views);

        raw.push(RawPageStat {
            raw_page_path,
            normalized_page_path,
            active_users: row.active_users,
            screen_page_views: row.screen_page_views,
        });
    }

    raw.sort_by(|a, b| {
        by_traffic(
            (a.screen_page_views, a.active_users, a.raw_page_path.as_str()),
            (b.screen_page_views, b.active_users, b.raw_page_path.as_str()),
        )
    });

    let mut normalized: Vec<NormalizedPageStat> = normalized.into_values().collect();
    normalized.sort_by(|a, b| {
        by_traffic(
            (a.screen_page_views, a.active_users, a.normalized_page_path.as_str()),
            (b.screen_page_views, b.active_users, b.normalized_page_path.as_str()),
        )
    });

    PageBreakdown { raw, normalized }
}
