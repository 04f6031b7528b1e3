//! Report query specifications in the GA4 Data API JSON shape.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dimension {
    pub name: String,
}

impl Dimension {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub name: String,
}

impl Metric {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    Exact,
    BeginsWith,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFilter {
    pub match_type: MatchType,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub field_name: String,
    pub string_filter: StringFilter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterExpressionList {
    pub expressions: Vec<FilterExpression>,
}

/// A dimension filter predicate. Serializes as the GA4 `oneof` object,
/// e.g. `{"andGroup": {"expressions": [...]}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterExpression {
    Filter(Filter),
    AndGroup(FilterExpressionList),
}

impl FilterExpression {
    fn string(field_name: &str, match_type: MatchType, value: impl Into<String>) -> Self {
        FilterExpression::Filter(Filter {
            field_name: field_name.to_string(),
            string_filter: StringFilter {
                match_type,
                value: value.into(),
            },
        })
    }

    pub fn exact(field_name: &str, value: impl Into<String>) -> Self {
        Self::string(field_name, MatchType::Exact, value)
    }

    pub fn begins_with(field_name: &str, value: impl Into<String>) -> Self {
        Self::string(field_name, MatchType::BeginsWith, value)
    }

    /// Conjunction of `expressions`; a single expression is returned as-is.
    pub fn and(mut expressions: Vec<FilterExpression>) -> Self {
        if expressions.len() == 1 {
            return expressions.remove(0);
        }
        FilterExpression::AndGroup(FilterExpressionList { expressions })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricOrderBy {
    pub metric_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    pub metric: MetricOrderBy,
    pub desc: bool,
}

impl OrderBy {
    pub fn metric_desc(name: &str) -> Self {
        Self {
            metric: MetricOrderBy {
                metric_name: name.to_string(),
            },
            desc: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportRequest {
    pub date_ranges: Vec<DateRange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<Dimension>,
    pub metrics: Vec<Metric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_filter: Option<FilterExpression>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_bys: Vec<OrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRealtimeReportRequest {
    pub metrics: Vec<Metric>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_expressions_use_ga4_field_names() {
        let expr = FilterExpression::and(vec![
            FilterExpression::exact("eventName", "button_click"),
            FilterExpression::exact("customEvent:locale", "ru"),
        ]);

        assert_eq!(
            serde_json::to_value(&expr).unwrap(),
            json!({
                "andGroup": {
                    "expressions": [
                        { "filter": { "fieldName": "eventName", "stringFilter": { "matchType": "EXACT", "value": "button_click" } } },
                        { "filter": { "fieldName": "customEvent:locale", "stringFilter": { "matchType": "EXACT", "value": "ru" } } }
                    ]
                }
            })
        );
    }

    #[test]
    fn single_expression_groups_collapse() {
        let only = FilterExpression::begins_with("pagePath", "/en");
        assert_eq!(FilterExpression::and(vec![only.clone()]), only);
        assert_eq!(
            serde_json::to_value(&only).unwrap(),
            json!({ "filter": { "fieldName": "pagePath", "stringFilter": { "matchType": "BEGINS_WITH", "value": "/en" } } })
        );
    }

    #[test]
    fn realtime_request_carries_metrics_only() {
        let request = RunRealtimeReportRequest {
            metrics: vec![Metric::new("activeUsers")],
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "metrics": [{ "name": "activeUsers" }] })
        );
    }

    #[test]
    fn report_request_omits_empty_sections() {
        let request = RunReportRequest {
            date_ranges: vec![DateRange {
                start_date: "30daysAgo".to_string(),
                end_date: "today".to_string(),
            }],
            metrics: vec![Metric::new("activeUsers")],
            order_bys: vec![OrderBy::metric_desc("activeUsers")],
            limit: Some(10),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "dateRanges": [{ "startDate": "30daysAgo", "endDate": "today" }],
                "metrics": [{ "name": "activeUsers" }],
                "orderBys": [{ "metric": { "metricName": "activeUsers" }, "desc": true }],
                "limit": 10
            })
        );
    }
}
