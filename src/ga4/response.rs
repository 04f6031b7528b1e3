//! Report responses returned by the GA4 Data API.

use serde::Deserialize;

/// Sentinel GA4 uses (and we substitute) for an absent dimension value.
pub const DIMENSION_FALLBACK: &str = "(not set)";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DimensionValue {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MetricValue {
    #[serde(default)]
    pub value: Option<String>,
}

/// One raw report row: position-significant dimension and metric values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub dimension_values: Vec<DimensionValue>,
    #[serde(default)]
    pub metric_values: Vec<MetricValue>,
}

impl Row {
    pub fn new<D, M>(dimensions: D, metrics: M) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        Self {
            dimension_values: dimensions
                .into_iter()
                .map(|v| DimensionValue {
                    value: Some(v.into()),
                })
                .collect(),
            metric_values: metrics
                .into_iter()
                .map(|v| MetricValue {
                    value: Some(v.into()),
                })
                .collect(),
        }
    }

    /// Dimension at `index`, or the fallback sentinel when absent or empty.
    pub fn dimension(&self, index: usize) -> &str {
        self.dimension_values
            .get(index)
            .and_then(|d| d.value.as_deref())
            .filter(|v| !v.is_empty())
            .unwrap_or(DIMENSION_FALLBACK)
    }

    /// Metric at `index` coerced to a non-negative count; 0 when absent or invalid.
    pub fn metric(&self, index: usize) -> u64 {
        self.metric_values
            .get(index)
            .and_then(|m| m.value.as_deref())
            .map(parse_count)
            .unwrap_or(0)
    }
}

fn parse_count(raw: &str) -> u64 {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<u64>() {
        return value;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value as u64,
        _ => 0,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl ReportResponse {
    pub fn first_row(&self) -> Option<&Row> {
        self.rows.first()
    }
}
