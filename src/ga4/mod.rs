pub mod client;
pub mod request;
pub mod response;
pub mod trait_def;

pub use client::Ga4Client;
pub use request::{
    DateRange, Dimension, FilterExpression, MatchType, Metric, OrderBy, RunRealtimeReportRequest,
    RunReportRequest,
};
pub use response::{ReportResponse, Row, DIMENSION_FALLBACK};
pub use trait_def::{Ga4Error, Ga4Result, ReportService};
