//! Upstream authentication for the GA4 Data API.

pub mod service_account;

pub use service_account::{ServiceAccountAuth, ANALYTICS_READONLY_SCOPE};
