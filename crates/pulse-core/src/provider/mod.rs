//! Metric data providers
//!
//! The dashboard never sources data itself; it asks a [`MetricsProvider`].
//! The built-in [`StaticProvider`] serves a fixed in-memory data set, and a
//! production deployment swaps in a warehouse-backed implementation without
//! touching the engine or the state container.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{BusinessUnit, ComparisonData, DashboardData, TimePeriod};

mod static_data;

pub use static_data::StaticProvider;

/// Source of metric snapshots for the dashboard
#[async_trait]
pub trait MetricsProvider: Send + Sync {
    /// Fetch the full dashboard payload for one unit/period selection
    async fn fetch_dashboard(
        &self,
        unit: BusinessUnit,
        period: TimePeriod,
    ) -> Result<DashboardData>;

    /// Fetch current-vs-previous comparison series for a metric, if the
    /// provider has one
    async fn fetch_comparison(
        &self,
        unit: BusinessUnit,
        metric_id: &str,
    ) -> Result<Option<ComparisonData>>;
}
