//! Dashboard application state
//!
//! An explicit state container with named transition functions, owned by
//! whichever front end is running (CLI, REST server). Only the
//! [`DashboardSettings`] subset is persisted; the drilldown/command-bar flags
//! are ephemeral and reset on startup.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::models::{
    BusinessUnit, ComparisonData, DashboardData, DashboardSettings, Metric, MetricDrilldown,
    TimePeriod,
};
use crate::provider::MetricsProvider;

/// Current dashboard state: persisted selection plus ephemeral UI flags
pub struct DashboardState {
    provider: Arc<dyn MetricsProvider>,
    settings: DashboardSettings,
    selected_metric_id: Option<String>,
    drilldown_open: bool,
    command_bar_open: bool,
    data: DashboardData,
}

impl DashboardState {
    /// Create a state container and load the initial snapshot
    pub async fn new(
        provider: Arc<dyn MetricsProvider>,
        settings: DashboardSettings,
    ) -> Result<Self> {
        let data = provider
            .fetch_dashboard(settings.business_unit, settings.time_period)
            .await?;

        Ok(Self {
            provider,
            settings,
            selected_metric_id: None,
            drilldown_open: false,
            command_bar_open: false,
            data,
        })
    }

    pub fn settings(&self) -> DashboardSettings {
        self.settings
    }

    pub fn business_unit(&self) -> BusinessUnit {
        self.settings.business_unit
    }

    pub fn time_period(&self) -> TimePeriod {
        self.settings.time_period
    }

    pub fn comparison_mode(&self) -> bool {
        self.settings.comparison_mode
    }

    pub fn selected_metric_id(&self) -> Option<&str> {
        self.selected_metric_id.as_deref()
    }

    pub fn drilldown_open(&self) -> bool {
        self.drilldown_open
    }

    pub fn command_bar_open(&self) -> bool {
        self.command_bar_open
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.data.last_updated
    }

    pub fn data(&self) -> &DashboardData {
        &self.data
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.data.metrics
    }

    pub fn metric(&self, metric_id: &str) -> Option<&Metric> {
        self.data.metrics.iter().find(|m| m.id == metric_id)
    }

    pub fn drilldown(&self, metric_id: &str) -> Option<&MetricDrilldown> {
        self.data.drilldowns.get(metric_id)
    }

    /// Switch business unit and refetch
    pub async fn set_business_unit(&mut self, unit: BusinessUnit) -> Result<()> {
        self.settings.business_unit = unit;
        self.refresh().await
    }

    /// Switch time period and refetch
    pub async fn set_time_period(&mut self, period: TimePeriod) -> Result<()> {
        self.settings.time_period = period;
        self.refresh().await
    }

    pub fn toggle_comparison_mode(&mut self) -> bool {
        self.settings.comparison_mode = !self.settings.comparison_mode;
        self.settings.comparison_mode
    }

    /// Open the drilldown panel for a metric in the current snapshot
    pub fn open_drilldown(&mut self, metric_id: &str) -> Result<()> {
        if self.metric(metric_id).is_none() {
            return Err(Error::UnknownMetric(metric_id.to_string()));
        }
        self.selected_metric_id = Some(metric_id.to_string());
        self.drilldown_open = true;
        Ok(())
    }

    pub fn close_drilldown(&mut self) {
        self.drilldown_open = false;
    }

    pub fn toggle_command_bar(&mut self) -> bool {
        self.command_bar_open = !self.command_bar_open;
        self.command_bar_open
    }

    pub fn set_command_bar_open(&mut self, open: bool) {
        self.command_bar_open = open;
    }

    /// Refetch the current unit/period from the provider
    pub async fn refresh(&mut self) -> Result<()> {
        self.data = self
            .provider
            .fetch_dashboard(self.settings.business_unit, self.settings.time_period)
            .await?;

        // Drop a selection that no longer exists in the new snapshot
        if let Some(selected) = &self.selected_metric_id {
            if !self.data.metrics.iter().any(|m| &m.id == selected) {
                self.selected_metric_id = None;
                self.drilldown_open = false;
            }
        }

        tracing::debug!(
            unit = self.settings.business_unit.as_str(),
            period = self.settings.time_period.as_str(),
            "Dashboard state refreshed"
        );
        Ok(())
    }

    /// Comparison series for a metric, if the provider has one
    pub async fn comparison(&self, metric_id: &str) -> Result<Option<ComparisonData>> {
        self.provider
            .fetch_comparison(self.settings.business_unit, metric_id)
            .await
    }
}
