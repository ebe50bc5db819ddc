//! Pulse Core Library
//!
//! Shared functionality for the Pulse executive KPI dashboard:
//! - Domain models for metrics, goals, targets, and drilldowns
//! - The Insight Engine: ranked warnings, wins, goal progress, trend alerts
//! - Daily briefing assembly (status, top focus, warnings, wins)
//! - Metric value formatting (currency, percent, ratio, time, months)
//! - Pluggable metrics provider with a built-in static data set
//! - Application state container with named transitions
//! - Command palette registry
//! - SQLite-backed key-value settings store

pub mod commands;
pub mod db;
pub mod error;
pub mod format;
pub mod insights;
pub mod models;
pub mod provider;
pub mod state;

pub use commands::{Command, CommandCategory, CommandDescriptor};
pub use db::Database;
pub use error::{Error, Result};
pub use format::{change_summary, ChangeSummary, MetricFormat};
pub use insights::{
    analyze, build_briefing, overall_status, top_focus, Briefing, Insight, InsightKind,
    OverallStatus,
};
pub use models::{
    BreakdownRow, BusinessUnit, ChannelBreakdown, ChartPoint, ComparisonData, ComparisonSeries,
    DashboardData, DashboardSettings, Metric, MetricDrilldown, MetricGoal, MetricStatus,
    MetricTarget, ProductBreakdown, SparklinePoint, TimeBreakdown, TimePeriod, TrendDirection,
};
pub use provider::{MetricsProvider, StaticProvider};
pub use state::DashboardState;
