//! Domain models for Pulse

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::format::MetricFormat;

/// Business units the dashboard can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessUnit {
    #[serde(rename = "wellbefore")]
    WellBefore,
    #[serde(rename = "d2c-builders")]
    D2cBuilders,
}

impl BusinessUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WellBefore => "wellbefore",
            Self::D2cBuilders => "d2c-builders",
        }
    }

    /// Human-readable name for headers and briefings
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::WellBefore => "WellBefore",
            Self::D2cBuilders => "D2C Builders",
        }
    }

    pub fn all() -> [BusinessUnit; 2] {
        [Self::WellBefore, Self::D2cBuilders]
    }
}

impl std::str::FromStr for BusinessUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wellbefore" => Ok(Self::WellBefore),
            "d2c-builders" | "d2c" => Ok(Self::D2cBuilders),
            _ => Err(format!("Unknown business unit: {}", s)),
        }
    }
}

impl std::fmt::Display for BusinessUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reporting periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    Today,
    Wtd,
    Mtd,
    Qtd,
    Ytd,
}

impl TimePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Wtd => "wtd",
            Self::Mtd => "mtd",
            Self::Qtd => "qtd",
            Self::Ytd => "ytd",
        }
    }

    /// Label used in briefing headlines ("This Month snapshot for ...")
    pub fn headline_label(&self) -> &'static str {
        match self {
            Self::Today => "Today's",
            Self::Wtd => "This Week",
            Self::Mtd => "This Month",
            Self::Qtd => "This Quarter",
            Self::Ytd => "This Year",
        }
    }

    pub fn all() -> [TimePeriod; 5] {
        [Self::Today, Self::Wtd, Self::Mtd, Self::Qtd, Self::Ytd]
    }
}

impl std::str::FromStr for TimePeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" => Ok(Self::Today),
            "wtd" => Ok(Self::Wtd),
            "mtd" => Ok(Self::Mtd),
            "qtd" => Ok(Self::Qtd),
            "ytd" => Ok(Self::Ytd),
            _ => Err(format!("Unknown time period: {}", s)),
        }
    }
}

impl std::fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pre-computed health classification of a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Success,
    Warning,
    Danger,
}

impl MetricStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl std::fmt::Display for MetricStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Period-over-period direction of a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Flat => "flat",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One point of a metric's short-term history, chronological
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparklinePoint {
    pub value: f64,
    pub date: NaiveDate,
}

/// Progress toward a numeric target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricGoal {
    pub target: f64,
    pub current: f64,
    pub label: String,
}

impl MetricGoal {
    /// Percent progress toward the target.
    ///
    /// Returns `None` when the target is zero or the result is otherwise
    /// non-finite, so callers treat a malformed goal as absent.
    pub fn progress(&self) -> Option<f64> {
        let progress = self.current / self.target * 100.0;
        progress.is_finite().then_some(progress)
    }
}

/// Acceptable range for a metric, used to classify its health
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimal: Option<f64>,
}

impl MetricTarget {
    /// Classify a reading against this target.
    ///
    /// An `optimal` point wins over a min/max band; values within 5% of
    /// optimal are healthy, within 10% a warning. Bands get a 5% grace zone
    /// on each open side, single-sided bounds a 10% one.
    pub fn classify(&self, value: f64) -> MetricStatus {
        if let Some(optimal) = self.optimal {
            let diff = (value - optimal).abs();
            let tolerance = optimal * 0.05;
            return if diff <= tolerance {
                MetricStatus::Success
            } else if diff <= tolerance * 2.0 {
                MetricStatus::Warning
            } else {
                MetricStatus::Danger
            };
        }

        match (self.min, self.max) {
            (Some(min), Some(max)) => {
                if value >= min && value <= max {
                    MetricStatus::Success
                } else if value >= min * 0.95 && value <= max * 1.05 {
                    MetricStatus::Warning
                } else {
                    MetricStatus::Danger
                }
            }
            (Some(min), None) => {
                if value >= min {
                    MetricStatus::Success
                } else if value >= min * 0.9 {
                    MetricStatus::Warning
                } else {
                    MetricStatus::Danger
                }
            }
            (None, Some(max)) => {
                if value <= max {
                    MetricStatus::Success
                } else if value <= max * 1.1 {
                    MetricStatus::Warning
                } else {
                    MetricStatus::Danger
                }
            }
            (None, None) => MetricStatus::Success,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A single KPI reading with optional historical and goal context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub id: String,
    pub label: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<f64>,
    pub format: MetricFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendDirection>,
    /// Signed percent delta vs. the previous period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    /// Pre-formatted change string, e.g. "+6.1%"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_formatted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MetricStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<MetricTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<MetricGoal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sparkline: Vec<SparklinePoint>,
    /// Direction semantics: whether an increase is good or bad
    #[serde(default = "default_true")]
    pub higher_is_better: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One row of a drilldown breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub label: String,
    pub value: f64,
    pub percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
}

/// Breakdown row keyed by product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductBreakdown {
    #[serde(flatten)]
    pub row: BreakdownRow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Breakdown row keyed by sales channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelBreakdown {
    #[serde(flatten)]
    pub row: BreakdownRow,
    pub channel: String,
}

/// Breakdown row keyed by time bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBreakdown {
    #[serde(flatten)]
    pub row: BreakdownRow,
    pub period: String,
    pub date: NaiveDate,
}

/// Detail view breaking a metric down by product, channel, and time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDrilldown {
    pub metric_id: String,
    pub metric_label: String,
    pub total_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_product: Option<Vec<ProductBreakdown>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_channel: Option<Vec<ChannelBreakdown>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_time: Option<Vec<TimeBreakdown>>,
}

/// Everything the dashboard shows for one unit/period selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub business_unit: BusinessUnit,
    pub time_period: TimePeriod,
    pub last_updated: DateTime<Utc>,
    pub metrics: Vec<Metric>,
    pub drilldowns: HashMap<String, MetricDrilldown>,
}

/// One point of a comparison chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub label: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<f64>,
}

/// One side of a current-vs-previous comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSeries {
    pub label: String,
    pub value: f64,
    pub data: Vec<ChartPoint>,
}

/// Current vs. previous period series for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonData {
    pub current: ComparisonSeries,
    pub previous: ComparisonSeries,
}

/// Persisted subset of the dashboard state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSettings {
    pub business_unit: BusinessUnit,
    pub time_period: TimePeriod,
    pub comparison_mode: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            business_unit: BusinessUnit::WellBefore,
            time_period: TimePeriod::Mtd,
            comparison_mode: false,
        }
    }
}
