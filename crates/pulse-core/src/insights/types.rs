//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of insights the engine can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Metric out of range, behind goal, or trending the wrong way
    Warning,
    /// Significant positive movement
    Win,
    /// Recommended area of attention
    Focus,
    /// Goal reached
    Goal,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Warning => "warning",
            InsightKind::Win => "win",
            InsightKind::Focus => "focus",
            InsightKind::Goal => "goal",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(InsightKind::Warning),
            "win" => Ok(InsightKind::Win),
            "focus" => Ok(InsightKind::Focus),
            "goal" => Ok(InsightKind::Goal),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// A derived, human-readable observation about one metric's current state.
///
/// Insights are a pure function of the metric list: nothing persists across
/// evaluations, every call to the engine rebuilds the full set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    /// Back-reference to the source metric, for click-through
    pub metric_id: String,
    pub metric_label: String,
    pub message: String,
    /// Higher sorts first
    pub priority: u8,
}

/// Overall health classification of a metric set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Excellent,
    Good,
    Attention,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Excellent => "excellent",
            OverallStatus::Good => "good",
            OverallStatus::Attention => "attention",
        }
    }

    /// Banner label shown alongside the status
    pub fn display_label(&self) -> &'static str {
        match self {
            OverallStatus::Excellent => "Excellent",
            OverallStatus::Good => "Needs Attention",
            OverallStatus::Attention => "Action Required",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OverallStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "excellent" => Ok(OverallStatus::Excellent),
            "good" => Ok(OverallStatus::Good),
            "attention" => Ok(OverallStatus::Attention),
            _ => Err(format!("Unknown overall status: {}", s)),
        }
    }
}
