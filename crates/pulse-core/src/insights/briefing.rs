//! Daily briefing assembly
//!
//! The briefing is the digest shown at the top of the dashboard: overall
//! status, the single top focus, and short lists of warnings and wins. It is
//! derived entirely from one engine pass over the current metric snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{BusinessUnit, Metric, TimePeriod};

use super::engine::{analyze, overall_status, top_focus};
use super::types::{Insight, InsightKind, OverallStatus};

/// Warnings shown in the briefing panel
pub const BRIEFING_MAX_WARNINGS: usize = 3;

/// Wins shown in the briefing panel
pub const BRIEFING_MAX_WINS: usize = 2;

/// Digest of the current metric snapshot for the briefing panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Briefing {
    pub business_unit: BusinessUnit,
    pub time_period: TimePeriod,
    pub status: OverallStatus,
    /// The single top-priority recommendation
    pub focus: String,
    /// Highest-priority warnings, at most [`BRIEFING_MAX_WARNINGS`]
    pub warnings: Vec<Insight>,
    /// Wins and achieved goals, at most [`BRIEFING_MAX_WINS`]
    pub wins: Vec<Insight>,
    pub generated_at: DateTime<Utc>,
}

impl Briefing {
    /// Headline, e.g. "This Month snapshot for WellBefore"
    pub fn headline(&self) -> String {
        format!(
            "{} snapshot for {}",
            self.time_period.headline_label(),
            self.business_unit.display_name()
        )
    }

    /// True when there is nothing to call out either way
    pub fn is_quiet(&self) -> bool {
        self.warnings.is_empty() && self.wins.is_empty()
    }
}

/// Run the engine and assemble the briefing digest
pub fn build_briefing(
    business_unit: BusinessUnit,
    time_period: TimePeriod,
    metrics: &[Metric],
) -> Briefing {
    let insights = analyze(metrics);
    let focus = top_focus(&insights, metrics);
    let status = overall_status(&insights);

    let warnings: Vec<Insight> = insights
        .iter()
        .filter(|i| i.kind == InsightKind::Warning)
        .take(BRIEFING_MAX_WARNINGS)
        .cloned()
        .collect();

    let wins: Vec<Insight> = insights
        .iter()
        .filter(|i| matches!(i.kind, InsightKind::Win | InsightKind::Goal))
        .take(BRIEFING_MAX_WINS)
        .cloned()
        .collect();

    tracing::debug!(
        unit = business_unit.as_str(),
        period = time_period.as_str(),
        warnings = warnings.len(),
        wins = wins.len(),
        status = status.as_str(),
        "Briefing assembled"
    );

    Briefing {
        business_unit,
        time_period,
        status,
        focus,
        warnings,
        wins,
        generated_at: Utc::now(),
    }
}
