//! Insight Engine - turns a metric snapshot into ranked observations
//!
//! Evaluation is a single synchronous pass: four rules per metric, in metric
//! order, then a stable sort by priority. The engine holds no state between
//! calls and never errors; a metric missing an optional field simply does not
//! fire the rules that need it.

use crate::format::format_signed_percent;
use crate::models::{Metric, MetricStatus};

use super::types::{Insight, InsightKind, OverallStatus};

/// Percent change that counts as a significant win
pub const SIGNIFICANT_CHANGE_PCT: f64 = 5.0;

/// Goal progress below this percentage needs attention
pub const GOAL_ATTENTION_PCT: f64 = 80.0;

/// Goal progress at or above this percentage counts as achieved
pub const GOAL_ACHIEVED_PCT: f64 = 100.0;

/// Number of trailing sparkline points examined for a trend
pub const TREND_WINDOW: usize = 3;

/// Warning count at which the overall status escalates
pub const ATTENTION_WARNING_COUNT: usize = 3;

/// A single warning at or above this priority escalates the overall status
pub const ATTENTION_PRIORITY_FLOOR: u8 = 9;

const PRIORITY_DANGER: u8 = 10;
const PRIORITY_GOAL_BEHIND: u8 = 8;
const PRIORITY_STATUS_WARNING: u8 = 7;
const PRIORITY_TREND: u8 = 6;
const PRIORITY_GOAL_ACHIEVED: u8 = 5;
const PRIORITY_WIN: u8 = 4;

/// Evaluate all insight rules against a metric snapshot.
///
/// The result is sorted by priority descending; equal priorities keep their
/// generation order (metric order, then rule order within a metric).
pub fn analyze(metrics: &[Metric]) -> Vec<Insight> {
    let mut insights = Vec::new();

    for metric in metrics {
        status_alert(metric, &mut insights);
        significant_win(metric, &mut insights);
        goal_progress(metric, &mut insights);
        trend_alert(metric, &mut insights);
    }

    // Stable: ties keep generation order
    insights.sort_by(|a, b| b.priority.cmp(&a.priority));
    insights
}

/// Rule 1: metric classified as warning or danger
fn status_alert(metric: &Metric, insights: &mut Vec<Insight>) {
    let priority = match metric.status {
        Some(MetricStatus::Danger) => PRIORITY_DANGER,
        Some(MetricStatus::Warning) => PRIORITY_STATUS_WARNING,
        _ => return,
    };

    let direction = if metric.higher_is_better {
        "below"
    } else {
        "above"
    };

    insights.push(Insight {
        kind: InsightKind::Warning,
        metric_id: metric.id.clone(),
        metric_label: metric.label.clone(),
        message: format!("{} is {} target range", metric.label, direction),
        priority,
    });
}

/// Rule 2: healthy metric with a significant move in the good direction
fn significant_win(metric: &Metric, insights: &mut Vec<Insight>) {
    if metric.status != Some(MetricStatus::Success) {
        return;
    }
    let Some(change) = metric.change else {
        return;
    };

    let significant = if metric.higher_is_better {
        change > SIGNIFICANT_CHANGE_PCT
    } else {
        change < -SIGNIFICANT_CHANGE_PCT
    };
    if !significant {
        return;
    }

    let formatted = metric
        .change_formatted
        .clone()
        .unwrap_or_else(|| format_signed_percent(change));

    insights.push(Insight {
        kind: InsightKind::Win,
        metric_id: metric.id.clone(),
        metric_label: metric.label.clone(),
        message: format!("{} improved {}", metric.label, formatted),
        priority: PRIORITY_WIN,
    });
}

/// Rule 3: goal achieved or falling behind
fn goal_progress(metric: &Metric, insights: &mut Vec<Insight>) {
    let Some(goal) = &metric.goal else {
        return;
    };
    // A zero target makes progress non-finite; treat the goal as absent
    let Some(progress) = goal.progress() else {
        return;
    };

    if progress >= GOAL_ACHIEVED_PCT {
        insights.push(Insight {
            kind: InsightKind::Goal,
            metric_id: metric.id.clone(),
            metric_label: metric.label.clone(),
            message: format!("{} achieved! ({}%)", goal.label, progress.round()),
            priority: PRIORITY_GOAL_ACHIEVED,
        });
    } else if progress < GOAL_ATTENTION_PCT {
        insights.push(Insight {
            kind: InsightKind::Warning,
            metric_id: metric.id.clone(),
            metric_label: metric.label.clone(),
            message: format!(
                "{} at {}% of goal - needs attention",
                metric.label,
                progress.round()
            ),
            priority: PRIORITY_GOAL_BEHIND,
        });
    }
}

/// Rule 4: three consecutive sparkline points moving the wrong way
fn trend_alert(metric: &Metric, insights: &mut Vec<Insight>) {
    if metric.sparkline.len() < TREND_WINDOW {
        return;
    }

    let recent = &metric.sparkline[metric.sparkline.len() - TREND_WINDOW..];
    let decreasing = recent[2].value < recent[1].value && recent[1].value < recent[0].value;
    let increasing = recent[2].value > recent[1].value && recent[1].value > recent[0].value;

    let concerning = if metric.higher_is_better {
        decreasing
    } else {
        increasing
    };
    if !concerning {
        return;
    }

    let direction = if metric.higher_is_better { "down" } else { "up" };

    insights.push(Insight {
        kind: InsightKind::Warning,
        metric_id: metric.id.clone(),
        metric_label: metric.label.clone(),
        message: format!("{} trending {} for 3+ days", metric.label, direction),
        priority: PRIORITY_TREND,
    });
}

/// Pick the single recommendation for the day.
///
/// The highest-priority warning wins; otherwise the goal closest to the
/// finish line (ties keep the earlier metric); otherwise all clear.
pub fn top_focus(insights: &[Insight], metrics: &[Metric]) -> String {
    if let Some(warning) = insights.iter().find(|i| i.kind == InsightKind::Warning) {
        return format!(
            "Focus on {} - it needs your attention today.",
            warning.metric_label
        );
    }

    let mut closest: Option<(&Metric, f64)> = None;
    for metric in metrics {
        let Some(progress) = metric.goal.as_ref().and_then(|g| g.progress()) else {
            continue;
        };
        if progress >= GOAL_ACHIEVED_PCT {
            continue;
        }
        let beats_current = match closest {
            Some((_, best)) => {
                (GOAL_ACHIEVED_PCT - progress).abs() < (GOAL_ACHIEVED_PCT - best).abs()
            }
            None => true,
        };
        if beats_current {
            closest = Some((metric, progress));
        }
    }

    if let Some((metric, progress)) = closest {
        return format!(
            "Push {} over the finish line - you're {}% there.",
            metric.label,
            progress.round()
        );
    }

    "All systems green. Look for the next growth lever.".to_string()
}

/// Classify the metric set as a whole from its insights
pub fn overall_status(insights: &[Insight]) -> OverallStatus {
    let warnings: Vec<&Insight> = insights
        .iter()
        .filter(|i| i.kind == InsightKind::Warning)
        .collect();

    if warnings.len() >= ATTENTION_WARNING_COUNT
        || warnings
            .iter()
            .any(|w| w.priority >= ATTENTION_PRIORITY_FLOOR)
    {
        OverallStatus::Attention
    } else if !warnings.is_empty() {
        OverallStatus::Good
    } else {
        OverallStatus::Excellent
    }
}
