//! Insight Engine
//!
//! Scans a metric snapshot and produces prioritized, human-readable
//! observations: out-of-range warnings, significant wins, goal progress,
//! and short-term trend alerts, plus a single top-focus recommendation and
//! an overall status classification.
//!
//! Everything here is a pure function of the supplied metrics; see
//! [`engine::analyze`] for the rule set and ordering contract.

pub mod briefing;
pub mod engine;
pub mod types;

pub use briefing::{build_briefing, Briefing, BRIEFING_MAX_WARNINGS, BRIEFING_MAX_WINS};
pub use engine::{analyze, overall_status, top_focus};
pub use types::{Insight, InsightKind, OverallStatus};
