//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `briefing` - Daily briefing and top-focus commands
//! - `metrics` - Metric table and drilldown commands
//! - `serve` - Web server command
//! - `settings` - Init/set/status commands for the settings store

pub mod briefing;
pub mod metrics;
pub mod serve;
pub mod settings;

// Re-export command functions for main.rs
pub use briefing::*;
pub use metrics::*;
pub use serve::*;
pub use settings::*;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pulse_core::{BusinessUnit, Database, DashboardSettings, TimePeriod};

/// Resolve the settings database path: explicit flag, else platform default
pub fn resolve_db_path(db: Option<&Path>) -> PathBuf {
    db.map(Path::to_path_buf)
        .unwrap_or_else(Database::default_path)
}

/// Open (or create) the settings database
pub fn open_db(db: Option<&Path>) -> Result<Database> {
    let path = resolve_db_path(db);
    Database::new(&path).with_context(|| format!("Failed to open {}", path.display()))
}

/// Apply --unit/--period overrides on top of the saved settings
pub fn resolve_selection(
    settings: &DashboardSettings,
    unit: Option<&str>,
    period: Option<&str>,
) -> Result<(BusinessUnit, TimePeriod)> {
    let unit = match unit {
        Some(s) => s.parse().map_err(|e: String| anyhow::anyhow!(e))?,
        None => settings.business_unit,
    };
    let period = match period {
        Some(s) => s.parse().map_err(|e: String| anyhow::anyhow!(e))?,
        None => settings.time_period,
    };
    Ok((unit, period))
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}
