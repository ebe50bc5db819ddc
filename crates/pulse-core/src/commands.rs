//! Command palette registry
//!
//! The palette is data: a closed set of commands, each mapping to a state
//! transition. Front ends render the descriptors and send back an id to
//! execute, so keyboard handling stays out of the core.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{BusinessUnit, TimePeriod};
use crate::state::DashboardState;

/// Palette grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandCategory {
    Navigation,
    Actions,
    Settings,
}

impl CommandCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Navigation => "navigation",
            Self::Actions => "actions",
            Self::Settings => "settings",
        }
    }
}

/// A palette command bound to a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SwitchUnit(BusinessUnit),
    SwitchPeriod(TimePeriod),
    ToggleComparison,
    Refresh,
}

/// Serializable view of a command for palette rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
    pub category: CommandCategory,
}

impl Command {
    /// Every command in palette order
    pub fn all() -> Vec<Command> {
        let mut commands: Vec<Command> = BusinessUnit::all()
            .into_iter()
            .map(Command::SwitchUnit)
            .collect();
        commands.extend(TimePeriod::all().into_iter().map(Command::SwitchPeriod));
        commands.push(Command::ToggleComparison);
        commands.push(Command::Refresh);
        commands
    }

    pub fn id(&self) -> String {
        match self {
            Self::SwitchUnit(unit) => format!("unit:{}", unit.as_str()),
            Self::SwitchPeriod(period) => format!("period:{}", period.as_str()),
            Self::ToggleComparison => "toggle-comparison".to_string(),
            Self::Refresh => "refresh".to_string(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::SwitchUnit(unit) => format!("Go to {}", unit.display_name()),
            Self::SwitchPeriod(TimePeriod::Today) => "View Today".to_string(),
            Self::SwitchPeriod(TimePeriod::Wtd) => "View Week to Date".to_string(),
            Self::SwitchPeriod(TimePeriod::Mtd) => "View Month to Date".to_string(),
            Self::SwitchPeriod(TimePeriod::Qtd) => "View Quarter to Date".to_string(),
            Self::SwitchPeriod(TimePeriod::Ytd) => "View Year to Date".to_string(),
            Self::ToggleComparison => "Toggle Comparison Mode".to_string(),
            Self::Refresh => "Refresh Data".to_string(),
        }
    }

    pub fn shortcut(&self) -> Option<&'static str> {
        match self {
            Self::SwitchUnit(BusinessUnit::WellBefore) => Some("g w"),
            Self::SwitchUnit(BusinessUnit::D2cBuilders) => Some("g d"),
            Self::ToggleComparison => Some("c"),
            Self::Refresh => Some("r"),
            _ => None,
        }
    }

    pub fn category(&self) -> CommandCategory {
        match self {
            Self::SwitchUnit(_) | Self::SwitchPeriod(_) => CommandCategory::Navigation,
            Self::Refresh => CommandCategory::Actions,
            Self::ToggleComparison => CommandCategory::Settings,
        }
    }

    pub fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor {
            id: self.id(),
            label: self.label(),
            shortcut: self.shortcut().map(str::to_string),
            category: self.category(),
        }
    }

    /// Look a command up by its id
    pub fn find(id: &str) -> Option<Command> {
        Self::all().into_iter().find(|c| c.id() == id)
    }

    /// Case-insensitive substring filter over labels, palette order preserved
    pub fn search(query: &str) -> Vec<Command> {
        let query = query.to_lowercase();
        Self::all()
            .into_iter()
            .filter(|c| c.label().to_lowercase().contains(&query))
            .collect()
    }

    /// Execute the bound transition
    pub async fn apply(&self, state: &mut DashboardState) -> Result<()> {
        match self {
            Self::SwitchUnit(unit) => state.set_business_unit(*unit).await,
            Self::SwitchPeriod(period) => state.set_time_period(*period).await,
            Self::ToggleComparison => {
                state.toggle_comparison_mode();
                Ok(())
            }
            Self::Refresh => state.refresh().await,
        }
    }
}
