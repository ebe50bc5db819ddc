//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pulse - Executive KPI dashboard with a daily briefing
#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Executive KPI dashboard with a daily briefing", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings database path (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the settings database
    Init,

    /// Show the daily briefing
    Briefing {
        /// Business unit (wellbefore, d2c-builders); defaults to the saved setting
        #[arg(short, long)]
        unit: Option<String>,

        /// Time period (today, wtd, mtd, qtd, ytd); defaults to the saved setting
        #[arg(short, long)]
        period: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the metric table
    Metrics {
        /// Business unit (wellbefore, d2c-builders); defaults to the saved setting
        #[arg(short, long)]
        unit: Option<String>,

        /// Time period (today, wtd, mtd, qtd, ytd); defaults to the saved setting
        #[arg(short, long)]
        period: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show drilldown breakdowns for a metric
    Drilldown {
        /// Metric id, e.g. wb-revenue
        metric_id: String,
    },

    /// Print the current top focus
    Focus,

    /// Persist a dashboard setting
    Set {
        #[command(subcommand)]
        action: SetAction,
    },

    /// Show settings database status
    Status,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

#[derive(Subcommand)]
pub enum SetAction {
    /// Set the business unit (wellbefore, d2c-builders)
    Unit { value: String },

    /// Set the time period (today, wtd, mtd, qtd, ytd)
    Period { value: String },

    /// Turn comparison mode on or off
    Comparison { value: bool },
}
