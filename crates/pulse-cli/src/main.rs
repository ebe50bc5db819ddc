//! Pulse CLI - Executive KPI dashboard
//!
//! Usage:
//!   pulse init                 Initialize the settings database
//!   pulse briefing             Show the daily briefing
//!   pulse metrics              Show the metric table
//!   pulse serve --port 3000    Start the web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(cli.db.as_deref()),
        Commands::Briefing { unit, period, json } => {
            let db = commands::open_db(cli.db.as_deref())?;
            commands::cmd_briefing(&db, unit.as_deref(), period.as_deref(), json).await
        }
        Commands::Metrics { unit, period, json } => {
            let db = commands::open_db(cli.db.as_deref())?;
            commands::cmd_metrics(&db, unit.as_deref(), period.as_deref(), json).await
        }
        Commands::Drilldown { metric_id } => {
            let db = commands::open_db(cli.db.as_deref())?;
            commands::cmd_drilldown(&db, &metric_id).await
        }
        Commands::Focus => {
            let db = commands::open_db(cli.db.as_deref())?;
            commands::cmd_focus(&db).await
        }
        Commands::Set { action } => {
            let db = commands::open_db(cli.db.as_deref())?;
            match action {
                SetAction::Unit { value } => commands::cmd_set_unit(&db, &value),
                SetAction::Period { value } => commands::cmd_set_period(&db, &value),
                SetAction::Comparison { value } => commands::cmd_set_comparison(&db, value),
            }
        }
        Commands::Status => commands::cmd_status(cli.db.as_deref()),
        Commands::Serve { port, host } => {
            let db = commands::open_db(cli.db.as_deref())?;
            commands::cmd_serve(db, &host, port).await
        }
    }
}
