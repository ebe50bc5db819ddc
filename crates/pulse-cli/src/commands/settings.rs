//! Settings command implementations (init, set, status)

use std::path::Path;

use anyhow::Result;
use pulse_core::Database;

use super::{open_db, resolve_db_path};

pub fn cmd_init(db_path: Option<&Path>) -> Result<()> {
    let db = open_db(db_path)?;
    let settings = db.load_settings()?;

    println!("✅ Settings database ready at {}", db.path());
    println!(
        "   Defaults: unit={}, period={}, comparison={}",
        settings.business_unit, settings.time_period, settings.comparison_mode
    );
    Ok(())
}

pub fn cmd_set_unit(db: &Database, value: &str) -> Result<()> {
    let unit = value.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let mut settings = db.load_settings()?;
    settings.business_unit = unit;
    db.save_settings(&settings)?;

    println!("Business unit set to {}", unit);
    Ok(())
}

pub fn cmd_set_period(db: &Database, value: &str) -> Result<()> {
    let period = value.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let mut settings = db.load_settings()?;
    settings.time_period = period;
    db.save_settings(&settings)?;

    println!("Time period set to {}", period);
    Ok(())
}

pub fn cmd_set_comparison(db: &Database, value: bool) -> Result<()> {
    let mut settings = db.load_settings()?;
    settings.comparison_mode = value;
    db.save_settings(&settings)?;

    println!(
        "Comparison mode {}",
        if value { "enabled" } else { "disabled" }
    );
    Ok(())
}

pub fn cmd_status(db_path: Option<&Path>) -> Result<()> {
    use std::fs;

    let path = resolve_db_path(db_path);

    println!();
    println!("📊 Pulse Status");
    println!("   ─────────────────────────────────────────");
    println!("   Settings db: {}", path.display());

    if path.exists() {
        if let Ok(metadata) = fs::metadata(&path) {
            println!("   Size: {:.1} KB", metadata.len() as f64 / 1024.0);
        }

        match open_db(db_path) {
            Ok(db) => {
                let settings = db.load_settings()?;
                println!();
                println!("   Business unit: {}", settings.business_unit.display_name());
                println!("   Time period: {}", settings.time_period.headline_label());
                println!(
                    "   Comparison mode: {}",
                    if settings.comparison_mode { "on" } else { "off" }
                );
            }
            Err(e) => {
                println!();
                println!("   ❌ Error opening database: {}", e);
            }
        }
    } else {
        println!("   Size: (not initialized - run 'pulse init')");
    }

    println!();
    Ok(())
}
