//! Daily briefing command implementations

use anyhow::Result;
use pulse_core::{
    analyze, build_briefing, top_focus, Database, MetricsProvider, OverallStatus, StaticProvider,
};

use super::resolve_selection;

fn status_icon(status: OverallStatus) -> &'static str {
    match status {
        OverallStatus::Excellent => "✅",
        OverallStatus::Good => "⚠️ ",
        OverallStatus::Attention => "🚨",
    }
}

pub async fn cmd_briefing(
    db: &Database,
    unit: Option<&str>,
    period: Option<&str>,
    json: bool,
) -> Result<()> {
    let settings = db.load_settings()?;
    let (unit, period) = resolve_selection(&settings, unit, period)?;

    let provider = StaticProvider::new();
    let data = provider.fetch_dashboard(unit, period).await?;
    let briefing = build_briefing(unit, period, &data.metrics);

    if json {
        println!("{}", serde_json::to_string_pretty(&briefing)?);
        return Ok(());
    }

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│          ⚡ CEO Daily Briefing          │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {}", briefing.headline());
    println!(
        "  {} Status: {}",
        status_icon(briefing.status),
        briefing.status.display_label()
    );
    println!();
    println!("  🎯 Today's Focus");
    println!("     {}", briefing.focus);

    if !briefing.warnings.is_empty() {
        println!();
        println!("  ⚠️  Needs Attention");
        for warning in &briefing.warnings {
            println!("     • {}", warning.message);
        }
    }

    if !briefing.wins.is_empty() {
        println!();
        println!("  📈 Wins");
        for win in &briefing.wins {
            println!("     • {}", win.message);
        }
    }

    if briefing.is_quiet() {
        println!();
        println!("  ✅ All metrics performing well. Keep the momentum!");
    }

    println!();
    Ok(())
}

pub async fn cmd_focus(db: &Database) -> Result<()> {
    let settings = db.load_settings()?;

    let provider = StaticProvider::new();
    let data = provider
        .fetch_dashboard(settings.business_unit, settings.time_period)
        .await?;
    let insights = analyze(&data.metrics);

    println!("{}", top_focus(&insights, &data.metrics));
    Ok(())
}
