//! Metric table and drilldown command implementations

use anyhow::Result;
use pulse_core::{
    BreakdownRow, Database, Metric, MetricsProvider, MetricStatus, StaticProvider,
};

use super::{resolve_selection, truncate};

fn status_cell(metric: &Metric) -> &'static str {
    match metric.status {
        Some(MetricStatus::Success) => "ok",
        Some(MetricStatus::Warning) => "warn",
        Some(MetricStatus::Danger) => "DANGER",
        None => "-",
    }
}

fn goal_cell(metric: &Metric) -> String {
    match metric.goal.as_ref().and_then(|g| g.progress()) {
        Some(progress) => format!("{}%", progress.round()),
        None => "-".to_string(),
    }
}

pub async fn cmd_metrics(
    db: &Database,
    unit: Option<&str>,
    period: Option<&str>,
    json: bool,
) -> Result<()> {
    let settings = db.load_settings()?;
    let (unit, period) = resolve_selection(&settings, unit, period)?;

    let provider = StaticProvider::new();
    let data = provider.fetch_dashboard(unit, period).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&data.metrics)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} · {} · {} metrics",
        unit.display_name(),
        period.headline_label(),
        data.metrics.len()
    );
    println!();
    println!(
        "  {:<24} {:<22} {:>12} {:>9} {:>8} {:>6}",
        "ID", "METRIC", "VALUE", "CHANGE", "STATUS", "GOAL"
    );
    println!("  {}", "─".repeat(86));

    for metric in &data.metrics {
        println!(
            "  {:<24} {:<22} {:>12} {:>9} {:>8} {:>6}",
            truncate(&metric.id, 24),
            truncate(&metric.label, 22),
            metric.format.format(metric.value, true),
            metric.change_formatted.as_deref().unwrap_or("-"),
            status_cell(metric),
            goal_cell(metric),
        );
    }

    println!();
    Ok(())
}

fn print_breakdown_row(row: &BreakdownRow) {
    let change = row
        .change
        .map(|c| format!("{:+.1}%", c))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "     {:<28} {:>12.1} {:>7.1}% {:>8}",
        truncate(&row.label, 28),
        row.value,
        row.percentage,
        change
    );
}

pub async fn cmd_drilldown(db: &Database, metric_id: &str) -> Result<()> {
    let settings = db.load_settings()?;

    let provider = StaticProvider::new();
    let data = provider
        .fetch_dashboard(settings.business_unit, settings.time_period)
        .await?;

    let Some(drilldown) = data.drilldowns.get(metric_id) else {
        anyhow::bail!(
            "No drilldown for metric '{}'. Available: {}",
            metric_id,
            data.drilldowns
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );
    };

    println!();
    println!("  📊 {} drilldown", drilldown.metric_label);
    println!();

    if let Some(by_product) = &drilldown.by_product {
        println!("  By product");
        for product in by_product {
            print_breakdown_row(&product.row);
        }
        println!();
    }

    if let Some(by_channel) = &drilldown.by_channel {
        println!("  By channel");
        for channel in by_channel {
            print_breakdown_row(&channel.row);
        }
        println!();
    }

    if let Some(by_time) = &drilldown.by_time {
        println!("  By time");
        for bucket in by_time {
            print_breakdown_row(&bucket.row);
        }
        println!();
    }

    Ok(())
}
