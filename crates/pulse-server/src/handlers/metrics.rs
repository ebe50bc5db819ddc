//! Metric handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use pulse_core::{BusinessUnit, ComparisonData, Metric, MetricDrilldown, TimePeriod};

/// Query parameters for listing metrics
#[derive(Debug, Deserialize)]
pub struct MetricQuery {
    /// Override the current business unit
    pub unit: Option<BusinessUnit>,
    /// Override the current time period
    pub period: Option<TimePeriod>,
}

/// GET /api/metrics - metric list for the current (or overridden) selection
///
/// Overrides are read-only: they fetch from the provider without touching
/// the shared state.
pub async fn list_metrics(
    State(app): State<Arc<AppState>>,
    Query(params): Query<MetricQuery>,
) -> Result<Json<Vec<Metric>>, AppError> {
    let state = app.state.read().await;

    if params.unit.is_none() && params.period.is_none() {
        return Ok(Json(state.metrics().to_vec()));
    }

    let unit = params.unit.unwrap_or_else(|| state.business_unit());
    let period = params.period.unwrap_or_else(|| state.time_period());
    drop(state);

    let data = app.provider.fetch_dashboard(unit, period).await?;
    Ok(Json(data.metrics))
}

/// GET /api/metrics/:id - a single metric from the current snapshot
pub async fn get_metric(
    State(app): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Metric>, AppError> {
    let state = app.state.read().await;
    let metric = state
        .metric(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found("Metric not found"))?;

    Ok(Json(metric))
}

/// GET /api/metrics/:id/drilldown - breakdown detail for a metric
pub async fn get_drilldown(
    State(app): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MetricDrilldown>, AppError> {
    let state = app.state.read().await;
    let drilldown = state
        .drilldown(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found("No drilldown for metric"))?;

    Ok(Json(drilldown))
}

/// GET /api/metrics/:id/comparison - current vs. previous period series
pub async fn get_comparison(
    State(app): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ComparisonData>, AppError> {
    let state = app.state.read().await;
    let comparison = state
        .comparison(&id)
        .await?
        .ok_or_else(|| AppError::not_found("No comparison data for metric"))?;

    Ok(Json(comparison))
}
