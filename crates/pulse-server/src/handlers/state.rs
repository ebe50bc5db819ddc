//! State transition handlers
//!
//! Every transition that touches the persisted subset saves the settings
//! before responding, so a restart comes back where the user left off.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, SuccessResponse};
use pulse_core::{BusinessUnit, DashboardState, Error, TimePeriod};

/// Serializable snapshot of the dashboard state
#[derive(Debug, Serialize)]
pub struct StateView {
    pub business_unit: BusinessUnit,
    pub time_period: TimePeriod,
    pub comparison_mode: bool,
    pub selected_metric_id: Option<String>,
    pub drilldown_open: bool,
    pub command_bar_open: bool,
    pub last_updated: DateTime<Utc>,
}

impl StateView {
    pub(crate) fn from_state(state: &DashboardState) -> Self {
        Self {
            business_unit: state.business_unit(),
            time_period: state.time_period(),
            comparison_mode: state.comparison_mode(),
            selected_metric_id: state.selected_metric_id().map(str::to_string),
            drilldown_open: state.drilldown_open(),
            command_bar_open: state.command_bar_open(),
            last_updated: state.last_updated(),
        }
    }
}

/// Request body for switching business unit
#[derive(Debug, Deserialize)]
pub struct SetUnitRequest {
    pub unit: BusinessUnit,
}

/// Request body for switching time period
#[derive(Debug, Deserialize)]
pub struct SetPeriodRequest {
    pub period: TimePeriod,
}

/// Request body for opening a drilldown
#[derive(Debug, Deserialize)]
pub struct OpenDrilldownRequest {
    pub metric_id: String,
}

/// GET /api/state - current state snapshot
pub async fn get_state(State(app): State<Arc<AppState>>) -> Result<Json<StateView>, AppError> {
    let state = app.state.read().await;
    Ok(Json(StateView::from_state(&state)))
}

/// POST /api/state/business-unit - switch unit, refetch, persist
pub async fn set_business_unit(
    State(app): State<Arc<AppState>>,
    Json(body): Json<SetUnitRequest>,
) -> Result<Json<StateView>, AppError> {
    let mut state = app.state.write().await;
    state.set_business_unit(body.unit).await?;
    app.db.save_settings(&state.settings())?;

    Ok(Json(StateView::from_state(&state)))
}

/// POST /api/state/time-period - switch period, refetch, persist
pub async fn set_time_period(
    State(app): State<Arc<AppState>>,
    Json(body): Json<SetPeriodRequest>,
) -> Result<Json<StateView>, AppError> {
    let mut state = app.state.write().await;
    state.set_time_period(body.period).await?;
    app.db.save_settings(&state.settings())?;

    Ok(Json(StateView::from_state(&state)))
}

/// POST /api/state/comparison/toggle - flip comparison mode, persist
pub async fn toggle_comparison(
    State(app): State<Arc<AppState>>,
) -> Result<Json<StateView>, AppError> {
    let mut state = app.state.write().await;
    state.toggle_comparison_mode();
    app.db.save_settings(&state.settings())?;

    Ok(Json(StateView::from_state(&state)))
}

/// POST /api/state/drilldown - open the drilldown panel for a metric
pub async fn open_drilldown(
    State(app): State<Arc<AppState>>,
    Json(body): Json<OpenDrilldownRequest>,
) -> Result<Json<StateView>, AppError> {
    let mut state = app.state.write().await;
    match state.open_drilldown(&body.metric_id) {
        Ok(()) => Ok(Json(StateView::from_state(&state))),
        Err(Error::UnknownMetric(_)) => Err(AppError::not_found("Metric not found")),
        Err(e) => Err(e.into()),
    }
}

/// DELETE /api/state/drilldown - close the drilldown panel
pub async fn close_drilldown(
    State(app): State<Arc<AppState>>,
) -> Result<Json<SuccessResponse>, AppError> {
    let mut state = app.state.write().await;
    state.close_drilldown();

    Ok(Json(SuccessResponse { success: true }))
}

/// POST /api/state/refresh - refetch the current snapshot
pub async fn refresh_state(
    State(app): State<Arc<AppState>>,
) -> Result<Json<StateView>, AppError> {
    let mut state = app.state.write().await;
    state.refresh().await?;

    Ok(Json(StateView::from_state(&state)))
}
