//! Dashboard and briefing handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};
use pulse_core::{analyze, build_briefing, overall_status, top_focus};
use pulse_core::{Briefing, DashboardData, Insight, OverallStatus};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Full dashboard payload: data plus the derived briefing
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub data: DashboardData,
    pub briefing: Briefing,
    pub comparison_mode: bool,
}

/// Briefing detail: the full ranked insight list
#[derive(Debug, Serialize)]
pub struct BriefingDetail {
    pub status: OverallStatus,
    pub focus: String,
    pub insights: Vec<Insight>,
}

/// GET /api/health - liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/dashboard - everything the dashboard page needs in one call
pub async fn get_dashboard(
    State(app): State<Arc<AppState>>,
) -> Result<Json<DashboardResponse>, AppError> {
    let state = app.state.read().await;
    let data = state.data().clone();
    let briefing = build_briefing(state.business_unit(), state.time_period(), &data.metrics);

    Ok(Json(DashboardResponse {
        data,
        briefing,
        comparison_mode: state.comparison_mode(),
    }))
}

/// GET /api/briefing - ranked insights, top focus, and overall status
pub async fn get_briefing(
    State(app): State<Arc<AppState>>,
) -> Result<Json<BriefingDetail>, AppError> {
    let state = app.state.read().await;
    let insights = analyze(state.metrics());

    Ok(Json(BriefingDetail {
        status: overall_status(&insights),
        focus: top_focus(&insights, state.metrics()),
        insights,
    }))
}
