//! Settings handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{AppError, AppState};
use pulse_core::DashboardSettings;

/// GET /api/settings - the persisted settings subset
pub async fn get_settings(
    State(app): State<Arc<AppState>>,
) -> Result<Json<DashboardSettings>, AppError> {
    let settings = app.db.load_settings()?;
    Ok(Json(settings))
}

/// PUT /api/settings - replace the persisted settings and apply them
pub async fn update_settings(
    State(app): State<Arc<AppState>>,
    Json(body): Json<DashboardSettings>,
) -> Result<Json<DashboardSettings>, AppError> {
    let mut state = app.state.write().await;

    if state.business_unit() != body.business_unit {
        state.set_business_unit(body.business_unit).await?;
    }
    if state.time_period() != body.time_period {
        state.set_time_period(body.time_period).await?;
    }
    if state.comparison_mode() != body.comparison_mode {
        state.toggle_comparison_mode();
    }

    app.db.save_settings(&state.settings())?;
    Ok(Json(state.settings()))
}
