//! Command palette handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use pulse_core::{Command, CommandDescriptor};

use super::state::StateView;

/// Query parameters for listing commands
#[derive(Debug, Deserialize)]
pub struct CommandQuery {
    /// Case-insensitive label filter
    pub q: Option<String>,
}

/// GET /api/commands - the palette, optionally filtered
pub async fn list_commands(
    Query(params): Query<CommandQuery>,
) -> Json<Vec<CommandDescriptor>> {
    let commands = match params.q.as_deref() {
        Some(query) => Command::search(query),
        None => Command::all(),
    };

    Json(commands.iter().map(Command::descriptor).collect())
}

/// POST /api/commands/:id - execute a palette command
pub async fn run_command(
    State(app): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StateView>, AppError> {
    let command =
        Command::find(&id).ok_or_else(|| AppError::not_found("Unknown command"))?;

    let mut state = app.state.write().await;
    command.apply(&mut state).await?;
    app.db.save_settings(&state.settings())?;

    Ok(Json(StateView::from_state(&state)))
}
