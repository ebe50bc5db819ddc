//! Pulse Web Server
//!
//! Axum-based REST API for the Pulse executive KPI dashboard.
//!
//! The server owns one [`DashboardState`] behind an async RwLock; reads
//! share it, state transitions take the write half and persist the settings
//! subset after every change. There is no authentication layer: Pulse is an
//! internal dashboard meant to sit behind the network boundary.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

use pulse_core::{DashboardState, Database, MetricsProvider};

mod handlers;

/// Shared application state
pub struct AppState {
    /// The single dashboard state the API serves and mutates
    pub state: RwLock<DashboardState>,
    /// Provider handle for stateless override queries (?unit=&period=)
    pub provider: Arc<dyn MetricsProvider>,
    /// Settings store
    pub db: Database,
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
pub async fn create_router(
    db: Database,
    provider: Arc<dyn MetricsProvider>,
) -> pulse_core::Result<Router> {
    let settings = db.load_settings()?;
    let state = DashboardState::new(provider.clone(), settings).await?;

    let shared = Arc::new(AppState {
        state: RwLock::new(state),
        provider,
        db,
    });

    let api_routes = Router::new()
        // Health
        .route("/health", get(handlers::health))
        // Dashboard
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/briefing", get(handlers::get_briefing))
        // Metrics
        .route("/metrics", get(handlers::list_metrics))
        .route("/metrics/:id", get(handlers::get_metric))
        .route("/metrics/:id/drilldown", get(handlers::get_drilldown))
        .route("/metrics/:id/comparison", get(handlers::get_comparison))
        // Settings
        .route(
            "/settings",
            get(handlers::get_settings).put(handlers::update_settings),
        )
        // State transitions
        .route("/state", get(handlers::get_state))
        .route("/state/business-unit", post(handlers::set_business_unit))
        .route("/state/time-period", post(handlers::set_time_period))
        .route(
            "/state/comparison/toggle",
            post(handlers::toggle_comparison),
        )
        .route(
            "/state/drilldown",
            post(handlers::open_drilldown).delete(handlers::close_drilldown),
        )
        .route("/state/refresh", post(handlers::refresh_state))
        // Command palette
        .route("/commands", get(handlers::list_commands))
        .route("/commands/:id", post(handlers::run_command));

    // Restrictive default: same-origin only
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let app = Router::new()
        .nest("/api", api_routes)
        .with_state(shared)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    Ok(app)
}

/// Start the server
pub async fn serve(
    db: Database,
    provider: Arc<dyn MetricsProvider>,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    let app = create_router(db, provider).await?;
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
