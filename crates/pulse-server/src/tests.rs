//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use pulse_core::{Database, StaticProvider};
use tower::ServiceExt;

async fn setup_test_app() -> Router {
    let db = Database::in_memory().unwrap();
    create_router(db, Arc::new(StaticProvider::new()))
        .await
        .unwrap()
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let app = setup_test_app().await;

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
}

// ========== Dashboard ==========

#[tokio::test]
async fn test_get_dashboard() {
    let app = setup_test_app().await;

    let response = app.oneshot(get("/api/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["data"]["business_unit"], "wellbefore");
    assert_eq!(json["data"]["time_period"], "mtd");
    assert!(!json["data"]["metrics"].as_array().unwrap().is_empty());
    assert!(json["briefing"]["focus"].as_str().is_some());
    assert!(json["briefing"]["status"].as_str().is_some());
    assert_eq!(json["comparison_mode"], false);
}

#[tokio::test]
async fn test_get_briefing() {
    let app = setup_test_app().await;

    let response = app.oneshot(get("/api/briefing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let insights = json["insights"].as_array().unwrap();

    // The static WellBefore snapshot always carries the EBITDA warning
    assert!(insights.iter().any(|i| {
        i["metric_id"] == "wb-ebitda" && i["kind"] == "warning"
    }));

    // Sorted by priority descending
    let priorities: Vec<i64> = insights
        .iter()
        .map(|i| i["priority"].as_i64().unwrap())
        .collect();
    let mut sorted = priorities.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(priorities, sorted);
}

// ========== Metrics ==========

#[tokio::test]
async fn test_list_metrics() {
    let app = setup_test_app().await;

    let response = app.oneshot(get("/api/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let metrics = json.as_array().unwrap();
    assert_eq!(metrics.len(), 8);
}

#[tokio::test]
async fn test_list_metrics_with_unit_override() {
    let app = setup_test_app().await;

    let response = app
        .oneshot(get("/api/metrics?unit=d2c-builders"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let metrics = json.as_array().unwrap();
    assert_eq!(metrics.len(), 6);
    assert!(metrics.iter().any(|m| m["id"] == "d2c-perfect-order"));
}

#[tokio::test]
async fn test_override_does_not_mutate_state() {
    let app = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(get("/api/metrics?unit=d2c-builders"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/state")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["business_unit"], "wellbefore");
}

#[tokio::test]
async fn test_get_metric() {
    let app = setup_test_app().await;

    let response = app.oneshot(get("/api/metrics/wb-revenue")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["label"], "Revenue");
    assert_eq!(json["format"], "currency");
}

#[tokio::test]
async fn test_get_metric_not_found() {
    let app = setup_test_app().await;

    let response = app.oneshot(get("/api/metrics/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_drilldown() {
    let app = setup_test_app().await;

    let response = app
        .oneshot(get("/api/metrics/wb-revenue/drilldown"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["metric_label"], "Revenue");
    assert_eq!(json["by_channel"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_get_drilldown_not_found() {
    let app = setup_test_app().await;

    // Metric exists but has no drilldown data
    let response = app
        .oneshot(get("/api/metrics/wb-cac/drilldown"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_comparison() {
    let app = setup_test_app().await;

    let response = app
        .oneshot(get("/api/metrics/wb-revenue/comparison"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["current"]["data"].as_array().unwrap().len(), 5);
    assert_eq!(json["previous"]["label"], "Last Month");
}

// ========== Settings ==========

#[tokio::test]
async fn test_get_settings_defaults() {
    let app = setup_test_app().await;

    let response = app.oneshot(get("/api/settings")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["business_unit"], "wellbefore");
    assert_eq!(json["time_period"], "mtd");
    assert_eq!(json["comparison_mode"], false);
}

#[tokio::test]
async fn test_update_settings() {
    let app = setup_test_app().await;

    let body = serde_json::json!({
        "business_unit": "d2c-builders",
        "time_period": "ytd",
        "comparison_mode": true
    });
    let request = Request::builder()
        .method("PUT")
        .uri("/api/settings")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The state followed the settings
    let response = app.oneshot(get("/api/state")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["business_unit"], "d2c-builders");
    assert_eq!(json["time_period"], "ytd");
    assert_eq!(json["comparison_mode"], true);
}

// ========== State transitions ==========

#[tokio::test]
async fn test_set_business_unit() {
    let app = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/state/business-unit",
            serde_json::json!({"unit": "d2c-builders"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["business_unit"], "d2c-builders");

    // Metric list switched too
    let response = app.oneshot(get("/api/metrics")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_set_time_period() {
    let app = setup_test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/state/time-period",
            serde_json::json!({"period": "qtd"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["time_period"], "qtd");
}

#[tokio::test]
async fn test_toggle_comparison() {
    let app = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/state/comparison/toggle",
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["comparison_mode"], true);

    // Persisted, not just in memory
    let response = app.oneshot(get("/api/settings")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["comparison_mode"], true);
}

#[tokio::test]
async fn test_drilldown_open_close() {
    let app = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/state/drilldown",
            serde_json::json!({"metric_id": "wb-revenue"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["drilldown_open"], true);
    assert_eq!(json["selected_metric_id"], "wb-revenue");

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/state/drilldown")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/state")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["drilldown_open"], false);
}

#[tokio::test]
async fn test_drilldown_unknown_metric() {
    let app = setup_test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/state/drilldown",
            serde_json::json!({"metric_id": "nope"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_refresh() {
    let app = setup_test_app().await;

    let response = app
        .oneshot(post_json("/api/state/refresh", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ========== Command palette ==========

#[tokio::test]
async fn test_list_commands() {
    let app = setup_test_app().await;

    let response = app.oneshot(get("/api/commands")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let commands = json.as_array().unwrap();
    assert_eq!(commands.len(), 9);
    assert!(commands.iter().any(|c| c["id"] == "refresh"));
}

#[tokio::test]
async fn test_search_commands() {
    let app = setup_test_app().await;

    let response = app.oneshot(get("/api/commands?q=view")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_run_command() {
    let app = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/commands/unit:d2c-builders",
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["business_unit"], "d2c-builders");

    // Command transitions persist like direct ones
    let response = app.oneshot(get("/api/settings")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["business_unit"], "d2c-builders");
}

#[tokio::test]
async fn test_run_unknown_command() {
    let app = setup_test_app().await;

    let response = app
        .oneshot(post_json("/api/commands/nope", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
