mod common;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use chrono::{Datelike, Local};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use windcast::application::ml::StandardScaler;
use windcast::application::prediction::PredictionService;
use windcast::infrastructure::observability::Metrics;
use windcast::interfaces::http::{AppState, router};

use common::{PanickingModel, SpeedModel, reference_payload, service_with, speed_service};

fn app_with(service: PredictionService, metrics: Option<Metrics>) -> Router {
    router(Arc::new(AppState::new(service, metrics)))
}

fn app() -> Router {
    app_with(speed_service(), Some(Metrics::new().unwrap()))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_predict(payload: &Value, request_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json");
    if let Some(id) = request_id {
        builder = builder.header("x-request-id", id);
    }
    builder.body(Body::from(payload.to_string())).unwrap()
}

#[tokio::test]
async fn test_reference_observation_end_to_end() {
    let (status, body) = send(app(), post_predict(&reference_payload(), Some("turbine-42"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"]["normalized_output"], 0.4);
    assert_eq!(body["prediction"]["power_output_mw"], 40.0);
    assert_eq!(body["prediction"]["production_level"], "Medium");

    let summary = &body["input_summary"];
    assert_eq!(summary["timestamp"], "2023-06-15 12:00:00");
    assert_eq!(summary["wind_speed_10m"], 5.0);
    assert_eq!(summary["wind_speed_100m"], 10.0);
    assert_eq!(summary["wind_direction_10m"], 216.87);
    assert_eq!(summary["wind_direction_100m"], 216.87);

    assert_eq!(body["meta"]["model_version"], "1.0");
    assert_eq!(body["meta"]["request_id"], "turbine-42");
    assert!(body["meta"]["timestamp"].as_str().unwrap().contains('T'));
}

#[tokio::test]
async fn test_request_id_defaults_to_not_provided() {
    let (status, body) = send(app(), post_predict(&reference_payload(), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["request_id"], "not-provided");
}

#[tokio::test]
async fn test_production_levels_follow_wind() {
    // 100 m speed 3 → 0.12, 25 → 1.0
    let mut calm = reference_payload();
    calm["u100"] = json!(0);
    calm["v100"] = json!(3);
    let (_, body) = send(app(), post_predict(&calm, None)).await;
    assert_eq!(body["prediction"]["production_level"], "Low");
    assert_eq!(body["prediction"]["power_output_mw"], 12.0);

    let mut storm = reference_payload();
    storm["u100"] = json!(-15);
    storm["v100"] = json!(-20);
    let (_, body) = send(app(), post_predict(&storm, None)).await;
    assert_eq!(body["prediction"]["production_level"], "High");
    assert_eq!(body["prediction"]["normalized_output"], 1.0);
    assert_eq!(body["prediction"]["power_output_mw"], 100.0);
}

#[tokio::test]
async fn test_missing_field_is_bad_request() {
    let mut payload = reference_payload();
    payload.as_object_mut().unwrap().remove("hour");

    let (status, body) = send(app(), post_predict(&payload, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing required field: hour"}));
}

#[tokio::test]
async fn test_non_numeric_wind_is_bad_request() {
    let mut payload = reference_payload();
    payload["u10"] = json!("three");

    let (status, body) = send(app(), post_predict(&payload, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Field u10 must be numeric");
}

#[tokio::test]
async fn test_out_of_range_fields_are_bad_requests() {
    let next_year = Local::now().year() + 1;
    let cases = [
        ("hour", json!(24), "Hour must be between 0 and 23".to_string()),
        ("day", json!(0), "Day must be between 1 and 31".to_string()),
        ("month", json!(13), "Month must be between 1 and 12".to_string()),
        (
            "year",
            json!(1899),
            format!("Year must be between 1900 and {}", next_year - 1),
        ),
        (
            "year",
            json!(next_year),
            format!("Year must be between 1900 and {}", next_year - 1),
        ),
    ];

    for (field, value, message) in cases {
        let mut payload = reference_payload();
        payload[field] = value;
        let (status, body) = send(app(), post_predict(&payload, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{field}");
        assert_eq!(body["error"], message.as_str());
    }
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(Body::from("{\"u10\": 3,"))
        .unwrap();

    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid data format: ")
    );
}

#[tokio::test]
async fn test_scaler_layout_mismatch_is_internal_error() {
    let mut names = common::feature_names();
    names.swap(0, 1);
    let scaler = StandardScaler::new(names, vec![0.0; 10], vec![1.0; 10]).unwrap();
    let app = app_with(service_with(scaler, Box::new(SpeedModel)), None);

    let (status, body) = send(app, post_predict(&reference_payload(), None)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to process prediction request");
    assert!(body["message"].as_str().unwrap().contains("order mismatch"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_model_panic_is_internal_error() {
    let app = app_with(
        service_with(common::speed_scaler(), Box::new(PanickingModel)),
        None,
    );

    let (status, body) = send(app, post_predict(&reference_payload(), None)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to process prediction request");
    assert_eq!(body["message"], "corrupt tree");
}

#[tokio::test]
async fn test_health_reports_loaded_artifacts() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["scaler_loaded"], true);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_metrics_count_outcomes() {
    let app = app();

    let _ = send(app.clone(), post_predict(&reference_payload(), None)).await;
    let mut invalid = reference_payload();
    invalid["month"] = json!(0);
    let _ = send(app.clone(), post_predict(&invalid, None)).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();

    assert!(text.contains("windcast_predictions_total{outcome=\"success\"} 1"));
    assert!(text.contains("windcast_predictions_total{outcome=\"invalid\"} 1"));
    assert!(text.contains("windcast_production_level_total{level=\"Medium\"} 1"));
    assert!(text.contains("windcast_last_power_output_mw 40"));
}

#[tokio::test]
async fn test_metrics_disabled_is_not_found() {
    let app = app_with(speed_service(), None);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
