use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::safety::domain::{BinderType, SurgeryType};
use crate::safety::router::{safety_router, user_evaluation_handler, AsOfQuery};
use crate::safety::service::SafetyEvaluationService;

fn router_with_profiles(profiles: Vec<crate::safety::SafetyProfile>) -> axum::Router {
    safety_router(Arc::new(build_service(profiles)))
}

#[tokio::test]
async fn evaluate_route_returns_camel_case_result() {
    let router = router_with_profiles(Vec::new());
    let body = json!({
        "profile": {
            "userId": "user-9",
            "surgeries": [{ "type": "topSurgery", "date": "2025-06-09" }],
            "surgeonCleared": true
        },
        "asOf": "2025-06-30"
    });

    let response = router
        .oneshot(
            Request::post("/api/v1/safety/evaluate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["activeSurgeries"][0]["type"], "topSurgery");
    assert_eq!(payload["activeSurgeries"][0]["weeksPostOp"], 3);
    assert_eq!(payload["criticalBlocks"][0]["patterns"][0], "push");
    assert!(payload["excludedExercises"]
        .as_array()
        .expect("excluded list")
        .iter()
        .any(|value| value == "bench-press"));
    assert_eq!(payload["rulesApplied"][0]["ruleId"], "top_surgery_early_block");
}

#[tokio::test]
async fn evaluate_route_uses_supplied_exercises() {
    let router = router_with_profiles(Vec::new());
    let body = json!({
        "profile": { "bindsChest": true, "bindingDurationHours": 3, "binderType": "aceBandage" },
        "exercises": [
            { "id": "push-up", "pattern": "push", "muscleGroups": ["pectorals"], "binderAware": true }
        ],
        "asOf": "2025-06-30"
    });

    let response = router
        .oneshot(
            Request::post("/api/v1/safety/evaluate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["modifiedParameters"]["maxWorkoutMinutes"], 30);
    assert_eq!(payload["excludedExercises"], json!(["push-up"]));
}

#[tokio::test]
async fn malformed_as_of_is_a_bad_request() {
    let router = router_with_profiles(Vec::new());
    let body = json!({ "profile": {}, "asOf": "last tuesday" });

    let response = router
        .oneshot(
            Request::post("/api/v1/safety/evaluate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("last tuesday"));
}

#[tokio::test]
async fn user_evaluation_route_reads_the_profile_store() {
    let mut stored = post_op_profile(vec![surgery(
        SurgeryType::TopSurgery,
        Some(weeks_ago(8)),
        false,
    )]);
    stored.binder_type = Some(BinderType::Commercial);
    let router = router_with_profiles(vec![stored]);

    let response = router
        .oneshot(
            Request::get("/api/v1/safety/users/user-1/evaluation?as_of=2025-06-30")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["modifiedParameters"]["maxSets"], 2);
    assert_eq!(payload["modifiedParameters"]["maxWeight"], "light (5-15 lbs)");
    assert!(payload["criticalBlocks"].as_array().expect("blocks").is_empty());
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let service = Arc::new(build_service(Vec::new()));

    let response = user_evaluation_handler(
        State(service),
        Path("ghost".to_string()),
        Query(AsOfQuery::default()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn catalog_outage_is_service_unavailable() {
    let service = Arc::new(SafetyEvaluationService::new(
        Arc::new(MemoryProfiles::with(vec![profile()])),
        Arc::new(UnavailableCatalog),
        engine(),
    ));

    let response = user_evaluation_handler(
        State(service),
        Path("user-1".to_string()),
        Query(AsOfQuery::default()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn rules_route_lists_the_registry() {
    let router = router_with_profiles(Vec::new());

    let response = router
        .oneshot(Request::get("/api/v1/safety/rules").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let count = payload["count"].as_u64().expect("count");
    assert_eq!(count, engine().registry().len() as u64);
    assert_eq!(payload["rules"][0]["id"], "binding_break_reminder");
    assert_eq!(payload["rules"][0]["categoryLabel"], "Binding Safety");
}
