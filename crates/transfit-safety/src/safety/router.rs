use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{Exercise, SafetyProfile, UserId};
use super::repository::{ExerciseCatalog, ProfileStore};
use super::rules::{RuleCategory, Severity};
use super::service::{SafetyEvaluationService, SafetyServiceError};
use super::temporal::EventDate;

/// Body of `POST /api/v1/safety/evaluate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub profile: SafetyProfile,
    #[serde(default)]
    pub exercises: Option<Vec<Exercise>>,
    #[serde(default)]
    pub as_of: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AsOfQuery {
    #[serde(default)]
    as_of: Option<String>,
}

/// Registry entry as exposed over HTTP.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleView {
    pub id: &'static str,
    pub category: RuleCategory,
    pub category_label: &'static str,
    pub severity: Severity,
    pub message: &'static str,
}

/// Router builder exposing the evaluation endpoints.
pub fn safety_router<P, C>(service: Arc<SafetyEvaluationService<P, C>>) -> Router
where
    P: ProfileStore + 'static,
    C: ExerciseCatalog + 'static,
{
    Router::new()
        .route("/api/v1/safety/evaluate", post(evaluate_handler::<P, C>))
        .route(
            "/api/v1/safety/users/:user_id/evaluation",
            get(user_evaluation_handler::<P, C>),
        )
        .route("/api/v1/safety/rules", get(rules_handler::<P, C>))
        .with_state(service)
}

/// Resolve the evaluation date. The clock is read here, never inside the engine.
pub fn resolve_as_of(raw: Option<&str>) -> Result<NaiveDate, String> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(Utc::now().date_naive()),
        Some(value) => EventDate::new(value)
            .parse()
            .ok_or_else(|| format!("failed to parse '{value}' as YYYY-MM-DD or RFC 3339")),
    }
}

fn bad_request(message: String) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

fn service_error(error: SafetyServiceError) -> Response {
    let status = match &error {
        SafetyServiceError::ProfileNotFound(_) => StatusCode::NOT_FOUND,
        SafetyServiceError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn evaluate_handler<P, C>(
    State(service): State<Arc<SafetyEvaluationService<P, C>>>,
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Response
where
    P: ProfileStore + 'static,
    C: ExerciseCatalog + 'static,
{
    let now = match resolve_as_of(request.as_of.as_deref()) {
        Ok(now) => now,
        Err(message) => return bad_request(message),
    };

    match service.evaluate_profile(&request.profile, request.exercises, now) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn user_evaluation_handler<P, C>(
    State(service): State<Arc<SafetyEvaluationService<P, C>>>,
    Path(user_id): Path<String>,
    Query(query): Query<AsOfQuery>,
) -> Response
where
    P: ProfileStore + 'static,
    C: ExerciseCatalog + 'static,
{
    let now = match resolve_as_of(query.as_of.as_deref()) {
        Ok(now) => now,
        Err(message) => return bad_request(message),
    };

    match service.evaluate_user(&UserId(user_id), now) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn rules_handler<P, C>(
    State(service): State<Arc<SafetyEvaluationService<P, C>>>,
) -> Response
where
    P: ProfileStore + 'static,
    C: ExerciseCatalog + 'static,
{
    let rules: Vec<RuleView> = service
        .engine()
        .registry()
        .rules()
        .iter()
        .map(|rule| RuleView {
            id: rule.id,
            category: rule.category,
            category_label: rule.category.label(),
            severity: rule.severity,
            message: rule.message,
        })
        .collect();

    let payload = json!({ "count": rules.len(), "rules": rules });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
