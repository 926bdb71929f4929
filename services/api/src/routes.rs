use crate::decisions::{DecisionReport, DecisionRequest};
use crate::infra::{AppState, DecisionService};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use serde_json::json;
use std::sync::Arc;
use upgrade_engine::decision::{LanguageProfile, QualityProfile};
use upgrade_engine::error::AppError;

/// Profile management and decision endpoints.
pub(crate) fn decision_router(service: Arc<DecisionService>) -> Router {
    Router::new()
        .route(
            "/api/v1/profiles/quality/:id",
            put(put_quality_profile).delete(delete_quality_profile),
        )
        .route(
            "/api/v1/profiles/language/:id",
            put(put_language_profile),
        )
        .route("/api/v1/decisions", post(decision_endpoint))
        .with_state(service)
}

pub(crate) fn with_decision_routes(service: Arc<DecisionService>) -> Router {
    decision_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn put_quality_profile(
    State(service): State<Arc<DecisionService>>,
    Path(id): Path<u32>,
    Json(mut profile): Json<QualityProfile>,
) -> Result<impl IntoResponse, AppError> {
    profile.id = id;
    let created = service.profiles.upsert_quality(profile.clone())?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(profile)))
}

pub(crate) async fn delete_quality_profile(
    State(service): State<Arc<DecisionService>>,
    Path(id): Path<u32>,
) -> Result<StatusCode, AppError> {
    service.profiles.delete_quality(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn put_language_profile(
    State(service): State<Arc<DecisionService>>,
    Path(id): Path<u32>,
    Json(mut profile): Json<LanguageProfile>,
) -> Result<impl IntoResponse, AppError> {
    profile.id = id;
    let created = service.profiles.upsert_language(profile.clone())?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(profile)))
}

pub(crate) async fn decision_endpoint(
    State(service): State<Arc<DecisionService>>,
    Json(request): Json<DecisionRequest>,
) -> Result<Json<DecisionReport>, AppError> {
    let report = service.decide(&request)?;
    tracing::debug!(
        quality_profile_id = request.quality_profile_id,
        accepted = report.accepted(),
        "evaluated candidate"
    );
    Ok(Json(report))
}
