use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::domain::ProjectId;
use super::report::RunMode;
use super::repository::{RecordSink, RecordSource, RecordSourceError};
use super::service::{PromotionService, PromotionServiceError};

/// Router exposing the webhook that triggers a promotion run for a project.
pub fn promotion_router<S, K>(service: Arc<PromotionService<S, K>>) -> Router
where
    S: RecordSource + 'static,
    K: RecordSink + 'static,
{
    Router::new()
        .route(
            "/webhook/projects/:project_id",
            get(apply_handler::<S, K>).post(apply_handler::<S, K>),
        )
        .route(
            "/webhook/projects/:project_id/dry-run",
            get(dry_run_handler::<S, K>),
        )
        .with_state(service)
}

pub(crate) async fn apply_handler<S, K>(
    State(service): State<Arc<PromotionService<S, K>>>,
    Path(project_id): Path<String>,
) -> Response
where
    S: RecordSource + 'static,
    K: RecordSink + 'static,
{
    run(&service, ProjectId(project_id), RunMode::Apply)
}

pub(crate) async fn dry_run_handler<S, K>(
    State(service): State<Arc<PromotionService<S, K>>>,
    Path(project_id): Path<String>,
) -> Response
where
    S: RecordSource + 'static,
    K: RecordSink + 'static,
{
    run(&service, ProjectId(project_id), RunMode::DryRun)
}

fn run<S, K>(service: &PromotionService<S, K>, project_id: ProjectId, mode: RunMode) -> Response
where
    S: RecordSource + 'static,
    K: RecordSink + 'static,
{
    match service.run(&project_id, mode) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(PromotionServiceError::Source(RecordSourceError::NotFound(_))) => {
            let payload = json!({
                "status": "error",
                "project_id": project_id,
                "error": "project not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "status": "error",
                "project_id": project_id,
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
