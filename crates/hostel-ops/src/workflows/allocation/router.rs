use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde_json::json;

use super::engine::AllocationEngine;
use super::repository::DirectoryStore;

/// Router builder exposing the run trigger and the occupancy report.
/// Authentication is the enclosing deployment's concern.
pub fn allocation_router<R>(engine: Arc<AllocationEngine<R>>) -> Router
where
    R: DirectoryStore + 'static,
{
    Router::new()
        .route("/api/v1/allocation/run", post(run_handler::<R>))
        .route("/api/v1/allocation/report", get(report_handler::<R>))
        .with_state(engine)
}

pub(crate) async fn run_handler<R>(State(engine): State<Arc<AllocationEngine<R>>>) -> Response
where
    R: DirectoryStore + 'static,
{
    match engine.run(Utc::now()) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn report_handler<R>(State(engine): State<Arc<AllocationEngine<R>>>) -> Response
where
    R: DirectoryStore + 'static,
{
    match engine.occupancy_report() {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}
