use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::workflows::allocation::domain::HostelId;
use crate::workflows::allocation::repository::DirectoryStore;

use super::domain::{ComplaintId, ComplaintStatus, ComplaintSubmission};
use super::repository::{ComplaintRepository, ComplaintRepositoryError};
use super::service::{ComplaintError, ComplaintService};

/// Router builder for the ticketing endpoints.
pub fn complaint_router<S, C>(service: Arc<ComplaintService<S, C>>) -> Router
where
    S: DirectoryStore + 'static,
    C: ComplaintRepository + 'static,
{
    Router::new()
        .route("/api/v1/complaints", post(file_handler::<S, C>))
        .route(
            "/api/v1/complaints/hostel/:hostel_id",
            get(hostel_handler::<S, C>),
        )
        .route(
            "/api/v1/complaints/:complaint_id/status",
            put(status_handler::<S, C>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct StatusChangeRequest {
    status: ComplaintStatus,
}

async fn file_handler<S, C>(
    State(service): State<Arc<ComplaintService<S, C>>>,
    axum::Json(submission): axum::Json<ComplaintSubmission>,
) -> Response
where
    S: DirectoryStore + 'static,
    C: ComplaintRepository + 'static,
{
    match service.file(submission, Utc::now()) {
        Ok(complaint) => (StatusCode::CREATED, axum::Json(complaint)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn status_handler<S, C>(
    State(service): State<Arc<ComplaintService<S, C>>>,
    Path(complaint_id): Path<String>,
    axum::Json(request): axum::Json<StatusChangeRequest>,
) -> Response
where
    S: DirectoryStore + 'static,
    C: ComplaintRepository + 'static,
{
    let id = ComplaintId(complaint_id);
    match service.update_status(&id, request.status, Utc::now()) {
        Ok(complaint) => (StatusCode::OK, axum::Json(complaint)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn hostel_handler<S, C>(
    State(service): State<Arc<ComplaintService<S, C>>>,
    Path(hostel_id): Path<String>,
) -> Response
where
    S: DirectoryStore + 'static,
    C: ComplaintRepository + 'static,
{
    match service.for_hostel(&HostelId(hostel_id)) {
        Ok(complaints) => (StatusCode::OK, axum::Json(complaints)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ComplaintError) -> Response {
    let status = match &err {
        ComplaintError::NotAllocated => StatusCode::BAD_REQUEST,
        ComplaintError::InvalidTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ComplaintError::Repository(ComplaintRepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ComplaintError::Repository(ComplaintRepositoryError::Conflict) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
