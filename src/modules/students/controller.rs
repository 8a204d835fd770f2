//! HTTP handlers for `/api/v1/students`.
//!
//! Each handler extracts its inputs, makes exactly one call on the
//! [`StudentService`](crate::modules::students::service::StudentService) and
//! relays the result. Failures propagate through `?` as [`AppError`].

use crate::extract::JsonBody;
use crate::middleware::auth::AuthIdentity;
use crate::modules::students::model::{
    MessageResponse, Student, StudentListQuery, StudentListResponse, StudentPayload,
    StudentStatusChange, StudentStatusDto, StudentUpdate,
};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use registrar_core::{AppError, ErrorResponse};
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/v1/students",
    params(StudentListQuery),
    responses(
        (status = 200, description = "Students matching the filters", body = StudentListResponse),
        (status = 400, description = "Invalid filter, sort or pagination value", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("api_key" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn handle_get_all_students(
    State(state): State<AppState>,
    Query(query): Query<StudentListQuery>,
) -> Result<Json<StudentListResponse>, AppError> {
    let students = state.students.list_students(query).await?;
    Ok(Json(StudentListResponse { students }))
}

#[utoipa::path(
    post,
    path = "/api/v1/students",
    request_body = StudentPayload,
    responses(
        (status = 201, description = "Student added", body = MessageResponse),
        (status = 400, description = "Missing required field or malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("api_key" = [])),
    tag = "Students"
)]
#[instrument(skip(state, payload))]
pub async fn handle_add_student(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<StudentPayload>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let message = state.students.add_student(payload).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// The target always comes from the path; identifiers in the body are ignored.
#[utoipa::path(
    put,
    path = "/api/v1/students/{id}",
    params(("id" = String, Path, description = "Student ID")),
    request_body = StudentPayload,
    responses(
        (status = 200, description = "Student updated", body = MessageResponse),
        (status = 400, description = "Invalid body or student id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("api_key" = [])),
    tag = "Students"
)]
#[instrument(skip(state, fields))]
pub async fn handle_update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(fields): JsonBody<StudentPayload>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = state
        .students
        .update_student(StudentUpdate {
            user_id: id,
            fields,
        })
        .await?;
    Ok(Json(message))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/{id}",
    params(("id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("api_key" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn handle_get_student_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, AppError> {
    let student = state.students.get_student_detail(&id).await?;
    Ok(Json(student))
}

/// The reviewer is the authenticated caller, never a value from the body.
#[utoipa::path(
    patch,
    path = "/api/v1/students/{id}/status",
    params(("id" = String, Path, description = "Student ID")),
    request_body = StudentStatusDto,
    responses(
        (status = 200, description = "Status changed", body = MessageResponse),
        (status = 400, description = "Missing or unknown status", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("api_key" = [])),
    tag = "Students"
)]
#[instrument(skip(state, identity), fields(reviewer_id = %identity.id))]
pub async fn handle_student_status(
    State(state): State<AppState>,
    AuthIdentity(identity): AuthIdentity,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<StudentStatusDto>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = state
        .students
        .set_student_status(StudentStatusChange {
            user_id: id,
            reviewer_id: identity.id,
            status: body.status,
        })
        .await?;
    Ok(Json(message))
}
