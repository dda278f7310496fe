// src/routes/exam_routes.rs

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::auth_context::AuthContext,
    models::{ApiOk, AppState, OkResponse},
    rbac::{Capability, ensure},
    routes::listing::{self, ListQuery, ListView},
    table::Column,
};

const RESOURCE: &str = "exam-results";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/exam-results", get(list_exam_results).post(create_exam_result))
        .route(
            "/exam-results/{exam_id}",
            get(get_exam_result)
                .patch(update_exam_result)
                .delete(delete_exam_result),
        )
}

fn columns() -> Vec<Column<Value>> {
    vec![
        Column::accessor("date", "Fecha"),
        Column::accessor("patientName", "Paciente"),
        // exam type comes nested from the backend
        Column::accessor("examType.name", "Examen"),
        Column::accessor("summary", "Resultado").not_sortable(),
    ]
}

pub async fn list_exam_results(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(q): Query<ListQuery>,
) -> Result<Json<ApiOk<ListView>>, ApiError> {
    listing::list_resource(&state, &auth, RESOURCE, &columns(), &q).await
}

pub async fn get_exam_result(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(exam_id): Path<Uuid>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    listing::get_resource(&state, &auth, RESOURCE, exam_id).await
}

pub async fn create_exam_result(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(body): Json<Value>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    ensure(auth.role, Capability::RecordExamResults)?;
    listing::create_resource(&state, &auth, RESOURCE, body).await
}

pub async fn update_exam_result(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(exam_id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    ensure(auth.role, Capability::RecordExamResults)?;
    listing::update_resource(&state, &auth, RESOURCE, exam_id, body).await
}

pub async fn delete_exam_result(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(exam_id): Path<Uuid>,
) -> Result<Json<OkResponse>, ApiError> {
    ensure(auth.role, Capability::RecordExamResults)?;
    listing::delete_resource(&state, &auth, RESOURCE, exam_id).await
}
