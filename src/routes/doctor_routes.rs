// src/routes/doctor_routes.rs

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

const RESOURCE: &str = "doctors";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/doctors", get(list_doctors).post(create_doctor))
        .route(
            "/doctors/{doctor_id}",
            get(get_doctor).patch(update_doctor).delete(delete_doctor),
        )
}

fn columns() -> Vec<Column<Value>> {
    vec![
        Column::rendered("lastName", "Médico", |row: &Value| {
            let first = row["firstName"].as_str().unwrap_or_default();
            let last = row["lastName"].as_str().unwrap_or_default();
            format!("{first} {last}").trim().to_string()
        }),
        Column::accessor("specialtyName", "Especialidad"),
        Column::accessor("licenseNumber", "CMP"),
        Column::accessor("email", "Correo"),
    ]
}

pub async fn list_doctors(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(q): Query<ListQuery>,
) -> Result<Json<ApiOk<ListView>>, ApiError> {
    listing::list_resource(&state, &auth, RESOURCE, &columns(), &q).await
}

pub async fn get_doctor(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    listing::get_resource(&state, &auth, RESOURCE, doctor_id).await
}

pub async fn create_doctor(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(body): Json<Value>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    ensure(auth.role, Capability::ManageUsers)?;
    listing::create_resource(&state, &auth, RESOURCE, body).await
}

pub async fn update_doctor(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(doctor_id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    ensure(auth.role, Capability::ManageUsers)?;
    listing::update_resource(&state, &auth, RESOURCE, doctor_id, body).await
}

pub async fn delete_doctor(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<OkResponse>, ApiError> {
    ensure(auth.role, Capability::ManageUsers)?;
    listing::delete_resource(&state, &auth, RESOURCE, doctor_id).await
}
