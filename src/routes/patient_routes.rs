// src/routes/patient_routes.rs

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

const RESOURCE: &str = "patients";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/patients", get(list_patients).post(create_patient))
        .route(
            "/patients/{patient_id}",
            get(get_patient).patch(update_patient).delete(delete_patient),
        )
}

fn full_name(row: &Value) -> String {
    let first = row["firstName"].as_str().unwrap_or_default();
    let last = row["lastName"].as_str().unwrap_or_default();
    format!("{first} {last}").trim().to_string()
}

fn columns() -> Vec<Column<Value>> {
    vec![
        Column::accessor("documentNumber", "Documento"),
        Column::rendered("lastName", "Paciente", full_name),
        Column::accessor("email", "Correo"),
        Column::accessor("phone", "Teléfono").not_sortable(),
    ]
}

pub async fn list_patients(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(q): Query<ListQuery>,
) -> Result<Json<ApiOk<ListView>>, ApiError> {
    listing::list_resource(&state, &auth, RESOURCE, &columns(), &q).await
}

pub async fn get_patient(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    listing::get_resource(&state, &auth, RESOURCE, patient_id).await
}

pub async fn create_patient(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(body): Json<Value>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    ensure(auth.role, Capability::ManagePatients)?;
    listing::create_resource(&state, &auth, RESOURCE, body).await
}

pub async fn update_patient(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(patient_id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    ensure(auth.role, Capability::ManagePatients)?;
    listing::update_resource(&state, &auth, RESOURCE, patient_id, body).await
}

pub async fn delete_patient(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<OkResponse>, ApiError> {
    ensure(auth.role, Capability::ManagePatients)?;
    listing::delete_resource(&state, &auth, RESOURCE, patient_id).await
}
