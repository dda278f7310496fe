// src/routes/appointment_routes.rs

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::auth_context::AuthContext,
    models::{ApiOk, Appointment, AppointmentStatus, AppState},
    rbac::{Capability, ensure},
    routes::listing::{self, ListQuery, ListView},
    table::Column,
};

const RESOURCE: &str = "appointments";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/appointments", get(list_appointments).post(create_appointment))
        .route(
            "/appointments/{appointment_id}",
            get(get_appointment)
                .patch(update_appointment)
                .delete(delete_appointment),
        )
        .route("/appointments/{appointment_id}/confirm", post(confirm_appointment))
        .route("/appointments/{appointment_id}/start", post(start_appointment))
        .route("/appointments/{appointment_id}/complete", post(complete_appointment))
        .route("/appointments/{appointment_id}/cancel", post(cancel_appointment))
        .route("/appointments/{appointment_id}/no_show", post(mark_no_show))
}

fn columns() -> Vec<Column<Value>> {
    vec![
        Column::accessor("date", "Fecha"),
        Column::accessor("startTime", "Hora"),
        Column::accessor("patientName", "Paciente"),
        Column::accessor("attentionTypeName", "Tipo de atención"),
        Column::accessor("status", "Estado"),
        Column::accessor("notes", "Notas").not_sortable(),
    ]
}

pub async fn list_appointments(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(q): Query<ListQuery>,
) -> Result<Json<ApiOk<ListView>>, ApiError> {
    ensure(auth.role, Capability::ViewAgenda)?;
    listing::list_resource(&state, &auth, RESOURCE, &columns(), &q).await
}

pub async fn get_appointment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    ensure(auth.role, Capability::ViewAgenda)?;
    listing::get_resource(&state, &auth, RESOURCE, appointment_id).await
}

pub async fn create_appointment(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(body): Json<Value>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    ensure(auth.role, Capability::ManageAppointments)?;
    listing::create_resource(&state, &auth, RESOURCE, body).await
}

pub async fn update_appointment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(appointment_id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    ensure(auth.role, Capability::ManageAppointments)?;
    listing::update_resource(&state, &auth, RESOURCE, appointment_id, body).await
}

pub async fn delete_appointment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<crate::models::OkResponse>, ApiError> {
    ensure(auth.role, Capability::ManageAppointments)?;
    listing::delete_resource(&state, &auth, RESOURCE, appointment_id).await
}

/* ============================================================
   Status transitions
   ============================================================ */

/// Moves one appointment along its lifecycle. The transition is validated
/// against the forward-only sequence before anything is forwarded, so an
/// invalid request never reaches the backend.
async fn transition(
    state: AppState,
    auth: AuthContext,
    appointment_id: Uuid,
    to: AppointmentStatus,
) -> Result<Json<ApiOk<Appointment>>, ApiError> {
    ensure(auth.role, Capability::ManageAppointments)?;

    let current = state.backend.appointment(&auth.token, appointment_id).await?;
    if !current.status.can_transition_to(to) {
        return Err(ApiError::invalid_transition(
            current.status.as_str(),
            to.as_str(),
        ));
    }

    let updated = state
        .backend
        .set_appointment_status(&auth.token, appointment_id, to)
        .await?;
    Ok(Json(ApiOk { data: updated }))
}

pub async fn confirm_appointment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<ApiOk<Appointment>>, ApiError> {
    transition(state, auth, appointment_id, AppointmentStatus::Confirmada).await
}

pub async fn start_appointment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<ApiOk<Appointment>>, ApiError> {
    transition(state, auth, appointment_id, AppointmentStatus::EnProceso).await
}

pub async fn complete_appointment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<ApiOk<Appointment>>, ApiError> {
    transition(state, auth, appointment_id, AppointmentStatus::Completada).await
}

pub async fn cancel_appointment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<ApiOk<Appointment>>, ApiError> {
    transition(state, auth, appointment_id, AppointmentStatus::Cancelada).await
}

pub async fn mark_no_show(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<ApiOk<Appointment>>, ApiError> {
    transition(state, auth, appointment_id, AppointmentStatus::NoAsistio).await
}
