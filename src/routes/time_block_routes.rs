// src/routes/time_block_routes.rs

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    agenda::CANONICAL_DAYS,
    error::ApiError,
    middleware::auth_context::AuthContext,
    models::{ApiOk, AppState, OkResponse},
    rbac::{Capability, ensure},
    routes::listing::{self, ListQuery, ListView},
    table::Column,
};

const RESOURCE: &str = "time-blocks";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/time-blocks", get(list_time_blocks).post(create_time_block))
        .route(
            "/time-blocks/{block_id}",
            get(get_time_block)
                .patch(update_time_block)
                .delete(delete_time_block),
        )
}

fn columns() -> Vec<Column<Value>> {
    vec![
        Column::accessor("dayOfWeek", "Día"),
        Column::accessor("startTime", "Inicio"),
        Column::accessor("endTime", "Fin"),
        Column::accessor("appointmentDurationMinutes", "Duración (min)"),
        Column::accessor("maxAppointmentsPerBlock", "Cupos"),
        Column::accessor("attentionTypeName", "Tipo de atención").not_sortable(),
    ]
}

/// The one locally decidable validation: a template with a non-canonical day
/// label would silently vanish from every agenda bucket, so reject it at the
/// door instead of storing it.
fn validate_day_of_week(body: &Value) -> Result<(), ApiError> {
    match body.get("dayOfWeek") {
        None => Ok(()),
        Some(Value::String(day)) if CANONICAL_DAYS.contains(&day.as_str()) => Ok(()),
        Some(other) => Err(ApiError::BadRequest(
            "VALIDATION_ERROR",
            format!("dayOfWeek must be one of the canonical labels, got {other}"),
        )),
    }
}

pub async fn list_time_blocks(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(q): Query<ListQuery>,
) -> Result<Json<ApiOk<ListView>>, ApiError> {
    listing::list_resource(&state, &auth, RESOURCE, &columns(), &q).await
}

pub async fn get_time_block(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(block_id): Path<Uuid>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    listing::get_resource(&state, &auth, RESOURCE, block_id).await
}

pub async fn create_time_block(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(body): Json<Value>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    ensure(auth.role, Capability::ManageTimeBlocks)?;
    validate_day_of_week(&body)?;
    listing::create_resource(&state, &auth, RESOURCE, body).await
}

pub async fn update_time_block(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(block_id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    ensure(auth.role, Capability::ManageTimeBlocks)?;
    validate_day_of_week(&body)?;
    listing::update_resource(&state, &auth, RESOURCE, block_id, body).await
}

pub async fn delete_time_block(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(block_id): Path<Uuid>,
) -> Result<Json<OkResponse>, ApiError> {
    ensure(auth.role, Capability::ManageTimeBlocks)?;
    listing::delete_resource(&state, &auth, RESOURCE, block_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_day_of_week_validation() {
        assert!(validate_day_of_week(&json!({"dayOfWeek": "LUNES"})).is_ok());
        assert!(validate_day_of_week(&json!({"dayOfWeek": "DOMINGO"})).is_ok());
        assert!(validate_day_of_week(&json!({"startTime": "08:00"})).is_ok());

        assert!(validate_day_of_week(&json!({"dayOfWeek": "lunes"})).is_err());
        assert!(validate_day_of_week(&json!({"dayOfWeek": "MONDAY"})).is_err());
        assert!(validate_day_of_week(&json!({"dayOfWeek": 1})).is_err());
    }
}
