// src/routes/user_routes.rs

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

const RESOURCE: &str = "users";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{user_id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

fn columns() -> Vec<Column<Value>> {
    vec![
        Column::accessor("username", "Usuario"),
        Column::accessor("displayName", "Nombre"),
        Column::accessor("role", "Rol"),
        Column::rendered("isActive", "Estado", |row: &Value| {
            if row["isActive"].as_bool().unwrap_or(false) {
                "Activo".to_string()
            } else {
                "Inactivo".to_string()
            }
        }),
    ]
}

pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(q): Query<ListQuery>,
) -> Result<Json<ApiOk<ListView>>, ApiError> {
    ensure(auth.role, Capability::ManageUsers)?;
    listing::list_resource(&state, &auth, RESOURCE, &columns(), &q).await
}

pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    ensure(auth.role, Capability::ManageUsers)?;
    listing::get_resource(&state, &auth, RESOURCE, user_id).await
}

pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(body): Json<Value>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    ensure(auth.role, Capability::ManageUsers)?;
    listing::create_resource(&state, &auth, RESOURCE, body).await
}

pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(user_id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    ensure(auth.role, Capability::ManageUsers)?;
    listing::update_resource(&state, &auth, RESOURCE, user_id, body).await
}

pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(user_id): Path<Uuid>,
) -> Result<Json<OkResponse>, ApiError> {
    ensure(auth.role, Capability::ManageUsers)?;
    listing::delete_resource(&state, &auth, RESOURCE, user_id).await
}
