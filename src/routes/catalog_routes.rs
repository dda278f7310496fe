// src/routes/catalog_routes.rs
//
// The three clinical catalogs share one shape: admin-managed name/description
// lists (pathologies, treatments, attention types).

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

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pathologies", get(list_pathologies).post(create_pathology))
        .route(
            "/pathologies/{id}",
            get(get_pathology).patch(update_pathology).delete(delete_pathology),
        )
        .route("/treatments", get(list_treatments).post(create_treatment))
        .route(
            "/treatments/{id}",
            get(get_treatment).patch(update_treatment).delete(delete_treatment),
        )
        .route(
            "/attention-types",
            get(list_attention_types).post(create_attention_type),
        )
        .route(
            "/attention-types/{id}",
            get(get_attention_type)
                .patch(update_attention_type)
                .delete(delete_attention_type),
        )
}

fn catalog_columns() -> Vec<Column<Value>> {
    vec![
        Column::accessor("name", "Nombre"),
        Column::accessor("description", "Descripción").not_sortable(),
    ]
}

async fn list_catalog(
    state: &AppState,
    auth: &AuthContext,
    resource: &str,
    q: &ListQuery,
) -> Result<Json<ApiOk<ListView>>, ApiError> {
    listing::list_resource(state, auth, resource, &catalog_columns(), q).await
}

fn mutate_guard(auth: &AuthContext) -> Result<(), ApiError> {
    ensure(auth.role, Capability::ManageCatalogs)
}

/* -------- pathologies -------- */

pub async fn list_pathologies(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(q): Query<ListQuery>,
) -> Result<Json<ApiOk<ListView>>, ApiError> {
    list_catalog(&state, &auth, "pathologies", &q).await
}

pub async fn get_pathology(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    listing::get_resource(&state, &auth, "pathologies", id).await
}

pub async fn create_pathology(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(body): Json<Value>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    mutate_guard(&auth)?;
    listing::create_resource(&state, &auth, "pathologies", body).await
}

pub async fn update_pathology(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    mutate_guard(&auth)?;
    listing::update_resource(&state, &auth, "pathologies", id, body).await
}

pub async fn delete_pathology(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<OkResponse>, ApiError> {
    mutate_guard(&auth)?;
    listing::delete_resource(&state, &auth, "pathologies", id).await
}

/* -------- treatments -------- */

pub async fn list_treatments(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(q): Query<ListQuery>,
) -> Result<Json<ApiOk<ListView>>, ApiError> {
    list_catalog(&state, &auth, "treatments", &q).await
}

pub async fn get_treatment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    listing::get_resource(&state, &auth, "treatments", id).await
}

pub async fn create_treatment(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(body): Json<Value>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    mutate_guard(&auth)?;
    listing::create_resource(&state, &auth, "treatments", body).await
}

pub async fn update_treatment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    mutate_guard(&auth)?;
    listing::update_resource(&state, &auth, "treatments", id, body).await
}

pub async fn delete_treatment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<OkResponse>, ApiError> {
    mutate_guard(&auth)?;
    listing::delete_resource(&state, &auth, "treatments", id).await
}

/* -------- attention types -------- */

pub async fn list_attention_types(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(q): Query<ListQuery>,
) -> Result<Json<ApiOk<ListView>>, ApiError> {
    list_catalog(&state, &auth, "attention-types", &q).await
}

pub async fn get_attention_type(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    listing::get_resource(&state, &auth, "attention-types", id).await
}

pub async fn create_attention_type(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(body): Json<Value>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    mutate_guard(&auth)?;
    listing::create_resource(&state, &auth, "attention-types", body).await
}

pub async fn update_attention_type(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    mutate_guard(&auth)?;
    listing::update_resource(&state, &auth, "attention-types", id, body).await
}

pub async fn delete_attention_type(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<OkResponse>, ApiError> {
    mutate_guard(&auth)?;
    listing::delete_resource(&state, &auth, "attention-types", id).await
}
