// src/routes/listing.rs
//
// Shared plumbing for the entity list/CRUD pages: translates the list query
// params into table state, runs the table engine over the backend's
// collection, and forwards mutations. Every entity route file stays a thin
// wiring of resource name + columns + capability.

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::auth_context::AuthContext,
    models::{ApiOk, AppState, OkData, OkResponse},
    table::{self, Column, SortDir, TableState},
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    /// Accessor path of the column to sort by.
    pub sort: Option<String>,
    /// "asc" (default) or "desc".
    pub dir: Option<String>,
}

pub fn table_state(q: &ListQuery, columns: &[Column<Value>]) -> Result<TableState, ApiError> {
    let mut state = TableState::default();
    if let Some(term) = &q.search {
        state.set_search(term);
    }
    // page after search: an explicit page param wins over the reset
    if let Some(page) = q.page {
        state.goto(page);
    }

    if let Some(sort_path) = &q.sort {
        let idx = columns
            .iter()
            .position(|c| c.sortable && c.path() == sort_path)
            .ok_or_else(|| {
                ApiError::BadRequest(
                    "VALIDATION_ERROR",
                    format!("unknown sort column: {sort_path}"),
                )
            })?;
        let dir = match q.dir.as_deref() {
            None | Some("asc") => SortDir::Asc,
            Some("desc") => SortDir::Desc,
            Some(other) => {
                return Err(ApiError::BadRequest(
                    "VALIDATION_ERROR",
                    format!("dir must be asc or desc, got {other}"),
                ));
            }
        };
        state.sort = Some((idx, dir));
    }

    Ok(state)
}

/// View model for one entity list page: the display cells (renderer wins
/// over accessor) next to the raw records the edit/delete actions need.
#[derive(Debug, Serialize)]
pub struct ListView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub items: Vec<Value>,
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
}

pub async fn list_resource(
    state: &AppState,
    auth: &AuthContext,
    resource: &str,
    columns: &[Column<Value>],
    q: &ListQuery,
) -> Result<Json<ApiOk<ListView>>, ApiError> {
    let data = state.backend.list(&auth.token, resource).await?;
    let table_state = table_state(q, columns)?;
    let page = table::evaluate(&data, columns, &table_state, state.page_size);

    let rows = page
        .items
        .iter()
        .map(|row| columns.iter().map(|col| table::cell_text(row, col)).collect())
        .collect();

    Ok(Json(ApiOk {
        data: ListView {
            headers: columns.iter().map(|c| c.header.clone()).collect(),
            rows,
            items: page.items,
            page: page.page,
            page_count: page.page_count,
            total: page.total,
        },
    }))
}

pub async fn get_resource(
    state: &AppState,
    auth: &AuthContext,
    resource: &str,
    id: Uuid,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    let row = state.backend.get(&auth.token, resource, id).await?;
    Ok(Json(ApiOk { data: row }))
}

pub async fn create_resource(
    state: &AppState,
    auth: &AuthContext,
    resource: &str,
    body: Value,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    let row = state.backend.create(&auth.token, resource, body).await?;
    Ok(Json(ApiOk { data: row }))
}

pub async fn update_resource(
    state: &AppState,
    auth: &AuthContext,
    resource: &str,
    id: Uuid,
    body: Value,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    let row = state.backend.update(&auth.token, resource, id, body).await?;
    Ok(Json(ApiOk { data: row }))
}

pub async fn delete_resource(
    state: &AppState,
    auth: &AuthContext,
    resource: &str,
    id: Uuid,
) -> Result<Json<OkResponse>, ApiError> {
    state.backend.delete(&auth.token, resource, id).await?;
    Ok(Json(OkResponse {
        data: OkData { ok: true },
    }))
}
