use axum::{Json, Router, extract::State, routing::get};

use crate::error::ApiError;
use crate::middleware::auth_context::AuthContext;
use crate::models::AppState;
use crate::rbac::Role;

#[derive(serde::Serialize)]
pub struct HomeResponse {
    pub data: HomeData,
}

#[derive(serde::Serialize)]
pub struct HomeData {
    pub view: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/home", get(home))
}

/// Which landing view the panel should render for the caller's role.
pub async fn home(
    State(_state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<HomeResponse>, ApiError> {
    let view = match auth.role {
        Role::Admin => "admin",
        Role::Medico => "medico",
        Role::Recepcionista => "recepcion",
    };

    Ok(Json(HomeResponse {
        data: HomeData {
            view: view.to_string(),
        },
    }))
}
