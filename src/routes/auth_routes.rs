// src/routes/auth_routes.rs
//
// Pure pass-through: credentials and sessions are the backend's business.
// The panel forwards the login, hands the token back to the caller, and
// never persists either.

use axum::{Json, Router, extract::State, routing::get, routing::post};

use crate::{
    error::ApiError,
    middleware::auth_context::AuthContext,
    models::{ApiOk, AppState, LoginRequest, LoginSession, OkData, OkResponse, SessionUser},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiOk<LoginSession>>, ApiError> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest(
            "VALIDATION_ERROR",
            "username and password are required".into(),
        ));
    }
    let session = state.backend.login(&req).await?;
    Ok(Json(ApiOk { data: session }))
}

pub async fn logout(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<OkResponse>, ApiError> {
    state.backend.logout(&auth.token).await?;
    Ok(Json(OkResponse {
        data: OkData { ok: true },
    }))
}

pub async fn me(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<ApiOk<SessionUser>>, ApiError> {
    let user = state.backend.me(&auth.token).await?;
    Ok(Json(ApiOk { data: user }))
}
