use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::AppState;
use crate::rbac::Role;

/// Resolved caller identity. The raw bearer token is kept so routes can pass
/// it through to the backend; the panel itself stores no session state.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub role: Role,
    pub token: String,
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = ApiError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            // Extract Authorization: Bearer <token>
            let TypedHeader(authz): TypedHeader<Authorization<Bearer>> =
                TypedHeader::from_request_parts(parts, state)
                    .await
                    .map_err(|_| ApiError::session_expired())?;

            let token = authz.token().to_string();

            // The backend owns session validation; /auth/me doubles as the
            // token check.
            let user = state.backend.me(&token).await.map_err(ApiError::from)?;

            let role = Role::from_label(&user.role).ok_or_else(|| {
                ApiError::Forbidden(
                    "UNKNOWN_ROLE",
                    format!("role {} has no panel access", user.role),
                )
            })?;

            Ok(AuthContext {
                user_id: user.user_id,
                role,
                token,
            })
        }
    }
}
