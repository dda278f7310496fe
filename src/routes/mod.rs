use crate::models::AppState;
use axum::Router;

pub mod agenda_routes;
pub mod appointment_routes;
pub mod auth_routes;
pub mod catalog_routes;
pub mod doctor_routes;
pub mod exam_routes;
pub mod home_routes;
pub mod listing;
pub mod patient_routes;
pub mod time_block_routes;
pub mod user_routes;

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1/auth", auth_routes::router())
        .nest("/api/v1", agenda_routes::router())
        .nest("/api/v1", appointment_routes::router())
        .nest("/api/v1", patient_routes::router())
        .nest("/api/v1", doctor_routes::router())
        .nest("/api/v1", time_block_routes::router())
        .nest("/api/v1", catalog_routes::router())
        .nest("/api/v1", exam_routes::router())
        .nest("/api/v1", user_routes::router())
        .merge(home_routes::router())
        .with_state(state)
}
