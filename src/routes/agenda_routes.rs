// src/routes/agenda_routes.rs

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    agenda::{self, WeekAgenda},
    error::ApiError,
    middleware::auth_context::AuthContext,
    models::{ApiOk, AppState},
    rbac::{Capability, ensure},
};

pub fn router() -> Router<AppState> {
    Router::new().route("/agenda/week", get(get_week_agenda))
}

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub doctor_id: Uuid,
    /// Any date inside the wanted week, YYYY-MM-DD. Defaults to today.
    pub date: Option<NaiveDate>,
}

/// The week view: the doctor's concrete appointments for the calendar week
/// containing `date`, side by side with their recurring time-block
/// templates, grouped per weekday.
pub async fn get_week_agenda(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(q): Query<WeekQuery>,
) -> Result<Json<ApiOk<WeekAgenda>>, ApiError> {
    ensure(auth.role, Capability::ViewAgenda)?;

    let today = q.date.unwrap_or_else(|| Utc::now().date_naive());
    let start = agenda::week_start(today);
    let end = start + Duration::days(7);

    let appointments = state
        .backend
        .week_appointments(&auth.token, q.doctor_id, start, end)
        .await?;
    let time_blocks = state
        .backend
        .doctor_time_blocks(&auth.token, q.doctor_id)
        .await?;

    Ok(Json(ApiOk {
        data: agenda::week_agenda(appointments, time_blocks, today),
    }))
}
