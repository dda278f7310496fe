use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::ClinicBackend;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn ClinicBackend>,
    pub page_size: usize,
}

/* -------------------------
   API DTOs
--------------------------*/

#[derive(Debug, Serialize)]
pub struct ApiOk<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginSession {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
}

/// Profile shape the backend returns from /auth/me and inside the login
/// payload. `role` arrives as a plain string and is mapped to [`crate::rbac::Role`]
/// at the auth boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub username: String,
    pub display_name: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub data: OkData,
}

#[derive(Debug, Serialize)]
pub struct OkData {
    pub ok: bool,
}

/* -------------------------
   Domain records
--------------------------*/

/// Appointment record as served by the backend (a `cita`).
///
/// `date` is a plain calendar date; `start_time`/`end_time` are zero-padded
/// `HH:MM[:SS]` strings, so lexicographic order equals chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub patient_name: String,
    #[serde(default)]
    pub attention_type_name: Option<String>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Recurring weekly availability template owned by one doctor
/// (a `bloque_horario`).
///
/// `day_of_week` is kept as a raw string on purpose: grouping must silently
/// drop labels that are not one of the seven canonical names instead of
/// failing to deserialize the whole collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    pub id: Uuid,
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    pub appointment_duration_minutes: i32,
    pub max_appointments_per_block: i32,
    #[serde(default)]
    pub attention_type_name: Option<String>,
}

/// Appointment lifecycle. Transitions move forward through the fixed
/// sequence; cancellation is only reachable from the early states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[serde(rename = "PENDIENTE")]
    Pendiente,
    #[serde(rename = "CONFIRMADA")]
    Confirmada,
    #[serde(rename = "EN_PROCESO")]
    EnProceso,
    #[serde(rename = "COMPLETADA")]
    Completada,
    #[serde(rename = "CANCELADA")]
    Cancelada,
    #[serde(rename = "NO_ASISTIO")]
    NoAsistio,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pendiente => "PENDIENTE",
            AppointmentStatus::Confirmada => "CONFIRMADA",
            AppointmentStatus::EnProceso => "EN_PROCESO",
            AppointmentStatus::Completada => "COMPLETADA",
            AppointmentStatus::Cancelada => "CANCELADA",
            AppointmentStatus::NoAsistio => "NO_ASISTIO",
        }
    }

    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Pendiente, Confirmada)
                | (Pendiente, Cancelada)
                | (Confirmada, EnProceso)
                | (Confirmada, Cancelada)
                | (Confirmada, NoAsistio)
                | (EnProceso, Completada)
        )
    }

    pub fn is_terminal(self) -> bool {
        use AppointmentStatus::*;
        matches!(self, Completada | Cancelada | NoAsistio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_forward_sequence() {
        use AppointmentStatus::*;
        assert!(Pendiente.can_transition_to(Confirmada));
        assert!(Confirmada.can_transition_to(EnProceso));
        assert!(EnProceso.can_transition_to(Completada));

        // no skipping ahead
        assert!(!Pendiente.can_transition_to(EnProceso));
        assert!(!Pendiente.can_transition_to(Completada));
        assert!(!Confirmada.can_transition_to(Completada));

        // no moving backwards
        assert!(!Confirmada.can_transition_to(Pendiente));
        assert!(!Completada.can_transition_to(EnProceso));
    }

    #[test]
    fn test_status_cancel_and_no_show_edges() {
        use AppointmentStatus::*;
        assert!(Pendiente.can_transition_to(Cancelada));
        assert!(Confirmada.can_transition_to(Cancelada));
        assert!(Confirmada.can_transition_to(NoAsistio));

        assert!(!EnProceso.can_transition_to(Cancelada));
        assert!(!Pendiente.can_transition_to(NoAsistio));
        assert!(!Cancelada.can_transition_to(Confirmada));
        assert!(!NoAsistio.can_transition_to(Confirmada));
    }

    #[test]
    fn test_status_terminal_states() {
        use AppointmentStatus::*;
        for s in [Completada, Cancelada, NoAsistio] {
            assert!(s.is_terminal());
            for next in [Pendiente, Confirmada, EnProceso, Completada, Cancelada, NoAsistio] {
                assert!(!s.can_transition_to(next));
            }
        }
        assert!(!Pendiente.is_terminal());
        assert!(!EnProceso.is_terminal());
    }

    #[test]
    fn test_status_serde_names() {
        let s: AppointmentStatus = serde_json::from_str("\"NO_ASISTIO\"").unwrap();
        assert_eq!(s, AppointmentStatus::NoAsistio);
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::EnProceso).unwrap(),
            "\"EN_PROCESO\""
        );
    }

    #[test]
    fn test_appointment_wire_shape() {
        let json = r#"{
            "id": "7f9c46a2-5ed1-4b60-9a2f-3f3a8f1f2b10",
            "date": "2026-08-17",
            "startTime": "09:00",
            "endTime": "09:30",
            "patientName": "Juan Pérez",
            "status": "PENDIENTE"
        }"#;
        let a: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(a.start_time, "09:00");
        assert!(a.attention_type_name.is_none());
        assert!(a.notes.is_none());
    }
}
