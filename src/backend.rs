// src/backend.rs
//
// REST-client collaborator: every persistence and business call goes through
// the remote clinic backend. The trait is the seam that keeps the panel's
// core logic free of hidden network dependencies; routes receive the client
// via AppState with its configuration (base URL, timeout) injected at
// startup and the caller's bearer token passed through per request.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::models::{Appointment, AppointmentStatus, LoginRequest, LoginSession, SessionUser, TimeBlock};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("backend response decode error: {0}")]
    Decode(String),
}

#[async_trait]
pub trait ClinicBackend: Send + Sync {
    async fn login(&self, req: &LoginRequest) -> Result<LoginSession, BackendError>;
    async fn logout(&self, token: &str) -> Result<(), BackendError>;
    async fn me(&self, token: &str) -> Result<SessionUser, BackendError>;

    /// Generic collection fetch for the entity list/CRUD pages
    /// (patients, doctors, users, pathologies, treatments, ...).
    async fn list(&self, token: &str, resource: &str) -> Result<Vec<Value>, BackendError>;
    async fn get(&self, token: &str, resource: &str, id: Uuid) -> Result<Value, BackendError>;
    async fn create(&self, token: &str, resource: &str, body: Value) -> Result<Value, BackendError>;
    async fn update(
        &self,
        token: &str,
        resource: &str,
        id: Uuid,
        body: Value,
    ) -> Result<Value, BackendError>;
    async fn delete(&self, token: &str, resource: &str, id: Uuid) -> Result<(), BackendError>;

    /// Concrete appointments for one doctor in `[from, to)`.
    async fn week_appointments(
        &self,
        token: &str,
        doctor_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Appointment>, BackendError>;

    /// The doctor's recurring weekly time-block templates.
    async fn doctor_time_blocks(
        &self,
        token: &str,
        doctor_id: Uuid,
    ) -> Result<Vec<TimeBlock>, BackendError>;

    async fn appointment(&self, token: &str, id: Uuid) -> Result<Appointment, BackendError>;

    async fn set_appointment_status(
        &self,
        token: &str,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, BackendError>;
}

/* ============================================================
   reqwest implementation
   ============================================================ */

pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, BackendError> {
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| {
                    v.pointer("/error/message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or(body);
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }
        resp.json::<T>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn send_empty(&self, req: reqwest::RequestBuilder) -> Result<(), BackendError> {
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ClinicBackend for HttpBackend {
    async fn login(&self, req: &LoginRequest) -> Result<LoginSession, BackendError> {
        self.send(
            self.http
                .post(self.url("/auth/login"))
                .json(&serde_json::json!({
                    "username": req.username,
                    "password": req.password,
                })),
        )
        .await
    }

    async fn logout(&self, token: &str) -> Result<(), BackendError> {
        self.send_empty(self.http.post(self.url("/auth/logout")).bearer_auth(token))
            .await
    }

    async fn me(&self, token: &str) -> Result<SessionUser, BackendError> {
        self.send(self.http.get(self.url("/auth/me")).bearer_auth(token))
            .await
    }

    async fn list(&self, token: &str, resource: &str) -> Result<Vec<Value>, BackendError> {
        // a null body counts as an empty collection, not an error
        let rows: Option<Vec<Value>> = self
            .send(
                self.http
                    .get(self.url(&format!("/{resource}")))
                    .bearer_auth(token),
            )
            .await?;
        Ok(rows.unwrap_or_default())
    }

    async fn get(&self, token: &str, resource: &str, id: Uuid) -> Result<Value, BackendError> {
        self.send(
            self.http
                .get(self.url(&format!("/{resource}/{id}")))
                .bearer_auth(token),
        )
        .await
    }

    async fn create(&self, token: &str, resource: &str, body: Value) -> Result<Value, BackendError> {
        self.send(
            self.http
                .post(self.url(&format!("/{resource}")))
                .bearer_auth(token)
                .json(&body),
        )
        .await
    }

    async fn update(
        &self,
        token: &str,
        resource: &str,
        id: Uuid,
        body: Value,
    ) -> Result<Value, BackendError> {
        self.send(
            self.http
                .patch(self.url(&format!("/{resource}/{id}")))
                .bearer_auth(token)
                .json(&body),
        )
        .await
    }

    async fn delete(&self, token: &str, resource: &str, id: Uuid) -> Result<(), BackendError> {
        self.send_empty(
            self.http
                .delete(self.url(&format!("/{resource}/{id}")))
                .bearer_auth(token),
        )
        .await
    }

    async fn week_appointments(
        &self,
        token: &str,
        doctor_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Appointment>, BackendError> {
        let rows: Option<Vec<Appointment>> = self
            .send(
                self.http
                    .get(self.url(&format!("/doctors/{doctor_id}/appointments")))
                    .query(&[("from", from.to_string()), ("to", to.to_string())])
                    .bearer_auth(token),
            )
            .await?;
        Ok(rows.unwrap_or_default())
    }

    async fn doctor_time_blocks(
        &self,
        token: &str,
        doctor_id: Uuid,
    ) -> Result<Vec<TimeBlock>, BackendError> {
        let rows: Option<Vec<TimeBlock>> = self
            .send(
                self.http
                    .get(self.url(&format!("/doctors/{doctor_id}/time-blocks")))
                    .bearer_auth(token),
            )
            .await?;
        Ok(rows.unwrap_or_default())
    }

    async fn appointment(&self, token: &str, id: Uuid) -> Result<Appointment, BackendError> {
        self.send(
            self.http
                .get(self.url(&format!("/appointments/{id}")))
                .bearer_auth(token),
        )
        .await
    }

    async fn set_appointment_status(
        &self,
        token: &str,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, BackendError> {
        self.send(
            self.http
                .patch(self.url(&format!("/appointments/{id}/status")))
                .bearer_auth(token)
                .json(&serde_json::json!({ "status": status })),
        )
        .await
    }
}

/* ============================================================
   In-memory fake for route tests
   ============================================================ */
