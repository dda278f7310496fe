// src/rbac.rs
//
// Pure role/capability checks. Routes call `ensure`; nothing here touches
// HTTP or the backend, so the truth table is testable on its own.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "MEDICO")]
    Medico,
    #[serde(rename = "RECEPCIONISTA")]
    Recepcionista,
}

impl Role {
    /// Backend sends the role as an uppercase string.
    pub fn from_label(label: &str) -> Option<Role> {
        match label {
            "ADMIN" => Some(Role::Admin),
            "MEDICO" => Some(Role::Medico),
            "RECEPCIONISTA" => Some(Role::Recepcionista),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Medico => "MEDICO",
            Role::Recepcionista => "RECEPCIONISTA",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ViewAgenda,
    ManageAppointments,
    ManagePatients,
    ManageTimeBlocks,
    ManageCatalogs,
    ManageUsers,
    RecordExamResults,
}

/// The capability matrix. Admin can do everything; doctors own their
/// schedule templates and clinical records; receptionists run the desk.
pub fn can(role: Role, capability: Capability) -> bool {
    use Capability::*;
    match role {
        Role::Admin => true,
        Role::Medico => matches!(
            capability,
            ViewAgenda | ManageTimeBlocks | RecordExamResults
        ),
        Role::Recepcionista => matches!(
            capability,
            ViewAgenda | ManageAppointments | ManagePatients
        ),
    }
}

pub fn ensure(role: Role, capability: Capability) -> Result<(), ApiError> {
    if can(role, capability) {
        Ok(())
    } else {
        Err(ApiError::forbidden(format!(
            "role {} cannot perform this action",
            role.as_str()
        )))
    }
}
