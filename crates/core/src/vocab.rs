//! Domain value sets consumed by the rule catalog.
//!
//! Each enum mirrors a fixed vocabulary owned by the platform. The `ALL`
//! slices are what enum field constraints check against; their order is the
//! order reported in error messages.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Hospitals
// ---------------------------------------------------------------------------

/// Kind of healthcare facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HospitalType {
    Hospital,
    Clinic,
    DiagnosticCenter,
}

impl HospitalType {
    pub const ALL: &'static [&'static str] = &["hospital", "clinic", "diagnostic_center"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hospital => "hospital",
            Self::Clinic => "clinic",
            Self::DiagnosticCenter => "diagnostic_center",
        }
    }
}

/// Lifecycle status shared by hospitals, doctors and users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityStatus {
    Active,
    Inactive,
    Suspended,
    Pending,
}

impl EntityStatus {
    pub const ALL: &'static [&'static str] = &["active", "inactive", "suspended", "pending"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
            Self::Pending => "pending",
        }
    }
}

// ---------------------------------------------------------------------------
// Appointments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
    Rescheduled,
}

impl AppointmentStatus {
    pub const ALL: &'static [&'static str] = &[
        "scheduled",
        "confirmed",
        "in_progress",
        "completed",
        "cancelled",
        "no_show",
        "rescheduled",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
            Self::Rescheduled => "rescheduled",
        }
    }
}

/// How the consultation takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
    InPerson,
    Video,
    Phone,
}

impl AppointmentType {
    pub const ALL: &'static [&'static str] = &["in_person", "video", "phone"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InPerson => "in_person",
            Self::Video => "video",
            Self::Phone => "phone",
        }
    }
}

/// Party that cancelled an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelledBy {
    Patient,
    Doctor,
    Admin,
}

impl CancelledBy {
    pub const ALL: &'static [&'static str] = &["patient", "doctor", "admin"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Doctor => "doctor",
            Self::Admin => "admin",
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    HospitalAdmin,
    Doctor,
    Patient,
}

impl UserRole {
    pub const ALL: &'static [&'static str] = &["super_admin", "hospital_admin", "doctor", "patient"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::HospitalAdmin => "hospital_admin",
            Self::Doctor => "doctor",
            Self::Patient => "patient",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: &'static [&'static str] = &["male", "female", "other"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}
