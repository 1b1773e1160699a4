//! Appointment specifications.
//!
//! Booking and rescheduling both refuse dates before the evaluation day;
//! same-day appointments are allowed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::REASON_MAX_LEN;
use super::{Action, Entity};
use crate::types::Record;
use crate::validation::constraint::FieldConstraint;
use crate::validation::context::EvalContext;
use crate::validation::refinement::{str_of, Refinement};
use crate::validation::rules::RuleSpec;
use crate::vocab::{AppointmentStatus, AppointmentType, CancelledBy};

pub const NOTES_MAX_LEN: usize = 1000;

pub fn create() -> RuleSpec {
    RuleSpec::new(Entity::Appointment, Action::Create)
        .field("patientId", FieldConstraint::uuid())
        .field("doctorId", FieldConstraint::uuid())
        .field("hospitalId", FieldConstraint::uuid())
        .field("appointmentDate", FieldConstraint::date().not_in_past())
        .field("startTime", FieldConstraint::time())
        .field("endTime", FieldConstraint::time().optional())
        .field(
            "type",
            FieldConstraint::one_of(AppointmentType::ALL)
                .default_value(AppointmentType::InPerson.as_str()),
        )
        .field(
            "reason",
            FieldConstraint::string().max_len(REASON_MAX_LEN).optional(),
        )
        .field(
            "notes",
            FieldConstraint::string().max_len(NOTES_MAX_LEN).optional(),
        )
        .field("isEmergency", FieldConstraint::boolean().default_value(false))
        .refine(END_AFTER_START)
}

/// A supplied date is still refused if it lies in the past.
pub fn update() -> RuleSpec {
    create().relaxed(Action::Update).refine(END_AFTER_START)
}

pub fn status_update() -> RuleSpec {
    RuleSpec::new(Entity::Appointment, Action::StatusUpdate)
        .field("status", FieldConstraint::one_of(AppointmentStatus::ALL))
        .field(
            "notes",
            FieldConstraint::string().max_len(REASON_MAX_LEN).optional(),
        )
}

pub fn cancel() -> RuleSpec {
    RuleSpec::new(Entity::Appointment, Action::Cancel)
        .field(
            "reason",
            FieldConstraint::string().min_len(1).max_len(REASON_MAX_LEN),
        )
        .field("cancelledBy", FieldConstraint::one_of(CancelledBy::ALL))
}

pub fn reschedule() -> RuleSpec {
    RuleSpec::new(Entity::Appointment, Action::Reschedule)
        .field("appointmentDate", FieldConstraint::date().not_in_past())
        .field("startTime", FieldConstraint::time())
        .field("endTime", FieldConstraint::time().optional())
        .field(
            "reason",
            FieldConstraint::string().max_len(REASON_MAX_LEN).optional(),
        )
        .refine(END_AFTER_START)
}

pub(super) fn specs() -> Vec<RuleSpec> {
    vec![create(), update(), status_update(), cancel(), reschedule()]
}

// ---------------------------------------------------------------------------
// Refinements
// ---------------------------------------------------------------------------

/// `HH:mm` strings are zero-padded, so lexical order is clock order.
fn end_after_start(record: &Record, _: &EvalContext) -> bool {
    match (str_of(record, "startTime"), str_of(record, "endTime")) {
        (Some(start), Some(end)) => end > start,
        _ => true,
    }
}

pub const END_AFTER_START: Refinement = Refinement::new(
    "end_after_start",
    "endTime",
    "End time must be after start time",
    end_after_start,
);

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointment {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub hospital_id: Uuid,
    pub appointment_date: NaiveDate,
    pub start_time: String,
    pub end_time: Option<String>,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub is_emergency: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointment {
    pub patient_id: Option<Uuid>,
    pub doctor_id: Option<Uuid>,
    pub hospital_id: Option<Uuid>,
    pub appointment_date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(rename = "type")]
    pub appointment_type: Option<AppointmentType>,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub is_emergency: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentStatusUpdate {
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentCancellation {
    pub reason: String,
    pub cancelled_by: CancelledBy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentReschedule {
    pub appointment_date: NaiveDate,
    pub start_time: String,
    pub end_time: Option<String>,
    pub reason: Option<String>,
}
