//! User account specifications.
//!
//! Patients self-register phone-first, so their email and password are
//! optional. Every other role logs in with institutional credentials and
//! must supply both.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common;
use super::{Action, Entity};
use crate::types::Record;
use crate::validation::constraint::FieldConstraint;
use crate::validation::context::EvalContext;
use crate::validation::refinement::{has, str_of, Refinement};
use crate::validation::rules::RuleSpec;
use crate::vocab::{Gender, UserRole};

pub fn create() -> RuleSpec {
    RuleSpec::new(Entity::User, Action::Create)
        .field("name", FieldConstraint::string().min_len(2).max_len(100))
        .field("email", FieldConstraint::email().empty_as_absent())
        .field("phone", FieldConstraint::phone())
        .field("password", FieldConstraint::strong_password().optional())
        .field(
            "role",
            FieldConstraint::one_of(UserRole::ALL).default_value(UserRole::Patient.as_str()),
        )
        .field("gender", FieldConstraint::one_of(Gender::ALL).optional())
        .field(
            "dateOfBirth",
            FieldConstraint::date().not_in_future().optional(),
        )
        .field("hospitalId", FieldConstraint::uuid().optional())
        .field(
            "address",
            FieldConstraint::string().max_len(500).optional(),
        )
        .refine(STAFF_EMAIL_REQUIRED)
        .refine(STAFF_PASSWORD_REQUIRED)
}

/// Profile edits. Passwords change through the reset flow only.
pub fn update() -> RuleSpec {
    create().relaxed(Action::Update).without(&["password"])
}

/// Admin-initiated password reset.
pub fn reset_password() -> RuleSpec {
    common::with_new_password(RuleSpec::new(Entity::User, Action::ResetPassword))
}

pub(super) fn specs() -> Vec<RuleSpec> {
    vec![
        create(),
        update(),
        common::status_update(Entity::User),
        reset_password(),
    ]
}

// ---------------------------------------------------------------------------
// Refinements
// ---------------------------------------------------------------------------

/// Role defaults to patient before refinements run.
fn is_patient(record: &Record) -> bool {
    str_of(record, "role") == Some(UserRole::Patient.as_str())
}

fn staff_email_present(record: &Record, _: &EvalContext) -> bool {
    is_patient(record) || has(record, "email")
}

fn staff_password_present(record: &Record, _: &EvalContext) -> bool {
    is_patient(record) || has(record, "password")
}

pub const STAFF_EMAIL_REQUIRED: Refinement = Refinement::new(
    "staff_email_required",
    "email",
    "Email is required for non-patient roles",
    staff_email_present,
);

pub const STAFF_PASSWORD_REQUIRED: Refinement = Refinement::new(
    "staff_password_required",
    "password",
    "Password is required for non-patient roles",
    staff_password_present,
);

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub password: Option<String>,
    pub role: UserRole,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub hospital_id: Option<Uuid>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub hospital_id: Option<Uuid>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPasswordReset {
    pub new_password: String,
    pub confirm_password: String,
}
