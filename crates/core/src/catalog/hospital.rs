//! Hospital onboarding specifications.
//!
//! Onboarding registers a facility and may provision its first admin
//! account in the same request. The admin sub-fields are optional in the
//! table, but once any of them is supplied the admin needs an email and a
//! password to log in with.

use serde::{Deserialize, Serialize};

use super::common::{self, LONG_TEXT_MAX_LEN};
use super::{Action, Entity};
use crate::types::Record;
use crate::validation::constraint::FieldConstraint;
use crate::validation::context::EvalContext;
use crate::validation::refinement::{has, Refinement};
use crate::validation::rules::RuleSpec;
use crate::vocab::HospitalType;

/// Fields describing the initial hospital admin account.
pub const ADMIN_FIELDS: &[&str] = &["adminName", "adminEmail", "adminPhone", "adminPassword"];

pub fn create() -> RuleSpec {
    RuleSpec::new(Entity::Hospital, Action::Create)
        .field("name", FieldConstraint::string().min_len(2).max_len(200))
        .field(
            "type",
            FieldConstraint::one_of(HospitalType::ALL).default_value(HospitalType::Hospital.as_str()),
        )
        .field(
            "registrationNumber",
            FieldConstraint::string().min_len(3).max_len(50).optional(),
        )
        .field("email", FieldConstraint::email())
        .field("phone", FieldConstraint::phone())
        .field("alternatePhone", FieldConstraint::phone().empty_as_absent())
        .field("website", FieldConstraint::url().empty_as_absent())
        .field("address", FieldConstraint::string().min_len(5).max_len(500))
        .field("city", FieldConstraint::string().min_len(2).max_len(100))
        .field("state", FieldConstraint::string().min_len(2).max_len(100))
        .field("pincode", FieldConstraint::pincode())
        .field(
            "description",
            FieldConstraint::string().max_len(LONG_TEXT_MAX_LEN).optional(),
        )
        .field("emergencyServices", FieldConstraint::boolean().default_value(false))
        .field("totalBeds", FieldConstraint::count().optional())
        .field(
            "adminName",
            FieldConstraint::string().min_len(2).max_len(100).optional(),
        )
        .field("adminEmail", FieldConstraint::email().empty_as_absent())
        .field("adminPhone", FieldConstraint::phone().empty_as_absent())
        .field("adminPassword", FieldConstraint::strong_password().optional())
        .refine(ADMIN_EMAIL_REQUIRED)
        .refine(ADMIN_PASSWORD_REQUIRED)
}

/// Profile edits. Admin provisioning only happens at onboarding.
pub fn update() -> RuleSpec {
    create().relaxed(Action::Update).without(ADMIN_FIELDS)
}

pub(super) fn specs() -> Vec<RuleSpec> {
    vec![
        create(),
        update(),
        common::status_update(Entity::Hospital),
        common::rejection(Entity::Hospital),
    ]
}

// ---------------------------------------------------------------------------
// Refinements
// ---------------------------------------------------------------------------

fn provisions_admin(record: &Record) -> bool {
    ADMIN_FIELDS.iter().any(|field| has(record, field))
}

fn admin_email_present(record: &Record, _: &EvalContext) -> bool {
    !provisions_admin(record) || has(record, "adminEmail")
}

fn admin_password_present(record: &Record, _: &EvalContext) -> bool {
    !provisions_admin(record) || has(record, "adminPassword")
}

pub const ADMIN_EMAIL_REQUIRED: Refinement = Refinement::new(
    "admin_email_required",
    "adminEmail",
    "Admin email is required when provisioning a hospital admin",
    admin_email_present,
);

pub const ADMIN_PASSWORD_REQUIRED: Refinement = Refinement::new(
    "admin_password_required",
    "adminPassword",
    "Admin password is required when provisioning a hospital admin",
    admin_password_present,
);

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHospital {
    pub name: String,
    #[serde(rename = "type")]
    pub hospital_type: HospitalType,
    pub registration_number: Option<String>,
    pub email: String,
    pub phone: String,
    pub alternate_phone: Option<String>,
    pub website: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub description: Option<String>,
    pub emergency_services: bool,
    pub total_beds: Option<u32>,
    pub admin_name: Option<String>,
    pub admin_email: Option<String>,
    pub admin_phone: Option<String>,
    pub admin_password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHospital {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub hospital_type: Option<HospitalType>,
    pub registration_number: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub alternate_phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub description: Option<String>,
    pub emergency_services: Option<bool>,
    pub total_beds: Option<u32>,
}
