//! Doctor specifications.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{self, LONG_TEXT_MAX_LEN, REASON_MAX_LEN};
use super::{Action, Entity};
use crate::validation::constraint::FieldConstraint;
use crate::validation::rules::RuleSpec;
use crate::vocab::Gender;

/// Upper bound on years of practice.
pub const MAX_EXPERIENCE_YEARS: f64 = 70.0;

pub fn create() -> RuleSpec {
    RuleSpec::new(Entity::Doctor, Action::Create)
        .field("name", FieldConstraint::string().min_len(2).max_len(100))
        .field("email", FieldConstraint::email())
        .field("phone", FieldConstraint::phone())
        .field("gender", FieldConstraint::one_of(Gender::ALL).optional())
        .field(
            "specialization",
            FieldConstraint::string().min_len(2).max_len(100),
        )
        .field(
            "qualification",
            FieldConstraint::string().min_len(2).max_len(200),
        )
        .field("licenseNumber", FieldConstraint::string().min_len(5).max_len(50))
        .field(
            "experienceYears",
            FieldConstraint::integer().min(0.0).max(MAX_EXPERIENCE_YEARS),
        )
        .field("hospitalId", FieldConstraint::uuid())
        .field("consultationFee", FieldConstraint::number().min(0.0).optional())
        .field(
            "bio",
            FieldConstraint::string().max_len(LONG_TEXT_MAX_LEN).optional(),
        )
        .field("profileImage", FieldConstraint::url().empty_as_absent())
        .field("isAvailable", FieldConstraint::boolean().default_value(true))
}

pub fn update() -> RuleSpec {
    create().relaxed(Action::Update)
}

/// Admin decision on a doctor's credentials.
pub fn verify() -> RuleSpec {
    RuleSpec::new(Entity::Doctor, Action::Verify)
        .field("isVerified", FieldConstraint::boolean())
        .field(
            "notes",
            FieldConstraint::string().max_len(REASON_MAX_LEN).optional(),
        )
}

pub(super) fn specs() -> Vec<RuleSpec> {
    vec![
        create(),
        update(),
        verify(),
        common::rejection(Entity::Doctor),
        common::status_update(Entity::Doctor),
    ]
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctor {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: Option<Gender>,
    pub specialization: String,
    pub qualification: String,
    pub license_number: String,
    pub experience_years: u32,
    pub hospital_id: Uuid,
    pub consultation_fee: Option<f64>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub is_available: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDoctor {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub specialization: Option<String>,
    pub qualification: Option<String>,
    pub license_number: Option<String>,
    pub experience_years: Option<u32>,
    pub hospital_id: Option<Uuid>,
    pub consultation_fee: Option<f64>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorVerification {
    pub is_verified: bool,
    pub notes: Option<String>,
}
