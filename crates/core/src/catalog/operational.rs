//! Operational hospital specifications: location and bed capacity.
//!
//! This is a separate view of a hospital from onboarding (`zipCode` instead
//! of `pincode`, mandatory bed counts). Both are kept as distinct specs.

use serde::{Deserialize, Serialize};

use super::{Action, Entity};
use crate::types::Record;
use crate::validation::constraint::FieldConstraint;
use crate::validation::context::EvalContext;
use crate::validation::refinement::{num_of, Refinement};
use crate::validation::rules::RuleSpec;
use crate::vocab::EntityStatus;

pub const DEFAULT_COUNTRY: &str = "India";

pub fn create() -> RuleSpec {
    RuleSpec::new(Entity::HospitalOperations, Action::Create)
        .field("name", FieldConstraint::string().min_len(2).max_len(200))
        .field("address", FieldConstraint::string().min_len(5).max_len(500))
        .field("city", FieldConstraint::string().min_len(2).max_len(100))
        .field("state", FieldConstraint::string().min_len(2).max_len(100))
        .field("zipCode", FieldConstraint::zip_code())
        .field(
            "country",
            FieldConstraint::string()
                .min_len(2)
                .max_len(100)
                .default_value(DEFAULT_COUNTRY),
        )
        .field(
            "latitude",
            FieldConstraint::number().min(-90.0).max(90.0).optional(),
        )
        .field(
            "longitude",
            FieldConstraint::number().min(-180.0).max(180.0).optional(),
        )
        .field("phone", FieldConstraint::phone())
        .field("email", FieldConstraint::email())
        .field("website", FieldConstraint::url().empty_as_absent())
        .field("totalBeds", FieldConstraint::count())
        .field("availableBeds", FieldConstraint::count())
        .field("icuBeds", FieldConstraint::count().optional())
        .field("emergencyServices", FieldConstraint::boolean().default_value(false))
        .field(
            "status",
            FieldConstraint::one_of(EntityStatus::ALL).default_value(EntityStatus::Active.as_str()),
        )
        .refine(AVAILABLE_WITHIN_TOTAL)
        .refine(ICU_WITHIN_TOTAL)
}

/// Partial updates keep the capacity checks; each passes unless both of
/// its counts are supplied.
pub fn update() -> RuleSpec {
    create()
        .relaxed(Action::Update)
        .refine(AVAILABLE_WITHIN_TOTAL)
        .refine(ICU_WITHIN_TOTAL)
}

pub(super) fn specs() -> Vec<RuleSpec> {
    vec![create(), update()]
}

// ---------------------------------------------------------------------------
// Refinements
// ---------------------------------------------------------------------------

fn within_total(record: &Record, field: &str) -> bool {
    match (num_of(record, field), num_of(record, "totalBeds")) {
        (Some(part), Some(total)) => part <= total,
        _ => true,
    }
}

fn available_within_total(record: &Record, _: &EvalContext) -> bool {
    within_total(record, "availableBeds")
}

fn icu_within_total(record: &Record, _: &EvalContext) -> bool {
    within_total(record, "icuBeds")
}

pub const AVAILABLE_WITHIN_TOTAL: Refinement = Refinement::new(
    "available_beds_within_total",
    "availableBeds",
    "Available beds cannot exceed total beds",
    available_within_total,
);

pub const ICU_WITHIN_TOTAL: Refinement = Refinement::new(
    "icu_beds_within_total",
    "icuBeds",
    "ICU beds cannot exceed total beds",
    icu_within_total,
);

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalOperations {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: String,
    pub email: String,
    pub website: Option<String>,
    pub total_beds: u32,
    pub available_beds: u32,
    pub icu_beds: Option<u32>,
    pub emergency_services: bool,
    pub status: EntityStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHospitalOperations {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub total_beds: Option<u32>,
    pub available_beds: Option<u32>,
    pub icu_beds: Option<u32>,
    pub emergency_services: Option<bool>,
    pub status: Option<EntityStatus>,
}
