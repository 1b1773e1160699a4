//! Building blocks shared by several entities' specifications.

use serde::{Deserialize, Serialize};

use super::{Action, Entity};
use crate::types::Record;
use crate::validation::constraint::FieldConstraint;
use crate::validation::context::EvalContext;
use crate::validation::refinement::{str_of, Refinement};
use crate::validation::rules::RuleSpec;
use crate::vocab::EntityStatus;

/// Upper bound for free-text reasons and short notes.
pub const REASON_MAX_LEN: usize = 500;

/// Rejections must explain themselves.
pub const REJECTION_REASON_MIN_LEN: usize = 10;

/// Upper bound for long descriptive text (descriptions, bios).
pub const LONG_TEXT_MAX_LEN: usize = 2000;

/// Status change for hospitals, doctors and users.
pub fn status_update(entity: Entity) -> RuleSpec {
    RuleSpec::new(entity, Action::StatusUpdate)
        .field("status", FieldConstraint::one_of(EntityStatus::ALL))
        .field(
            "reason",
            FieldConstraint::string().max_len(REASON_MAX_LEN).optional(),
        )
}

/// Rejection of a hospital or doctor application.
pub fn rejection(entity: Entity) -> RuleSpec {
    RuleSpec::new(entity, Action::Reject).field(
        "reason",
        FieldConstraint::string()
            .min_len(REJECTION_REASON_MIN_LEN)
            .max_len(REASON_MAX_LEN),
    )
}

/// Add `newPassword` / `confirmPassword` and the confirmation check.
pub fn with_new_password(spec: RuleSpec) -> RuleSpec {
    spec.field("newPassword", FieldConstraint::strong_password())
        .field(
            "confirmPassword",
            FieldConstraint::string()
                .min_len(1)
                .with_message("Please confirm your password"),
        )
        .refine(NEW_PASSWORD_CONFIRMED)
}

fn new_password_confirmed(record: &Record, _: &EvalContext) -> bool {
    str_of(record, "newPassword") == str_of(record, "confirmPassword")
}

pub const NEW_PASSWORD_CONFIRMED: Refinement = Refinement::new(
    "passwords_match",
    "confirmPassword",
    "Passwords do not match",
    new_password_confirmed,
);

// ---------------------------------------------------------------------------
// Shared records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub status: EntityStatus,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    pub reason: String,
}
