//! The fixed catalog of rule specifications, keyed by (entity, action).
//!
//! The catalog is built once on first use and is read-only afterwards; it
//! can be shared across threads without coordination.

pub mod appointment;
pub mod auth;
pub mod common;
pub mod doctor;
pub mod hospital;
pub mod operational;
pub mod user;

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::validation::context::EvalContext;
use crate::validation::rules::{RuleSpec, Verdict};

// ---------------------------------------------------------------------------
// Selectors
// ---------------------------------------------------------------------------

/// Record family a specification applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Entity {
    /// Onboarding view of a hospital (type, pincode, admin provisioning).
    Hospital,
    /// Operational view of a hospital (geo position, bed capacity).
    HospitalOperations,
    Doctor,
    User,
    Appointment,
    Auth,
}

impl Entity {
    pub const ALL: &'static [Entity] = &[
        Self::Hospital,
        Self::HospitalOperations,
        Self::Doctor,
        Self::User,
        Self::Appointment,
        Self::Auth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hospital => "hospital",
            Self::HospitalOperations => "hospital-operations",
            Self::Doctor => "doctor",
            Self::User => "user",
            Self::Appointment => "appointment",
            Self::Auth => "auth",
        }
    }
}

/// Operation a specification validates input for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Create,
    Update,
    StatusUpdate,
    Reject,
    Verify,
    Cancel,
    Reschedule,
    ResetPassword,
    Login,
    Register,
    ForgotPassword,
}

impl Action {
    pub const ALL: &'static [Action] = &[
        Self::Create,
        Self::Update,
        Self::StatusUpdate,
        Self::Reject,
        Self::Verify,
        Self::Cancel,
        Self::Reschedule,
        Self::ResetPassword,
        Self::Login,
        Self::Register,
        Self::ForgotPassword,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::StatusUpdate => "status-update",
            Self::Reject => "reject",
            Self::Verify => "verify",
            Self::Cancel => "cancel",
            Self::Reschedule => "reschedule",
            Self::ResetPassword => "reset-password",
            Self::Login => "login",
            Self::Register => "register",
            Self::ForgotPassword => "forgot-password",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Entity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<_> = Self::ALL.iter().map(Entity::as_str).collect();
                CoreError::Validation(format!(
                    "Unknown entity '{s}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

impl FromStr for Action {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<_> = Self::ALL.iter().map(Action::as_str).collect();
                CoreError::Validation(format!(
                    "Unknown action '{s}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Every rule specification the platform knows about.
#[derive(Debug)]
pub struct RuleCatalog {
    specs: Vec<RuleSpec>,
}

impl RuleCatalog {
    /// Assemble the catalog from each entity's specifications.
    pub fn build() -> Self {
        let specs = [
            hospital::specs(),
            operational::specs(),
            doctor::specs(),
            user::specs(),
            appointment::specs(),
            auth::specs(),
        ]
        .into_iter()
        .flatten()
        .collect();
        Self { specs }
    }

    pub fn get(&self, entity: Entity, action: Action) -> Option<&RuleSpec> {
        self.specs
            .iter()
            .find(|s| s.entity() == entity && s.action() == action)
    }

    /// Like [`RuleCatalog::get`], but a missing pair is an error.
    pub fn require(&self, entity: Entity, action: Action) -> Result<&RuleSpec, CoreError> {
        self.get(entity, action)
            .ok_or(CoreError::UnknownSpec { entity, action })
    }

    pub fn specs(&self) -> &[RuleSpec] {
        &self.specs
    }
}

static CATALOG: LazyLock<RuleCatalog> = LazyLock::new(RuleCatalog::build);

/// The process-wide catalog.
pub fn catalog() -> &'static RuleCatalog {
    &CATALOG
}

/// Validate `candidate` against the `RuleSpec` registered for (entity, action).
pub fn validate(
    entity: Entity,
    action: Action,
    candidate: &Value,
    ctx: &EvalContext,
) -> Result<Verdict, CoreError> {
    Ok(catalog().require(entity, action)?.validate_with(candidate, ctx))
}
