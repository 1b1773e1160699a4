use crate::catalog::{Action, Entity};
use crate::validation::rules::ValidationIssue;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("No rule specification for {entity} / {action}")]
    UnknownSpec { entity: Entity, action: Action },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Validation failed with {} issue(s)", .0.len())]
    Rejected(Vec<ValidationIssue>),

    #[error("Record does not match its declared type: {0}")]
    Deserialize(#[from] serde_json::Error),
}
