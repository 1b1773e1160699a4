//! Cross-field refinements.
//!
//! A refinement is a predicate over a whole record that has already passed
//! every field constraint, so predicates may rely on field types and on
//! defaults having been applied.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::context::EvalContext;
use super::rules::ValidationIssue;
use crate::types::Record;

/// Returns `true` when the record satisfies the invariant.
pub type Predicate = fn(&Record, &EvalContext) -> bool;

#[derive(Clone, Copy)]
pub struct Refinement {
    /// Stable identifier, reported as the issue's rule.
    pub name: &'static str,
    /// Field the error is attached to.
    pub path: &'static str,
    pub message: &'static str,
    predicate: Predicate,
}

impl Refinement {
    pub const fn new(
        name: &'static str,
        path: &'static str,
        message: &'static str,
        predicate: Predicate,
    ) -> Self {
        Self {
            name,
            path,
            message,
            predicate,
        }
    }

    pub fn holds(&self, record: &Record, ctx: &EvalContext) -> bool {
        (self.predicate)(record, ctx)
    }
}

impl fmt::Debug for Refinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refinement")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl Serialize for Refinement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Refinement", 3)?;
        s.serialize_field("name", self.name)?;
        s.serialize_field("path", self.path)?;
        s.serialize_field("message", self.message)?;
        s.end()
    }
}

/// Run refinements in declaration order, collecting every failure.
///
/// The first issue in the returned list is the authoritative one.
pub fn run_refinements(
    refinements: &[Refinement],
    record: &Record,
    ctx: &EvalContext,
) -> Vec<ValidationIssue> {
    refinements
        .iter()
        .filter(|r| !r.holds(record, ctx))
        .map(|r| ValidationIssue::refinement(r.path, r.name, r.message))
        .collect()
}

// ---------------------------------------------------------------------------
// Record accessors for predicates
// ---------------------------------------------------------------------------

/// Whether the normalized record carries a value for `name`.
pub fn has(record: &Record, name: &str) -> bool {
    record.get(name).is_some_and(|v| !v.is_null())
}

pub fn str_of<'a>(record: &'a Record, name: &str) -> Option<&'a str> {
    record.get(name).and_then(Value::as_str)
}

pub fn num_of(record: &Record, name: &str) -> Option<f64> {
    record.get(name).and_then(Value::as_f64)
}
