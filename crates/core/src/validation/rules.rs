//! Rule specification, verdict and issue types.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::constraint::FieldConstraint;
use super::context::EvalContext;
use super::evaluator::evaluate_field;
use super::refinement::{run_refinements, Refinement};
use crate::catalog::{Action, Entity};
use crate::error::CoreError;
use crate::types::Record;

// ---------------------------------------------------------------------------
// Issues and verdicts
// ---------------------------------------------------------------------------

/// Whether an issue came from a single field or from a cross-field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Field,
    Refinement,
}

/// A single path-tagged validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Field the caller should render the message beside. Empty for the
    /// record as a whole.
    pub path: String,
    /// Failed predicate (`required`, `min_length`, ...) or refinement name.
    pub rule: String,
    pub message: String,
    pub kind: IssueKind,
}

impl ValidationIssue {
    pub fn field(path: &str, rule: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            rule: rule.to_string(),
            message: message.into(),
            kind: IssueKind::Field,
        }
    }

    pub fn refinement(path: &str, rule: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            rule: rule.to_string(),
            message: message.into(),
            kind: IssueKind::Refinement,
        }
    }
}

/// Outcome of running a rule specification against one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    /// Defaults applied, cleared fields dropped, unknown keys stripped.
    Accepted { record: Record },
    Rejected { issues: Vec<ValidationIssue> },
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            Self::Accepted { record } => Some(record),
            Self::Rejected { .. } => None,
        }
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::Accepted { .. } => &[],
            Self::Rejected { issues } => issues,
        }
    }

    pub fn into_result(self) -> Result<Record, Vec<ValidationIssue>> {
        match self {
            Self::Accepted { record } => Ok(record),
            Self::Rejected { issues } => Err(issues),
        }
    }

    /// Deserialize the normalized record into its typed form.
    pub fn into_record<T: DeserializeOwned>(self) -> Result<T, CoreError> {
        let record = self.into_result().map_err(CoreError::Rejected)?;
        Ok(serde_json::from_value(Value::Object(record))?)
    }
}

// ---------------------------------------------------------------------------
// Rule specification
// ---------------------------------------------------------------------------

/// Field constraints and refinements for one (entity, action) pair.
#[derive(Debug, Clone)]
pub struct RuleSpec {
    entity: Entity,
    action: Action,
    fields: Vec<(&'static str, FieldConstraint)>,
    refinements: Vec<Refinement>,
}

/// Serializable view of a [`RuleSpec`].
#[derive(Debug, Serialize)]
pub struct SpecDescriptor<'a> {
    pub entity: Entity,
    pub action: Action,
    pub fields: Vec<FieldDescriptor<'a>>,
    pub refinements: &'a [Refinement],
}

#[derive(Debug, Serialize)]
pub struct FieldDescriptor<'a> {
    pub name: &'static str,
    #[serde(flatten)]
    pub constraint: &'a FieldConstraint,
}

impl RuleSpec {
    pub fn new(entity: Entity, action: Action) -> Self {
        Self {
            entity,
            action,
            fields: Vec::new(),
            refinements: Vec::new(),
        }
    }

    /// Append a field constraint. Field names are unique within a spec.
    pub fn field(mut self, name: &'static str, constraint: FieldConstraint) -> Self {
        debug_assert!(
            self.constraint(name).is_none(),
            "duplicate field '{name}' in {}/{}",
            self.entity,
            self.action
        );
        self.fields.push((name, constraint));
        self
    }

    pub fn refine(mut self, refinement: Refinement) -> Self {
        self.refinements.push(refinement);
        self
    }

    /// Derive the "apply only what is present" variant of this spec.
    ///
    /// Every field becomes optional with no default, predicates are kept,
    /// and refinements are dropped (re-add the ones that hold on partial
    /// records with [`RuleSpec::refine`]).
    pub fn relaxed(&self, action: Action) -> Self {
        Self {
            entity: self.entity,
            action,
            fields: self
                .fields
                .iter()
                .map(|(name, c)| (*name, c.relaxed()))
                .collect(),
            refinements: Vec::new(),
        }
    }

    /// Drop fields by name.
    pub fn without(mut self, names: &[&str]) -> Self {
        self.fields.retain(|(name, _)| !names.contains(name));
        self
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldConstraint)> {
        self.fields.iter().map(|(name, c)| (*name, c))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    pub fn constraint(&self, name: &str) -> Option<&FieldConstraint> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, c)| c)
    }

    pub fn refinements(&self) -> &[Refinement] {
        &self.refinements
    }

    pub fn describe(&self) -> SpecDescriptor<'_> {
        SpecDescriptor {
            entity: self.entity,
            action: self.action,
            fields: self
                .fields
                .iter()
                .map(|(name, constraint)| FieldDescriptor {
                    name: *name,
                    constraint,
                })
                .collect(),
            refinements: &self.refinements,
        }
    }

    /// Validate against the current local day.
    pub fn validate(&self, candidate: &Value) -> Verdict {
        self.validate_with(candidate, &EvalContext::now())
    }

    /// Validate a candidate record.
    ///
    /// Every field is evaluated (fail-fast within a field). Refinements run
    /// only when no field failed, in declaration order.
    pub fn validate_with(&self, candidate: &Value, ctx: &EvalContext) -> Verdict {
        let Value::Object(input) = candidate else {
            return Verdict::Rejected {
                issues: vec![ValidationIssue::field("", "type", "Expected an object")],
            };
        };

        let mut record = Record::new();
        let mut issues = Vec::new();
        for (name, constraint) in &self.fields {
            match evaluate_field(name, constraint, input.get(*name), ctx) {
                Ok(Some(value)) => {
                    record.insert((*name).to_string(), value);
                }
                Ok(None) => {}
                Err(issue) => issues.push(issue),
            }
        }
        if !issues.is_empty() {
            return Verdict::Rejected { issues };
        }

        let issues = run_refinements(&self.refinements, &record, ctx);
        if issues.is_empty() {
            Verdict::Accepted { record }
        } else {
            Verdict::Rejected { issues }
        }
    }
}
