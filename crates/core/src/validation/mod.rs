//! Data validation engine.
//!
//! Field constraint descriptors, a pure-logic field evaluator, cross-field
//! refinements and the rule specification that ties them together. No I/O.

pub mod constraint;
pub mod context;
pub mod evaluator;
pub mod formats;
pub mod refinement;
pub mod rules;
