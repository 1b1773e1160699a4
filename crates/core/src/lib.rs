//! Validation rule catalog for the healthcare platform.
//!
//! This crate has **zero I/O**. Every rule specification is plain data built
//! once at first use, and every validation call is a pure function of the
//! specification, the candidate record and the evaluation day.

pub mod catalog;
pub mod error;
pub mod types;
pub mod validation;
pub mod vocab;
