//! Evaluation-time inputs.

use chrono::{Local, NaiveDate};

/// Everything outside the candidate record that a verdict depends on.
///
/// Only the calendar day matters: "not in the past" and "not in the future"
/// checks compare whole days, so a date equal to `today` always passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalContext {
    pub today: NaiveDate,
}

impl EvalContext {
    /// Context for the current local calendar day.
    pub fn now() -> Self {
        Self {
            today: Local::now().date_naive(),
        }
    }

    /// Context pinned to a fixed day (tests, replays).
    pub fn on(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::now()
    }
}
