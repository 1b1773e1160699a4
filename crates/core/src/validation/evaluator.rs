//! Field evaluator — pure logic, no I/O.
//!
//! Interprets one [`FieldConstraint`] against one raw value. Evaluation of a
//! field stops at its first failing predicate; callers decide whether to keep
//! going with other fields.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use uuid::Uuid;

use super::constraint::{FieldConstraint, FieldKind};
use super::context::EvalContext;
use super::rules::ValidationIssue;

/// Evaluate a single field.
///
/// Returns the normalized value (`None` when the field is legitimately
/// absent) or the first violation.
pub fn evaluate_field(
    name: &str,
    constraint: &FieldConstraint,
    raw: Option<&Value>,
    ctx: &EvalContext,
) -> Result<Option<Value>, ValidationIssue> {
    let value = match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() && constraint.empty_as_absent => None,
        Some(v) => Some(v),
    };

    let Some(value) = value else {
        if constraint.required {
            let label = field_label(name);
            return Err(fail(name, constraint, "required", format!("{label} is required")));
        }
        return Ok(constraint.default.clone());
    };

    let normalized = match &constraint.kind {
        FieldKind::String {
            min_len,
            max_len,
            format,
        } => {
            let s = expect_str(name, value, "must be text")?;
            let len = s.chars().count();
            if let Some(min) = min_len {
                if len < *min {
                    let msg = format!("{} must be at least {min} characters", field_label(name));
                    return Err(fail(name, constraint, "min_length", msg));
                }
            }
            if let Some(max) = max_len {
                if len > *max {
                    let msg = format!("{} must be at most {max} characters", field_label(name));
                    return Err(fail(name, constraint, "max_length", msg));
                }
            }
            if let Some(format) = format {
                if !format.matches(s) {
                    return Err(fail(name, constraint, "format", format.message().to_string()));
                }
            }
            value.clone()
        }

        FieldKind::Number {
            min,
            max,
            integer,
            positive,
        } => {
            let Some(n) = value.as_f64() else {
                return Err(type_error(name, "must be a number"));
            };
            if *integer && n.fract() != 0.0 {
                let msg = format!("{} must be a whole number", field_label(name));
                return Err(fail(name, constraint, "integer", msg));
            }
            // Whole values are stored as `i64`; anything wider would saturate.
            if *integer && n < i64::MIN as f64 {
                let msg = format!("{} is too small", field_label(name));
                return Err(fail(name, constraint, "min_value", msg));
            }
            if *integer && n >= i64::MAX as f64 {
                let msg = format!("{} is too large", field_label(name));
                return Err(fail(name, constraint, "max_value", msg));
            }
            if *positive && n <= 0.0 {
                let msg = format!("{} must be greater than 0", field_label(name));
                return Err(fail(name, constraint, "positive", msg));
            }
            if let Some(min) = min {
                if n < *min {
                    let msg = format!("{} must be at least {min}", field_label(name));
                    return Err(fail(name, constraint, "min_value", msg));
                }
            }
            if let Some(max) = max {
                if n > *max {
                    let msg = format!("{} must be at most {max}", field_label(name));
                    return Err(fail(name, constraint, "max_value", msg));
                }
            }
            if *integer && value.as_i64().is_none() && value.as_u64().is_none() {
                // Whole-valued floats such as `5.0` are stored as integers.
                Value::from(n as i64)
            } else {
                value.clone()
            }
        }

        FieldKind::Boolean => {
            if !value.is_boolean() {
                return Err(type_error(name, "must be true or false"));
            }
            value.clone()
        }

        FieldKind::Date {
            not_in_past,
            not_in_future,
        } => {
            let s = expect_str(name, value, "must be a valid date")?;
            let Some(day) = parse_calendar_day(s) else {
                return Err(type_error(name, "must be a valid date"));
            };
            if *not_in_past && day < ctx.today {
                let msg = format!("{} cannot be in the past", field_label(name));
                return Err(fail(name, constraint, "not_in_past", msg));
            }
            if *not_in_future && day > ctx.today {
                let msg = format!("{} cannot be in the future", field_label(name));
                return Err(fail(name, constraint, "not_in_future", msg));
            }
            Value::String(day.format("%Y-%m-%d").to_string())
        }

        FieldKind::Enum { values } => {
            let s = expect_str(name, value, "must be text")?;
            if !values.contains(&s) {
                let msg = format!(
                    "{} must be one of: {}",
                    field_label(name),
                    values.join(", ")
                );
                return Err(fail(name, constraint, "enum_values", msg));
            }
            value.clone()
        }

        FieldKind::Uuid => {
            let s = expect_str(name, value, "must be a valid UUID")?;
            match Uuid::try_parse(s) {
                Ok(id) => Value::String(id.hyphenated().to_string()),
                Err(_) => {
                    let msg = format!("{} must be a valid UUID", field_label(name));
                    return Err(fail(name, constraint, "uuid", msg));
                }
            }
        }
    };

    Ok(Some(normalized))
}

/// Parse a calendar day from `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Timestamps keep the calendar day of their own offset, i.e. the day the
/// sender saw.
pub fn parse_calendar_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Human-readable label for a camelCase field name.
///
/// `appointmentDate` becomes `Appointment date`, `hospitalId` becomes
/// `Hospital ID`.
pub fn field_label(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for c in name.chars() {
        if c.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }

    let mut label = String::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            label.push(' ');
        }
        if word == "id" {
            label.push_str("ID");
        } else if i == 0 {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                label.extend(first.to_uppercase());
                label.push_str(chars.as_str());
            }
        } else {
            label.push_str(word);
        }
    }
    label
}

fn expect_str<'a>(name: &str, value: &'a Value, what: &str) -> Result<&'a str, ValidationIssue> {
    value.as_str().ok_or_else(|| type_error(name, what))
}

/// Type mismatches always use the generated message.
fn type_error(name: &str, what: &str) -> ValidationIssue {
    ValidationIssue::field(name, "type", format!("{} {what}", field_label(name)))
}

fn fail(name: &str, constraint: &FieldConstraint, rule: &str, generated: String) -> ValidationIssue {
    let message = constraint
        .message
        .map(str::to_string)
        .unwrap_or(generated);
    ValidationIssue::field(name, rule, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> EvalContext {
        EvalContext::on(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap())
    }

    fn eval(c: &FieldConstraint, v: Option<Value>) -> Result<Option<Value>, ValidationIssue> {
        evaluate_field("testField", c, v.as_ref(), &ctx())
    }

    fn rule_of(result: Result<Option<Value>, ValidationIssue>) -> String {
        result.expect_err("expected a violation").rule
    }

    // -----------------------------------------------------------------------
    // Presence
    // -----------------------------------------------------------------------

    #[test]
    fn required_fails_when_missing_or_null() {
        let c = FieldConstraint::string();
        assert_eq!(rule_of(eval(&c, None)), "required");
        assert_eq!(rule_of(eval(&c, Some(Value::Null))), "required");
    }

    #[test]
    fn required_message_uses_label() {
        let err = evaluate_field("appointmentDate", &FieldConstraint::date(), None, &ctx())
            .unwrap_err();
        assert_eq!(err.path, "appointmentDate");
        assert_eq!(err.message, "Appointment date is required");
    }

    #[test]
    fn optional_missing_is_absent() {
        let c = FieldConstraint::string().optional();
        assert_eq!(eval(&c, None).unwrap(), None);
    }

    #[test]
    fn default_is_substituted_when_absent() {
        let c = FieldConstraint::boolean().default_value(false);
        assert_eq!(eval(&c, None).unwrap(), Some(json!(false)));
        assert_eq!(eval(&c, Some(json!(true))).unwrap(), Some(json!(true)));
    }

    #[test]
    fn empty_string_escape_yields_absent() {
        let c = FieldConstraint::url().empty_as_absent();
        assert_eq!(eval(&c, Some(json!(""))).unwrap(), None);
        assert_eq!(rule_of(eval(&c, Some(json!("not a url")))), "format");
    }

    #[test]
    fn empty_string_without_escape_is_checked() {
        let c = FieldConstraint::string().min_len(2);
        assert_eq!(rule_of(eval(&c, Some(json!("")))), "min_length");
    }

    #[test]
    fn custom_message_replaces_generated_one() {
        let c = FieldConstraint::string()
            .min_len(1)
            .with_message("Password is required");
        assert_eq!(eval(&c, None).unwrap_err().message, "Password is required");
        assert_eq!(
            eval(&c, Some(json!(""))).unwrap_err().message,
            "Password is required"
        );
    }

    // -----------------------------------------------------------------------
    // Strings
    // -----------------------------------------------------------------------

    #[test]
    fn string_length_bounds_are_inclusive() {
        let c = FieldConstraint::string().min_len(2).max_len(4);
        assert!(eval(&c, Some(json!("ab"))).is_ok());
        assert!(eval(&c, Some(json!("abcd"))).is_ok());
        assert_eq!(rule_of(eval(&c, Some(json!("a")))), "min_length");
        assert_eq!(rule_of(eval(&c, Some(json!("abcde")))), "max_length");
    }

    #[test]
    fn string_length_counts_characters() {
        let c = FieldConstraint::string().max_len(3);
        assert!(eval(&c, Some(json!("ಅಆಇ"))).is_ok());
    }

    #[test]
    fn string_rejects_non_string() {
        let c = FieldConstraint::string();
        assert_eq!(rule_of(eval(&c, Some(json!(42)))), "type");
    }

    #[test]
    fn format_checked_after_length() {
        let c = FieldConstraint::strong_password();
        assert_eq!(rule_of(eval(&c, Some(json!("Ab1!")))), "min_length");
        assert_eq!(rule_of(eval(&c, Some(json!("abcdefgh")))), "format");
        assert!(eval(&c, Some(json!("Abcdef1!"))).is_ok());
    }

    // -----------------------------------------------------------------------
    // Numbers
    // -----------------------------------------------------------------------

    #[test]
    fn number_range_is_inclusive() {
        let c = FieldConstraint::number().min(-90.0).max(90.0);
        assert!(eval(&c, Some(json!(-90))).is_ok());
        assert!(eval(&c, Some(json!(90.0))).is_ok());
        assert_eq!(rule_of(eval(&c, Some(json!(-90.5)))), "min_value");
        assert_eq!(rule_of(eval(&c, Some(json!(91)))), "max_value");
    }

    #[test]
    fn integer_rejects_fraction_and_normalizes_whole_float() {
        let c = FieldConstraint::integer();
        assert_eq!(rule_of(eval(&c, Some(json!(2.5)))), "integer");
        assert_eq!(eval(&c, Some(json!(5.0))).unwrap(), Some(json!(5)));
    }

    #[test]
    fn integer_rejects_whole_floats_beyond_i64() {
        let c = FieldConstraint::integer();
        let too_large = eval(&c, Some(json!(1e20))).unwrap_err();
        assert_eq!(too_large.rule, "max_value");
        assert_eq!(too_large.message, "Test field is too large");
        assert_eq!(rule_of(eval(&c, Some(json!(9.3e18)))), "max_value");
        assert_eq!(rule_of(eval(&c, Some(json!(-1e19)))), "min_value");
        assert_eq!(rule_of(eval(&c, Some(json!(u64::MAX)))), "max_value");
    }

    #[test]
    fn large_whole_float_within_i64_normalizes_exactly() {
        let c = FieldConstraint::integer();
        assert_eq!(
            eval(&c, Some(json!(4e18))).unwrap(),
            Some(json!(4_000_000_000_000_000_000_i64))
        );
        assert_eq!(eval(&c, Some(json!(-2.0))).unwrap(), Some(json!(-2)));
    }

    #[test]
    fn count_is_bounded_by_u32() {
        let c = FieldConstraint::count();
        assert_eq!(
            eval(&c, Some(json!(u32::MAX))).unwrap(),
            Some(json!(u32::MAX))
        );
        assert_eq!(rule_of(eval(&c, Some(json!(5_000_000_000_u64)))), "max_value");
        assert_eq!(rule_of(eval(&c, Some(json!(-1)))), "min_value");
    }

    #[test]
    fn positive_excludes_zero() {
        let c = FieldConstraint::number().positive();
        assert_eq!(rule_of(eval(&c, Some(json!(0)))), "positive");
        assert!(eval(&c, Some(json!(0.01))).is_ok());
    }

    #[test]
    fn numeric_string_is_not_a_number() {
        let c = FieldConstraint::number();
        assert_eq!(rule_of(eval(&c, Some(json!("100")))), "type");
    }

    // -----------------------------------------------------------------------
    // Booleans, enums, uuids
    // -----------------------------------------------------------------------

    #[test]
    fn boolean_type_check() {
        let c = FieldConstraint::boolean();
        assert!(eval(&c, Some(json!(true))).is_ok());
        assert_eq!(rule_of(eval(&c, Some(json!("true")))), "type");
    }

    #[test]
    fn enum_message_names_valid_set() {
        let c = FieldConstraint::one_of(&["male", "female", "other"]);
        assert!(eval(&c, Some(json!("other"))).is_ok());
        let err = eval(&c, Some(json!("unknown"))).unwrap_err();
        assert_eq!(err.rule, "enum_values");
        assert_eq!(err.message, "Test field must be one of: male, female, other");
    }

    #[test]
    fn uuid_is_normalized_to_hyphenated_lowercase() {
        let c = FieldConstraint::uuid();
        let out = eval(&c, Some(json!("67E55044-10B1-426F-9247-BB680E5FE0C8"))).unwrap();
        assert_eq!(out, Some(json!("67e55044-10b1-426f-9247-bb680e5fe0c8")));
        assert_eq!(rule_of(eval(&c, Some(json!("not-a-uuid")))), "uuid");
    }

    // -----------------------------------------------------------------------
    // Dates
    // -----------------------------------------------------------------------

    #[test]
    fn date_must_parse() {
        let c = FieldConstraint::date();
        assert_eq!(rule_of(eval(&c, Some(json!("2026-02-30")))), "type");
        assert_eq!(rule_of(eval(&c, Some(json!("tomorrow")))), "type");
    }

    #[test]
    fn not_in_past_allows_same_day() {
        let c = FieldConstraint::date().not_in_past();
        assert!(eval(&c, Some(json!("2026-03-15"))).is_ok());
        assert!(eval(&c, Some(json!("2026-03-15T00:00:01+05:30"))).is_ok());
        assert_eq!(rule_of(eval(&c, Some(json!("2026-03-14")))), "not_in_past");
    }

    #[test]
    fn not_in_future_allows_same_day() {
        let c = FieldConstraint::date().not_in_future();
        assert!(eval(&c, Some(json!("2026-03-15"))).is_ok());
        assert_eq!(rule_of(eval(&c, Some(json!("2026-03-16")))), "not_in_future");
    }

    #[test]
    fn timestamp_is_normalized_to_calendar_day() {
        let c = FieldConstraint::date();
        let out = eval(&c, Some(json!("2026-04-01T18:30:00+05:30"))).unwrap();
        assert_eq!(out, Some(json!("2026-04-01")));
    }

    // -----------------------------------------------------------------------
    // Labels
    // -----------------------------------------------------------------------

    #[test]
    fn labels_from_camel_case() {
        assert_eq!(field_label("name"), "Name");
        assert_eq!(field_label("appointmentDate"), "Appointment date");
        assert_eq!(field_label("hospitalId"), "Hospital ID");
        assert_eq!(field_label("confirmPassword"), "Confirm password");
    }
}
