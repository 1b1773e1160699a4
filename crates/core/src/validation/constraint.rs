//! Field constraint descriptors.
//!
//! A [`FieldConstraint`] is plain data: a kind with its predicates, an
//! optionality flag and an optional default. Interpretation lives in
//! [`super::evaluator`]; nothing here evaluates anything.

use serde::Serialize;
use serde_json::Value;

use super::formats::StringFormat;

/// Maximum length accepted for any email address.
pub const EMAIL_MAX_LEN: usize = 254;

/// Length bounds for passwords checked by [`FieldConstraint::strong_password`].
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 128;

/// Primitive kind of a field plus the predicates that apply to that kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    String {
        #[serde(skip_serializing_if = "Option::is_none")]
        min_len: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_len: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        format: Option<StringFormat>,
    },
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        integer: bool,
        positive: bool,
    },
    Boolean,
    Date {
        not_in_past: bool,
        not_in_future: bool,
    },
    Enum {
        values: &'static [&'static str],
    },
    Uuid,
}

/// One field's acceptable value space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldConstraint {
    #[serde(flatten)]
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Treat a literal `""` as if the field were absent.
    pub empty_as_absent: bool,
    /// Replaces the generated message for "required" and predicate failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl FieldConstraint {
    fn of(kind: FieldKind) -> Self {
        Self {
            kind,
            required: true,
            default: None,
            empty_as_absent: false,
            message: None,
        }
    }

    // -- Kinds ---------------------------------------------------------------

    pub fn string() -> Self {
        Self::of(FieldKind::String {
            min_len: None,
            max_len: None,
            format: None,
        })
    }

    fn formatted(format: StringFormat) -> Self {
        Self::of(FieldKind::String {
            min_len: None,
            max_len: None,
            format: Some(format),
        })
    }

    pub fn email() -> Self {
        Self::formatted(StringFormat::Email).max_len(EMAIL_MAX_LEN)
    }

    pub fn url() -> Self {
        Self::formatted(StringFormat::Url)
    }

    pub fn phone() -> Self {
        Self::formatted(StringFormat::Phone)
    }

    pub fn pincode() -> Self {
        Self::formatted(StringFormat::Pincode)
    }

    pub fn zip_code() -> Self {
        Self::formatted(StringFormat::ZipCode)
    }

    /// `HH:mm` on a 24-hour clock.
    pub fn time() -> Self {
        Self::formatted(StringFormat::Time24h)
    }

    pub fn strong_password() -> Self {
        Self::formatted(StringFormat::StrongPassword)
            .min_len(PASSWORD_MIN_LEN)
            .max_len(PASSWORD_MAX_LEN)
    }

    pub fn number() -> Self {
        Self::of(FieldKind::Number {
            min: None,
            max: None,
            integer: false,
            positive: false,
        })
    }

    pub fn integer() -> Self {
        Self::of(FieldKind::Number {
            min: None,
            max: None,
            integer: true,
            positive: false,
        })
    }

    /// Non-negative whole number that fits a `u32`.
    pub fn count() -> Self {
        Self::integer().min(0.0).max(f64::from(u32::MAX))
    }

    pub fn boolean() -> Self {
        Self::of(FieldKind::Boolean)
    }

    pub fn date() -> Self {
        Self::of(FieldKind::Date {
            not_in_past: false,
            not_in_future: false,
        })
    }

    pub fn one_of(values: &'static [&'static str]) -> Self {
        Self::of(FieldKind::Enum { values })
    }

    pub fn uuid() -> Self {
        Self::of(FieldKind::Uuid)
    }

    // -- Predicates ----------------------------------------------------------

    pub fn min_len(mut self, n: usize) -> Self {
        match &mut self.kind {
            FieldKind::String { min_len, .. } => *min_len = Some(n),
            other => debug_assert!(false, "min_len does not apply to {other:?}"),
        }
        self
    }

    pub fn max_len(mut self, n: usize) -> Self {
        match &mut self.kind {
            FieldKind::String { max_len, .. } => *max_len = Some(n),
            other => debug_assert!(false, "max_len does not apply to {other:?}"),
        }
        self
    }

    pub fn min(mut self, n: f64) -> Self {
        match &mut self.kind {
            FieldKind::Number { min, .. } => *min = Some(n),
            other => debug_assert!(false, "min does not apply to {other:?}"),
        }
        self
    }

    pub fn max(mut self, n: f64) -> Self {
        match &mut self.kind {
            FieldKind::Number { max, .. } => *max = Some(n),
            other => debug_assert!(false, "max does not apply to {other:?}"),
        }
        self
    }

    pub fn positive(mut self) -> Self {
        match &mut self.kind {
            FieldKind::Number { positive, .. } => *positive = true,
            other => debug_assert!(false, "positive does not apply to {other:?}"),
        }
        self
    }

    /// The date's calendar day must not precede the evaluation day.
    pub fn not_in_past(mut self) -> Self {
        match &mut self.kind {
            FieldKind::Date { not_in_past, .. } => *not_in_past = true,
            other => debug_assert!(false, "not_in_past does not apply to {other:?}"),
        }
        self
    }

    /// The date's calendar day must not follow the evaluation day.
    pub fn not_in_future(mut self) -> Self {
        match &mut self.kind {
            FieldKind::Date { not_in_future, .. } => *not_in_future = true,
            other => debug_assert!(false, "not_in_future does not apply to {other:?}"),
        }
        self
    }

    // -- Presence ------------------------------------------------------------

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Optional, substituting `value` when absent.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.required = false;
        self.default = Some(value.into());
        self
    }

    /// Optional, and a cleared form field (`""`) counts as absent.
    pub fn empty_as_absent(mut self) -> Self {
        self.required = false;
        self.empty_as_absent = true;
        self
    }

    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }

    /// The update-form variant: optional, no default, predicates unchanged.
    pub fn relaxed(&self) -> Self {
        Self {
            required: false,
            default: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kinds_start_required_without_default() {
        let c = FieldConstraint::string();
        assert!(c.required);
        assert!(c.default.is_none());
        assert!(!c.empty_as_absent);
    }

    #[test]
    fn default_value_makes_field_optional() {
        let c = FieldConstraint::boolean().default_value(false);
        assert!(!c.required);
        assert_eq!(c.default, Some(json!(false)));
    }

    #[test]
    fn empty_as_absent_makes_field_optional() {
        let c = FieldConstraint::url().empty_as_absent();
        assert!(!c.required);
        assert!(c.empty_as_absent);
    }

    #[test]
    fn relaxed_drops_requiredness_and_default_but_keeps_predicates() {
        let c = FieldConstraint::one_of(&["a", "b"]).default_value("a");
        let relaxed = c.relaxed();
        assert!(!relaxed.required);
        assert!(relaxed.default.is_none());
        assert_eq!(relaxed.kind, c.kind);

        let s = FieldConstraint::string().min_len(2).max_len(5).relaxed();
        assert_eq!(
            s.kind,
            FieldKind::String {
                min_len: Some(2),
                max_len: Some(5),
                format: None
            }
        );
    }

    #[test]
    fn strong_password_carries_length_bounds() {
        match FieldConstraint::strong_password().kind {
            FieldKind::String {
                min_len, max_len, format, ..
            } => {
                assert_eq!(min_len, Some(PASSWORD_MIN_LEN));
                assert_eq!(max_len, Some(PASSWORD_MAX_LEN));
                assert_eq!(format, Some(StringFormat::StrongPassword));
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn serializes_as_flat_descriptor() {
        let c = FieldConstraint::integer().min(0.0).optional();
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v["kind"], "number");
        assert_eq!(v["integer"], true);
        assert_eq!(v["min"], 0.0);
        assert_eq!(v["required"], false);
        assert!(v.get("default").is_none());
    }
}
