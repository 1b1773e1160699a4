//! Authentication request specifications.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common;
use super::{Action, Entity};
use crate::types::Record;
use crate::validation::constraint::FieldConstraint;
use crate::validation::context::EvalContext;
use crate::validation::refinement::{str_of, Refinement};
use crate::validation::rules::RuleSpec;

pub fn login() -> RuleSpec {
    RuleSpec::new(Entity::Auth, Action::Login)
        .field("email", FieldConstraint::email())
        .field(
            "password",
            FieldConstraint::string()
                .min_len(1)
                .with_message("Password is required"),
        )
}

pub fn register() -> RuleSpec {
    RuleSpec::new(Entity::Auth, Action::Register)
        .field("name", FieldConstraint::string().min_len(2).max_len(100))
        .field("email", FieldConstraint::email())
        .field("phone", FieldConstraint::phone())
        .field("password", FieldConstraint::strong_password())
        .field(
            "confirmPassword",
            FieldConstraint::string()
                .min_len(1)
                .with_message("Please confirm your password"),
        )
        .field("agreeToTerms", FieldConstraint::boolean().optional())
        .refine(PASSWORDS_MATCH)
        .refine(TERMS_ACCEPTED)
}

pub fn forgot_password() -> RuleSpec {
    RuleSpec::new(Entity::Auth, Action::ForgotPassword).field("email", FieldConstraint::email())
}

/// Completes a forgot-password flow with the emailed token.
pub fn reset_password() -> RuleSpec {
    common::with_new_password(
        RuleSpec::new(Entity::Auth, Action::ResetPassword).field(
            "token",
            FieldConstraint::string()
                .min_len(1)
                .with_message("Reset token is required"),
        ),
    )
}

pub(super) fn specs() -> Vec<RuleSpec> {
    vec![login(), register(), forgot_password(), reset_password()]
}

// ---------------------------------------------------------------------------
// Refinements
// ---------------------------------------------------------------------------

fn passwords_match(record: &Record, _: &EvalContext) -> bool {
    str_of(record, "password") == str_of(record, "confirmPassword")
}

/// An omitted checkbox is not consent.
fn terms_accepted(record: &Record, _: &EvalContext) -> bool {
    record.get("agreeToTerms").and_then(Value::as_bool) == Some(true)
}

pub const PASSWORDS_MATCH: Refinement = Refinement::new(
    "passwords_match",
    "confirmPassword",
    "Passwords do not match",
    passwords_match,
);

pub const TERMS_ACCEPTED: Refinement = Refinement::new(
    "terms_accepted",
    "agreeToTerms",
    "You must agree to the terms and conditions",
    terms_accepted,
);

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_to_terms: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForgotPasswordInput {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordInput {
    pub token: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{assert_record_matches_spec, ctx};
    use crate::validation::rules::IssueKind;
    use serde_json::json;

    fn registration(password: &str, confirm: &str) -> Value {
        json!({
            "name": "Priya Sharma",
            "email": "priya.sharma@example.com",
            "phone": "9876501234",
            "password": password,
            "confirmPassword": confirm,
            "agreeToTerms": true
        })
    }

    #[test]
    fn matching_passwords_register() {
        let verdict = register().validate_with(&registration("Abcdef1!", "Abcdef1!"), &ctx());
        assert!(verdict.is_accepted());
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let verdict = register().validate_with(&registration("Abcdef1!", "different"), &ctx());
        let issues = verdict.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "confirmPassword");
        assert_eq!(issues[0].message, "Passwords do not match");
        assert_eq!(issues[0].kind, IssueKind::Refinement);
    }

    #[test]
    fn weak_password_is_a_field_error() {
        let verdict = register().validate_with(&registration("abcdefgh", "abcdefgh"), &ctx());
        let issues = verdict.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "password");
        assert_eq!(issues[0].rule, "format");
    }

    #[test]
    fn terms_must_be_accepted() {
        let mut input = registration("Abcdef1!", "Abcdef1!");
        input["agreeToTerms"] = json!(false);
        let declined = register().validate_with(&input, &ctx());
        assert_eq!(declined.issues()[0].path, "agreeToTerms");

        input.as_object_mut().unwrap().remove("agreeToTerms");
        let omitted = register().validate_with(&input, &ctx());
        assert_eq!(omitted.issues()[0].path, "agreeToTerms");
    }

    #[test]
    fn every_failing_refinement_is_reported_in_order() {
        let mut input = registration("Abcdef1!", "Abcdef2!");
        input["agreeToTerms"] = json!(false);
        let verdict = register().validate_with(&input, &ctx());
        let paths: Vec<_> = verdict.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["confirmPassword", "agreeToTerms"]);
    }

    #[test]
    fn login_needs_a_password() {
        let verdict = login().validate_with(&json!({"email": "a@b.co", "password": ""}), &ctx());
        assert_eq!(verdict.issues()[0].message, "Password is required");

        let missing = login().validate_with(&json!({"email": "a@b.co"}), &ctx());
        assert_eq!(missing.issues()[0].message, "Password is required");
    }

    #[test]
    fn login_does_not_check_password_strength() {
        let verdict = login().validate_with(&json!({"email": "a@b.co", "password": "x"}), &ctx());
        assert!(verdict.is_accepted());
    }

    #[test]
    fn forgot_password_checks_email_shape() {
        let verdict = forgot_password().validate_with(&json!({"email": "not-an-email"}), &ctx());
        assert_eq!(verdict.issues()[0].message, "Invalid email address");
    }

    #[test]
    fn reset_requires_token_and_matching_passwords() {
        let verdict = reset_password().validate_with(
            &json!({"newPassword": "N3w!secret", "confirmPassword": "N3w!secret"}),
            &ctx(),
        );
        assert_eq!(verdict.issues()[0].path, "token");

        let mismatch = reset_password().validate_with(
            &json!({"token": "t0k3n", "newPassword": "N3w!secret", "confirmPassword": "other"}),
            &ctx(),
        );
        assert_eq!(mismatch.issues()[0].path, "confirmPassword");
    }

    #[test]
    fn records_match_specs() {
        assert_record_matches_spec::<LoginInput>(
            &login(),
            json!({"email": "priya@example.com", "password": "secret"}),
        );
        assert_record_matches_spec::<RegisterInput>(
            &register(),
            registration("Abcdef1!", "Abcdef1!"),
        );
        assert_record_matches_spec::<ForgotPasswordInput>(
            &forgot_password(),
            json!({"email": "priya@example.com"}),
        );
        assert_record_matches_spec::<ResetPasswordInput>(
            &reset_password(),
            json!({"token": "t0k3n", "newPassword": "N3w!secret", "confirmPassword": "N3w!secret"}),
        );
    }
}
