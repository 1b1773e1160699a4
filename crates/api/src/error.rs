use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use medplat_core::error::CoreError;
use medplat_core::validation::rules::ValidationIssue;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `medplat_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A candidate record failed its rule specification.
    #[error("Validation failed with {} issue(s)", .0.len())]
    Unprocessable(Vec<ValidationIssue>),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::UnknownSpec { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string(), None)
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
                }
                CoreError::Rejected(issues) => rejected(issues),
                CoreError::Deserialize(err) => {
                    tracing::error!(error = %err, "Accepted record failed to deserialize");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                        None,
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::Unprocessable(issues) => rejected(issues),
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(details) = details {
            body["details"] = details;
        }

        (status, axum::Json(body)).into_response()
    }
}

type ErrorParts = (StatusCode, &'static str, String, Option<serde_json::Value>);

/// The first issue doubles as the headline message.
fn rejected(issues: &[ValidationIssue]) -> ErrorParts {
    let message = issues
        .first()
        .map(|i| i.message.clone())
        .unwrap_or_else(|| "Validation failed".to_string());
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        "VALIDATION_ERROR",
        message,
        Some(json!(issues)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use medplat_core::catalog::{Action, Entity};

    #[test]
    fn unknown_spec_is_not_found() {
        let err = AppError::from(CoreError::UnknownSpec {
            entity: Entity::Auth,
            action: Action::Create,
        });
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn rejection_is_unprocessable() {
        let issues = vec![ValidationIssue::field("email", "required", "Email is required")];
        let response = AppError::Unprocessable(issues).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn bad_selector_is_bad_request() {
        let err = AppError::from(CoreError::Validation("Unknown action 'delete'".into()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
