//! Handlers for the `/validation` resource.
//!
//! Validation here is a dry run: accepted records are echoed back in their
//! normalized form and nothing is persisted.

use axum::extract::{Path, State};
use axum::Json;
use medplat_core::catalog::{Action, Entity};
use medplat_core::types::Record;
use medplat_core::validation::rules::{SpecDescriptor, Verdict};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/validation/specs
///
/// Describe every rule specification in the catalog.
pub async fn list_specs(
    State(state): State<AppState>,
) -> Json<DataResponse<Vec<SpecDescriptor<'static>>>> {
    let specs = state.catalog.specs().iter().map(|s| s.describe()).collect();
    Json(DataResponse { data: specs })
}

/// POST /api/v1/validation/{entity}/{action}
///
/// Validate the request body against one specification. Returns the
/// normalized record, or 422 with every issue found.
pub async fn validate(
    State(state): State<AppState>,
    Path((entity, action)): Path<(String, String)>,
    Json(candidate): Json<Value>,
) -> AppResult<Json<DataResponse<Record>>> {
    let entity: Entity = entity.parse()?;
    let action: Action = action.parse()?;
    let spec = state.catalog.require(entity, action)?;

    match spec.validate(&candidate) {
        Verdict::Accepted { record } => {
            tracing::debug!(%entity, %action, fields = record.len(), "Record accepted");
            Ok(Json(DataResponse { data: record }))
        }
        Verdict::Rejected { issues } => {
            tracing::debug!(%entity, %action, issues = issues.len(), "Record rejected");
            Err(AppError::Unprocessable(issues))
        }
    }
}
