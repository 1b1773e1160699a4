//! Route definitions for the `/validation` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::validation;
use crate::state::AppState;

/// Routes mounted at `/validation`.
///
/// ```text
/// GET    /specs              -> list_specs
/// POST   /{entity}/{action}  -> validate   (dry-run)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/specs", get(validation::list_specs))
        .route("/{entity}/{action}", post(validation::validate))
}
