pub mod health;
pub mod validation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /validation/specs                       catalog introspection
/// /validation/{entity}/{action}           dry-run validation (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/validation", validation::router())
}
