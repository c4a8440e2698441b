pub mod health;
pub mod matching;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /matching/sessions                                mount a matching view
/// /matching/sessions/{id}                           snapshot, unmount
/// /matching/sessions/{id}/committed                 replace committed snapshot
/// /matching/sessions/{id}/assignments               reconciled assignments
/// /matching/sessions/{id}/drafts/...                draft mutations
/// /matching/sessions/{id}/active-...                highlight selection
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/matching/sessions", matching::router())
}
