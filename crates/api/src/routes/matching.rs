//! Route definitions for the draft matching view.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::matching;
use crate::state::AppState;

/// Matching session routes mounted at `/matching/sessions`.
///
/// ```text
/// POST   /                                           -> mount_session
/// GET    /{id}                                       -> get_session
/// DELETE /{id}                                       -> unmount_session
/// PUT    /{id}/committed                             -> replace_committed
/// GET    /{id}/assignments                           -> list_reconciled
/// GET    /{id}/position-summaries                    -> list_position_summaries
/// GET    /{id}/applicants/{utorid}/assignments       -> list_applicant_assignments
/// GET    /{id}/applicants/{utorid}/visibility        -> get_applicant_visibility
/// POST   /{id}/drafts                                -> add_draft
/// DELETE /{id}/drafts                                -> clear_drafts
/// POST   /{id}/drafts/remove                         -> remove_drafts
/// DELETE /{id}/drafts/{position_code}/{utorid}       -> remove_draft
/// PUT    /{id}/hide-list                             -> set_hide_list
/// PUT    /{id}/show-list                             -> set_show_list
/// GET    /{id}/selection                             -> get_selection
/// POST   /{id}/active-positions                      -> add_active_position
/// DELETE /{id}/active-positions/{position_code}      -> remove_active_position
/// PUT    /{id}/active-applicant                      -> set_active_applicant
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(matching::mount_session))
        .route(
            "/{id}",
            get(matching::get_session).delete(matching::unmount_session),
        )
        .route("/{id}/committed", put(matching::replace_committed))
        .route("/{id}/assignments", get(matching::list_reconciled))
        .route(
            "/{id}/position-summaries",
            get(matching::list_position_summaries),
        )
        .route(
            "/{id}/applicants/{utorid}/assignments",
            get(matching::list_applicant_assignments),
        )
        .route(
            "/{id}/applicants/{utorid}/visibility",
            get(matching::get_applicant_visibility),
        )
        .route(
            "/{id}/drafts",
            post(matching::add_draft).delete(matching::clear_drafts),
        )
        .route("/{id}/drafts/remove", post(matching::remove_drafts))
        .route(
            "/{id}/drafts/{position_code}/{utorid}",
            delete(matching::remove_draft),
        )
        .route("/{id}/hide-list", put(matching::set_hide_list))
        .route("/{id}/show-list", put(matching::set_show_list))
        .route("/{id}/selection", get(matching::get_selection))
        .route(
            "/{id}/active-positions",
            post(matching::add_active_position),
        )
        .route(
            "/{id}/active-positions/{position_code}",
            delete(matching::remove_active_position),
        )
        .route("/{id}/active-applicant", put(matching::set_active_applicant))
}
