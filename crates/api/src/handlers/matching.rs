//! Handlers for the draft matching view.
//!
//! A session is mounted when the matching view opens and unmounted when it
//! closes. In between, the view pushes committed snapshots, stages draft
//! assignments, and reads back the reconciled assignment list.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tassign_core::assignment::{
    validate_position_code, validate_utorid, CommittedAssignment, DraftAssignment,
};
use tassign_core::key::{AssignmentKey, AssignmentRecord};
use tassign_core::matching::{
    assignments_for_applicant, summarize_positions, DraftMatchingState, ReconciledAssignment,
    SelectionState,
};
use tassign_core::types::Timestamp;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct MountedSession {
    pub id: Uuid,
    pub mounted_at: Timestamp,
}

/// Full state of one session.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub mounted_at: Timestamp,
    pub committed_refreshed_at: Option<Timestamp>,
    pub committed_count: usize,
    #[serde(flatten)]
    pub state: DraftMatchingState,
}

/// Visibility override for one applicant. `None` means neither list names
/// them and the view's default filtering applies.
#[derive(Debug, Serialize)]
pub struct ApplicantVisibility {
    pub utorid: String,
    pub visible: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceCommitted {
    pub assignments: Vec<CommittedAssignment>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveDrafts {
    pub assignments: Vec<AssignmentKey>,
}

#[derive(Debug, Deserialize)]
pub struct UtoridList {
    pub utorids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActivePositionInput {
    pub position_code: String,
}

#[derive(Debug, Deserialize)]
pub struct ActiveApplicantInput {
    pub utorid: Option<String>,
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/matching/sessions
pub async fn mount_session(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (id, mounted_at) = state.sessions.mount().await?;

    tracing::info!(session_id = %id, "Matching session mounted");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: MountedSession { id, mounted_at },
        }),
    ))
}

/// GET /api/v1/matching/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state
        .sessions
        .read(id, |s| SessionSnapshot {
            id,
            mounted_at: s.mounted_at,
            committed_refreshed_at: s.committed_refreshed_at,
            committed_count: s.committed().len(),
            state: s.state.clone(),
        })
        .await?;
    Ok(Json(DataResponse { data: snapshot }))
}

/// DELETE /api/v1/matching/sessions/{id}
pub async fn unmount_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    state.sessions.unmount(id).await?;
    tracing::info!(session_id = %id, "Matching session unmounted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Committed snapshot and reconciled reads
// ---------------------------------------------------------------------------

/// PUT /api/v1/matching/sessions/{id}/committed
///
/// Replaces the committed snapshot. Every record is validated first; one
/// bad record rejects the whole snapshot.
pub async fn replace_committed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<ReplaceCommitted>,
) -> AppResult<impl IntoResponse> {
    for assignment in &input.assignments {
        assignment.validate()?;
    }

    let count = input.assignments.len();
    state
        .sessions
        .update(id, |s| s.replace_committed(input.assignments))
        .await?;

    tracing::debug!(session_id = %id, count, "Committed snapshot replaced");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/matching/sessions/{id}/assignments
pub async fn list_reconciled(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let reconciled = state.sessions.update(id, |s| s.reconciled()).await?;
    Ok(Json(DataResponse {
        data: reconciled.as_slice(),
    })
    .into_response())
}

/// GET /api/v1/matching/sessions/{id}/position-summaries
pub async fn list_position_summaries(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let reconciled = state.sessions.update(id, |s| s.reconciled()).await?;
    Ok(Json(DataResponse {
        data: summarize_positions(&reconciled),
    }))
}

/// GET /api/v1/matching/sessions/{id}/applicants/{utorid}/assignments
pub async fn list_applicant_assignments(
    State(state): State<AppState>,
    Path((id, utorid)): Path<(Uuid, String)>,
) -> AppResult<impl IntoResponse> {
    validate_utorid(&utorid)?;

    let reconciled = state.sessions.update(id, |s| s.reconciled()).await?;
    let assignments: Vec<ReconciledAssignment> = assignments_for_applicant(&reconciled, &utorid)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(DataResponse { data: assignments }))
}

// ---------------------------------------------------------------------------
// Draft assignments
// ---------------------------------------------------------------------------

/// POST /api/v1/matching/sessions/{id}/drafts
///
/// Returns the full draft list after the append.
pub async fn add_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<DraftAssignment>,
) -> AppResult<impl IntoResponse> {
    draft.validate()?;

    let key = draft.assignment_key();
    let drafts = state
        .sessions
        .update(id, |s| {
            s.state.add_draft_assignment(draft);
            s.state.assignments().to_vec()
        })
        .await?;

    tracing::debug!(session_id = %id, key = %key, "Draft assignment added");

    Ok((StatusCode::CREATED, Json(DataResponse { data: drafts })))
}

/// DELETE /api/v1/matching/sessions/{id}/drafts/{position_code}/{utorid}
pub async fn remove_draft(
    State(state): State<AppState>,
    Path((id, position_code, utorid)): Path<(Uuid, String, String)>,
) -> AppResult<impl IntoResponse> {
    validate_position_code(&position_code)?;
    validate_utorid(&utorid)?;

    let key = AssignmentKey::new(position_code, utorid);
    let drafts = state
        .sessions
        .update(id, |s| {
            s.state.remove_draft_assignment(&key);
            s.state.assignments().to_vec()
        })
        .await?;

    tracing::debug!(session_id = %id, key = %key, "Draft assignment removed");

    Ok(Json(DataResponse { data: drafts }))
}

/// POST /api/v1/matching/sessions/{id}/drafts/remove
pub async fn remove_drafts(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<RemoveDrafts>,
) -> AppResult<impl IntoResponse> {
    for key in &input.assignments {
        validate_position_code(&key.position_code)?;
        validate_utorid(&key.utorid)?;
    }

    let requested = input.assignments.len();
    let drafts = state
        .sessions
        .update(id, |s| {
            s.state.remove_draft_assignments(&input.assignments);
            s.state.assignments().to_vec()
        })
        .await?;

    tracing::debug!(
        session_id = %id,
        requested,
        remaining = drafts.len(),
        "Draft assignments removed"
    );

    Ok(Json(DataResponse { data: drafts }))
}

/// DELETE /api/v1/matching/sessions/{id}/drafts
pub async fn clear_drafts(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    state
        .sessions
        .update(id, |s| s.state.clear_draft_assignments())
        .await?;

    tracing::debug!(session_id = %id, "Draft assignments cleared");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Visibility lists
// ---------------------------------------------------------------------------

/// PUT /api/v1/matching/sessions/{id}/hide-list
pub async fn set_hide_list(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UtoridList>,
) -> AppResult<impl IntoResponse> {
    let hide_list = state
        .sessions
        .update(id, |s| {
            s.state.set_hide_list(input.utorids);
            s.state.hide_list().to_vec()
        })
        .await?;
    Ok(Json(DataResponse { data: hide_list }))
}

/// PUT /api/v1/matching/sessions/{id}/show-list
pub async fn set_show_list(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UtoridList>,
) -> AppResult<impl IntoResponse> {
    let show_list = state
        .sessions
        .update(id, |s| {
            s.state.set_show_list(input.utorids);
            s.state.show_list().to_vec()
        })
        .await?;
    Ok(Json(DataResponse { data: show_list }))
}

/// GET /api/v1/matching/sessions/{id}/applicants/{utorid}/visibility
///
/// The show list wins over the hide list.
pub async fn get_applicant_visibility(
    State(state): State<AppState>,
    Path((id, utorid)): Path<(Uuid, String)>,
) -> AppResult<impl IntoResponse> {
    validate_utorid(&utorid)?;

    let visible = state
        .sessions
        .read(id, |s| s.state.visibility_override(&utorid))
        .await?;
    Ok(Json(DataResponse {
        data: ApplicantVisibility { utorid, visible },
    }))
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// GET /api/v1/matching/sessions/{id}/selection
pub async fn get_selection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let selection = state
        .sessions
        .read(id, |s| s.state.selection().clone())
        .await?;
    Ok(Json(DataResponse { data: selection }))
}

/// POST /api/v1/matching/sessions/{id}/active-positions
pub async fn add_active_position(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<ActivePositionInput>,
) -> AppResult<impl IntoResponse> {
    validate_position_code(&input.position_code)?;
    let selection = update_selection(&state, id, |s| {
        s.add_active_position_code(input.position_code)
    })
    .await?;
    Ok(Json(DataResponse { data: selection }))
}

/// DELETE /api/v1/matching/sessions/{id}/active-positions/{position_code}
pub async fn remove_active_position(
    State(state): State<AppState>,
    Path((id, position_code)): Path<(Uuid, String)>,
) -> AppResult<impl IntoResponse> {
    let selection = update_selection(&state, id, |s| {
        s.remove_active_position_code(&position_code)
    })
    .await?;
    Ok(Json(DataResponse { data: selection }))
}

/// PUT /api/v1/matching/sessions/{id}/active-applicant
///
/// A `null` utorid clears the highlight.
pub async fn set_active_applicant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<ActiveApplicantInput>,
) -> AppResult<impl IntoResponse> {
    if let Some(utorid) = &input.utorid {
        validate_utorid(utorid)?;
    }
    let selection = update_selection(&state, id, |s| {
        s.set_active_applicant_utorid(input.utorid)
    })
    .await?;
    Ok(Json(DataResponse { data: selection }))
}

/// Apply `f` to the session's draft state and return the new selection.
async fn update_selection(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut DraftMatchingState),
) -> AppResult<SelectionState> {
    let selection = state
        .sessions
        .update(id, |s| {
            f(&mut s.state);
            s.state.selection().clone()
        })
        .await?;
    Ok(selection)
}
