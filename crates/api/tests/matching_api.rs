//! Integration tests for the matching session endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, mount, post_json, put_json};
use serde_json::{json, Value};

fn committed(id: i64, position_code: &str, utorid: &str, hours: f64) -> Value {
    json!({
        "id": id,
        "position": {"id": id * 10, "position_code": position_code},
        "applicant": {"id": id * 100, "utorid": utorid},
        "status": "assigned",
        "hours_assigned": hours,
    })
}

fn draft(position_code: &str, utorid: &str) -> Value {
    json!({
        "position": {"position_code": position_code},
        "applicant": {"utorid": utorid},
        "status": "staged-assigned",
    })
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn mounted_session_starts_empty() {
    let app = build_test_app();
    let base = mount(app.clone()).await;

    let response = get(app, &base).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["committed_count"], 0);
    assert_eq!(data["assignments"], json!([]));
    assert_eq!(data["hide_list"], json!([]));
    assert_eq!(data["show_list"], json!([]));
    assert_eq!(data["active_position_codes"], json!([]));
    assert!(data["active_applicant_utorid"].is_null());
}

#[tokio::test]
async fn unmounted_session_is_gone() {
    let app = build_test_app();
    let base = mount(app.clone()).await;

    let response = delete(app.clone(), &base).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), &base).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");

    let response = delete(app, &base).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn session_limit_returns_conflict() {
    let mut config = common::test_config();
    config.max_matching_sessions = 1;
    let (app, state) = common::build_test_app_with_state(config);

    mount(app.clone()).await;
    let response = post_json(app, "/api/v1/matching/sessions", json!({})).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(state.sessions.session_count().await, 1);
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn committed_only_is_reported_as_committed() {
    let app = build_test_app();
    let base = mount(app.clone()).await;

    let response = put_json(
        app.clone(),
        &format!("{base}/committed"),
        json!({"assignments": [committed(1, "CSC108", "abc", 54.0)]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(app, &format!("{base}/assignments")).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["draft"], false);
    assert_eq!(data[0]["id"], 1);
}

#[tokio::test]
async fn draft_shadows_committed_without_inheriting_id() {
    let app = build_test_app();
    let base = mount(app.clone()).await;

    put_json(
        app.clone(),
        &format!("{base}/committed"),
        json!({"assignments": [committed(1, "CSC108", "abc", 54.0)]}),
    )
    .await;
    let response = post_json(app.clone(), &format!("{base}/drafts"), draft("CSC108", "abc")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get(app, &format!("{base}/assignments")).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["draft"], true);
    assert_eq!(data[0]["status"], "staged-assigned");
    assert!(data[0].get("id").is_none());
    assert!(data[0].get("hours_assigned").is_none());
}

#[tokio::test]
async fn duplicate_drafts_are_kept_but_reconcile_to_one() {
    let app = build_test_app();
    let base = mount(app.clone()).await;

    post_json(app.clone(), &format!("{base}/drafts"), draft("CSC108", "abc")).await;
    let response = post_json(app.clone(), &format!("{base}/drafts"), draft("CSC108", "abc")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let json = body_json(get(app, &format!("{base}/assignments")).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn clearing_drafts_restores_committed_view() {
    let app = build_test_app();
    let base = mount(app.clone()).await;

    put_json(
        app.clone(),
        &format!("{base}/committed"),
        json!({"assignments": [
            committed(1, "CSC108", "abc", 54.0),
            committed(2, "MAT137", "def", 60.0),
        ]}),
    )
    .await;
    post_json(app.clone(), &format!("{base}/drafts"), draft("CSC108", "abc")).await;
    post_json(app.clone(), &format!("{base}/drafts"), draft("CSC148", "ghi")).await;

    let response = delete(app.clone(), &format!("{base}/drafts")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(app, &format!("{base}/assignments")).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert!(data.iter().all(|a| a["draft"] == false));
}

#[tokio::test]
async fn invalid_committed_snapshot_is_rejected_whole() {
    let app = build_test_app();
    let base = mount(app.clone()).await;

    let response = put_json(
        app.clone(),
        &format!("{base}/committed"),
        json!({"assignments": [
            committed(1, "CSC108", "abc", 54.0),
            committed(2, "", "def", 60.0),
        ]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let json = body_json(get(app, &base).await).await;
    assert_eq!(json["data"]["committed_count"], 0);
}

#[tokio::test]
async fn empty_utorid_draft_is_rejected() {
    let app = build_test_app();
    let base = mount(app.clone()).await;

    let response = post_json(app, &format!("{base}/drafts"), draft("CSC108", " ")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Draft removal
// ---------------------------------------------------------------------------

#[tokio::test]
async fn single_remove_drops_every_same_key_draft() {
    let app = build_test_app();
    let base = mount(app.clone()).await;

    post_json(app.clone(), &format!("{base}/drafts"), draft("CSC108", "abc")).await;
    post_json(app.clone(), &format!("{base}/drafts"), draft("MAT137", "abc")).await;
    post_json(app.clone(), &format!("{base}/drafts"), draft("CSC108", "abc")).await;

    let response = delete(app, &format!("{base}/drafts/CSC108/abc")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["position"]["position_code"], "MAT137");
}

#[tokio::test]
async fn batch_remove_keeps_unrelated_draft() {
    let app = build_test_app();
    let base = mount(app.clone()).await;

    post_json(app.clone(), &format!("{base}/drafts"), draft("CSC108", "a")).await;
    post_json(app.clone(), &format!("{base}/drafts"), draft("CSC148", "b")).await;
    post_json(app.clone(), &format!("{base}/drafts"), draft("MAT137", "c")).await;

    let response = post_json(
        app,
        &format!("{base}/drafts/remove"),
        json!({"assignments": [
            {"position_code": "CSC108", "utorid": "a"},
            {"position_code": "CSC148", "utorid": "b"},
        ]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["applicant"]["utorid"], "c");
}

// ---------------------------------------------------------------------------
// Visibility lists and selection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn hide_and_show_lists_replace_wholesale() {
    let app = build_test_app();
    let base = mount(app.clone()).await;

    put_json(app.clone(), &format!("{base}/hide-list"), json!({"utorids": ["a", "b"]})).await;
    let response = put_json(app.clone(), &format!("{base}/hide-list"), json!({"utorids": ["c"]})).await;
    assert_eq!(body_json(response).await["data"], json!(["c"]));

    let response = put_json(app.clone(), &format!("{base}/show-list"), json!({"utorids": []})).await;
    assert_eq!(body_json(response).await["data"], json!([]));

    let json = body_json(get(app, &base).await).await;
    assert_eq!(json["data"]["hide_list"], json!(["c"]));
}

#[tokio::test]
async fn show_list_overrides_hide_list_for_visibility() {
    let app = build_test_app();
    let base = mount(app.clone()).await;

    put_json(app.clone(), &format!("{base}/hide-list"), json!({"utorids": ["abc", "def"]})).await;
    put_json(app.clone(), &format!("{base}/show-list"), json!({"utorids": ["abc"]})).await;

    let response = get(app.clone(), &format!("{base}/applicants/abc/visibility")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["utorid"], "abc");
    assert_eq!(json["data"]["visible"], json!(true));

    let json = body_json(get(app.clone(), &format!("{base}/applicants/def/visibility")).await).await;
    assert_eq!(json["data"]["visible"], json!(false));

    let json = body_json(get(app, &format!("{base}/applicants/ghi/visibility")).await).await;
    assert!(json["data"]["visible"].is_null());
}

#[tokio::test]
async fn active_position_insert_is_idempotent() {
    let app = build_test_app();
    let base = mount(app.clone()).await;
    let uri = format!("{base}/active-positions");

    post_json(app.clone(), &uri, json!({"position_code": "CSC108"})).await;
    let response = post_json(app.clone(), &uri, json!({"position_code": "CSC108"})).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["active_position_codes"], json!(["CSC108"]));

    let response = delete(app.clone(), &format!("{uri}/CSC108")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["active_position_codes"], json!([]));

    // Removing an absent code is a no-op.
    let response = delete(app, &format!("{uri}/CSC108")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn active_applicant_set_then_cleared() {
    let app = build_test_app();
    let base = mount(app.clone()).await;
    let uri = format!("{base}/active-applicant");

    let response = put_json(app.clone(), &uri, json!({"utorid": "abc"})).await;
    assert_eq!(body_json(response).await["data"]["active_applicant_utorid"], "abc");

    put_json(app.clone(), &uri, json!({"utorid": null})).await;

    let json = body_json(get(app, &format!("{base}/selection")).await).await;
    assert!(json["data"]["active_applicant_utorid"].is_null());
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

#[tokio::test]
async fn position_summaries_count_drafts_and_hours() {
    let app = build_test_app();
    let base = mount(app.clone()).await;

    put_json(
        app.clone(),
        &format!("{base}/committed"),
        json!({"assignments": [
            committed(1, "CSC108", "abc", 54.0),
            committed(2, "CSC108", "def", 20.0),
        ]}),
    )
    .await;
    post_json(
        app.clone(),
        &format!("{base}/drafts"),
        json!({
            "position": {"position_code": "CSC108"},
            "applicant": {"utorid": "ghi"},
            "status": "staged-assigned",
            "hours_assigned": 10.0,
        }),
    )
    .await;

    let json = body_json(get(app, &format!("{base}/position-summaries")).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["position_code"], "CSC108");
    assert_eq!(data[0]["assignment_count"], 3);
    assert_eq!(data[0]["draft_count"], 1);
    assert_eq!(data[0]["assigned_hours"], 84.0);
}

#[tokio::test]
async fn applicant_view_lists_only_that_applicant() {
    let app = build_test_app();
    let base = mount(app.clone()).await;

    put_json(
        app.clone(),
        &format!("{base}/committed"),
        json!({"assignments": [
            committed(1, "CSC108", "abc", 54.0),
            committed(2, "MAT137", "def", 60.0),
        ]}),
    )
    .await;
    post_json(app.clone(), &format!("{base}/drafts"), draft("CSC148", "abc")).await;

    let json = body_json(get(app, &format!("{base}/applicants/abc/assignments")).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert!(data.iter().all(|a| a["applicant"]["utorid"] == "abc"));
}
