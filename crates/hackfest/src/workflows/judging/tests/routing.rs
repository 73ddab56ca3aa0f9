use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::judging::router::judging_router;
use crate::workflows::registration::domain::ApplicationStatus;

fn build_router() -> (axum::Router, Arc<MemoryTeams>) {
    let (service, teams, _, _) = build_service();
    (judging_router(Arc::new(service)), teams)
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn rating_request(team_id: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/v1/event/teams/{team_id}/ratings"))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&payload).expect("serialize")))
        .expect("request")
}

#[tokio::test]
async fn post_rating_returns_stored_copy() {
    let (router, teams) = build_router();
    teams.seed(team("team-000001", ApplicationStatus::Shortlisted));

    let payload = json!({
        "judge_id": "judge-1",
        "scores": {
            "innovation": 9,
            "technicality": 8,
            "presentation": 10,
            "feasibility": 7,
            "impact": 9,
        },
        "comment": "strong prototype",
    });

    let response = router
        .oneshot(rating_request("team-000001", payload))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json_body(response).await;
    assert_eq!(body.get("judge_id"), Some(&json!("judge-1")));
    assert_eq!(
        body.pointer("/scores/presentation").and_then(Value::as_u64),
        Some(10)
    );
}

#[tokio::test]
async fn post_rating_above_scale_is_unprocessable() {
    let (router, teams) = build_router();
    teams.seed(team("team-000001", ApplicationStatus::Shortlisted));

    let payload = json!({
        "judge_id": "judge-1",
        "scores": {
            "innovation": 11,
            "technicality": 8,
            "presentation": 10,
            "feasibility": 7,
            "impact": 9,
        },
    });

    let response = router
        .oneshot(rating_request("team-000001", payload))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn post_rating_for_pending_team_conflicts() {
    let (router, teams) = build_router();
    teams.seed(team("team-000001", ApplicationStatus::Pending));

    let payload = json!({
        "judge_id": "judge-1",
        "scores": {
            "innovation": 5,
            "technicality": 5,
            "presentation": 5,
            "feasibility": 5,
            "impact": 5,
        },
    });

    let response = router
        .oneshot(rating_request("team-000001", payload))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn get_score_returns_aggregate() {
    let (service, teams, _, _) = build_service();
    teams.seed(team("team-000001", ApplicationStatus::Shortlisted));
    rate(&service, "judge-1", "team-000001", scores(9, 8, 10, 7, 9));
    rate(&service, "judge-2", "team-000001", scores(7, 7, 7, 7, 7));
    let router = judging_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/event/teams/team-000001/score")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json_body(response).await;
    assert_eq!(body.get("judge_count"), Some(&json!(2)));
    let overall = body.get("overall").and_then(Value::as_f64).expect("overall");
    assert!((overall - 7.8).abs() < 1e-9);
}

#[tokio::test]
async fn get_leaderboard_ranks_teams() {
    let (service, teams, _, _) = build_service();
    teams.seed(team("team-000001", ApplicationStatus::Shortlisted));
    teams.seed(team("team-000002", ApplicationStatus::Shortlisted));
    rate(&service, "judge-1", "team-000001", scores(5, 5, 5, 5, 5));
    rate(&service, "judge-1", "team-000002", scores(9, 9, 9, 9, 9));
    let router = judging_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/event/leaderboard")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json_body(response).await;
    let entries = body.as_array().expect("array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].get("team_id"), Some(&json!("team-000002")));
    assert_eq!(entries[0].get("rank"), Some(&json!(1)));
}

#[tokio::test]
async fn get_missing_rating_is_not_found() {
    let (router, teams) = build_router();
    teams.seed(team("team-000001", ApplicationStatus::Shortlisted));

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/event/teams/team-000001/ratings/judge-9")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
