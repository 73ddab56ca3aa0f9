use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CriterionScores, JudgeId};
use super::repository::RatingPersistence;
use super::service::{JudgingError, JudgingService};
use crate::workflows::registration::domain::TeamId;
use crate::workflows::registration::repository::{RepositoryError, TeamRepository};

/// Router builder exposing rating submission, score, and leaderboard reads.
pub fn judging_router<R, P>(service: Arc<JudgingService<R, P>>) -> Router
where
    R: TeamRepository + 'static,
    P: RatingPersistence + 'static,
{
    Router::new()
        .route(
            "/api/v1/event/teams/:team_id/ratings",
            post(upsert_rating_handler::<R, P>).get(team_ratings_handler::<R, P>),
        )
        .route(
            "/api/v1/event/teams/:team_id/ratings/:judge_id",
            get(judge_rating_handler::<R, P>),
        )
        .route(
            "/api/v1/event/teams/:team_id/score",
            get(score_handler::<R, P>),
        )
        .route(
            "/api/v1/event/leaderboard",
            get(leaderboard_handler::<R, P>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RatingPayload {
    pub(crate) judge_id: String,
    pub(crate) scores: CriterionScores,
    #[serde(default)]
    pub(crate) comment: Option<String>,
}

fn error_response(error: JudgingError) -> Response {
    let status = match &error {
        JudgingError::InvalidScore { .. } | JudgingError::UnknownJudge => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        JudgingError::TeamNotJudgeable { .. } => StatusCode::CONFLICT,
        JudgingError::UnknownTeam(_) | JudgingError::Repository(RepositoryError::NotFound) => {
            StatusCode::NOT_FOUND
        }
        JudgingError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        JudgingError::Repository(RepositoryError::Unavailable(_))
        | JudgingError::Persistence(_) => StatusCode::BAD_GATEWAY,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn upsert_rating_handler<R, P>(
    State(service): State<Arc<JudgingService<R, P>>>,
    Path(team_id): Path<String>,
    axum::Json(payload): axum::Json<RatingPayload>,
) -> Response
where
    R: TeamRepository + 'static,
    P: RatingPersistence + 'static,
{
    match service.upsert_rating(
        JudgeId(payload.judge_id),
        TeamId(team_id),
        payload.scores,
        payload.comment,
    ) {
        Ok(rating) => (StatusCode::OK, axum::Json(rating)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn team_ratings_handler<R, P>(
    State(service): State<Arc<JudgingService<R, P>>>,
    Path(team_id): Path<String>,
) -> Response
where
    R: TeamRepository + 'static,
    P: RatingPersistence + 'static,
{
    match service.ratings_for_team(&TeamId(team_id)) {
        Ok(ratings) => (StatusCode::OK, axum::Json(ratings)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn judge_rating_handler<R, P>(
    State(service): State<Arc<JudgingService<R, P>>>,
    Path((team_id, judge_id)): Path<(String, String)>,
) -> Response
where
    R: TeamRepository + 'static,
    P: RatingPersistence + 'static,
{
    match service.rating_for(&JudgeId(judge_id), &TeamId(team_id)) {
        Some(rating) => (StatusCode::OK, axum::Json(rating)).into_response(),
        None => {
            let payload = json!({ "error": "no rating recorded for this judge and team" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn score_handler<R, P>(
    State(service): State<Arc<JudgingService<R, P>>>,
    Path(team_id): Path<String>,
) -> Response
where
    R: TeamRepository + 'static,
    P: RatingPersistence + 'static,
{
    match service.aggregate(&TeamId(team_id)) {
        Ok(score) => (StatusCode::OK, axum::Json(score)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn leaderboard_handler<R, P>(
    State(service): State<Arc<JudgingService<R, P>>>,
) -> Response
where
    R: TeamRepository + 'static,
    P: RatingPersistence + 'static,
{
    match service.leaderboard() {
        Ok(entries) => (StatusCode::OK, axum::Json(entries)).into_response(),
        Err(error) => error_response(error),
    }
}
