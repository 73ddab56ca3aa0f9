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

use super::domain::{ApplicationStatus, NewTeam, PaymentStatus, TeamId};
use super::repository::{EventPublisher, FileStore, RepositoryError, TeamRepository};
use super::service::{LifecycleError, RegistrationService};

/// Router builder exposing the registration and lifecycle endpoints.
pub fn registration_router<R, E, F>(service: Arc<RegistrationService<R, E, F>>) -> Router
where
    R: TeamRepository + 'static,
    E: EventPublisher + 'static,
    F: FileStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/event/teams",
            post(register_handler::<R, E, F>).get(list_handler::<R, E, F>),
        )
        .route(
            "/api/v1/event/teams/:team_id",
            get(get_handler::<R, E, F>).delete(delete_handler::<R, E, F>),
        )
        .route(
            "/api/v1/event/teams/:team_id/proposal",
            post(proposal_handler::<R, E, F>),
        )
        .route(
            "/api/v1/event/teams/:team_id/status",
            post(status_handler::<R, E, F>),
        )
        .route(
            "/api/v1/event/teams/:team_id/payment",
            post(payment_handler::<R, E, F>),
        )
        .route(
            "/api/v1/event/teams/:team_id/payment-status",
            post(payment_status_handler::<R, E, F>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentPayload {
    pub(crate) document_ref: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusPayload {
    pub(crate) status: ApplicationStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentStatusPayload {
    pub(crate) status: PaymentStatus,
}

fn error_response(error: LifecycleError) -> Response {
    let status = match &error {
        LifecycleError::InvalidTransition { .. }
        | LifecycleError::InvalidPaymentTransition { .. }
        | LifecycleError::PaymentNotApplicable { .. } => StatusCode::CONFLICT,
        LifecycleError::InvalidTeamSize { .. } | LifecycleError::MissingDocument { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        LifecycleError::UnknownTeam(_) | LifecycleError::Repository(RepositoryError::NotFound) => {
            StatusCode::NOT_FOUND
        }
        LifecycleError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        LifecycleError::Repository(RepositoryError::Unavailable(_))
        | LifecycleError::FileStore(_) => StatusCode::BAD_GATEWAY,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn register_handler<R, E, F>(
    State(service): State<Arc<RegistrationService<R, E, F>>>,
    axum::Json(new_team): axum::Json<NewTeam>,
) -> Response
where
    R: TeamRepository + 'static,
    E: EventPublisher + 'static,
    F: FileStore + 'static,
{
    match service.register_team(new_team) {
        Ok(team) => (StatusCode::CREATED, axum::Json(team.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R, E, F>(
    State(service): State<Arc<RegistrationService<R, E, F>>>,
) -> Response
where
    R: TeamRepository + 'static,
    E: EventPublisher + 'static,
    F: FileStore + 'static,
{
    match service.list_teams() {
        Ok(teams) => {
            let views: Vec<_> = teams.iter().map(|team| team.status_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<R, E, F>(
    State(service): State<Arc<RegistrationService<R, E, F>>>,
    Path(team_id): Path<String>,
) -> Response
where
    R: TeamRepository + 'static,
    E: EventPublisher + 'static,
    F: FileStore + 'static,
{
    match service.get_team(&TeamId(team_id)) {
        Ok(team) => (StatusCode::OK, axum::Json(team.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R, E, F>(
    State(service): State<Arc<RegistrationService<R, E, F>>>,
    Path(team_id): Path<String>,
) -> Response
where
    R: TeamRepository + 'static,
    E: EventPublisher + 'static,
    F: FileStore + 'static,
{
    match service.delete_team(&TeamId(team_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn proposal_handler<R, E, F>(
    State(service): State<Arc<RegistrationService<R, E, F>>>,
    Path(team_id): Path<String>,
    axum::Json(payload): axum::Json<DocumentPayload>,
) -> Response
where
    R: TeamRepository + 'static,
    E: EventPublisher + 'static,
    F: FileStore + 'static,
{
    match service.submit_proposal(&TeamId(team_id), &payload.document_ref) {
        Ok(team) => (StatusCode::OK, axum::Json(team.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R, E, F>(
    State(service): State<Arc<RegistrationService<R, E, F>>>,
    Path(team_id): Path<String>,
    axum::Json(payload): axum::Json<StatusPayload>,
) -> Response
where
    R: TeamRepository + 'static,
    E: EventPublisher + 'static,
    F: FileStore + 'static,
{
    match service.set_application_status(&TeamId(team_id), payload.status) {
        Ok(team) => (StatusCode::OK, axum::Json(team.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn payment_handler<R, E, F>(
    State(service): State<Arc<RegistrationService<R, E, F>>>,
    Path(team_id): Path<String>,
    axum::Json(payload): axum::Json<DocumentPayload>,
) -> Response
where
    R: TeamRepository + 'static,
    E: EventPublisher + 'static,
    F: FileStore + 'static,
{
    match service.submit_payment(&TeamId(team_id), &payload.document_ref) {
        Ok(team) => (StatusCode::OK, axum::Json(team.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn payment_status_handler<R, E, F>(
    State(service): State<Arc<RegistrationService<R, E, F>>>,
    Path(team_id): Path<String>,
    axum::Json(payload): axum::Json<PaymentStatusPayload>,
) -> Response
where
    R: TeamRepository + 'static,
    E: EventPublisher + 'static,
    F: FileStore + 'static,
{
    match service.set_payment_status(&TeamId(team_id), payload.status) {
        Ok(team) => (StatusCode::OK, axum::Json(team.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}
