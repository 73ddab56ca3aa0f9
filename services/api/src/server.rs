use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryEventPublisher, InMemoryRatingPersistence, InMemoryTeamRepository,
    PermissiveFileStore,
};
use crate::routes::with_event_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hackfest::config::AppConfig;
use hackfest::error::AppError;
use hackfest::telemetry;
use hackfest::workflows::judging::{JudgingService, RatingStore};
use hackfest::workflows::registration::RegistrationService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryTeamRepository::default());
    let events = Arc::new(InMemoryEventPublisher::default());
    let files = Arc::new(PermissiveFileStore);
    let ratings = Arc::new(RatingStore::new());
    let persistence = Arc::new(InMemoryRatingPersistence::default());

    let registration = Arc::new(RegistrationService::new(
        repository.clone(),
        events,
        files,
        ratings.clone(),
    ));
    let judging = Arc::new(JudgingService::new(repository, ratings, persistence));

    let app = with_event_routes(registration, judging)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "hackathon event orchestrator ready");

    axum::serve(listener, app).await?;
    Ok(())
}
