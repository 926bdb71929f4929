use crate::cli::ServeArgs;
use crate::infra::{AppState, DecisionService};
use crate::routes::with_decision_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use upgrade_engine::config::AppConfig;
use upgrade_engine::decision::UpgradableSpecification;
use upgrade_engine::error::AppError;
use upgrade_engine::telemetry;

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

    let specification = Arc::new(UpgradableSpecification::new(
        config.engine.score_cache_ttl,
    ));
    let decision_service = Arc::new(DecisionService::new(specification));

    let app = with_decision_routes(decision_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        score_cache_ttl_secs = config.engine.score_cache_ttl.as_secs(),
        "upgrade decision engine ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
