use crate::cli::ServeArgs;
use crate::infra::{AppState, LocalCollaborators};
use crate::routes::with_dispatch_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use evidence_dispatch::config::AppConfig;
use evidence_dispatch::error::AppError;
use evidence_dispatch::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let collaborators = LocalCollaborators::for_serving();
    let dispatch_service = Arc::new(collaborators.service(config.dispatch.eligibility_gate()));

    let app = with_dispatch_routes(dispatch_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        submit_types = ?config.dispatch.submit_types,
        "evidence bulk print dispatcher ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
