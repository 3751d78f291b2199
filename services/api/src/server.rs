use crate::cli::ServeArgs;
use crate::infra::{AppState, TracingNotifier};
use crate::routes::with_intake_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

use craftlink_intake::config::AppConfig;
use craftlink_intake::error::AppError;
use craftlink_intake::intake::{HttpLeadSink, LeadIntakeService};
use craftlink_intake::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let sink = Arc::new(HttpLeadSink::new(config.intake.endpoint.clone()));
    let notifier = Arc::new(TracingNotifier);
    let intake_service = Arc::new(LeadIntakeService::new(
        sink,
        notifier,
        config.intake.clone(),
    ));

    let app = with_intake_routes(intake_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, endpoint = %config.intake.endpoint, "lead intake relay ready");

    axum::serve(listener, app).await?;
    Ok(())
}
