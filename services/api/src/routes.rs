use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use craftlink_intake::intake::{intake_router, IntakeNotifier, LeadIntakeService, LeadSink};

pub(crate) fn with_intake_routes<S, N>(service: Arc<LeadIntakeService<S, N>>) -> axum::Router
where
    S: LeadSink + 'static,
    N: IntakeNotifier + 'static,
{
    intake_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn intake_routes_mount_alongside_operational_endpoints() {
        use crate::infra::{ConsoleNotifier, InMemoryLeadSink};
        use craftlink_intake::config::IntakeConfig;
        use tower::ServiceExt;

        let service = Arc::new(LeadIntakeService::new(
            Arc::new(InMemoryLeadSink::default()),
            Arc::new(ConsoleNotifier),
            IntakeConfig::default(),
        ));
        let router = with_intake_routes(service);

        let response = router
            .oneshot(
                axum::http::Request::get("/api/v1/intake/catalog")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
    }
}
