use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;

use super::catalog::CatalogView;
use super::domain::{LeadReceiptView, LeadSubmissionRequest};
use super::import::{ImportSummaryView, LeadCsvImporter};
use super::sink::{IntakeNotifier, LeadSink};
use super::submit::{LeadIntakeService, SubmissionOutcome};

/// Router builder exposing the lead intake endpoints.
pub fn intake_router<S, N>(service: Arc<LeadIntakeService<S, N>>) -> Router
where
    S: LeadSink + 'static,
    N: IntakeNotifier + 'static,
{
    Router::new()
        .route("/api/v1/intake/leads", post(submit_handler::<S, N>))
        .route(
            "/api/v1/intake/leads/validate",
            post(validate_handler::<S, N>),
        )
        .route("/api/v1/intake/leads/import", post(import_handler::<S, N>))
        .route("/api/v1/intake/catalog", get(catalog_handler))
        .with_state(service)
}

pub(crate) async fn submit_handler<S, N>(
    State(service): State<Arc<LeadIntakeService<S, N>>>,
    axum::Json(request): axum::Json<LeadSubmissionRequest>,
) -> Response
where
    S: LeadSink + 'static,
    N: IntakeNotifier + 'static,
{
    match service.submit(&request).await {
        SubmissionOutcome::Accepted { role, message } => {
            let view = LeadReceiptView {
                role,
                status: "accepted",
                message,
            };
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        SubmissionOutcome::Rejected(report) => {
            let payload = json!({
                "error": "lead is not submittable",
                "report": report,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        SubmissionOutcome::InFlight => {
            let payload = json!({
                "error": "a submission is already in flight",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        SubmissionOutcome::Failed { message } => {
            let payload = json!({
                "error": message,
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn validate_handler<S, N>(
    State(service): State<Arc<LeadIntakeService<S, N>>>,
    axum::Json(request): axum::Json<LeadSubmissionRequest>,
) -> Response
where
    S: LeadSink + 'static,
    N: IntakeNotifier + 'static,
{
    let report = service.validate(&request);
    (StatusCode::OK, axum::Json(report)).into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImportRequest {
    pub(crate) csv: String,
}

pub(crate) async fn import_handler<S, N>(
    State(service): State<Arc<LeadIntakeService<S, N>>>,
    axum::Json(request): axum::Json<ImportRequest>,
) -> Result<axum::Json<ImportSummaryView>, AppError>
where
    S: LeadSink + 'static,
    N: IntakeNotifier + 'static,
{
    let rows = LeadCsvImporter::from_reader(Cursor::new(request.csv.into_bytes()))?;
    Ok(axum::Json(service.import(&rows).await))
}

pub(crate) async fn catalog_handler() -> axum::Json<CatalogView> {
    axum::Json(CatalogView::current())
}
