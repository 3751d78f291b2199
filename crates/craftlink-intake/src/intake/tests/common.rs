use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::config::IntakeConfig;
use crate::intake::domain::{FieldKey, LeadPayload, LeadSubmissionRequest, Role};
use crate::intake::form::FormRecord;
use crate::intake::sink::{IntakeNotifier, LeadSink, SinkError};
use crate::intake::submit::LeadIntakeService;

pub(super) fn intake_config(success_window_ms: u64) -> IntakeConfig {
    IntakeConfig {
        endpoint: "https://example.com/sink".to_string(),
        success_window_ms,
    }
}

pub(super) fn fill_requester(record: &mut FormRecord) {
    record.set_role(Role::Requester);
    record.set_field(FieldKey::Name, "Ada Obi");
    record.set_field(FieldKey::Email, "ada@example.com");
    record.set_field(FieldKey::Phone, "+2348012345678");
    record.set_field(FieldKey::ServiceCategory, "Plumbing");
    record.set_field(FieldKey::Location, "Lagos, Nigeria");
    record.set_consent(true);
}

pub(super) fn fill_provider(record: &mut FormRecord) {
    record.set_role(Role::Provider);
    record.set_field(FieldKey::Name, "Bola Adeyemi");
    record.set_field(FieldKey::Email, "bola@example.com");
    record.set_field(FieldKey::Phone, "08012345678");
    record.set_field(FieldKey::ServiceCategory, "Electrical");
    record.set_field(FieldKey::ExperienceBand, "3-5 years");
    record.set_field(FieldKey::Location, "Ibadan, Nigeria");
    record.set_field(FieldKey::Description, "Residential wiring and solar installs.");
    record.set_field(FieldKey::ImmediateAvailability, "yes");
    record.set_field(FieldKey::WeeklyHoursAvailable, "20-30 hours");
    record.set_field(FieldKey::PortfolioUrl, "https://portfolio.example.com/bola");
    record.set_field(FieldKey::OfferingType, "Service");
    record.set_field(FieldKey::RateText, "From NGN 15,000 per job");
    record.set_field(FieldKey::BankCode, "058");
    record.set_field(FieldKey::AccountNumber, "0123456789");
    record.set_consent(true);
}

pub(super) fn requester_record() -> FormRecord {
    let mut record = FormRecord::new();
    fill_requester(&mut record);
    record
}

pub(super) fn provider_record() -> FormRecord {
    let mut record = FormRecord::new();
    fill_provider(&mut record);
    record
}

pub(super) fn requester_request() -> LeadSubmissionRequest {
    let mut request = LeadSubmissionRequest {
        role: Role::Requester,
        fields: Default::default(),
        consent: true,
    };
    request.fields.insert(FieldKey::Name, "Ada Obi".to_string());
    request
        .fields
        .insert(FieldKey::Email, "ada@example.com".to_string());
    request
        .fields
        .insert(FieldKey::Phone, "+2348012345678".to_string());
    request
        .fields
        .insert(FieldKey::ServiceCategory, "Plumbing".to_string());
    request
        .fields
        .insert(FieldKey::Location, "Lagos, Nigeria".to_string());
    request
}

pub(super) fn provider_request() -> LeadSubmissionRequest {
    let record = provider_record();
    let mut request = LeadSubmissionRequest {
        role: Role::Provider,
        fields: Default::default(),
        consent: true,
    };
    for key in crate::intake::profile::required_fields(Role::Provider) {
        if let Some(value) = record.value(*key) {
            request.fields.insert(*key, value.to_string());
        }
    }
    request
}

/// Sink that records every delivered payload.
#[derive(Default)]
pub(super) struct RecordingLeadSink {
    deliveries: Mutex<Vec<LeadPayload>>,
}

impl RecordingLeadSink {
    pub(super) fn deliveries(&self) -> Vec<LeadPayload> {
        self.deliveries.lock().expect("sink mutex poisoned").clone()
    }
}

#[async_trait]
impl LeadSink for RecordingLeadSink {
    async fn deliver(&self, lead: &LeadPayload) -> Result<(), SinkError> {
        self.deliveries
            .lock()
            .expect("sink mutex poisoned")
            .push(lead.clone());
        Ok(())
    }
}

/// Sink whose transport always fails.
#[derive(Default)]
pub(super) struct FailingLeadSink;

#[async_trait]
impl LeadSink for FailingLeadSink {
    async fn deliver(&self, _lead: &LeadPayload) -> Result<(), SinkError> {
        Err(SinkError::Transport("connection refused".to_string()))
    }
}

/// Sink that holds the delivery open long enough for a second submit to
/// observe the in-flight state.
pub(super) struct SlowLeadSink {
    delay: Duration,
    delivered: Mutex<usize>,
}

impl SlowLeadSink {
    pub(super) fn new(delay: Duration) -> Self {
        Self {
            delay,
            delivered: Mutex::new(0),
        }
    }

    pub(super) fn delivered(&self) -> usize {
        *self.delivered.lock().expect("sink mutex poisoned")
    }
}

#[async_trait]
impl LeadSink for SlowLeadSink {
    async fn deliver(&self, _lead: &LeadPayload) -> Result<(), SinkError> {
        tokio::time::sleep(self.delay).await;
        *self.delivered.lock().expect("sink mutex poisoned") += 1;
        Ok(())
    }
}

/// Notifier that records toast messages instead of rendering them.
#[derive(Default)]
pub(super) struct RecordingNotifier {
    accepted: Mutex<Vec<(Role, String)>>,
    failed: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub(super) fn accepted(&self) -> Vec<(Role, String)> {
        self.accepted.lock().expect("notifier mutex poisoned").clone()
    }

    pub(super) fn failed(&self) -> Vec<String> {
        self.failed.lock().expect("notifier mutex poisoned").clone()
    }
}

impl IntakeNotifier for RecordingNotifier {
    fn lead_accepted(&self, role: Role, message: &str) {
        self.accepted
            .lock()
            .expect("notifier mutex poisoned")
            .push((role, message.to_string()));
    }

    fn lead_failed(&self, message: &str) {
        self.failed
            .lock()
            .expect("notifier mutex poisoned")
            .push(message.to_string());
    }
}

pub(super) fn build_service() -> (
    Arc<LeadIntakeService<RecordingLeadSink, RecordingNotifier>>,
    Arc<RecordingLeadSink>,
    Arc<RecordingNotifier>,
) {
    let sink = Arc::new(RecordingLeadSink::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = Arc::new(LeadIntakeService::new(
        sink.clone(),
        notifier.clone(),
        intake_config(10),
    ));
    (service, sink, notifier)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}
