//! Submission lifecycle: `Idle -> Submitting -> {Success | Error} -> Idle`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;

use crate::config::IntakeConfig;

use super::domain::{LeadSubmissionRequest, Role, SubmissionState, ValidationReport};
use super::form::FormRecord;
use super::import::ImportSummaryView;
use super::profile::build_payload;
use super::sink::{IntakeNotifier, LeadSink};

pub const REQUESTER_SUCCESS_MESSAGE: &str =
    "Thanks for signing up! We'll match you with trusted providers as soon as CraftLink launches.";
pub const PROVIDER_SUCCESS_MESSAGE: &str =
    "Welcome aboard! We'll verify your details and reach out before launch.";
pub const RETRY_MESSAGE: &str =
    "We couldn't send your signup. Your answers are saved, please try again.";

pub fn success_message(role: Role) -> &'static str {
    match role {
        Role::Requester => REQUESTER_SUCCESS_MESSAGE,
        Role::Provider => PROVIDER_SUCCESS_MESSAGE,
    }
}

/// What a single `submit` call resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Payload handed to the sink without a transport error.
    Accepted { role: Role, message: &'static str },
    /// The record failed the validity aggregator; nothing was sent.
    Rejected(ValidationReport),
    /// A submission was already in flight; nothing was sent.
    InFlight,
    /// The sink raised a transport error; field values are untouched.
    Failed { message: &'static str },
}

/// Drives one form instance's submissions against the configured sink.
///
/// The state mutex doubles as the double-submit guard: a `submit` that finds
/// the state already `Submitting` returns [`SubmissionOutcome::InFlight`]
/// without touching the sink.
pub struct SubmissionController<S, N> {
    sink: Arc<S>,
    notifier: Arc<N>,
    display_window: Duration,
    state: Mutex<SubmissionState>,
}

impl<S, N> SubmissionController<S, N>
where
    S: LeadSink,
    N: IntakeNotifier,
{
    pub fn new(sink: Arc<S>, notifier: Arc<N>, display_window: Duration) -> Self {
        Self {
            sink,
            notifier,
            display_window,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.lock().expect("submission state mutex poisoned").clone()
    }

    pub fn display_window(&self) -> Duration {
        self.display_window
    }

    /// Submit the record. No-op when the record is not submittable or when a
    /// previous submission is still in flight. There is no cancellation or
    /// timeout: an in-flight delivery runs until the transport resolves.
    pub async fn submit(&self, record: &FormRecord) -> SubmissionOutcome {
        if !record.is_submittable() {
            return SubmissionOutcome::Rejected(record.validation_report());
        }

        {
            let mut state = self.state.lock().expect("submission state mutex poisoned");
            if matches!(*state, SubmissionState::Submitting) {
                return SubmissionOutcome::InFlight;
            }
            *state = SubmissionState::Submitting;
        }

        let role = record.role();
        let payload = match build_payload(record, Utc::now()) {
            Ok(payload) => payload,
            Err(_) => {
                let mut state = self.state.lock().expect("submission state mutex poisoned");
                *state = SubmissionState::Idle;
                return SubmissionOutcome::Rejected(record.validation_report());
            }
        };

        match self.sink.deliver(&payload).await {
            Ok(()) => {
                let mut state = self.state.lock().expect("submission state mutex poisoned");
                *state = SubmissionState::Success;
                drop(state);
                let message = success_message(role);
                self.notifier.lead_accepted(role, message);
                SubmissionOutcome::Accepted { role, message }
            }
            Err(err) => {
                let mut state = self.state.lock().expect("submission state mutex poisoned");
                *state = SubmissionState::Error {
                    message: err.to_string(),
                };
                drop(state);
                self.notifier.lead_failed(RETRY_MESSAGE);
                SubmissionOutcome::Failed {
                    message: RETRY_MESSAGE,
                }
            }
        }
    }

    /// Hold the success notice for the display window, then clear the record
    /// and return to `Idle`. Does nothing unless the last submission
    /// succeeded.
    pub async fn finish_success(&self, record: &mut FormRecord) {
        if !matches!(self.state(), SubmissionState::Success) {
            return;
        }

        tokio::time::sleep(self.display_window).await;

        record.reset();
        let mut state = self.state.lock().expect("submission state mutex poisoned");
        *state = SubmissionState::Idle;
    }

    /// Leave the `Error` state without clearing any entered values, so the
    /// user can resubmit immediately.
    pub fn acknowledge_error(&self) {
        let mut state = self.state.lock().expect("submission state mutex poisoned");
        if matches!(*state, SubmissionState::Error { .. }) {
            *state = SubmissionState::Idle;
        }
    }
}

/// Facade composing the sink and notifier for hosts that process one
/// complete record per request. Every call builds a fresh form instance, so
/// state is never shared across callers.
pub struct LeadIntakeService<S, N> {
    sink: Arc<S>,
    notifier: Arc<N>,
    config: IntakeConfig,
}

impl<S, N> LeadIntakeService<S, N>
where
    S: LeadSink + 'static,
    N: IntakeNotifier + 'static,
{
    pub fn new(sink: Arc<S>, notifier: Arc<N>, config: IntakeConfig) -> Self {
        Self {
            sink,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    /// A controller bound to a new form instance.
    pub fn controller(&self) -> SubmissionController<S, N> {
        SubmissionController::new(
            self.sink.clone(),
            self.notifier.clone(),
            self.config.success_display_window(),
        )
    }

    /// Dry-run validation: replay the request through the store and report
    /// per-field findings without contacting the sink.
    pub fn validate(&self, request: &LeadSubmissionRequest) -> ValidationReport {
        FormRecord::from_request(request).validation_report()
    }

    /// Validate and, if submittable, relay the record to the sink.
    pub async fn submit(&self, request: &LeadSubmissionRequest) -> SubmissionOutcome {
        let record = FormRecord::from_request(request);
        self.controller().submit(&record).await
    }

    /// Replay imported rows one by one, tallying per-row outcomes. Row
    /// numbers follow the CSV convention (data starts at row 2).
    pub async fn import(&self, rows: &[LeadSubmissionRequest]) -> ImportSummaryView {
        let mut summary = ImportSummaryView::default();
        for (index, request) in rows.iter().enumerate() {
            let outcome = self.submit(request).await;
            summary.push(index + 2, request.role, outcome);
        }
        summary
    }
}
