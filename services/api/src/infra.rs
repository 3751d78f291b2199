use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use craftlink_intake::intake::{IntakeNotifier, LeadPayload, LeadSink, Role, SinkError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Notifier used by the HTTP host: submission toasts become log lines.
#[derive(Default, Clone)]
pub(crate) struct TracingNotifier;

impl IntakeNotifier for TracingNotifier {
    fn lead_accepted(&self, role: Role, message: &str) {
        info!(role = role.label(), message, "lead accepted");
    }

    fn lead_failed(&self, message: &str) {
        warn!(message, "lead submission failed");
    }
}

/// Sink used by the demo: deliveries land in memory instead of the wire.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadSink {
    deliveries: Arc<Mutex<Vec<LeadPayload>>>,
}

impl InMemoryLeadSink {
    pub(crate) fn deliveries(&self) -> Vec<LeadPayload> {
        self.deliveries.lock().expect("sink mutex poisoned").clone()
    }
}

#[async_trait]
impl LeadSink for InMemoryLeadSink {
    async fn deliver(&self, lead: &LeadPayload) -> Result<(), SinkError> {
        self.deliveries
            .lock()
            .expect("sink mutex poisoned")
            .push(lead.clone());
        Ok(())
    }
}

/// Notifier used by the demo: toasts print to stdout.
#[derive(Default, Clone)]
pub(crate) struct ConsoleNotifier;

impl IntakeNotifier for ConsoleNotifier {
    fn lead_accepted(&self, role: Role, message: &str) {
        println!("  [toast:{}] {}", role.label(), message);
    }

    fn lead_failed(&self, message: &str) {
        println!("  [toast:error] {}", message);
    }
}
