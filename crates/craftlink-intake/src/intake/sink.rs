//! Outbound seams: the opaque intake endpoint and the status observer.

use async_trait::async_trait;

use super::domain::{LeadPayload, Role};

/// Transport-level delivery failure. The sink never reports application
/// errors because the endpoint's response is not read by contract.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("lead transport failed: {0}")]
    Transport(String),
}

/// Where accepted lead payloads go. The endpoint is an opaque sink: absence
/// of a transport error is the only success evidence available.
#[async_trait]
pub trait LeadSink: Send + Sync {
    async fn deliver(&self, lead: &LeadPayload) -> Result<(), SinkError>;
}

/// Observer notified once per submission attempt so the presentation layer
/// can show a toast or banner.
pub trait IntakeNotifier: Send + Sync {
    fn lead_accepted(&self, role: Role, message: &str);
    fn lead_failed(&self, message: &str);
}

/// Production sink: one JSON POST per accepted lead, anonymous, response
/// body never inspected.
#[derive(Debug, Clone)]
pub struct HttpLeadSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpLeadSink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LeadSink for HttpLeadSink {
    async fn deliver(&self, lead: &LeadPayload) -> Result<(), SinkError> {
        self.client
            .post(&self.endpoint)
            .json(lead)
            .send()
            .await
            .map_err(|err| SinkError::Transport(err.to_string()))?;
        Ok(())
    }
}
