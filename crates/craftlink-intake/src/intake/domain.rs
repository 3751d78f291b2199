use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{ExperienceBand, OfferingType, ServiceCategory};

/// One of the two mutually exclusive actor variants the signup form captures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Requester,
    Provider,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Requester => "requester",
            Role::Provider => "provider",
        }
    }
}

/// Keys of the fields the form collects. Consent is tracked separately on the
/// record because it is a strict boolean, not free text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Name,
    Email,
    Phone,
    ServiceCategory,
    Location,
    ExperienceBand,
    Description,
    ImmediateAvailability,
    WeeklyHoursAvailable,
    PortfolioUrl,
    OfferingType,
    RateText,
    BankCode,
    AccountNumber,
}

impl FieldKey {
    pub const fn label(self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Email => "email",
            FieldKey::Phone => "phone",
            FieldKey::ServiceCategory => "serviceCategory",
            FieldKey::Location => "location",
            FieldKey::ExperienceBand => "experienceBand",
            FieldKey::Description => "description",
            FieldKey::ImmediateAvailability => "immediateAvailability",
            FieldKey::WeeklyHoursAvailable => "weeklyHoursAvailable",
            FieldKey::PortfolioUrl => "portfolioUrl",
            FieldKey::OfferingType => "offeringType",
            FieldKey::RateText => "rateText",
            FieldKey::BankCode => "bankCode",
            FieldKey::AccountNumber => "accountNumber",
        }
    }
}

/// Current value and inline error of a single form field.
///
/// `error` is `Some` only when the raw value is non-empty and fails the
/// field's validator; empty required fields gate submission silently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldState {
    pub raw_value: String,
    pub error: Option<&'static str>,
}

/// Lifecycle of one submission attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Success,
    Error {
        message: String,
    },
}

impl SubmissionState {
    pub const fn label(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Success => "success",
            SubmissionState::Error { .. } => "error",
        }
    }
}

/// Wire shape of a whole-record submission as reported by the form host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSubmissionRequest {
    pub role: Role,
    #[serde(default)]
    pub fields: BTreeMap<FieldKey, String>,
    #[serde(default)]
    pub consent: bool,
}

/// Outbound payload for a requester lead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequesterLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_category: ServiceCategory,
    pub location: String,
    pub consent: bool,
    pub submitted_at: DateTime<Utc>,
}

/// Outbound payload for a provider lead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_category: ServiceCategory,
    pub experience_band: ExperienceBand,
    pub location: String,
    pub description: String,
    pub immediate_availability: bool,
    pub weekly_hours_available: String,
    pub portfolio_url: String,
    pub offering_type: OfferingType,
    pub rate_text: String,
    pub bank_name: &'static str,
    pub bank_code: &'static str,
    pub account_number: String,
    pub contact_link: String,
    pub reputation: &'static str,
    pub consent: bool,
    pub submitted_at: DateTime<Utc>,
}

/// Role-tagged payload POSTed to the external intake endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum LeadPayload {
    Requester(RequesterLead),
    Provider(ProviderLead),
}

impl LeadPayload {
    pub const fn role(&self) -> Role {
        match self {
            LeadPayload::Requester(_) => Role::Requester,
            LeadPayload::Provider(_) => Role::Provider,
        }
    }
}

/// Inline error attached to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldIssue {
    pub field: FieldKey,
    pub message: &'static str,
}

/// Aggregate submittability report for the active role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub role: Role,
    pub submittable: bool,
    pub missing_fields: Vec<FieldKey>,
    pub field_errors: Vec<FieldIssue>,
    pub consent_missing: bool,
}

/// Sanitized acknowledgment returned to the form host after acceptance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadReceiptView {
    pub role: Role,
    pub status: &'static str,
    pub message: &'static str,
}
