//! Role profiles: the required-field contract and payload construction for
//! each actor variant.

use chrono::{DateTime, Utc};

use super::catalog::{bank_by_code, ExperienceBand, OfferingType, ServiceCategory};
use super::domain::{FieldKey, LeadPayload, ProviderLead, RequesterLead, Role};
use super::form::FormRecord;

/// Reputation label stamped on every new provider lead until verification.
pub const DEFAULT_PROVIDER_REPUTATION: &str = "New provider";

/// Deep-link template the provider contact link is derived from.
pub const CONTACT_LINK_PREFIX: &str = "https://wa.me/";

const REQUESTER_FIELDS: &[FieldKey] = &[
    FieldKey::Name,
    FieldKey::Email,
    FieldKey::Phone,
    FieldKey::ServiceCategory,
    FieldKey::Location,
];

const PROVIDER_FIELDS: &[FieldKey] = &[
    FieldKey::Name,
    FieldKey::Email,
    FieldKey::Phone,
    FieldKey::ServiceCategory,
    FieldKey::ExperienceBand,
    FieldKey::Location,
    FieldKey::Description,
    FieldKey::ImmediateAvailability,
    FieldKey::WeeklyHoursAvailable,
    FieldKey::PortfolioUrl,
    FieldKey::OfferingType,
    FieldKey::RateText,
    FieldKey::BankCode,
    FieldKey::AccountNumber,
];

/// The fields a role must fill before the record is submittable. Consent is
/// required for both roles and checked separately on the record.
pub fn required_fields(role: Role) -> &'static [FieldKey] {
    match role {
        Role::Requester => REQUESTER_FIELDS,
        Role::Provider => PROVIDER_FIELDS,
    }
}

/// Raised when payload construction meets a field the aggregator should have
/// rejected. Callers treat it as "record is not submittable after all".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("required field '{}' is missing or malformed", .0.label())]
pub struct PayloadError(pub FieldKey);

/// Derive the provider contact deep link by stripping non-digit characters
/// from the phone value and prefixing the fixed template.
pub fn whatsapp_contact_link(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    format!("{CONTACT_LINK_PREFIX}{digits}")
}

/// Build the active role's outbound payload from a validated record.
///
/// Deterministic apart from `submitted_at`, which the caller stamps.
pub fn build_payload(
    record: &FormRecord,
    submitted_at: DateTime<Utc>,
) -> Result<LeadPayload, PayloadError> {
    match record.role() {
        Role::Requester => build_requester_payload(record, submitted_at),
        Role::Provider => build_provider_payload(record, submitted_at),
    }
}

fn build_requester_payload(
    record: &FormRecord,
    submitted_at: DateTime<Utc>,
) -> Result<LeadPayload, PayloadError> {
    Ok(LeadPayload::Requester(RequesterLead {
        name: text(record, FieldKey::Name)?,
        email: text(record, FieldKey::Email)?,
        phone: text(record, FieldKey::Phone)?,
        service_category: service_category(record)?,
        location: text(record, FieldKey::Location)?,
        consent: record.consent(),
        submitted_at,
    }))
}

fn build_provider_payload(
    record: &FormRecord,
    submitted_at: DateTime<Utc>,
) -> Result<LeadPayload, PayloadError> {
    let phone = text(record, FieldKey::Phone)?;
    let bank = bank_by_code(&text(record, FieldKey::BankCode)?)
        .ok_or(PayloadError(FieldKey::BankCode))?;
    let contact_link = whatsapp_contact_link(&phone);

    Ok(LeadPayload::Provider(ProviderLead {
        name: text(record, FieldKey::Name)?,
        email: text(record, FieldKey::Email)?,
        phone,
        service_category: service_category(record)?,
        experience_band: experience_band(record)?,
        location: text(record, FieldKey::Location)?,
        description: text(record, FieldKey::Description)?,
        immediate_availability: availability(record)?,
        weekly_hours_available: text(record, FieldKey::WeeklyHoursAvailable)?,
        portfolio_url: text(record, FieldKey::PortfolioUrl)?,
        offering_type: offering_type(record)?,
        rate_text: text(record, FieldKey::RateText)?,
        bank_name: bank.name,
        bank_code: bank.code,
        account_number: text(record, FieldKey::AccountNumber)?,
        contact_link,
        reputation: DEFAULT_PROVIDER_REPUTATION,
        consent: record.consent(),
        submitted_at,
    }))
}

fn text(record: &FormRecord, key: FieldKey) -> Result<String, PayloadError> {
    record
        .value(key)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(PayloadError(key))
}

fn service_category(record: &FormRecord) -> Result<ServiceCategory, PayloadError> {
    ServiceCategory::from_label(&text(record, FieldKey::ServiceCategory)?)
        .ok_or(PayloadError(FieldKey::ServiceCategory))
}

fn experience_band(record: &FormRecord) -> Result<ExperienceBand, PayloadError> {
    ExperienceBand::from_label(&text(record, FieldKey::ExperienceBand)?)
        .ok_or(PayloadError(FieldKey::ExperienceBand))
}

fn offering_type(record: &FormRecord) -> Result<OfferingType, PayloadError> {
    OfferingType::from_label(&text(record, FieldKey::OfferingType)?)
        .ok_or(PayloadError(FieldKey::OfferingType))
}

fn availability(record: &FormRecord) -> Result<bool, PayloadError> {
    let answer = text(record, FieldKey::ImmediateAvailability)?;
    match answer.to_ascii_lowercase().as_str() {
        "yes" | "true" => Ok(true),
        "no" | "false" => Ok(false),
        _ => Err(PayloadError(FieldKey::ImmediateAvailability)),
    }
}
