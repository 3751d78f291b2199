//! Role-aware lead intake: validation, submittability, and relay to the
//! external intake endpoint.

pub mod catalog;
pub mod domain;
pub mod form;
pub mod import;
pub mod profile;
pub mod router;
pub mod sink;
pub mod submit;
pub mod validators;

#[cfg(test)]
mod tests;

pub use catalog::{
    bank_by_code, bank_by_name, Bank, CatalogView, ExperienceBand, OfferingType, ServiceCategory,
    BANKS,
};
pub use domain::{
    FieldIssue, FieldKey, FieldState, LeadPayload, LeadReceiptView, LeadSubmissionRequest,
    ProviderLead, RequesterLead, Role, SubmissionState, ValidationReport,
};
pub use form::FormRecord;
pub use import::{ImportRowView, ImportSummaryView, LeadCsvImporter, LeadImportError};
pub use profile::{
    build_payload, required_fields, whatsapp_contact_link, PayloadError,
    CONTACT_LINK_PREFIX, DEFAULT_PROVIDER_REPUTATION,
};
pub use router::intake_router;
pub use sink::{HttpLeadSink, IntakeNotifier, LeadSink, SinkError};
pub use submit::{
    success_message, LeadIntakeService, SubmissionController, SubmissionOutcome,
    PROVIDER_SUCCESS_MESSAGE, REQUESTER_SUCCESS_MESSAGE, RETRY_MESSAGE,
};
pub use validators::{
    correction_hint, is_valid_account_number, is_valid_email, is_valid_phone, is_valid_url,
    validator_for,
};
