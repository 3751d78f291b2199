//! The form state store and validity aggregator.

use std::collections::BTreeMap;

use super::domain::{
    FieldIssue, FieldKey, FieldState, LeadSubmissionRequest, Role, ValidationReport,
};
use super::profile::required_fields;
use super::validators::{correction_hint, validator_for};

/// One form instance's record: the active role, every field the user has
/// touched, and the consent flag. Owned exclusively by its form instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormRecord {
    role: Role,
    fields: BTreeMap<FieldKey, FieldState>,
    consent: bool,
}

impl FormRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay a whole-record request through the store so every field passes
    /// its validator exactly as an interactive session would.
    pub fn from_request(request: &LeadSubmissionRequest) -> Self {
        let mut record = Self::new();
        record.set_role(request.role);
        for (key, value) in &request.fields {
            record.set_field(*key, value.clone());
        }
        record.set_consent(request.consent);
        record
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn consent(&self) -> bool {
        self.consent
    }

    /// Switch the active role. Field values entered under the previous role
    /// are preserved; only the required-field contract changes.
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn set_consent(&mut self, consent: bool) {
        self.consent = consent;
    }

    /// Store a field value and recompute its inline error. Validators run
    /// only on non-empty values; emptiness is the aggregator's concern.
    pub fn set_field(&mut self, key: FieldKey, raw_value: impl Into<String>) {
        let raw_value = raw_value.into();
        let error = match validator_for(key) {
            Some(validate) if !raw_value.is_empty() && !validate(&raw_value) => {
                Some(correction_hint(key))
            }
            _ => None,
        };
        self.fields.insert(key, FieldState { raw_value, error });
    }

    /// Clear every field and restore the defaults (requester role, no
    /// consent).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn field(&self, key: FieldKey) -> Option<&FieldState> {
        self.fields.get(&key)
    }

    pub fn value(&self, key: FieldKey) -> Option<&str> {
        self.fields.get(&key).map(|field| field.raw_value.as_str())
    }

    pub fn error(&self, key: FieldKey) -> Option<&'static str> {
        self.fields.get(&key).and_then(|field| field.error)
    }

    pub fn is_empty(&self) -> bool {
        !self.consent
            && self
                .fields
                .values()
                .all(|field| field.raw_value.is_empty())
    }

    /// Whole-record submittability for the active role: every required field
    /// present with a non-empty trimmed value and no format error, and
    /// consent strictly true.
    pub fn is_submittable(&self) -> bool {
        self.consent
            && required_fields(self.role).iter().all(|key| {
                self.fields.get(key).is_some_and(|field| {
                    !field.raw_value.trim().is_empty() && field.error.is_none()
                })
            })
    }

    /// Detailed aggregate report: which required fields are missing, which
    /// carry format errors, and whether consent gates submission. Missing
    /// fields never produce inline text; they only appear here.
    pub fn validation_report(&self) -> ValidationReport {
        let mut missing_fields = Vec::new();
        let mut field_errors = Vec::new();

        for key in required_fields(self.role) {
            match self.fields.get(key) {
                Some(field) if !field.raw_value.trim().is_empty() => {
                    if let Some(message) = field.error {
                        field_errors.push(FieldIssue {
                            field: *key,
                            message,
                        });
                    }
                }
                _ => missing_fields.push(*key),
            }
        }

        let consent_missing = !self.consent;
        let submittable =
            missing_fields.is_empty() && field_errors.is_empty() && !consent_missing;

        ValidationReport {
            role: self.role,
            submittable,
            missing_fields,
            field_errors,
            consent_missing,
        }
    }
}
