//! Pure field validators.
//!
//! Every predicate here is total over `&str` and never panics; the form
//! store decides when to run them (only on non-empty values) and which
//! correction hint to surface.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use super::catalog::{bank_by_code, ExperienceBand, OfferingType, ServiceCategory};
use super::domain::FieldKey;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

fn nigerian_phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:\+234|0)[7-9][01]\d{8}$").expect("phone pattern compiles")
    })
}

fn generic_phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+?\d{10,15}$").expect("phone fallback compiles"))
}

/// `local@domain.tld` shape; rejects bare `local@domain`.
pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

/// Nigerian mobile shape (`+234`/`0` prefix, `[7-9][01]` subscriber prefix,
/// eight more digits), or a generic 10-15 digit international fallback.
pub fn is_valid_phone(value: &str) -> bool {
    nigerian_phone_pattern().is_match(value) || generic_phone_pattern().is_match(value)
}

/// Absolute URL with a scheme.
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

/// Exactly 10 ASCII decimal digits (NUBAN account number).
pub fn is_valid_account_number(value: &str) -> bool {
    value.len() == 10 && value.chars().all(|c| c.is_ascii_digit())
}

fn is_known_service_category(value: &str) -> bool {
    ServiceCategory::from_label(value).is_some()
}

fn is_known_experience_band(value: &str) -> bool {
    ExperienceBand::from_label(value).is_some()
}

fn is_known_offering_type(value: &str) -> bool {
    OfferingType::from_label(value).is_some()
}

fn is_known_bank_code(value: &str) -> bool {
    bank_by_code(value).is_some()
}

/// Yes/no style answer for the immediate-availability toggle.
pub fn is_availability_answer(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "yes" | "no" | "true" | "false"
    )
}

/// The validator wired to a field, if any. Free-text fields (name, location,
/// description, weekly hours, rate) carry no validator and therefore never
/// hold a format error.
pub fn validator_for(key: FieldKey) -> Option<fn(&str) -> bool> {
    match key {
        FieldKey::Email => Some(is_valid_email),
        FieldKey::Phone => Some(is_valid_phone),
        FieldKey::PortfolioUrl => Some(is_valid_url),
        FieldKey::AccountNumber => Some(is_valid_account_number),
        FieldKey::ServiceCategory => Some(is_known_service_category),
        FieldKey::ExperienceBand => Some(is_known_experience_band),
        FieldKey::OfferingType => Some(is_known_offering_type),
        FieldKey::BankCode => Some(is_known_bank_code),
        FieldKey::ImmediateAvailability => Some(is_availability_answer),
        FieldKey::Name
        | FieldKey::Location
        | FieldKey::Description
        | FieldKey::WeeklyHoursAvailable
        | FieldKey::RateText => None,
    }
}

/// Human-readable correction hint shown beside a field that failed its
/// validator.
pub fn correction_hint(key: FieldKey) -> &'static str {
    match key {
        FieldKey::Email => "Enter a valid email address like name@example.com.",
        FieldKey::Phone => "Enter a valid phone number, e.g. 08012345678 or +2348012345678.",
        FieldKey::PortfolioUrl => "Enter a full link including http:// or https://.",
        FieldKey::AccountNumber => "Account number must be exactly 10 digits.",
        FieldKey::ServiceCategory => "Choose one of the listed service categories.",
        FieldKey::ExperienceBand => "Choose one of the listed experience ranges.",
        FieldKey::OfferingType => "Choose Service, Product, or Both.",
        FieldKey::BankCode => "Choose your bank from the list.",
        FieldKey::ImmediateAvailability => "Answer yes or no.",
        _ => "Please double-check this entry.",
    }
}
