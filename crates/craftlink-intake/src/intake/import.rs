//! Bulk lead import from CSV exports.
//!
//! Pre-launch lead lists collected outside the form (spreadsheet signups,
//! chat exports) arrive as headered CSV. Imported rows are not trusted: each
//! one replays through the same store and aggregator as an interactive
//! session, so malformed rows surface per-field findings instead of leaking
//! into the sink.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::domain::{FieldKey, LeadSubmissionRequest, Role, ValidationReport};
use super::submit::SubmissionOutcome;

#[derive(Debug)]
pub enum LeadImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownRole { row: usize, value: String },
}

impl std::fmt::Display for LeadImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadImportError::Io(err) => write!(f, "failed to read lead export: {}", err),
            LeadImportError::Csv(err) => write!(f, "invalid lead CSV data: {}", err),
            LeadImportError::UnknownRole { row, value } => {
                write!(f, "row {} has unknown role '{}'", row, value)
            }
        }
    }
}

impl std::error::Error for LeadImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeadImportError::Io(err) => Some(err),
            LeadImportError::Csv(err) => Some(err),
            LeadImportError::UnknownRole { .. } => None,
        }
    }
}

impl From<std::io::Error> for LeadImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LeadImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct LeadCsvImporter;

impl LeadCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<LeadSubmissionRequest>, LeadImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<LeadSubmissionRequest>, LeadImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut requests = Vec::new();
        // Data rows start at 2: row 1 is the header.
        for (index, record) in csv_reader.deserialize::<LeadRow>().enumerate() {
            let row = record?;
            let row_number = index + 2;
            requests.push(row.into_request(row_number)?);
        }

        Ok(requests)
    }
}

#[derive(Debug, Deserialize)]
struct LeadRow {
    #[serde(rename = "Role")]
    role: String,
    #[serde(rename = "Name", default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(rename = "Email", default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
    #[serde(rename = "Phone", default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
    #[serde(
        rename = "Service Category",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    service_category: Option<String>,
    #[serde(rename = "Location", default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(
        rename = "Experience Band",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    experience_band: Option<String>,
    #[serde(
        rename = "Description",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    description: Option<String>,
    #[serde(
        rename = "Immediate Availability",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    immediate_availability: Option<String>,
    #[serde(
        rename = "Weekly Hours",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    weekly_hours: Option<String>,
    #[serde(
        rename = "Portfolio URL",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    portfolio_url: Option<String>,
    #[serde(
        rename = "Offering Type",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    offering_type: Option<String>,
    #[serde(rename = "Rate", default, deserialize_with = "empty_string_as_none")]
    rate: Option<String>,
    #[serde(
        rename = "Bank Code",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    bank_code: Option<String>,
    #[serde(
        rename = "Account Number",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    account_number: Option<String>,
    #[serde(rename = "Consent", default, deserialize_with = "empty_string_as_none")]
    consent: Option<String>,
}

impl LeadRow {
    fn into_request(self, row_number: usize) -> Result<LeadSubmissionRequest, LeadImportError> {
        let role = match self.role.trim().to_ascii_lowercase().as_str() {
            "requester" => Role::Requester,
            "provider" => Role::Provider,
            _ => {
                return Err(LeadImportError::UnknownRole {
                    row: row_number,
                    value: self.role,
                })
            }
        };

        let consent = self
            .consent
            .as_deref()
            .map(parse_consent)
            .unwrap_or(false);

        let mut fields = BTreeMap::new();
        let mut push = |key: FieldKey, value: Option<String>| {
            if let Some(value) = value {
                fields.insert(key, value);
            }
        };
        push(FieldKey::Name, self.name);
        push(FieldKey::Email, self.email);
        push(FieldKey::Phone, self.phone);
        push(FieldKey::ServiceCategory, self.service_category);
        push(FieldKey::Location, self.location);
        push(FieldKey::ExperienceBand, self.experience_band);
        push(FieldKey::Description, self.description);
        push(FieldKey::ImmediateAvailability, self.immediate_availability);
        push(FieldKey::WeeklyHoursAvailable, self.weekly_hours);
        push(FieldKey::PortfolioUrl, self.portfolio_url);
        push(FieldKey::OfferingType, self.offering_type);
        push(FieldKey::RateText, self.rate);
        push(FieldKey::BankCode, self.bank_code);
        push(FieldKey::AccountNumber, self.account_number);

        Ok(LeadSubmissionRequest {
            role,
            fields,
            consent,
        })
    }
}

fn parse_consent(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "yes" | "true" | "1"
    )
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Result of one imported row after replaying it through the engine.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRowView {
    pub row: usize,
    pub role: Role,
    pub accepted: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ValidationReport>,
}

/// Whole-import tally returned to the caller.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummaryView {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub failed: usize,
    pub rows: Vec<ImportRowView>,
}

impl ImportSummaryView {
    pub fn push(&mut self, row: usize, role: Role, outcome: SubmissionOutcome) {
        self.total += 1;
        let view = match outcome {
            SubmissionOutcome::Accepted { message, .. } => {
                self.accepted += 1;
                ImportRowView {
                    row,
                    role,
                    accepted: true,
                    message: message.to_string(),
                    report: None,
                }
            }
            SubmissionOutcome::Rejected(report) => {
                self.rejected += 1;
                ImportRowView {
                    row,
                    role,
                    accepted: false,
                    message: "lead is not submittable".to_string(),
                    report: Some(report),
                }
            }
            SubmissionOutcome::InFlight => {
                self.failed += 1;
                ImportRowView {
                    row,
                    role,
                    accepted: false,
                    message: "another submission was in flight".to_string(),
                    report: None,
                }
            }
            SubmissionOutcome::Failed { message } => {
                self.failed += 1;
                ImportRowView {
                    row,
                    role,
                    accepted: false,
                    message: message.to_string(),
                    report: None,
                }
            }
        };
        self.rows.push(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "Role,Name,Email,Phone,Service Category,Location,Consent\n";

    #[test]
    fn parses_requester_rows_with_sparse_columns() {
        let csv = format!(
            "{HEADER}requester,Ada Obi,ada@example.com,+2348012345678,Plumbing,\"Lagos, Nigeria\",yes\n"
        );
        let rows = LeadCsvImporter::from_reader(Cursor::new(csv.into_bytes()))
            .expect("csv parses");

        assert_eq!(rows.len(), 1);
        let request = &rows[0];
        assert_eq!(request.role, Role::Requester);
        assert!(request.consent);
        assert_eq!(
            request.fields.get(&FieldKey::Name).map(String::as_str),
            Some("Ada Obi")
        );
        assert!(!request.fields.contains_key(&FieldKey::BankCode));
    }

    #[test]
    fn blank_cells_are_absent_fields() {
        let csv = format!("{HEADER}requester,Ada Obi,,,Plumbing,,no\n");
        let rows = LeadCsvImporter::from_reader(Cursor::new(csv.into_bytes()))
            .expect("csv parses");

        let request = &rows[0];
        assert!(!request.consent);
        assert!(!request.fields.contains_key(&FieldKey::Email));
        assert!(!request.fields.contains_key(&FieldKey::Location));
    }

    #[test]
    fn unknown_role_reports_row_number() {
        let csv = format!("{HEADER}requester,Ada,,,,,yes\nmanager,Bola,,,,,yes\n");
        match LeadCsvImporter::from_reader(Cursor::new(csv.into_bytes())) {
            Err(LeadImportError::UnknownRole { row, value }) => {
                assert_eq!(row, 3);
                assert_eq!(value, "manager");
            }
            other => panic!("expected unknown role error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_csv_surfaces_csv_error() {
        let csv = "Role,Name\nrequester,\"unterminated\n";
        match LeadCsvImporter::from_reader(Cursor::new(csv.as_bytes().to_vec())) {
            Err(LeadImportError::Csv(_)) => {}
            other => panic!("expected csv error, got {other:?}"),
        }
    }
}
