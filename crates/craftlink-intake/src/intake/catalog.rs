//! Closed configuration lists the signup form renders as selections.
//!
//! These are consumed as fixed enumerations, never computed; the payload
//! builders rely on every stored label resolving back to a catalog entry.

use serde::{Deserialize, Serialize};

/// Service categories offered at launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceCategory {
    #[serde(rename = "Plumbing")]
    Plumbing,
    #[serde(rename = "Electrical")]
    Electrical,
    #[serde(rename = "Carpentry")]
    Carpentry,
    #[serde(rename = "Tailoring")]
    Tailoring,
    #[serde(rename = "Hair & Beauty")]
    HairAndBeauty,
    #[serde(rename = "Cleaning")]
    Cleaning,
    #[serde(rename = "Painting")]
    Painting,
    #[serde(rename = "Appliance Repair")]
    ApplianceRepair,
    #[serde(rename = "Catering")]
    Catering,
    #[serde(rename = "Photography")]
    Photography,
    #[serde(rename = "Generator Repair")]
    GeneratorRepair,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 11] = [
        ServiceCategory::Plumbing,
        ServiceCategory::Electrical,
        ServiceCategory::Carpentry,
        ServiceCategory::Tailoring,
        ServiceCategory::HairAndBeauty,
        ServiceCategory::Cleaning,
        ServiceCategory::Painting,
        ServiceCategory::ApplianceRepair,
        ServiceCategory::Catering,
        ServiceCategory::Photography,
        ServiceCategory::GeneratorRepair,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ServiceCategory::Plumbing => "Plumbing",
            ServiceCategory::Electrical => "Electrical",
            ServiceCategory::Carpentry => "Carpentry",
            ServiceCategory::Tailoring => "Tailoring",
            ServiceCategory::HairAndBeauty => "Hair & Beauty",
            ServiceCategory::Cleaning => "Cleaning",
            ServiceCategory::Painting => "Painting",
            ServiceCategory::ApplianceRepair => "Appliance Repair",
            ServiceCategory::Catering => "Catering",
            ServiceCategory::Photography => "Photography",
            ServiceCategory::GeneratorRepair => "Generator Repair",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
    }
}

/// How long a provider has been in their trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceBand {
    #[serde(rename = "Less than 1 year")]
    LessThanOneYear,
    #[serde(rename = "1-3 years")]
    OneToThreeYears,
    #[serde(rename = "3-5 years")]
    ThreeToFiveYears,
    #[serde(rename = "5-10 years")]
    FiveToTenYears,
    #[serde(rename = "Over 10 years")]
    OverTenYears,
}

impl ExperienceBand {
    pub const ALL: [ExperienceBand; 5] = [
        ExperienceBand::LessThanOneYear,
        ExperienceBand::OneToThreeYears,
        ExperienceBand::ThreeToFiveYears,
        ExperienceBand::FiveToTenYears,
        ExperienceBand::OverTenYears,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ExperienceBand::LessThanOneYear => "Less than 1 year",
            ExperienceBand::OneToThreeYears => "1-3 years",
            ExperienceBand::ThreeToFiveYears => "3-5 years",
            ExperienceBand::FiveToTenYears => "5-10 years",
            ExperienceBand::OverTenYears => "Over 10 years",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|band| band.label().eq_ignore_ascii_case(trimmed))
    }
}

/// Whether a provider offers labor, goods, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferingType {
    Service,
    Product,
    Both,
}

impl OfferingType {
    pub const ALL: [OfferingType; 3] = [
        OfferingType::Service,
        OfferingType::Product,
        OfferingType::Both,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            OfferingType::Service => "Service",
            OfferingType::Product => "Product",
            OfferingType::Both => "Both",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|offering| offering.label().eq_ignore_ascii_case(trimmed))
    }
}

/// Settlement bank option for provider payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bank {
    pub name: &'static str,
    pub code: &'static str,
}

/// The banks providers can pick for settlement, with their NIP codes.
pub const BANKS: [Bank; 24] = [
    Bank { name: "Access Bank", code: "044" },
    Bank { name: "Citibank Nigeria", code: "023" },
    Bank { name: "Ecobank Nigeria", code: "050" },
    Bank { name: "Fidelity Bank", code: "070" },
    Bank { name: "First Bank of Nigeria", code: "011" },
    Bank { name: "First City Monument Bank", code: "214" },
    Bank { name: "Globus Bank", code: "103" },
    Bank { name: "Guaranty Trust Bank", code: "058" },
    Bank { name: "Heritage Bank", code: "030" },
    Bank { name: "Jaiz Bank", code: "301" },
    Bank { name: "Keystone Bank", code: "082" },
    Bank { name: "Kuda Microfinance Bank", code: "50211" },
    Bank { name: "Moniepoint Microfinance Bank", code: "50515" },
    Bank { name: "OPay Digital Services", code: "999992" },
    Bank { name: "PalmPay", code: "999991" },
    Bank { name: "Polaris Bank", code: "076" },
    Bank { name: "Providus Bank", code: "101" },
    Bank { name: "Stanbic IBTC Bank", code: "221" },
    Bank { name: "Standard Chartered Bank", code: "068" },
    Bank { name: "Sterling Bank", code: "232" },
    Bank { name: "Union Bank of Nigeria", code: "032" },
    Bank { name: "United Bank for Africa", code: "033" },
    Bank { name: "Wema Bank", code: "035" },
    Bank { name: "Zenith Bank", code: "057" },
];

pub fn bank_by_code(code: &str) -> Option<Bank> {
    let trimmed = code.trim();
    BANKS.into_iter().find(|bank| bank.code == trimmed)
}

pub fn bank_by_name(name: &str) -> Option<Bank> {
    let trimmed = name.trim();
    BANKS
        .into_iter()
        .find(|bank| bank.name.eq_ignore_ascii_case(trimmed))
}

/// All four lists in one serializable view for form rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub service_categories: Vec<&'static str>,
    pub experience_bands: Vec<&'static str>,
    pub offering_types: Vec<&'static str>,
    pub banks: Vec<Bank>,
}

impl CatalogView {
    pub fn current() -> Self {
        Self {
            service_categories: ServiceCategory::ALL.iter().map(|c| c.label()).collect(),
            experience_bands: ExperienceBand::ALL.iter().map(|b| b.label()).collect(),
            offering_types: OfferingType::ALL.iter().map(|o| o.label()).collect(),
            banks: BANKS.to_vec(),
        }
    }
}
