//! Citation form - everything the citation text is rendered from
//!
//! The form is a plain owned value. Every change goes through
//! [`CitationForm::apply`], which consumes the current form and returns the
//! next one, so a caller can hold on to the previous state or compare them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{format_eastern_timestamp, format_money};
use crate::error::DomainError;
use crate::report::ParsedReport;
use crate::template::{Template, TemplateError, Value};
use crate::value_objects::{Configuration, ConfigurationKey, SelectedCharge};

/// The citation being written plus the officer configuration it is signed with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationForm {
    pub full_name: String,
    pub fine_amount: Option<f64>,
    pub point_count: Option<u32>,
    pub selected_charges: Vec<SelectedCharge>,
    #[serde(flatten)]
    pub configuration: Configuration,
}

/// A single-value form field addressable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FullName,
    Fine,
    Points,
    Configuration(ConfigurationKey),
}

impl FormField {
    pub fn configuration_key(self) -> Option<ConfigurationKey> {
        match self {
            Self::Configuration(key) => Some(key),
            _ => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullName => f.write_str("fullName"),
            Self::Fine => f.write_str("fine"),
            Self::Points => f.write_str("points"),
            Self::Configuration(key) => write!(f, "{}", key),
        }
    }
}

impl FromStr for FormField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "fullname" | "name" => Ok(Self::FullName),
            "fine" | "fineamount" => Ok(Self::Fine),
            "points" | "pointcount" => Ok(Self::Points),
            _ => s
                .parse::<ConfigurationKey>()
                .map(Self::Configuration)
                .map_err(|_| DomainError::parse(format!("Unknown form field: {}", s))),
        }
    }
}

/// A state transition for [`CitationForm`]
#[derive(Debug, Clone, PartialEq)]
pub enum FormUpdate {
    FullName(String),
    Fine(Option<f64>),
    Points(Option<u32>),
    Charges(Vec<SelectedCharge>),
    Configuration(ConfigurationKey, String),
    /// Swap in a whole configuration (reset to saved or built-in values)
    ReplaceConfiguration(Configuration),
    /// Overwrite name, fine, points and charges from MDW output
    ParsedReport(ParsedReport),
    /// Empty name, fine, points and charges; configuration stays
    ClearCitation,
}

impl FormUpdate {
    /// Builds an update from raw text typed into `field`.
    ///
    /// Blank fine and points clear the value. Fines must be finite and not
    /// negative.
    pub fn from_field(field: FormField, raw: &str) -> Result<Self, DomainError> {
        match field {
            FormField::FullName => Ok(Self::FullName(raw.to_string())),
            FormField::Fine => {
                let raw = raw.trim();
                if raw.is_empty() {
                    return Ok(Self::Fine(None));
                }
                let amount: f64 = raw
                    .replace(',', "")
                    .parse()
                    .map_err(|_| DomainError::validation(format!("Fine is not a number: {}", raw)))?;
                if !amount.is_finite() || amount < 0.0 {
                    return Err(DomainError::validation(format!(
                        "Fine must be a non-negative amount: {}",
                        raw
                    )));
                }
                Ok(Self::Fine(Some(amount)))
            }
            FormField::Points => {
                let raw = raw.trim();
                if raw.is_empty() {
                    return Ok(Self::Points(None));
                }
                raw.parse::<u32>().map(|p| Self::Points(Some(p))).map_err(|_| {
                    DomainError::validation(format!("Points must be a whole number: {}", raw))
                })
            }
            FormField::Configuration(key) => Ok(Self::Configuration(key, raw.to_string())),
        }
    }
}

impl CitationForm {
    /// Empty citation signed with `configuration`
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            ..Default::default()
        }
    }

    pub fn apply(mut self, update: FormUpdate) -> Self {
        match update {
            FormUpdate::FullName(name) => self.full_name = name,
            FormUpdate::Fine(fine) => self.fine_amount = fine,
            FormUpdate::Points(points) => self.point_count = points,
            FormUpdate::Charges(charges) => self.selected_charges = charges,
            FormUpdate::Configuration(key, value) => self.configuration.set(key, value),
            FormUpdate::ReplaceConfiguration(configuration) => self.configuration = configuration,
            FormUpdate::ParsedReport(report) => {
                self.selected_charges = report.selected_charges();
                self.full_name = report.full_name;
                self.fine_amount = Some(report.fine_amount);
                self.point_count = report.point_count;
            }
            FormUpdate::ClearCitation => {
                self.full_name.clear();
                self.fine_amount = None;
                self.point_count = None;
                self.selected_charges.clear();
            }
        }
        self
    }

    /// Values the citation template can reference, stamped with `now`
    pub fn template_context(&self, now: DateTime<Utc>) -> Value {
        let charges: Vec<Value> = self
            .selected_charges
            .iter()
            .map(|charge| {
                Value::object()
                    .with("value", charge.id.as_str())
                    .with("label", charge.label.as_str())
            })
            .collect();

        Value::object()
            .with("fullName", self.full_name.as_str())
            .with("fine", self.fine_amount.map(format_money).unwrap_or_default())
            .with("points", self.point_count)
            .with("charges", charges)
            .with("department", self.configuration.department.as_str())
            .with("officerName", self.configuration.officer_name.as_str())
            .with("rank", self.configuration.rank.as_str())
            .with("callsign", self.configuration.callsign.as_str())
            .with("dateTime", format_eastern_timestamp(now))
    }

    /// Renders the configured template (surrounding whitespace ignored)
    pub fn render(&self, now: DateTime<Utc>) -> Result<String, TemplateError> {
        let template = Template::compile(self.configuration.template_text.trim())?;
        Ok(template.render(&self.template_context(now)))
    }
}
