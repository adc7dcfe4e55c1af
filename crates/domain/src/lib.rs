extern crate self as citegen_domain;

pub mod catalog;
pub mod common;
pub mod entities;
pub mod error;
pub mod ids;
pub mod report;
pub mod template;
pub mod value_objects;

pub use catalog::{ChargeRecord, CHARGES};
pub use entities::{CitationForm, FormField, FormUpdate};
pub use error::{DomainError, ReportParseError};
pub use ids::ChargeId;
pub use report::{parse_report, ParsedReport, SENTENCING_MARKER};
pub use template::{Template, TemplateError, Value};
pub use value_objects::{
    Configuration, ConfigurationKey, PersistedConfig, SelectedCharge, DEFAULT_CALLSIGN,
    DEFAULT_DEPARTMENT, DEFAULT_OFFICER_NAME, DEFAULT_RANK, DEFAULT_TEMPLATE,
};
