//! Entities - mutable state with identity over a session

mod citation_form;

pub use citation_form::{CitationForm, FormField, FormUpdate};
