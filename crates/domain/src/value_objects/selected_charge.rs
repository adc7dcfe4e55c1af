use serde::{Deserialize, Serialize};

use crate::ids::ChargeId;

/// A charge picked for the current citation.
///
/// Serializes as `{ "value": ..., "label": ... }` so templates can reach the
/// label with `{{label}}` inside `{{#each charges}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedCharge {
    #[serde(rename = "value")]
    pub id: ChargeId,
    pub label: String,
}

impl SelectedCharge {
    pub fn new(id: ChargeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    /// Wraps a charge line read from MDW output
    pub fn from_report(index: usize, label: impl Into<String>) -> Self {
        Self::new(ChargeId::report(index), label)
    }

    /// The same charge offered again under a fresh identifier
    pub fn reoffered(&self) -> Self {
        Self::new(self.id.reoffered(), self.label.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_option() {
        let charge = SelectedCharge::new(ChargeId::catalog(5), "Jaywalking");
        let json = serde_json::to_value(&charge).unwrap();
        assert_eq!(json, serde_json::json!({ "value": "F", "label": "Jaywalking" }));
    }

    #[test]
    fn test_from_report() {
        let charge = SelectedCharge::from_report(2, "Wiggling");
        assert_eq!(charge.id.as_str(), "mdw_2");
        assert_eq!(charge.label, "Wiggling");
    }
}
