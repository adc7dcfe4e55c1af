use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix for charges imported from MDW output
const REPORT_PREFIX: &str = "mdw_";

/// Identifier of a selectable charge option.
///
/// Catalog entries use a single letter (`A` for the first record). Options that
/// re-offer an already selected charge append `1` to the selected identifier,
/// and charges read from MDW output use `mdw_<index>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChargeId(String);

impl ChargeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Identifier of the catalog record at `index`
    pub fn catalog(index: usize) -> Self {
        let code = u32::try_from(index)
            .ok()
            .and_then(|i| char::from_u32(u32::from(b'A') + i))
            .unwrap_or('?');
        Self(code.to_string())
    }

    /// Identifier of the `index`-th charge imported from a report
    pub fn report(index: usize) -> Self {
        Self(format!("{REPORT_PREFIX}{index}"))
    }

    /// Identifier under which an already selected option is offered again
    pub fn reoffered(&self) -> Self {
        Self(format!("{}1", self.0))
    }

    pub fn is_report(&self) -> bool {
        self.0.starts_with(REPORT_PREFIX)
    }

    /// Catalog index this identifier points at, ignoring re-offer suffixes.
    ///
    /// Report identifiers never resolve.
    pub fn catalog_index(&self) -> Option<usize> {
        if self.is_report() {
            return None;
        }
        let base = self.0.trim_end_matches('1');
        let mut chars = base.chars();
        let code = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let offset = u32::from(code).checked_sub(u32::from(b'A'))?;
        usize::try_from(offset).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChargeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChargeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ChargeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
