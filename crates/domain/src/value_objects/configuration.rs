//! Officer configuration: the part of the citation form that persists.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const DEFAULT_DEPARTMENT: &str = "The Bay";
pub const DEFAULT_OFFICER_NAME: &str = "Matt Rhodes";
pub const DEFAULT_RANK: &str = "Undersheriff";
pub const DEFAULT_CALLSIGN: &str = "320";

/// Built-in citation template (already trimmed)
pub const DEFAULT_TEMPLATE: &str = "{{rank}} {{officerName}} of the {{department}} has hereby cited {{fullName}} with the following charges:
{{#each charges}}
    \u{2022} {{label}}
{{/each}}

This citation amounts to a ${{fine}} fine{{#if points}} and {{points}} points on their driver's license{{/if}}.

Please note that signing this citation is not an admission of guilt, and that you have 60 days to contest these charges.

{{callsign}} {{rank}} {{officerName}}
{{dateTime}}";

/// One configurable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigurationKey {
    Department,
    OfficerName,
    Rank,
    Callsign,
    Template,
}

impl ConfigurationKey {
    pub const ALL: [Self; 5] = [
        Self::Department,
        Self::OfficerName,
        Self::Rank,
        Self::Callsign,
        Self::Template,
    ];

    /// Key under which the field lives in the key-value store
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::OfficerName => "officerName",
            Self::Rank => "rank",
            Self::Callsign => "callsign",
            Self::Template => "template",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Department => "Department",
            Self::OfficerName => "Officer name",
            Self::Rank => "Rank",
            Self::Callsign => "Callsign",
            Self::Template => "Citation template",
        }
    }

    pub fn built_in_value(self) -> &'static str {
        match self {
            Self::Department => DEFAULT_DEPARTMENT,
            Self::OfficerName => DEFAULT_OFFICER_NAME,
            Self::Rank => DEFAULT_RANK,
            Self::Callsign => DEFAULT_CALLSIGN,
            Self::Template => DEFAULT_TEMPLATE,
        }
    }
}

impl fmt::Display for ConfigurationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_key())
    }
}

impl FromStr for ConfigurationKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "department" => Ok(Self::Department),
            "officername" | "officer" => Ok(Self::OfficerName),
            "rank" => Ok(Self::Rank),
            "callsign" => Ok(Self::Callsign),
            "template" | "templatetext" => Ok(Self::Template),
            _ => Err(DomainError::parse(format!(
                "Unknown configuration field: {}",
                s
            ))),
        }
    }
}

/// Current officer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub department: String,
    pub officer_name: String,
    pub rank: String,
    pub callsign: String,
    #[serde(rename = "template")]
    pub template_text: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::built_in()
    }
}

impl Configuration {
    /// Factory defaults
    pub fn built_in() -> Self {
        Self {
            department: DEFAULT_DEPARTMENT.to_string(),
            officer_name: DEFAULT_OFFICER_NAME.to_string(),
            rank: DEFAULT_RANK.to_string(),
            callsign: DEFAULT_CALLSIGN.to_string(),
            template_text: DEFAULT_TEMPLATE.to_string(),
        }
    }

    pub fn get(&self, key: ConfigurationKey) -> &str {
        match key {
            ConfigurationKey::Department => &self.department,
            ConfigurationKey::OfficerName => &self.officer_name,
            ConfigurationKey::Rank => &self.rank,
            ConfigurationKey::Callsign => &self.callsign,
            ConfigurationKey::Template => &self.template_text,
        }
    }

    pub fn set(&mut self, key: ConfigurationKey, value: impl Into<String>) {
        let value = value.into();
        match key {
            ConfigurationKey::Department => self.department = value,
            ConfigurationKey::OfficerName => self.officer_name = value,
            ConfigurationKey::Rank => self.rank = value,
            ConfigurationKey::Callsign => self.callsign = value,
            ConfigurationKey::Template => self.template_text = value,
        }
    }

    /// Builder-style [`Configuration::set`]
    pub fn with(mut self, key: ConfigurationKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// True when every field equals its factory default
    pub fn is_built_in(&self) -> bool {
        ConfigurationKey::ALL
            .iter()
            .all(|key| self.get(*key) == key.built_in_value())
    }

    /// True when the configuration holds changes the store does not.
    ///
    /// A key counts as changed when the store holds a non-empty value that
    /// differs, or when the field was customised (differs from its default)
    /// and the store holds something else or nothing at all. A store entry
    /// that is the empty string never counts against a default field.
    pub fn has_unsaved_changes(&self, persisted: &PersistedConfig) -> bool {
        ConfigurationKey::ALL.iter().any(|key| {
            let current = self.get(*key);
            let stored = persisted.get(*key);

            let stored_differs = stored.is_some_and(|s| !s.is_empty() && s != current);
            let customised_and_unstored =
                current != key.built_in_value() && stored != Some(current);

            stored_differs || customised_and_unstored
        })
    }
}

/// What the key-value store holds for each configuration key.
///
/// `None` means the key was never written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub officer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callsign: Option<String>,
    #[serde(default, rename = "template", skip_serializing_if = "Option::is_none")]
    pub template_text: Option<String>,
}

impl PersistedConfig {
    /// Snapshot of a configuration that has just been written in full
    pub fn from_configuration(configuration: &Configuration) -> Self {
        let mut persisted = Self::default();
        for key in ConfigurationKey::ALL {
            persisted.set(key, Some(configuration.get(key).to_string()));
        }
        persisted
    }

    pub fn get(&self, key: ConfigurationKey) -> Option<&str> {
        match key {
            ConfigurationKey::Department => self.department.as_deref(),
            ConfigurationKey::OfficerName => self.officer_name.as_deref(),
            ConfigurationKey::Rank => self.rank.as_deref(),
            ConfigurationKey::Callsign => self.callsign.as_deref(),
            ConfigurationKey::Template => self.template_text.as_deref(),
        }
    }

    pub fn set(&mut self, key: ConfigurationKey, value: Option<String>) {
        match key {
            ConfigurationKey::Department => self.department = value,
            ConfigurationKey::OfficerName => self.officer_name = value,
            ConfigurationKey::Rank => self.rank = value,
            ConfigurationKey::Callsign => self.callsign = value,
            ConfigurationKey::Template => self.template_text = value,
        }
    }

    /// Stored values with built-in defaults filling the gaps.
    ///
    /// An empty stored value is kept as is.
    pub fn resolve(&self) -> Configuration {
        let mut configuration = Configuration::built_in();
        for key in ConfigurationKey::ALL {
            if let Some(stored) = self.get(key) {
                configuration.set(key, stored);
            }
        }
        configuration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_is_trimmed() {
        assert_eq!(DEFAULT_TEMPLATE, DEFAULT_TEMPLATE.trim());
        assert!(DEFAULT_TEMPLATE.starts_with("{{rank}}"));
        assert!(DEFAULT_TEMPLATE.ends_with("{{dateTime}}"));
    }

    #[test]
    fn test_parse_key_accepts_common_spellings() {
        assert_eq!(
            "officer-name".parse::<ConfigurationKey>().unwrap(),
            ConfigurationKey::OfficerName
        );
        assert_eq!(
            "officerName".parse::<ConfigurationKey>().unwrap(),
            ConfigurationKey::OfficerName
        );
        assert_eq!(
            "template_text".parse::<ConfigurationKey>().unwrap(),
            ConfigurationKey::Template
        );
        assert!("badge".parse::<ConfigurationKey>().is_err());
    }

    #[test]
    fn test_is_built_in() {
        assert!(Configuration::built_in().is_built_in());
        let changed = Configuration::built_in().with(ConfigurationKey::Rank, "Sheriff");
        assert!(!changed.is_built_in());
    }

    #[test]
    fn test_resolve_keeps_empty_stored_values() {
        let persisted = PersistedConfig {
            rank: Some(String::new()),
            callsign: Some("221".into()),
            ..Default::default()
        };
        let resolved = persisted.resolve();
        assert_eq!(resolved.rank, "");
        assert_eq!(resolved.callsign, "221");
        assert_eq!(resolved.department, DEFAULT_DEPARTMENT);
    }

    #[test]
    fn test_defaults_with_empty_store_are_saved() {
        let config = Configuration::built_in();
        assert!(!config.has_unsaved_changes(&PersistedConfig::default()));
    }

    #[test]
    fn test_customised_field_without_store_is_unsaved() {
        let config = Configuration::built_in().with(ConfigurationKey::Callsign, "221");
        assert!(config.has_unsaved_changes(&PersistedConfig::default()));
    }

    #[test]
    fn test_matching_store_is_saved() {
        let config = Configuration::built_in().with(ConfigurationKey::Callsign, "221");
        let persisted = PersistedConfig::from_configuration(&config);
        assert!(!config.has_unsaved_changes(&persisted));
    }

    #[test]
    fn test_reverting_to_default_after_save_is_unsaved() {
        let saved = Configuration::built_in().with(ConfigurationKey::Rank, "Sheriff");
        let persisted = PersistedConfig::from_configuration(&saved);
        let current = Configuration::built_in();
        assert!(current.has_unsaved_changes(&persisted));
    }

    #[test]
    fn test_empty_stored_value_does_not_flag_default_field() {
        let persisted = PersistedConfig {
            rank: Some(String::new()),
            ..Default::default()
        };
        assert!(!Configuration::built_in().has_unsaved_changes(&persisted));
    }
}
