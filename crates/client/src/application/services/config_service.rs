//! Configuration persistence service
//!
//! Reads and writes the officer configuration, one store key per field.

use citegen_domain::{Configuration, ConfigurationKey, PersistedConfig};

use crate::ports::outbound::ConfigStore;

/// Service for loading and saving the officer configuration
pub struct ConfigService<S: ConfigStore> {
    store: S,
}

impl<S: ConfigStore> ConfigService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// What the store currently holds for each configuration key
    pub fn load(&self) -> PersistedConfig {
        let mut persisted = PersistedConfig::default();
        for key in ConfigurationKey::ALL {
            persisted.set(key, self.store.get(key.storage_key()));
        }
        persisted
    }

    /// Writes every configuration field and returns the resulting snapshot
    pub fn save(&self, configuration: &Configuration) -> PersistedConfig {
        for key in ConfigurationKey::ALL {
            self.store.set(key.storage_key(), configuration.get(key));
        }
        tracing::debug!("Saved {} configuration fields", ConfigurationKey::ALL.len());
        PersistedConfig::from_configuration(configuration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::MockConfigStore;
    use mockall::predicate::eq;

    #[test]
    fn test_load_reads_every_key() {
        let mut store = MockConfigStore::new();
        store
            .expect_get()
            .with(eq("rank"))
            .returning(|_| Some("Sheriff".to_string()));
        store.expect_get().returning(|_| None);

        let persisted = ConfigService::new(store).load();
        assert_eq!(persisted.rank.as_deref(), Some("Sheriff"));
        assert_eq!(persisted.department, None);
        assert_eq!(persisted.template_text, None);
    }

    #[test]
    fn test_load_then_resolve_falls_back_to_defaults() {
        let mut store = MockConfigStore::new();
        store
            .expect_get()
            .with(eq("callsign"))
            .returning(|_| Some("221".to_string()));
        store.expect_get().returning(|_| None);

        let configuration = ConfigService::new(store).load().resolve();
        assert_eq!(configuration.callsign, "221");
        assert_eq!(configuration.officer_name, "Matt Rhodes");
    }

    #[test]
    fn test_save_writes_every_key_once() {
        let configuration = Configuration::built_in().with(ConfigurationKey::Rank, "Sheriff");

        let mut store = MockConfigStore::new();
        store
            .expect_set()
            .with(eq("rank"), eq("Sheriff"))
            .times(1)
            .return_const(());
        store
            .expect_set()
            .with(eq("department"), eq("The Bay"))
            .times(1)
            .return_const(());
        store.expect_set().times(3).return_const(());

        let persisted = ConfigService::new(store).save(&configuration);
        assert!(!configuration.has_unsaved_changes(&persisted));
    }
}
