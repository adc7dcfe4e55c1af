//! Key-value store holding the saved officer configuration.

/// Minimal key-value store for persisted configuration.
///
/// A missing key and a key that was never written are the same thing.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ConfigStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}
