//! Platform DI Container
//!
//! This module provides the `Platform` struct - a dependency injection container
//! that aggregates all platform-specific service implementations behind port traits.
//!
//! Usage:
//! - Created by `create_platform()` in platform/desktop.rs or platform/wasm.rs
//! - Handed to `CitationController` by the CLI or injected into Dioxus context
//! - Tests build one from `infrastructure::platform::mock::MockPlatform`

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::ports::outbound::{
    ClipboardError, ClipboardProvider, ConfigStore, DocumentProvider, LogProvider,
    StorageProvider, TimeProvider,
};

/// Unified platform services container
#[derive(Clone)]
pub struct Platform {
    time: Arc<dyn TimeProviderDyn>,
    storage: Arc<dyn StorageProviderDyn>,
    clipboard: Arc<dyn ClipboardProviderDyn>,
    log: Arc<dyn LogProviderDyn>,
    document: Arc<dyn DocumentProviderDyn>,
}

// =============================================================================
// Dynamic trait versions for Arc storage (need Send + Sync for Dioxus context)
// =============================================================================

trait TimeProviderDyn: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

trait StorageProviderDyn: Send + Sync {
    fn save(&self, key: &str, value: &str);
    fn load(&self, key: &str) -> Option<String>;
}

trait ClipboardProviderDyn: Send + Sync {
    fn copy_text(&self, text: &str) -> Result<(), ClipboardError>;
}

trait LogProviderDyn: Send + Sync {
    fn info(&self, msg: &str);
    fn error(&self, msg: &str);
    fn warn(&self, msg: &str);
}

trait DocumentProviderDyn: Send + Sync {
    fn set_page_title(&self, title: &str);
    fn set_unload_guard(&self, enabled: bool);
}

// =============================================================================
// Blanket implementations - convert port traits to dyn-safe wrappers
// =============================================================================

impl<T: TimeProvider + Send + Sync> TimeProviderDyn for T {
    fn now(&self) -> DateTime<Utc> {
        TimeProvider::now(self)
    }
}

impl<T: StorageProvider + Send + Sync> StorageProviderDyn for T {
    fn save(&self, key: &str, value: &str) {
        StorageProvider::save(self, key, value)
    }
    fn load(&self, key: &str) -> Option<String> {
        StorageProvider::load(self, key)
    }
}

impl<T: ClipboardProvider + Send + Sync> ClipboardProviderDyn for T {
    fn copy_text(&self, text: &str) -> Result<(), ClipboardError> {
        ClipboardProvider::copy_text(self, text)
    }
}

impl<T: LogProvider + Send + Sync> LogProviderDyn for T {
    fn info(&self, msg: &str) {
        LogProvider::info(self, msg)
    }
    fn error(&self, msg: &str) {
        LogProvider::error(self, msg)
    }
    fn warn(&self, msg: &str) {
        LogProvider::warn(self, msg)
    }
}

impl<T: DocumentProvider + Send + Sync> DocumentProviderDyn for T {
    fn set_page_title(&self, title: &str) {
        DocumentProvider::set_page_title(self, title)
    }
    fn set_unload_guard(&self, enabled: bool) {
        DocumentProvider::set_unload_guard(self, enabled)
    }
}

// =============================================================================
// Platform implementation
// =============================================================================

impl Platform {
    /// Create a new Platform with the given providers
    pub fn new<Tm, S, C, L, D>(time: Tm, storage: S, clipboard: C, log: L, document: D) -> Self
    where
        Tm: TimeProvider + Send + Sync,
        S: StorageProvider + Send + Sync,
        C: ClipboardProvider + Send + Sync,
        L: LogProvider + Send + Sync,
        D: DocumentProvider + Send + Sync,
    {
        Self {
            time: Arc::new(time),
            storage: Arc::new(storage),
            clipboard: Arc::new(clipboard),
            log: Arc::new(log),
            document: Arc::new(document),
        }
    }

    // -------------------------------------------------------------------------
    // Time operations
    // -------------------------------------------------------------------------

    pub fn now(&self) -> DateTime<Utc> {
        self.time.now()
    }

    // -------------------------------------------------------------------------
    // Storage operations
    // -------------------------------------------------------------------------

    /// Save a string value with the given key
    pub fn storage_save(&self, key: &str, value: &str) {
        self.storage.save(key, value)
    }

    /// Load a string value by key, returns None if not found
    pub fn storage_load(&self, key: &str) -> Option<String> {
        self.storage.load(key)
    }

    /// Get a `ConfigStore` adapter for use with application services
    ///
    /// # Example
    /// ```ignore
    /// let service = ConfigService::new(platform.storage_adapter());
    /// let persisted = service.load();
    /// ```
    pub fn storage_adapter(&self) -> PlatformStorageAdapter {
        PlatformStorageAdapter {
            platform: self.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Clipboard operations
    // -------------------------------------------------------------------------

    pub fn copy_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.clipboard.copy_text(text)
    }

    // -------------------------------------------------------------------------
    // Logging operations
    // -------------------------------------------------------------------------

    /// Log an info message
    pub fn log_info(&self, msg: &str) {
        self.log.info(msg)
    }

    /// Log an error message
    pub fn log_error(&self, msg: &str) {
        self.log.error(msg)
    }

    /// Log a warning message
    pub fn log_warn(&self, msg: &str) {
        self.log.warn(msg)
    }

    // -------------------------------------------------------------------------
    // Document operations
    // -------------------------------------------------------------------------

    /// Set the browser page title (no-op on desktop)
    pub fn set_page_title(&self, title: &str) {
        self.document.set_page_title(title)
    }

    /// Enable or disable the leave-page confirmation (no-op on desktop)
    pub fn set_unload_guard(&self, enabled: bool) {
        self.document.set_unload_guard(enabled)
    }
}

// =============================================================================
// Storage adapter for application services
// =============================================================================

/// Adapter that allows application services to use Platform's storage
///
/// Implements the `ConfigStore` port by delegating to Platform's storage
/// provider, so `ConfigService` never sees the concrete backend.
#[derive(Clone)]
pub struct PlatformStorageAdapter {
    platform: Platform,
}

impl ConfigStore for PlatformStorageAdapter {
    fn get(&self, key: &str) -> Option<String> {
        self.platform.storage_load(key)
    }

    fn set(&self, key: &str, value: &str) {
        self.platform.storage_save(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::mock::MockPlatform;

    #[test]
    fn test_storage_adapter_reads_platform_storage() {
        let mock = MockPlatform::default();
        let platform = mock.platform();
        platform.storage_save("rank", "Sheriff");

        let adapter = platform.storage_adapter();
        assert_eq!(adapter.get("rank").as_deref(), Some("Sheriff"));
        adapter.set("callsign", "221");
        assert_eq!(platform.storage_load("callsign").as_deref(), Some("221"));
        assert_eq!(
            StorageProvider::load(&mock.storage, "callsign").as_deref(),
            Some("221")
        );
    }

    #[test]
    fn test_clipboard_and_log_are_forwarded() {
        let mock = MockPlatform::default();
        let platform = mock.platform();
        platform.copy_text("citation").unwrap();
        platform.log_info("copied");

        assert_eq!(mock.clipboard.contents().as_deref(), Some("citation"));
        assert_eq!(mock.log.messages(), vec!["INFO copied".to_string()]);
    }
}
