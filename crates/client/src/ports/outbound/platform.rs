//! Platform abstraction ports for cross-platform compatibility
//!
//! These traits abstract platform-specific operations so that:
//! 1. Application code remains platform-agnostic
//! 2. Platform-specific code is isolated in infrastructure
//! 3. Code becomes easily testable with mock implementations
//!
//! NOTE: The `Platform` struct (DI container) that aggregates these traits
//! lives in `state/platform.rs`, not here.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Time operations abstraction
pub trait TimeProvider: Clone + 'static {
    /// Current wall-clock time
    fn now(&self) -> DateTime<Utc>;
}

/// Persistent storage abstraction (localStorage/file-based)
pub trait StorageProvider: Clone + 'static {
    /// Save a string value with the given key
    fn save(&self, key: &str, value: &str);

    /// Load a string value by key, returns None if not found
    fn load(&self, key: &str) -> Option<String>;
}

/// The clipboard could not be written
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

/// System clipboard abstraction
pub trait ClipboardProvider: Clone + 'static {
    /// Replace the clipboard contents with `text`
    fn copy_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Logging abstraction
pub trait LogProvider: Clone + 'static {
    fn info(&self, msg: &str);
    fn error(&self, msg: &str);
    fn warn(&self, msg: &str);
}

/// Browser document operations
pub trait DocumentProvider: Clone + 'static {
    /// Set the browser page title (no-op on desktop)
    fn set_page_title(&self, title: &str);

    /// Ask the host to confirm before the page is left or reloaded
    /// (no-op on desktop)
    fn set_unload_guard(&self, enabled: bool);
}
