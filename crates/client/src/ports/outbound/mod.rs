//! Outbound ports - what the application needs from the outside world

pub mod config_store;
pub mod platform;

pub use config_store::ConfigStore;
#[cfg(any(test, feature = "testing"))]
pub use config_store::MockConfigStore;
pub use platform::{
    ClipboardError, ClipboardProvider, DocumentProvider, LogProvider, StorageProvider,
    TimeProvider,
};
