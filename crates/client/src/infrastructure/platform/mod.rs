//! Platform providers
//!
//! Browser providers on wasm32, file/OS-tool providers everywhere else.
//! `mock` backs the tests.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
mod desktop;

#[cfg(any(test, feature = "testing"))]
pub mod mock;

// Re-export the platform-specific types explicitly
#[cfg(target_arch = "wasm32")]
pub use wasm::{
    create_platform, WasmClipboardProvider, WasmDocumentProvider, WasmLogProvider,
    WasmStorageProvider, WasmTimeProvider,
};

#[cfg(not(target_arch = "wasm32"))]
pub use desktop::{
    create_platform, DesktopClipboardProvider, DesktopDocumentProvider, DesktopLogProvider,
    DesktopStorageProvider, DesktopTimeProvider, STORAGE_PATH_ENV,
};
