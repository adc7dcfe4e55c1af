//! WASM platform implementations
//!
//! Browser-backed implementations using web-sys. Browser handles are looked
//! up on every call so the providers stay `Send + Sync`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::ports::outbound::platform::{
    ClipboardError, ClipboardProvider, DocumentProvider, LogProvider, StorageProvider,
    TimeProvider,
};
use crate::state::Platform;

/// WASM time provider using `Date.now()`
#[derive(Clone, Default)]
pub struct WasmTimeProvider;

impl TimeProvider for WasmTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
    }
}

/// WASM storage provider using `window.localStorage`
#[derive(Clone, Default)]
pub struct WasmStorageProvider;

impl WasmStorageProvider {
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl StorageProvider for WasmStorageProvider {
    fn save(&self, key: &str, value: &str) {
        match Self::local_storage() {
            Some(storage) => {
                if let Err(e) = storage.set_item(key, value) {
                    tracing::error!("Failed to write localStorage key {}: {:?}", key, e);
                }
            }
            None => tracing::warn!("localStorage unavailable; {} not saved", key),
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        Self::local_storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::local_storage() {
            if let Err(e) = storage.remove_item(key) {
                tracing::error!("Failed to remove localStorage key {}: {:?}", key, e);
            }
        }
    }
}

/// WASM clipboard provider using `navigator.clipboard`
#[derive(Clone, Default)]
pub struct WasmClipboardProvider;

impl ClipboardProvider for WasmClipboardProvider {
    fn copy_text(&self, text: &str) -> Result<(), ClipboardError> {
        let window =
            web_sys::window().ok_or_else(|| ClipboardError("no browser window".into()))?;
        let promise = window.navigator().clipboard().write_text(text);
        let bytes = text.len();
        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => tracing::debug!("Copied {} bytes to clipboard", bytes),
                Err(e) => tracing::error!("Clipboard write rejected: {:?}", e),
            }
        });
        Ok(())
    }
}

/// WASM log provider; `tracing-wasm` forwards to the browser console
#[derive(Clone, Default)]
pub struct WasmLogProvider;

impl LogProvider for WasmLogProvider {
    fn info(&self, msg: &str) {
        tracing::info!("{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!("{}", msg);
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{}", msg);
    }
}

/// WASM document provider
///
/// A single `beforeunload` listener is installed up front; the guard flag
/// decides whether it asks the user to confirm.
#[derive(Clone)]
pub struct WasmDocumentProvider {
    guard: Arc<AtomicBool>,
}

impl Default for WasmDocumentProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmDocumentProvider {
    pub fn new() -> Self {
        let guard = Arc::new(AtomicBool::new(false));

        if let Some(window) = web_sys::window() {
            let flag = guard.clone();
            let listener = Closure::<dyn FnMut(web_sys::BeforeUnloadEvent)>::new(
                move |event: web_sys::BeforeUnloadEvent| {
                    if flag.load(Ordering::Relaxed) {
                        event.prevent_default();
                        event.set_return_value("You have unsaved configuration changes.");
                    }
                },
            );
            if let Err(e) = window
                .add_event_listener_with_callback("beforeunload", listener.as_ref().unchecked_ref())
            {
                tracing::warn!("Failed to install beforeunload listener: {:?}", e);
            }
            // The listener lives as long as the page.
            listener.forget();
        }

        Self { guard }
    }
}

impl DocumentProvider for WasmDocumentProvider {
    fn set_page_title(&self, title: &str) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.set_title(title);
        }
    }

    fn set_unload_guard(&self, enabled: bool) {
        self.guard.store(enabled, Ordering::Relaxed);
    }
}

/// Create platform services for the browser
pub fn create_platform() -> Platform {
    Platform::new(
        WasmTimeProvider,
        WasmStorageProvider,
        WasmClipboardProvider,
        WasmLogProvider,
        WasmDocumentProvider::new(),
    )
}
