//! In-memory platform for tests.
//!
//! Every mock shares its state through an `Arc`, so a test keeps a clone of
//! the [`MockPlatform`] handles and inspects them after the code under test
//! ran against [`MockPlatform::platform`].

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::ports::outbound::platform::{
    ClipboardError, ClipboardProvider, DocumentProvider, LogProvider, StorageProvider,
    TimeProvider,
};
use crate::state::Platform;

// A panicking test may poison a lock; later assertions still want the data.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

/// Mock clock with controllable time
#[derive(Clone)]
pub struct MockTimeProvider {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl Default for MockTimeProvider {
    /// Frozen at 2026-01-15 17:00:00 UTC (noon Eastern)
    fn default() -> Self {
        let noon_eastern = Utc
            .with_ymd_and_hms(2026, 1, 15, 17, 0, 0)
            .single()
            .unwrap_or_default();
        Self::new(noon_eastern)
    }
}

impl MockTimeProvider {
    pub fn new(frozen_time: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(RwLock::new(frozen_time)),
        }
    }

    /// Advance the frozen time by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut now = write(&self.now);
        *now += duration;
    }

    pub fn advance_millis(&self, millis: i64) {
        self.advance(Duration::milliseconds(millis));
    }
}

impl TimeProvider for MockTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        *read(&self.now)
    }
}

/// In-memory key-value storage
#[derive(Clone, Default)]
pub struct MockStorageProvider {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl MockStorageProvider {
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let storage = Self::default();
        for (key, value) in entries {
            storage.save(key, value);
        }
        storage
    }

    pub fn len(&self) -> usize {
        read(&self.data).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageProvider for MockStorageProvider {
    fn save(&self, key: &str, value: &str) {
        write(&self.data).insert(key.to_string(), value.to_string());
    }

    fn load(&self, key: &str) -> Option<String> {
        read(&self.data).get(key).cloned()
    }
}

/// Clipboard recording what was copied; can be told to fail
#[derive(Clone, Default)]
pub struct MockClipboardProvider {
    copied: Arc<RwLock<Vec<String>>>,
    unavailable: Arc<RwLock<bool>>,
}

impl MockClipboardProvider {
    /// Last text copied
    pub fn contents(&self) -> Option<String> {
        read(&self.copied).last().cloned()
    }

    pub fn copy_count(&self) -> usize {
        read(&self.copied).len()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *write(&self.unavailable) = unavailable;
    }
}

impl ClipboardProvider for MockClipboardProvider {
    fn copy_text(&self, text: &str) -> Result<(), ClipboardError> {
        if *read(&self.unavailable) {
            return Err(ClipboardError("mock clipboard unavailable".into()));
        }
        write(&self.copied).push(text.to_string());
        Ok(())
    }
}

/// Log provider collecting `LEVEL message` lines
#[derive(Clone, Default)]
pub struct MockLogProvider {
    messages: Arc<RwLock<Vec<String>>>,
}

impl MockLogProvider {
    pub fn messages(&self) -> Vec<String> {
        read(&self.messages).clone()
    }

    fn push(&self, level: &str, msg: &str) {
        write(&self.messages).push(format!("{} {}", level, msg));
    }
}

impl LogProvider for MockLogProvider {
    fn info(&self, msg: &str) {
        self.push("INFO", msg);
    }

    fn error(&self, msg: &str) {
        self.push("ERROR", msg);
    }

    fn warn(&self, msg: &str) {
        self.push("WARN", msg);
    }
}

/// Document provider remembering the title and unload guard
#[derive(Clone, Default)]
pub struct MockDocumentProvider {
    title: Arc<RwLock<Option<String>>>,
    unload_guard: Arc<RwLock<bool>>,
}

impl MockDocumentProvider {
    pub fn title(&self) -> Option<String> {
        read(&self.title).clone()
    }

    pub fn unload_guard(&self) -> bool {
        *read(&self.unload_guard)
    }
}

impl DocumentProvider for MockDocumentProvider {
    fn set_page_title(&self, title: &str) {
        *write(&self.title) = Some(title.to_string());
    }

    fn set_unload_guard(&self, enabled: bool) {
        *write(&self.unload_guard) = enabled;
    }
}

/// Handles to every mock behind a [`Platform`]
#[derive(Clone, Default)]
pub struct MockPlatform {
    pub clock: MockTimeProvider,
    pub storage: MockStorageProvider,
    pub clipboard: MockClipboardProvider,
    pub log: MockLogProvider,
    pub document: MockDocumentProvider,
}

impl MockPlatform {
    pub fn with_storage(storage: MockStorageProvider) -> Self {
        Self {
            storage,
            ..Default::default()
        }
    }

    /// A platform wired to these mocks
    pub fn platform(&self) -> Platform {
        Platform::new(
            self.clock.clone(),
            self.storage.clone(),
            self.clipboard.clone(),
            self.log.clone(),
            self.document.clone(),
        )
    }
}
