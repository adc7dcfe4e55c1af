//! Desktop platform implementations
//!
//! Provides platform-specific implementations for desktop using
//! standard library and native crates.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;

use crate::ports::outbound::platform::{
    ClipboardError, ClipboardProvider, DocumentProvider, LogProvider, StorageProvider,
    TimeProvider,
};
use crate::state::Platform;

/// Environment variable overriding the storage file location
pub const STORAGE_PATH_ENV: &str = "CITEGEN_STORAGE_PATH";

/// Desktop time provider using the system clock
#[derive(Clone, Default)]
pub struct DesktopTimeProvider;

impl TimeProvider for DesktopTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Desktop storage provider with file-based persistence
///
/// Stores key-value pairs in a JSON file at:
/// - Linux: ~/.config/citegen/storage.json
/// - macOS: ~/Library/Application Support/io.citegen.citegen/storage.json
/// - Windows: C:\Users\<User>\AppData\Roaming\citegen\citegen\config\storage.json
///
/// `CITEGEN_STORAGE_PATH` points it somewhere else.
#[derive(Clone)]
pub struct DesktopStorageProvider {
    /// Path to the storage file
    storage_path: PathBuf,
    /// In-memory cache of stored values
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl Default for DesktopStorageProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopStorageProvider {
    /// Create a storage provider at the configured or platform default path
    pub fn new() -> Self {
        let storage_path = match std::env::var_os(STORAGE_PATH_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => default_storage_path(),
        };
        Self::at(storage_path)
    }

    /// Create a storage provider backed by `storage_path`
    ///
    /// Loads existing data from the file if it exists.
    pub fn at(storage_path: impl Into<PathBuf>) -> Self {
        let storage_path = storage_path.into();
        let cache = read_storage_file(&storage_path);

        tracing::debug!("Desktop storage initialized at: {:?}", storage_path);

        Self {
            storage_path,
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// Persist the cache to disk
    fn persist(&self) {
        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::error!("Failed to create storage directory: {}", e);
                    return;
                }
            }
        }

        let cache = match self.cache.read() {
            Ok(guard) => guard,
            Err(e) => {
                tracing::error!("Failed to acquire read lock for storage: {}", e);
                return;
            }
        };

        match serde_json::to_string_pretty(&*cache) {
            Ok(data) => {
                if let Err(e) = fs::write(&self.storage_path, data) {
                    tracing::error!("Failed to write storage file: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("Failed to serialize storage data: {}", e);
            }
        }
    }
}

fn default_storage_path() -> PathBuf {
    if let Some(dirs) = ProjectDirs::from("io", "citegen", "citegen") {
        dirs.config_dir().join("storage.json")
    } else {
        // Fallback to current directory if project dirs unavailable
        PathBuf::from("citegen_storage.json")
    }
}

fn read_storage_file(path: &Path) -> HashMap<String, String> {
    if !path.exists() {
        return HashMap::new();
    }
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Failed to parse storage file: {}", e);
                HashMap::new()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read storage file: {}", e);
            HashMap::new()
        }
    }
}

impl StorageProvider for DesktopStorageProvider {
    fn save(&self, key: &str, value: &str) {
        match self.cache.write() {
            Ok(mut guard) => {
                guard.insert(key.to_string(), value.to_string());
                drop(guard); // Release lock before I/O
                self.persist();
            }
            Err(e) => {
                tracing::error!("Failed to acquire write lock for storage: {}", e);
            }
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        match self.cache.read() {
            Ok(guard) => guard.get(key).cloned(),
            Err(e) => {
                tracing::error!("Failed to acquire read lock for storage: {}", e);
                None
            }
        }
    }
}

/// Program and arguments of a clipboard tool reading from stdin
type ClipboardTool = (&'static str, &'static [&'static str]);

const NO_ARGS: &[&str] = &[];
const XCLIP_ARGS: &[&str] = &["-selection", "clipboard"];
const XSEL_ARGS: &[&str] = &["--clipboard", "--input"];

/// Desktop clipboard provider piping text into the OS clipboard tool
#[derive(Clone, Default)]
pub struct DesktopClipboardProvider;

impl DesktopClipboardProvider {
    /// Clipboard commands to try, most specific first
    fn candidates() -> Vec<ClipboardTool> {
        if cfg!(target_os = "macos") {
            vec![("pbcopy", NO_ARGS)]
        } else if cfg!(target_os = "windows") {
            vec![("clip.exe", NO_ARGS)]
        } else {
            let mut tools = Vec::new();
            if std::env::var_os("WAYLAND_DISPLAY").is_some() {
                tools.push(("wl-copy", NO_ARGS));
            }
            tools.push(("xclip", XCLIP_ARGS));
            tools.push(("xsel", XSEL_ARGS));
            // WSL
            tools.push(("clip.exe", NO_ARGS));
            tools
        }
    }

    fn pipe_to(program: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }
        Ok(child.wait()?.success())
    }
}

impl ClipboardProvider for DesktopClipboardProvider {
    fn copy_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut tried = Vec::new();
        for (program, args) in Self::candidates() {
            match Self::pipe_to(program, args, text) {
                Ok(true) => {
                    tracing::debug!(program, "Copied {} bytes to clipboard", text.len());
                    return Ok(());
                }
                Ok(false) => tried.push(format!("{} exited with an error", program)),
                Err(e) => tried.push(format!("{}: {}", program, e)),
            }
        }
        Err(ClipboardError(tried.join("; ")))
    }
}

/// Desktop log provider using tracing
#[derive(Clone, Default)]
pub struct DesktopLogProvider;

impl LogProvider for DesktopLogProvider {
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

/// Desktop document provider (no browser document to talk to)
#[derive(Clone, Default)]
pub struct DesktopDocumentProvider;

impl DocumentProvider for DesktopDocumentProvider {
    fn set_page_title(&self, _title: &str) {}

    fn set_unload_guard(&self, _enabled: bool) {}
}

/// Create platform services for desktop
pub fn create_platform() -> Platform {
    Platform::new(
        DesktopTimeProvider,
        DesktopStorageProvider::new(),
        DesktopClipboardProvider,
        DesktopLogProvider,
        DesktopDocumentProvider,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = DesktopStorageProvider::at(&path);
        assert_eq!(storage.load("rank"), None);
        storage.save("rank", "Sheriff");
        storage.save("callsign", "221");
        storage.save("callsign", "222");

        let reopened = DesktopStorageProvider::at(&path);
        assert_eq!(reopened.load("rank").as_deref(), Some("Sheriff"));
        assert_eq!(reopened.load("callsign").as_deref(), Some("222"));
        assert_eq!(reopened.load("department"), None);
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn test_corrupt_storage_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let storage = DesktopStorageProvider::at(&path);
        assert_eq!(storage.load("rank"), None);
        storage.save("rank", "Deputy");
        assert_eq!(
            DesktopStorageProvider::at(&path).load("rank").as_deref(),
            Some("Deputy")
        );
    }

    #[test]
    fn test_stored_file_is_a_flat_json_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        DesktopStorageProvider::at(&path).save("department", "The Bay");

        let data = fs::read_to_string(&path).unwrap();
        let map: HashMap<String, String> = serde_json::from_str(&data).unwrap();
        assert_eq!(map.get("department").map(String::as_str), Some("The Bay"));
    }
}
