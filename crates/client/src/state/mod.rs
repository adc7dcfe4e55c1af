//! Shared application state containers

pub mod platform;

pub use platform::{Platform, PlatformStorageAdapter};
