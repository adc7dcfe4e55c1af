//! Common utility functions shared across the domain and the client.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **WASM compatible** - all code must work in both native and WASM targets

pub mod datetime;
pub mod money;

// Re-export commonly used functions at crate root for convenience
pub use datetime::{eastern_zone, format_eastern_timestamp, EasternZone};
pub use money::{format_money, parse_amount_prefix};
