//! Citegen client: the citation controller, its platform adapters and the
//! two front ends (command line on native targets, web page on wasm).

pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod state;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli;

#[cfg(target_arch = "wasm32")]
pub mod ui;

pub use application::{CitationController, ResetOutcome};
pub use infrastructure::platform::create_platform;
pub use state::Platform;
