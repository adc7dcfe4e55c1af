//! Application layer - services and the citation controller

pub mod changelog;
pub mod controller;
pub mod services;
pub mod timer;

pub use controller::{CitationController, ResetOutcome};
pub use services::ConfigService;
pub use timer::OneShotTimer;
