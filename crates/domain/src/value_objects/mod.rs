mod configuration;
mod selected_charge;

pub use configuration::{
    Configuration, ConfigurationKey, PersistedConfig, DEFAULT_CALLSIGN, DEFAULT_DEPARTMENT,
    DEFAULT_OFFICER_NAME, DEFAULT_RANK, DEFAULT_TEMPLATE,
};
pub use selected_charge::SelectedCharge;
