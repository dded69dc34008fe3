// Settings service module
// Reads and writes settings.toml

mod service;

pub use service::{default_config_path, default_database_path, SettingsService};
