pub mod config;
pub mod constants;
pub mod errors;
pub mod inventory;
pub mod nagios;
pub mod objects;
pub mod services;
pub mod status;
pub mod web;

// Re-export commonly used types
pub use config::{Config, ConfigManager};
pub use errors::PanelError;
pub use inventory::{HostDefinition, HostRepository, ServiceDefinition};
pub use nagios::{Reloader, Validation, Validator};
pub use services::{HostRequest, HostService};
pub use status::{StatusRecord, StatusReport};
