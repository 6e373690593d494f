//! Custom error types for the host panel
//!
//! Provides structured error handling with context for the different
//! failure scenarios of inventory reads, status reads, and mutations.

use std::fmt;

/// Main error type for the host panel core
#[derive(Debug)]
pub enum PanelError {
    /// A required request field is missing or empty
    ValidationInput { field: String },

    /// A host with the requested name already exists in the inventory
    Conflict { host_name: String },

    /// No definition file contains the requested host
    NotFound { host_name: String },

    /// Reading, writing, or deleting a definition file failed
    Persistence { path: String, reason: String },

    /// The external validator rejected the resulting configuration
    ConfigInvalid { output: String },

    /// The validator or reloader process failed or timed out
    Process { operation: String, reason: String },
}

impl PanelError {
    pub fn persistence(path: impl fmt::Display, reason: impl fmt::Display) -> Self {
        PanelError::Persistence {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn process(operation: &str, reason: impl fmt::Display) -> Self {
        PanelError::Process {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelError::ValidationInput { field } => {
                write!(f, "Missing required field: {}", field)
            }
            PanelError::Conflict { host_name } => {
                write!(f, "Host '{}' already exists", host_name)
            }
            PanelError::NotFound { host_name } => {
                write!(f, "Host '{}' not found", host_name)
            }
            PanelError::Persistence { path, reason } => {
                write!(f, "File operation on '{}' failed: {}", path, reason)
            }
            PanelError::ConfigInvalid { output } => {
                write!(f, "Configuration invalid: {}", output)
            }
            PanelError::Process { operation, reason } => {
                write!(f, "Process '{}' failed: {}", operation, reason)
            }
        }
    }
}

impl std::error::Error for PanelError {}
