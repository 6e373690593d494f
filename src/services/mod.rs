pub mod host_service;

pub use host_service::{AddOutcome, DeleteOutcome, EditOutcome, HostRequest, HostService};
