//! Host inventory: typed definitions, canonical rendering, and the
//! directory-backed repository that owns all definition-file access.

pub mod render;
pub mod repository;
pub mod types;

pub use render::render_host_pair;
pub use repository::HostRepository;
pub use types::{sanitize_name, CheckLevel, HostClass, HostDefinition, ServiceDefinition};
