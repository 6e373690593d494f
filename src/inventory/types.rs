//! Typed records for host and service definitions
//!
//! Known attributes are named fields; anything else a file carries is
//! preserved in an open extension map so unrecognized attributes survive a
//! read-modify-write cycle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{checks, templates};

/// Classification derived from which template a host references.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostClass {
    #[default]
    Internal,
    External,
}

impl HostClass {
    /// A template containing the substring `external` marks the host as
    /// external; everything else is internal.
    pub fn from_template(template: &str) -> Self {
        if template.contains("external") {
            HostClass::External
        } else {
            HostClass::Internal
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            HostClass::Internal => templates::HOST_INTERNAL,
            HostClass::External => templates::HOST_EXTERNAL,
        }
    }
}

/// Requested probe aggressiveness, mapped to a fixed check command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckLevel {
    Quick,
    #[default]
    Detailed,
    Strict,
    Custom,
}

impl CheckLevel {
    pub fn check_command(&self) -> &'static str {
        match self {
            CheckLevel::Quick => checks::QUICK,
            CheckLevel::Detailed => checks::DETAILED,
            CheckLevel::Strict => checks::STRICT,
            CheckLevel::Custom => checks::CUSTOM,
        }
    }
}

/// One `define host { ... }` block, plus where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostDefinition {
    pub host_name: String,
    pub alias: String,
    pub address: String,
    #[serde(rename = "use")]
    pub template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parents: Option<String>,
    /// Attributes this panel does not model, preserved verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
    /// Source file name within the inventory directory
    #[serde(rename = "_file")]
    pub source_file: String,
    #[serde(rename = "_type")]
    pub class: HostClass,
}

impl HostDefinition {
    /// Build a definition from a parsed attribute map, consuming the known
    /// keys and keeping the rest in the extension map.
    pub fn from_attrs(mut attrs: BTreeMap<String, String>, source_file: &str) -> Self {
        let host_name = attrs.remove("host_name").unwrap_or_default();
        let alias = attrs.remove("alias").unwrap_or_else(|| host_name.clone());
        let address = attrs.remove("address").unwrap_or_default();
        let template = attrs.remove("use").unwrap_or_default();
        let parents = attrs.remove("parents");
        let class = HostClass::from_template(&template);
        HostDefinition {
            host_name,
            alias,
            address,
            template,
            parents,
            extra: attrs,
            source_file: source_file.to_string(),
            class,
        }
    }
}

/// The ping service paired with a host. Created and removed together with
/// its host, never managed independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDefinition {
    #[serde(rename = "use")]
    pub template: String,
    pub host_name: String,
    pub service_description: String,
    pub check_command: String,
}

impl ServiceDefinition {
    pub fn ping_for(host_name: &str, check_level: CheckLevel) -> Self {
        ServiceDefinition {
            template: templates::PING_SERVICE.to_string(),
            host_name: host_name.to_string(),
            service_description: templates::PING_SERVICE_DESCRIPTION.to_string(),
            check_command: check_level.check_command().to_string(),
        }
    }
}

/// Reduce a requested name to `[A-Za-z0-9_-]`, dropping everything else.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}
