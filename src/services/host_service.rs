//! Transactional host mutations
//!
//! Every mutating operation follows the same protocol: capture undo state,
//! mutate the inventory, run the external validator, then keep the change
//! or restore every touched file to its captured state. A single async
//! mutex serializes mutations for their full duration, including the
//! validator run; no cross-file lock exists at the filesystem level.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::errors::PanelError;
use crate::inventory::{
    sanitize_name, CheckLevel, HostClass, HostDefinition, HostRepository, ServiceDefinition,
};
use crate::nagios::{Reloader, Validation, Validator};

/// Inputs for add and edit. Names are sanitized before any check or file
/// operation.
#[derive(Debug, Clone, Deserialize)]
pub struct HostRequest {
    pub host_name: String,
    pub address: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default, rename = "type")]
    pub class: HostClass,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub check_level: CheckLevel,
}

#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub host_name: String,
    pub file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct EditOutcome {
    pub host_name: String,
    pub file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct DeleteOutcome {
    pub host_name: String,
    pub valid: bool,
}

pub struct HostService {
    repository: Arc<HostRepository>,
    validator: Arc<Validator>,
    reloader: Arc<Reloader>,
    write_lock: Mutex<()>,
}

impl HostService {
    pub fn new(
        repository: Arc<HostRepository>,
        validator: Arc<Validator>,
        reloader: Arc<Reloader>,
    ) -> Self {
        Self {
            repository,
            validator,
            reloader,
            write_lock: Mutex::new(()),
        }
    }

    /// Add a new host with its paired ping service in a dedicated file.
    pub async fn add_host(&self, request: HostRequest) -> Result<AddOutcome, PanelError> {
        let _guard = self.write_lock.lock().await;

        let (host, service) = build_pair(&request)?;
        if self.repository.host_exists(&host.host_name).await? {
            return Err(PanelError::Conflict {
                host_name: host.host_name,
            });
        }

        let path = self.repository.host_file_path(&host.host_name);
        let prior = self.repository.read_file_optional(&path).await?;
        let file = self.repository.write_pair(&host, &service).await?;

        let validation = self.validator.run().await?;
        if !validation.valid {
            warn!("Validation failed after add of '{}', rolling back", host.host_name);
            self.repository.restore_file(&path, prior).await?;
            return Err(PanelError::ConfigInvalid {
                output: validation.output,
            });
        }

        info!("Host '{}' added", host.host_name);
        Ok(AddOutcome {
            host_name: host.host_name,
            file,
        })
    }

    /// Replace an existing host's definition, possibly under a new name.
    /// On validation failure every touched file is restored, including the
    /// removed original blocks.
    pub async fn edit_host(
        &self,
        original_name: &str,
        request: HostRequest,
    ) -> Result<EditOutcome, PanelError> {
        let _guard = self.write_lock.lock().await;

        let original = sanitize_name(original_name);
        if original.is_empty() {
            return Err(PanelError::ValidationInput {
                field: "original_name".to_string(),
            });
        }
        let (host, service) = build_pair(&request)?;

        let old_path = self
            .repository
            .find_host_file(&original)
            .await?
            .ok_or_else(|| PanelError::NotFound {
                host_name: original.clone(),
            })?;

        // Renaming onto another existing host would break name uniqueness
        if host.host_name != original && self.repository.host_exists(&host.host_name).await? {
            return Err(PanelError::Conflict {
                host_name: host.host_name,
            });
        }

        let new_path = self.repository.host_file_path(&host.host_name);
        let old_prior = self.repository.read_file_optional(&old_path).await?;
        let new_prior = if new_path != old_path {
            self.repository.read_file_optional(&new_path).await?
        } else {
            None
        };

        self.repository.remove_host_from(&old_path, &original).await?;
        let file = self.repository.write_pair(&host, &service).await?;

        let validation = self.validator.run().await?;
        if !validation.valid {
            warn!(
                "Validation failed after edit of '{}', rolling back",
                original
            );
            self.repository.restore_file(&old_path, old_prior).await?;
            if new_path != old_path {
                self.repository.restore_file(&new_path, new_prior).await?;
            }
            return Err(PanelError::ConfigInvalid {
                output: validation.output,
            });
        }

        info!("Host '{}' updated as '{}'", original, host.host_name);
        Ok(EditOutcome {
            host_name: host.host_name,
            file,
        })
    }

    /// Remove a host and its ping service; the file goes with them when
    /// nothing else remains in it.
    pub async fn delete_host(&self, host_name: &str) -> Result<DeleteOutcome, PanelError> {
        let _guard = self.write_lock.lock().await;

        let name = sanitize_name(host_name);
        if name.is_empty() {
            return Err(PanelError::ValidationInput {
                field: "host_name".to_string(),
            });
        }

        let path = self
            .repository
            .find_host_file(&name)
            .await?
            .ok_or_else(|| PanelError::NotFound {
                host_name: name.clone(),
            })?;

        let prior = self.repository.read_file_optional(&path).await?;
        let removed = self.repository.remove_host_from(&path, &name).await?;
        if removed == 0 {
            // Dedicated file existed but held no matching definition
            return Err(PanelError::NotFound { host_name: name });
        }

        let validation = self.validator.run().await?;
        if !validation.valid {
            warn!("Validation failed after delete of '{}', rolling back", name);
            self.repository.restore_file(&path, prior).await?;
            return Err(PanelError::ConfigInvalid {
                output: validation.output,
            });
        }

        info!("Host '{}' deleted", name);
        Ok(DeleteOutcome {
            host_name: name,
            valid: validation.valid,
        })
    }

    /// Revalidate, then ask the daemon to apply the configuration. Refuses
    /// to reload an invalid tree.
    pub async fn reload(&self) -> Result<String, PanelError> {
        let validation = self.validator.run().await?;
        if !validation.valid {
            return Err(PanelError::ConfigInvalid {
                output: validation.output,
            });
        }
        self.reloader.run().await
    }

    pub async fn validate(&self) -> Result<Validation, PanelError> {
        self.validator.run().await
    }
}

fn build_pair(request: &HostRequest) -> Result<(HostDefinition, ServiceDefinition), PanelError> {
    let host_name = sanitize_name(&request.host_name);
    if host_name.is_empty() {
        return Err(PanelError::ValidationInput {
            field: "host_name".to_string(),
        });
    }
    if request.address.trim().is_empty() {
        return Err(PanelError::ValidationInput {
            field: "address".to_string(),
        });
    }

    let alias = request
        .alias
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| host_name.clone());
    let parents = request
        .parent
        .as_deref()
        .map(sanitize_name)
        .filter(|p| !p.is_empty());

    let host = HostDefinition {
        host_name: host_name.clone(),
        alias,
        address: request.address.trim().to_string(),
        template: request.class.template().to_string(),
        parents,
        extra: BTreeMap::new(),
        source_file: format!("{}.cfg", host_name),
        class: request.class,
    };
    let service = ServiceDefinition::ping_for(&host_name, request.check_level);
    Ok((host, service))
}
