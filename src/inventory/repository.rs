//! Directory-backed repository of host definition files
//!
//! All path handling for the inventory directory lives here, behind the
//! `list` / `find` / `write_pair` / `remove_host_from` seam. Callers never
//! touch definition files directly.

use glob::glob;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::errors::PanelError;
use crate::inventory::render::render_host_pair;
use crate::inventory::types::{HostDefinition, ServiceDefinition};
use crate::objects::{define_blocks, host_name_line, parse_define_body, Document};

pub struct HostRepository {
    hosts_dir: PathBuf,
}

impl HostRepository {
    pub fn new(hosts_dir: impl Into<PathBuf>) -> Self {
        Self {
            hosts_dir: hosts_dir.into(),
        }
    }

    pub fn hosts_dir(&self) -> &Path {
        &self.hosts_dir
    }

    /// Conventional dedicated file for a host.
    pub fn host_file_path(&self, host_name: &str) -> PathBuf {
        self.hosts_dir.join(format!("{}.cfg", host_name))
    }

    fn cfg_files(&self) -> Result<Vec<PathBuf>, PanelError> {
        let pattern = format!("{}/*.cfg", self.hosts_dir.display());
        let entries = glob(&pattern)
            .map_err(|e| PanelError::persistence(&pattern, e))?
            .filter_map(|entry| entry.ok())
            .collect();
        Ok(entries)
    }

    /// Every host definition in the inventory directory, sorted by
    /// `host_name`. Filesystem enumeration order is unstable, so sorting
    /// here gives callers a deterministic view.
    pub async fn list(&self) -> Result<Vec<HostDefinition>, PanelError> {
        let mut hosts = Vec::new();
        for path in self.cfg_files()? {
            let content = fs::read_to_string(&path)
                .await
                .map_err(|e| PanelError::persistence(path.display(), e))?;
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            for body in define_blocks(&content, "host") {
                hosts.push(HostDefinition::from_attrs(parse_define_body(body), &filename));
            }
        }
        hosts.sort_by(|a, b| a.host_name.cmp(&b.host_name));
        debug!("Inventory scan found {} hosts", hosts.len());
        Ok(hosts)
    }

    pub async fn find(&self, host_name: &str) -> Result<Option<HostDefinition>, PanelError> {
        let hosts = self.list().await?;
        Ok(hosts.into_iter().find(|h| h.host_name == host_name))
    }

    /// Whether any file in the inventory carries a matching `host_name`
    /// line, regardless of which file.
    pub async fn host_exists(&self, host_name: &str) -> Result<bool, PanelError> {
        let matcher = host_name_line(host_name);
        for path in self.cfg_files()? {
            let content = fs::read_to_string(&path)
                .await
                .map_err(|e| PanelError::persistence(path.display(), e))?;
            if matcher.is_match(&content) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Locate the file holding a host's definition: the dedicated
    /// `<name>.cfg` when present, otherwise the first file whose content
    /// has a matching `host_name` line. The fallback permits one host's
    /// definition to live inside another host's file.
    ///
    /// An existing `<name>.cfg` always wins, even when it holds only
    /// other hosts' definitions and the target is defined elsewhere; the
    /// content scan runs only when no dedicated file exists.
    pub async fn find_host_file(&self, host_name: &str) -> Result<Option<PathBuf>, PanelError> {
        let dedicated = self.host_file_path(host_name);
        if fs::try_exists(&dedicated)
            .await
            .map_err(|e| PanelError::persistence(dedicated.display(), e))?
        {
            return Ok(Some(dedicated));
        }

        let matcher = host_name_line(host_name);
        for path in self.cfg_files()? {
            let content = fs::read_to_string(&path)
                .await
                .map_err(|e| PanelError::persistence(path.display(), e))?;
            if matcher.is_match(&content) {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }

    /// Write the rendered host + ping-service pair into the host's
    /// dedicated file. When that file already exists (it may hold another
    /// host's definition) the pair is appended instead of clobbering it.
    pub async fn write_pair(
        &self,
        host: &HostDefinition,
        service: &ServiceDefinition,
    ) -> Result<PathBuf, PanelError> {
        let path = self.host_file_path(&host.host_name);
        let rendered = render_host_pair(host, service);

        let content = match fs::read_to_string(&path).await {
            Ok(existing) => format!("{}\n{}", existing.trim_end(), rendered),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => rendered,
            Err(e) => return Err(PanelError::persistence(path.display(), e)),
        };

        fs::write(&path, content)
            .await
            .map_err(|e| PanelError::persistence(path.display(), e))?;
        info!("Wrote definition pair for '{}' to {}", host.host_name, path.display());
        Ok(path)
    }

    /// Structurally remove a host's blocks from one file. Returns the
    /// number of blocks removed; the file is deleted when nothing but
    /// comments/whitespace would remain, and is left untouched when no
    /// block matched.
    pub async fn remove_host_from(
        &self,
        path: &Path,
        host_name: &str,
    ) -> Result<usize, PanelError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| PanelError::persistence(path.display(), e))?;
        let removal = Document::parse(&content).remove_host(host_name);

        if removal.removed == 0 {
            return Ok(0);
        }

        if removal.empty {
            fs::remove_file(path)
                .await
                .map_err(|e| PanelError::persistence(path.display(), e))?;
            info!("Removed '{}' and deleted now-empty {}", host_name, path.display());
        } else {
            fs::write(path, &removal.text)
                .await
                .map_err(|e| PanelError::persistence(path.display(), e))?;
            info!(
                "Removed {} block(s) for '{}' from {}",
                removal.removed,
                host_name,
                path.display()
            );
        }
        Ok(removal.removed)
    }

    /// Read a file that may not exist; `None` means absent.
    pub async fn read_file_optional(&self, path: &Path) -> Result<Option<String>, PanelError> {
        match fs::read_to_string(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PanelError::persistence(path.display(), e)),
        }
    }

    /// Return a file to a previously captured state: rewrite it, or remove
    /// it when the prior state was "absent".
    pub async fn restore_file(
        &self,
        path: &Path,
        prior: Option<String>,
    ) -> Result<(), PanelError> {
        match prior {
            Some(content) => fs::write(path, content)
                .await
                .map_err(|e| PanelError::persistence(path.display(), e)),
            None => match fs::remove_file(path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(PanelError::persistence(path.display(), e)),
            },
        }
    }
}
