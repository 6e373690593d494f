use super::Config;
use anyhow::{anyhow, Result};
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(config_path: String) -> Result<Self> {
        let config = Self::load_configuration(&config_path).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_path: &str) -> Result<Config> {
        match fs::read_to_string(config_path).await {
            Ok(content) => {
                let config: Config = toml::from_str(&content)
                    .map_err(|e| anyhow!("Failed to parse config {}: {}", config_path, e))?;
                info!("Configuration loaded from {}", config_path);
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "Config file {} not found, using default paths",
                    config_path
                );
                Ok(Config::default())
            }
            Err(e) => Err(anyhow!("Failed to read config {}: {}", config_path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hostpanel.toml");
        let manager = ConfigManager::new(path.display().to_string()).await.unwrap();
        let config = manager.get_current_config();
        assert_eq!(config.port, 8095);
        assert_eq!(config.hosts_dir, "/usr/local/nagios/etc/objects/hosts");
        assert!(config.use_sudo);
    }

    #[tokio::test]
    async fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hostpanel.toml");
        tokio::fs::write(
            &path,
            "port = 9000\nhosts_dir = \"/tmp/hosts\"\nuse_sudo = false\n",
        )
        .await
        .unwrap();

        let manager = ConfigManager::new(path.display().to_string()).await.unwrap();
        let config = manager.get_current_config();
        assert_eq!(config.port, 9000);
        assert_eq!(config.hosts_dir, "/tmp/hosts");
        assert!(!config.use_sudo);
        assert_eq!(config.reload_service, "nagios");
        assert_eq!(config.validator_timeout_seconds, 30);
    }
}
