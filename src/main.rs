use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use hostpanel::config::ConfigManager;
use hostpanel::inventory::HostRepository;
use hostpanel::nagios::{Reloader, Validator};
use hostpanel::services::HostService;
use hostpanel::web::{start_web_server, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with reduced verbosity
    let env_filter = EnvFilter::from_default_env()
        .add_directive("hostpanel=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("hyper=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting host panel");

    // Load configuration
    let config_path = std::env::var("HOSTPANEL_CONFIG")
        .unwrap_or_else(|_| "config/hostpanel.toml".to_string());
    let config_manager = ConfigManager::new(config_path).await?;
    let config = config_manager.get_current_config();
    info!(
        "Configuration loaded: inventory at {}, snapshot at {}",
        config.hosts_dir, config.status_file
    );

    let repository = Arc::new(HostRepository::new(config.hosts_dir.clone()));
    match repository.list().await {
        Ok(hosts) => info!("Inventory contains {} hosts", hosts.len()),
        Err(e) => info!("Inventory not readable yet: {}", e),
    }

    let validator = Arc::new(Validator::from_config(&config));
    let reloader = Arc::new(Reloader::from_config(&config));
    let host_service = Arc::new(HostService::new(
        repository.clone(),
        validator,
        reloader,
    ));

    let state = AppState::new(config, repository, host_service);
    start_web_server(state).await
}
