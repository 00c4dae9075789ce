use std::sync::Arc;

use rollcall_core::config::{AppConfig, ConfigError, LoadOptions};
use rollcall_core::SessionStore;
use rollcall_discord::api::NoopChatApi;
use rollcall_discord::events::dispatcher_for;
use rollcall_discord::gateway::GatewayRunner;
use rollcall_discord::service::AvailabilityService;
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub store: Arc<SessionStore>,
    pub gateway_runner: GatewayRunner,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let store = Arc::new(SessionStore::new());
    let service = Arc::new(AvailabilityService::new(
        store.clone(),
        Arc::new(NoopChatApi::default()),
        config.access_policy(),
    ));
    let dispatcher = dispatcher_for(service);

    // A real gateway transport plugs in here once the platform client is
    // wired up; without a bot token the runner stays on the noop transport.
    let gateway_runner = GatewayRunner::noop(dispatcher);

    info!(
        event_name = "system.bootstrap.complete",
        correlation_id = "bootstrap",
        "application bootstrap complete"
    );

    Ok(Application { config, store, gateway_runner })
}
