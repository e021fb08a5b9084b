//! Backend entry-point: loads configuration and serves the user registry.

mod server;

use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use user_registry::inbound::http::session_config::{BuildMode, session_settings_from_env};
use user_registry::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    info!(fingerprint = %session.fingerprint(), "session key loaded");

    let config = ServerConfig::new(
        session,
        bind_addr,
        settings.account_username(),
        settings.account_password(),
    );
    info!(addr = %config.bind_addr(), "listening");

    let server = create_server(config)?;
    info!("server started");
    server.await
}
