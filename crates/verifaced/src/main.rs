use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

mod config;
mod dbus_interface;
mod engine;

use config::Config;
use dbus_interface::VerifaceService;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("verifaced starting");

    let config = Config::from_env().context("invalid configuration")?;
    let pipeline = config.pipeline_config();
    pipeline.validate().context("invalid pipeline tunables")?;

    let engine = engine::spawn_engine(
        &config.scrfd_model_path(),
        &config.arcface_model_path(),
        pipeline,
    )
    .context("failed to start verification engine")?;

    let service = VerifaceService { engine };

    let builder = if config.session_bus {
        tracing::warn!("serving on the session bus (development mode)");
        zbus::connection::Builder::session()?
    } else {
        zbus::connection::Builder::system()?
    };

    let _conn = builder
        .name("org.freedesktop.Veriface1")?
        .serve_at("/org/freedesktop/Veriface1", service)?
        .build()
        .await
        .context("failed to register on the bus")?;

    tracing::info!("verifaced ready");

    tokio::signal::ctrl_c().await?;
    tracing::info!("verifaced shutting down");

    Ok(())
}
