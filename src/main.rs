use std::env;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/attendance";
const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir =
        env::var("ATTENDANCE_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind = env::var("ATTENDANCE_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());

    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("loading attendance policy from {}", config_dir))?;
    info!(
        policy = %config.policy().name,
        full_day_hours = %config.policy().full_day_hours,
        half_day_hours = %config.policy().half_day_hours,
        "Attendance policy loaded"
    );

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("binding {}", bind))?;
    info!("Listening on {}", bind);

    axum::serve(listener, app).await?;

    Ok(())
}
