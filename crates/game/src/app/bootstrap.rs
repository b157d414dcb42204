use tracing::info;
use tracing_subscriber::EnvFilter;

use super::config::{load_config_from_env, GameConfig};
use super::error::GameError;
use super::level::Level;

pub(crate) struct AppWiring {
    pub(crate) config: GameConfig,
    pub(crate) level: Level,
}

pub(crate) fn build_app() -> Result<AppWiring, GameError> {
    init_tracing();
    info!("=== Survive Startup ===");

    let (config, source) = load_config_from_env()?;
    match source {
        Some(path) => info!(path = %path.display(), "config_loaded"),
        None => info!("config_defaults"),
    }
    let level = Level::demo()?;

    Ok(AppWiring { config, level })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
