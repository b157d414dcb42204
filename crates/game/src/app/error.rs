use std::env;
use std::path::PathBuf;

use survive_engine::NavMeshError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum GameError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to read config file {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path} at {field}: {source}")]
    ParseConfig {
        path: PathBuf,
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config value {field}: {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },
    #[error("room at ({x}, {y}) of size {width}x{height} is too small for its walls and doors")]
    RoomTooSmall {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    #[error(transparent)]
    NavMesh(#[from] NavMeshError),
}
