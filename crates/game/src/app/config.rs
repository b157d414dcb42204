use std::env;
use std::f64::consts::FRAC_PI_4;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use survive_engine::{LightCone, PathfindingConfig, Viewport, VisibilityConfig};

use super::error::GameError;

pub(crate) const CONFIG_ENV_VAR: &str = "SURVIVE_CONFIG";

/// Tunables for the headless chase simulation. Speeds are world units per
/// second; angles are radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GameConfig {
    pub(crate) ticks: u32,
    pub(crate) tick_seconds: f64,
    pub(crate) player_speed: f64,
    pub(crate) enemy_speed: f64,
    pub(crate) arrival_threshold: f64,
    pub(crate) catch_radius: f64,
    pub(crate) flashlight_spread: f64,
    pub(crate) visibility: VisibilityConfig,
    pub(crate) pathfinding: PathfindingConfig,
    pub(crate) viewport: Viewport,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ticks: 1_800,
            tick_seconds: 1.0 / 60.0,
            player_speed: 360.0,
            enemy_speed: 240.0,
            arrival_threshold: 2.0,
            catch_radius: 20.0,
            flashlight_spread: FRAC_PI_4,
            visibility: VisibilityConfig::default(),
            pathfinding: PathfindingConfig::default(),
            viewport: Viewport::default(),
        }
    }
}

impl GameConfig {
    pub(crate) fn validate(&self) -> Result<(), GameError> {
        positive("tick_seconds", self.tick_seconds)?;
        positive("player_speed", self.player_speed)?;
        positive("enemy_speed", self.enemy_speed)?;
        self.flashlight(0.0)?;
        if !(self.arrival_threshold.is_finite() && self.arrival_threshold >= 0.0) {
            return Err(GameError::InvalidConfig {
                field: "arrival_threshold",
                message: format!("expected a finite value >= 0, got {}", self.arrival_threshold),
            });
        }
        if !(self.catch_radius.is_finite() && self.catch_radius >= 0.0) {
            return Err(GameError::InvalidConfig {
                field: "catch_radius",
                message: format!("expected a finite value >= 0, got {}", self.catch_radius),
            });
        }
        Ok(())
    }

    /// Flashlight cone with the configured spread, pointed along `facing`.
    pub(crate) fn flashlight(&self, facing: f64) -> Result<LightCone, GameError> {
        LightCone::new(facing, self.flashlight_spread).map_err(|err| GameError::InvalidConfig {
            field: "flashlight_spread",
            message: err.to_string(),
        })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), GameError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            field,
            message: format!("expected a finite value > 0, got {value}"),
        })
    }
}

/// Loads the file named by `SURVIVE_CONFIG`, or defaults when it is unset.
pub(crate) fn load_config_from_env() -> Result<(GameConfig, Option<PathBuf>), GameError> {
    match env::var(CONFIG_ENV_VAR) {
        Ok(raw) if raw.trim().is_empty() => Ok((GameConfig::default(), None)),
        Ok(raw) => {
            let path = PathBuf::from(raw.trim());
            let config = load_config(&path)?;
            Ok((config, Some(path)))
        }
        Err(env::VarError::NotPresent) => Ok((GameConfig::default(), None)),
        Err(source) => Err(GameError::EnvVar {
            var: CONFIG_ENV_VAR,
            source,
        }),
    }
}

pub(crate) fn load_config(path: &Path) -> Result<GameConfig, GameError> {
    let raw = fs::read_to_string(path).map_err(|source| GameError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config_json(path, &raw)?;
    config.validate()?;
    Ok(config)
}

fn parse_config_json(path: &Path, raw: &str) -> Result<GameConfig, GameError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize::<_, GameConfig>(&mut deserializer).map_err(|error| {
        let field = error.path().to_string();
        GameError::ParseConfig {
            path: path.to_path_buf(),
            field,
            source: error.into_inner(),
        }
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use survive_engine::CostModel;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let temp = TempDir::new().expect("temp");
        let path = temp.path().join("game.json");
        fs::write(
            &path,
            r#"{ "ticks": 10, "pathfinding": { "cost_model": "euclidean" }, "viewport": { "width": 640, "height": 480 } }"#,
        )
        .expect("write");

        let config = load_config(&path).expect("config");
        assert_eq!(config.ticks, 10);
        assert_eq!(config.pathfinding.cost_model, CostModel::Euclidean);
        assert_eq!(config.pathfinding.max_search_steps, 10_000);
        assert_eq!(config.viewport.width, 640);
        assert_eq!(config.enemy_speed, GameConfig::default().enemy_speed);
    }

    #[test]
    fn parse_errors_name_the_failing_field() {
        let temp = TempDir::new().expect("temp");
        let path = temp.path().join("game.json");
        fs::write(&path, r#"{ "visibility": { "prefilter_enabled": "yes" } }"#).expect("write");

        match load_config(&path) {
            Err(GameError::ParseConfig { field, .. }) => {
                assert_eq!(field, "visibility.prefilter_enabled");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let temp = TempDir::new().expect("temp");
        assert!(matches!(
            load_config(&temp.path().join("absent.json")),
            Err(GameError::ReadConfig { .. })
        ));
    }

    #[test]
    fn non_positive_tick_length_is_rejected() {
        let temp = TempDir::new().expect("temp");
        let path = temp.path().join("game.json");
        fs::write(&path, r#"{ "tick_seconds": 0.0 }"#).expect("write");
        assert!(matches!(
            load_config(&path),
            Err(GameError::InvalidConfig {
                field: "tick_seconds",
                ..
            })
        ));
    }

    #[test]
    fn flashlight_spread_of_half_a_turn_or_more_is_rejected() {
        let temp = TempDir::new().expect("temp");
        let path = temp.path().join("game.json");
        for spread in ["3.141592653589793", "4.71238898038469", "-0.5"] {
            fs::write(&path, format!(r#"{{ "flashlight_spread": {spread} }}"#)).expect("write");
            assert!(
                matches!(
                    load_config(&path),
                    Err(GameError::InvalidConfig {
                        field: "flashlight_spread",
                        ..
                    })
                ),
                "spread {spread} was accepted"
            );
        }

        fs::write(&path, r#"{ "flashlight_spread": 2.8 }"#).expect("write");
        let config = load_config(&path).expect("config");
        assert!((config.flashlight(1.0).expect("cone").spread() - 2.8).abs() < 1e-12);
    }
}
