mod astar;
mod config;
mod error;

pub use astar::PathPlanner;
pub use config::{CostModel, PathfindingConfig, SeedStrategy};
pub use error::PathError;
