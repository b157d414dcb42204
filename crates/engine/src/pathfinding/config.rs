use serde::{Deserialize, Serialize};

/// How the search scores a partial path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostModel {
    /// One unit per node hop, squared straight-line distance as the estimate.
    /// Fast to evaluate but not admissible, so routes are not always shortest.
    #[default]
    HopCount,
    /// Euclidean edge lengths with a Euclidean estimate.
    Euclidean,
}

/// Which node of the start and end triangles the search runs between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedStrategy {
    #[default]
    FirstNode,
    NearestNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathfindingConfig {
    /// Open-list pops allowed before a query gives up.
    pub max_search_steps: usize,
    pub cost_model: CostModel,
    pub seed_strategy: SeedStrategy,
}

impl Default for PathfindingConfig {
    fn default() -> Self {
        Self {
            max_search_steps: 10_000,
            cost_model: CostModel::HopCount,
            seed_strategy: SeedStrategy::FirstNode,
        }
    }
}
