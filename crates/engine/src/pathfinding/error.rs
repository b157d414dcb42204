use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("start point ({x}, {y}) is outside the navigable area")]
    StartOutside { x: f64, y: f64 },
    #[error("end point ({x}, {y}) is outside the navigable area")]
    EndOutside { x: f64, y: f64 },
    #[error("triangle {triangle} has no walkable node")]
    NoWalkableNode { triangle: usize },
    #[error("no route between the start and end triangles")]
    NoRoute,
    #[error("search gave up after {steps} steps")]
    StepLimitExceeded { steps: usize },
}
