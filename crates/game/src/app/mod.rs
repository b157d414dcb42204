mod bootstrap;
mod config;
mod error;
mod level;
mod loop_runner;
mod movement;
mod simulation;

pub(crate) use bootstrap::build_app;
pub(crate) use loop_runner::run;
