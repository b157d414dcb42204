use std::process::ExitCode;

use tracing::{error, info};

use super::bootstrap::AppWiring;
use super::simulation::{Simulation, World};

pub(crate) fn run(app: AppWiring) -> ExitCode {
    let world = match World::build(app.level) {
        Ok(world) => world,
        Err(err) => {
            error!(error = %err, "world_build_failed");
            return ExitCode::FAILURE;
        }
    };

    let mut simulation = match Simulation::new(&world, app.config) {
        Ok(simulation) => simulation,
        Err(err) => {
            error!(error = %err, "simulation_setup_failed");
            return ExitCode::FAILURE;
        }
    };
    simulation.run();
    let report = simulation.report();
    let player = simulation.player_position();
    let enemy = simulation.enemy_position();
    info!(
        caught = report.caught,
        player_x = player.x,
        player_y = player.y,
        enemy_x = enemy.x,
        enemy_y = enemy.y,
        light_points = simulation.light().len(),
        "final_state"
    );
    ExitCode::SUCCESS
}
