use survive_engine::{
    Camera2D, LightCone, NavMesh, OccluderSet, PathPlanner, Vec2, ViewContext, VisibilityEngine,
    VisibilityPolygon,
};
use tracing::{debug, info};

use super::config::GameConfig;
use super::error::GameError;
use super::level::Level;
use super::movement::{step_toward, PathFollower};

/// Static world state shared by every tick.
#[derive(Debug, Clone)]
pub(crate) struct World {
    level: Level,
    mesh: NavMesh,
    occluders: OccluderSet,
}

impl World {
    pub(crate) fn build(level: Level) -> Result<Self, GameError> {
        let mesh = NavMesh::build(&level.geometry())?;
        let occluders = level.occluders();
        info!(
            rooms = level.rooms().len(),
            boxes = level.boxes().len(),
            occluder_segments = occluders.segments().len(),
            occluder_vertices = occluders.vertices().len(),
            "world_built"
        );
        Ok(Self {
            level,
            mesh,
            occluders,
        })
    }

    pub(crate) fn level(&self) -> &Level {
        &self.level
    }

    pub(crate) fn mesh(&self) -> &NavMesh {
        &self.mesh
    }

    pub(crate) fn occluders(&self) -> &OccluderSet {
        &self.occluders
    }
}

#[derive(Debug, Clone)]
struct Player {
    position: Vec2,
    flashlight: LightCone,
    patrol_index: usize,
}

#[derive(Debug, Clone)]
struct Enemy {
    position: Vec2,
    follower: PathFollower,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SimulationReport {
    pub(crate) ticks_run: u32,
    pub(crate) caught: bool,
    pub(crate) replans: u32,
    pub(crate) failed_replans: u32,
    pub(crate) dark_ticks: u32,
}

/// Fixed-tick chase: the player patrols with a flashlight while the enemy
/// re-plans a navmesh path to the player every tick.
pub(crate) struct Simulation<'w> {
    world: &'w World,
    config: GameConfig,
    planner: PathPlanner<'w>,
    visibility: VisibilityEngine,
    player: Player,
    enemy: Enemy,
    light: VisibilityPolygon,
    report: SimulationReport,
}

impl<'w> Simulation<'w> {
    pub(crate) fn new(world: &'w World, config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let level = world.level();
        let player_spawn = level.player_spawn();
        let facing = level
            .patrol()
            .first()
            .map_or(0.0, |target| player_spawn.angle_to(*target));
        let flashlight = config.flashlight(facing)?;
        Ok(Self {
            world,
            planner: PathPlanner::new(world.mesh(), config.pathfinding),
            visibility: VisibilityEngine::new(config.visibility),
            config,
            player: Player {
                position: player_spawn,
                flashlight,
                patrol_index: 0,
            },
            enemy: Enemy {
                position: level.enemy_spawn(),
                follower: PathFollower::default(),
            },
            light: VisibilityPolygon::empty(Vec2::ZERO),
            report: SimulationReport::default(),
        })
    }

    pub(crate) fn player_position(&self) -> Vec2 {
        self.player.position
    }

    pub(crate) fn enemy_position(&self) -> Vec2 {
        self.enemy.position
    }

    pub(crate) fn light(&self) -> &VisibilityPolygon {
        &self.light
    }

    pub(crate) fn report(&self) -> SimulationReport {
        self.report
    }

    /// Runs until the enemy reaches the player or the tick budget is spent.
    pub(crate) fn run(&mut self) -> SimulationReport {
        while self.report.ticks_run < self.config.ticks && !self.report.caught {
            self.tick();
        }
        info!(
            ticks = self.report.ticks_run,
            caught = self.report.caught,
            replans = self.report.replans,
            failed_replans = self.report.failed_replans,
            dark_ticks = self.report.dark_ticks,
            "simulation_finished"
        );
        self.report
    }

    pub(crate) fn tick(&mut self) {
        self.report.ticks_run = self.report.ticks_run.saturating_add(1);
        self.move_player();
        self.cast_light();
        self.move_enemy();

        let distance = self.enemy.position.distance(self.player.position);
        if distance <= self.config.catch_radius {
            self.report.caught = true;
            info!(
                tick = self.report.ticks_run,
                x = self.player.position.x,
                y = self.player.position.y,
                "player_caught"
            );
        }
    }

    fn move_player(&mut self) {
        let patrol = self.world.level().patrol();
        let Some(target) = patrol.get(self.player.patrol_index).copied() else {
            return;
        };
        let max_step = self.config.player_speed * self.config.tick_seconds;
        let (next, arrived) = step_toward(
            self.player.position,
            target,
            max_step,
            self.config.arrival_threshold,
        );
        if next != self.player.position {
            let facing = self.player.position.angle_to(next);
            self.player.flashlight = self.player.flashlight.with_facing(facing);
        }
        self.player.position = next;
        if arrived {
            self.player.patrol_index = (self.player.patrol_index + 1) % patrol.len();
        }
    }

    fn cast_light(&mut self) {
        let view = ViewContext::new(
            Camera2D {
                position: self.player.position,
            },
            self.config.viewport,
        );
        self.light = self.visibility.compute(
            self.player.position,
            self.world.occluders(),
            &view,
            Some(self.player.flashlight),
        );
        if !self.light.is_drawable() {
            self.report.dark_ticks = self.report.dark_ticks.saturating_add(1);
        }
    }

    fn move_enemy(&mut self) {
        let path = self
            .planner
            .find_path(self.enemy.position, self.player.position);
        self.report.replans = self.report.replans.saturating_add(1);
        if path.is_empty() {
            // Standing exactly on a mesh edge fails the lookup; keep the old path.
            self.report.failed_replans = self.report.failed_replans.saturating_add(1);
        } else {
            debug!(
                tick = self.report.ticks_run,
                waypoints = path.len(),
                "enemy_replanned"
            );
            self.enemy.follower = PathFollower::new(path);
        }

        let max_step = self.config.enemy_speed * self.config.tick_seconds;
        self.enemy.position =
            self.enemy
                .follower
                .step(self.enemy.position, max_step, self.config.arrival_threshold);
    }
}
