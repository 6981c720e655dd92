//! Simulation engine: the headless tick driver.
//!
//! `SimulationEngine` owns the scene graph, the player's input binder, and
//! the per-mission state (view, spawn schedule, score). Each tick it turns
//! input into commands, updates every node, drains the command queue once,
//! and then runs the world-level systems. Completely headless, so runs with
//! the same seed and input are identical.

use std::collections::VecDeque;
use std::sync::Arc;

use glam::Vec2;
use serde::Serialize;
use tracing::{debug, info};

use skyforce_core::constants::*;
use skyforce_core::enums::MissionStatus;
use skyforce_core::events::SoundEvent;
use skyforce_core::types::{FloatRect, SimTime};
use skyforce_core::{Category, DataTables};

use crate::command::CommandQueue;
use crate::entity::Simulated;
use crate::nodes::aircraft::Aircraft;
use crate::player::{InputEvent, KeyboardState, Player};
use crate::scene::{NodeId, SceneGraph};
use crate::systems;
use crate::systems::cleanup::ScoreState;
use crate::systems::spawner::SpawnSchedule;
use crate::world_setup::{self, MissionLayout};

/// Configuration for starting a new mission.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed. Same seed and input, same run.
    pub seed: u64,
    pub tables: Arc<DataTables>,
    /// Extent of the whole level in world units.
    pub world_bounds: FloatRect,
    /// View scroll speed (units per second, negative = up the level).
    pub scroll_speed: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tables: Arc::new(DataTables::default()),
            world_bounds: FloatRect::new(0.0, 0.0, VIEW_WIDTH, WORLD_HEIGHT),
            scroll_speed: SCROLL_SPEED,
        }
    }
}

/// What one tick produced, for the frontend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    pub time: SimTime,
    pub mission_status: MissionStatus,
    pub score: ScoreState,
    pub sounds: Vec<SoundEvent>,
    /// `None` once the player's aircraft has left the scene.
    pub player_hitpoints: Option<i32>,
    pub enemies: usize,
    pub commands_dispatched: usize,
}

pub struct SimulationEngine {
    scene: SceneGraph,
    player: Player,
    layout: MissionLayout,
    commands: CommandQueue,
    pending_events: VecDeque<InputEvent>,
    world_bounds: FloatRect,
    view: FloatRect,
    scroll_speed: f32,
    spawn_schedule: SpawnSchedule,
    score: ScoreState,
    time: SimTime,
    commands_dispatched: usize,
}

impl SimulationEngine {
    /// Build the mission scene with the default level.
    pub fn new(config: SimConfig) -> Self {
        let start = player_start(config.world_bounds);
        Self::with_schedule(config, SpawnSchedule::default_level(start))
    }

    /// Build the mission scene with a custom spawn schedule.
    pub fn with_schedule(config: SimConfig, spawn_schedule: SpawnSchedule) -> Self {
        let mut scene = SceneGraph::new(config.tables, config.seed);
        let start = player_start(config.world_bounds);
        let layout = world_setup::setup_mission(&mut scene, config.world_bounds, start);

        let view = FloatRect::centered(start, Vec2::new(VIEW_WIDTH, VIEW_HEIGHT));
        info!(
            seed = config.seed,
            spawn_points = spawn_schedule.remaining(),
            "mission started"
        );

        Self {
            scene,
            player: Player::new(),
            layout,
            commands: CommandQueue::new(),
            pending_events: VecDeque::new(),
            world_bounds: config.world_bounds,
            view,
            scroll_speed: config.scroll_speed,
            spawn_schedule,
            score: ScoreState::default(),
            time: SimTime::default(),
            commands_dispatched: 0,
        }
    }

    /// Queue a discrete input event for the next tick.
    pub fn queue_event(&mut self, event: InputEvent) {
        self.pending_events.push_back(event);
    }

    /// Advance one fixed tick of `DT` seconds.
    pub fn tick(&mut self, keyboard: &impl KeyboardState) -> TickReport {
        self.step(DT, keyboard)
    }

    /// Advance by `dt` seconds. Does nothing once the mission is decided.
    pub fn step(&mut self, dt: f32, keyboard: &impl KeyboardState) -> TickReport {
        if self.player.mission_status() == MissionStatus::Running {
            self.process_input(keyboard);
            self.run_systems(dt);
            self.time.advance(dt);
        } else {
            self.pending_events.clear();
            self.commands_dispatched = 0;
        }
        self.report()
    }

    pub fn mission_status(&self) -> MissionStatus {
        self.player.mission_status()
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> ScoreState {
        self.score
    }

    pub fn view(&self) -> FloatRect {
        self.view
    }

    /// The view extended upward, where enemies already live.
    pub fn battlefield(&self) -> FloatRect {
        let mut bounds = self.view;
        bounds.top -= BATTLEFIELD_MARGIN;
        bounds.height += BATTLEFIELD_MARGIN;
        bounds
    }

    pub fn layout(&self) -> MissionLayout {
        self.layout
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Input bindings, e.g. for rebinding keys.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn spawn_schedule(&self) -> &SpawnSchedule {
        &self.spawn_schedule
    }

    fn process_input(&mut self, keyboard: &impl KeyboardState) {
        while let Some(event) = self.pending_events.pop_front() {
            self.player.handle_event(&event, &mut self.commands);
        }
        self.player.handle_real_time_input(keyboard, &mut self.commands);
    }

    /// Run everything in tick order. Only the dispatch pass changes the tree
    /// shape until the cleanup systems run.
    fn run_systems(&mut self, dt: f32) {
        let player = self.layout.player;

        // 1. Scroll
        self.view.top += self.scroll_speed * dt;
        // 2. Node updates, which only queue commands
        self.scene.update(dt, &mut self.commands);
        // 3. Player velocity is rebuilt from this tick's input
        self.with_player(|aircraft| aircraft.entity_mut().set_velocity(Vec2::ZERO));
        // 4. Dispatch
        self.commands_dispatched = self.scene.dispatch_all(&mut self.commands, dt);
        // 5. Diagonal normalisation plus scroll
        let scroll = self.scroll_speed;
        self.with_player(|aircraft| adapt_player_velocity(aircraft, scroll));
        // 6. Missile guidance
        systems::guidance::run(&mut self.scene);
        // 7. Out-of-battlefield removal and kill accounting
        let battlefield = self.battlefield();
        systems::cleanup::remove_outside(&mut self.scene, battlefield);
        systems::cleanup::collect_score(&mut self.scene, &mut self.score);
        // 8. Wrecks
        self.scene.remove_wrecks();
        // 9. Enemy spawns
        systems::spawner::run(
            &mut self.scene,
            &mut self.spawn_schedule,
            battlefield,
            self.layout.air,
        );
        // 10. Keep the player on screen
        self.clamp_player_position();
        // 11. Mission outcome
        self.update_mission_status(player);
    }

    fn with_player(&self, f: impl FnOnce(&mut Aircraft)) {
        if let Some(mut aircraft) = self.scene.component_mut::<Aircraft>(self.layout.player) {
            f(&mut aircraft);
        }
    }

    fn clamp_player_position(&mut self) {
        let player = self.layout.player;
        let Some(transform) = self.scene.transform(player) else {
            return;
        };
        let view = self.view;
        let position = Vec2::new(
            transform
                .position
                .x
                .max(view.left + VIEW_BORDER_DISTANCE)
                .min(view.left + view.width - VIEW_BORDER_DISTANCE),
            transform
                .position
                .y
                .max(view.top + VIEW_BORDER_DISTANCE)
                .min(view.top + view.height - VIEW_BORDER_DISTANCE),
        );
        self.scene.set_position(player, position);
    }

    fn update_mission_status(&mut self, player: NodeId) {
        let alive = self
            .scene
            .component::<Aircraft>(player)
            .is_some_and(|a| !a.is_destroyed());
        let status = if !alive {
            MissionStatus::Failure
        } else if !self.world_bounds.contains(self.scene.world_position(player)) {
            MissionStatus::Success
        } else {
            MissionStatus::Running
        };
        if status != MissionStatus::Running {
            debug!(tick = self.time.tick, ?status, "mission decided");
        }
        self.player.set_mission_status(status);
    }

    fn report(&mut self) -> TickReport {
        let enemies = self
            .scene
            .subtree(self.scene.root())
            .into_iter()
            .filter(|id| self.scene.category(*id).contains(Category::ENEMY_AIRCRAFT))
            .count();
        TickReport {
            time: self.time,
            mission_status: self.player.mission_status(),
            score: self.score,
            sounds: self.scene.drain_sounds(),
            player_hitpoints: self
                .scene
                .component::<Aircraft>(self.layout.player)
                .map(|a| a.hitpoints()),
            enemies,
            commands_dispatched: self.commands_dispatched,
        }
    }
}

/// Where the player starts: horizontally centred, one half view above the bottom.
pub fn player_start(world_bounds: FloatRect) -> Vec2 {
    Vec2::new(
        world_bounds.left + world_bounds.width / 2.0,
        world_bounds.top + world_bounds.height - VIEW_HEIGHT / 2.0,
    )
}

/// Divide diagonal movement by sqrt(2), then carry the aircraft with the view.
fn adapt_player_velocity(aircraft: &mut Aircraft, scroll_speed: f32) {
    let mut velocity = aircraft.velocity();
    if velocity.x != 0.0 && velocity.y != 0.0 {
        velocity /= std::f32::consts::SQRT_2;
    }
    velocity.y += scroll_speed;
    aircraft.entity_mut().set_velocity(velocity);
}
