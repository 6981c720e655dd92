//! Game loop thread: runs the simulation engine at the fixed tick rate.
//!
//! The engine is created inside the thread. Input arrives over an `mpsc`
//! channel or from a tick-indexed script; the latest report is stored in
//! shared state for polling.

use std::collections::HashSet;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, trace};

use skyforce_core::constants::TICK_RATE;
use skyforce_core::enums::{Key, MissionStatus};
use skyforce_sim::engine::{SimConfig, SimulationEngine, TickReport};
use skyforce_sim::player::InputEvent;
use skyforce_sim::systems::cleanup::ScoreState;

use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// An input event fed to the engine before the given tick runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptStep {
    pub tick: u64,
    pub event: InputEvent,
}

#[derive(Debug, Clone, Default)]
pub struct LoopOptions {
    /// Stop after this many ticks even if the mission is undecided.
    pub max_ticks: Option<u64>,
    /// Sleep between ticks to run at wall-clock speed.
    pub paced: bool,
    pub script: Vec<ScriptStep>,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoopSummary {
    pub ticks: u64,
    pub mission_status: MissionStatus,
    pub score: ScoreState,
    pub player_hitpoints: Option<i32>,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle that yields the run summary.
pub fn spawn_game_loop(
    config: SimConfig,
    options: LoopOptions,
    latest_report: Arc<Mutex<Option<TickReport>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopSummary>), String> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("skyforce-game-loop".into())
        .spawn(move || {
            let mut engine = SimulationEngine::new(config);
            run_game_loop(&mut engine, &cmd_rx, &latest_report, options)
        })
        .map_err(|e| format!("Failed to spawn game loop thread: {}", e))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until the mission is decided, the tick cap is
/// reached, or a Shutdown command or channel disconnect arrives.
pub fn run_game_loop(
    engine: &mut SimulationEngine,
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
    latest_report: &Mutex<Option<TickReport>>,
    options: LoopOptions,
) -> LoopSummary {
    let mut held: HashSet<Key> = HashSet::new();
    let mut script = options.script;
    script.sort_by_key(|step| step.tick);
    let mut script = script.into_iter().peekable();
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Input(event)) => apply_input(engine, &mut held, event),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(tick = engine.time().tick, "game loop stopped");
                    return summarize(engine);
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Scripted input due before this tick
        let tick = engine.time().tick;
        while let Some(step) = script.next_if(|step| step.tick <= tick) {
            apply_input(engine, &mut held, step.event);
        }

        // 3. Advance one tick
        let report = engine.tick(&held);
        for sound in &report.sounds {
            trace!(effect = ?sound.effect, position = ?sound.position, "sound");
        }
        if report.time.tick % TICK_RATE as u64 == 0 {
            debug!(
                tick = report.time.tick,
                score = report.score.points,
                enemies = report.enemies,
                hitpoints = ?report.player_hitpoints,
                "progress"
            );
        }
        let status = report.mission_status;
        let ticks = report.time.tick;

        // 4. Store latest report for polling
        if let Ok(mut lock) = latest_report.lock() {
            *lock = Some(report);
        }

        // 5. Stop conditions
        if status != MissionStatus::Running {
            info!(?status, ticks, "mission over");
            return summarize(engine);
        }
        if options.max_ticks.is_some_and(|max| ticks >= max) {
            info!(ticks, "tick limit reached");
            return summarize(engine);
        }

        // 6. Sleep until next tick
        if options.paced {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind; reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }
    }
}

/// Track held keys and forward the edge to the engine.
fn apply_input(engine: &mut SimulationEngine, held: &mut HashSet<Key>, event: InputEvent) {
    match event {
        InputEvent::KeyPressed(key) => {
            held.insert(key);
        }
        InputEvent::KeyReleased(key) => {
            held.remove(&key);
        }
    }
    engine.queue_event(event);
}

fn summarize(engine: &SimulationEngine) -> LoopSummary {
    let player = engine.layout().player;
    LoopSummary {
        ticks: engine.time().tick,
        mission_status: engine.mission_status(),
        score: engine.score(),
        player_hitpoints: engine
            .scene()
            .component::<skyforce_sim::nodes::aircraft::Aircraft>(player)
            .map(|a| a.hitpoints()),
    }
}

/// A pilot that holds the trigger, weaves across the screen, and fires
/// both missiles during the first waves.
pub fn demo_script() -> Vec<ScriptStep> {
    let second = TICK_RATE as u64;
    let mut script = vec![ScriptStep {
        tick: 0,
        event: InputEvent::KeyPressed(Key::Space),
    }];
    for lap in 0..8u64 {
        let start = second * (2 + lap * 4);
        script.extend([
            ScriptStep {
                tick: start,
                event: InputEvent::KeyPressed(Key::Left),
            },
            ScriptStep {
                tick: start + second,
                event: InputEvent::KeyReleased(Key::Left),
            },
            ScriptStep {
                tick: start + 2 * second,
                event: InputEvent::KeyPressed(Key::Right),
            },
            ScriptStep {
                tick: start + 3 * second,
                event: InputEvent::KeyReleased(Key::Right),
            },
        ]);
    }
    for at in [5, 12] {
        script.push(ScriptStep {
            tick: at * second,
            event: InputEvent::KeyPressed(Key::M),
        });
        script.push(ScriptStep {
            tick: at * second + 1,
            event: InputEvent::KeyReleased(Key::M),
        });
    }
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Input(InputEvent::KeyPressed(Key::Space)))
            .unwrap();
        tx.send(GameLoopCommand::Input(InputEvent::KeyReleased(Key::Space)))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[0],
            GameLoopCommand::Input(InputEvent::KeyPressed(Key::Space))
        );
        assert_eq!(commands[2], GameLoopCommand::Shutdown);
    }

    #[test]
    fn test_loop_stops_at_tick_limit() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        let (_tx, rx) = mpsc::channel::<GameLoopCommand>();
        let latest = Mutex::new(None);
        let options = LoopOptions {
            max_ticks: Some(120),
            ..Default::default()
        };

        let summary = run_game_loop(&mut engine, &rx, &latest, options);
        assert_eq!(summary.ticks, 120);
        assert_eq!(summary.mission_status, MissionStatus::Running);
        assert_eq!(summary.player_hitpoints, Some(100));
        let report = latest.lock().unwrap().clone();
        assert_eq!(report.map(|r| r.time.tick), Some(120));
    }

    #[test]
    fn test_shutdown_stops_loop_before_ticking() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        tx.send(GameLoopCommand::Shutdown).unwrap();
        let latest = Mutex::new(None);

        let summary = run_game_loop(&mut engine, &rx, &latest, LoopOptions::default());
        assert_eq!(summary.ticks, 0);
        assert!(latest.lock().unwrap().is_none());
    }

    #[test]
    fn test_script_drives_the_player() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        let (_tx, rx) = mpsc::channel::<GameLoopCommand>();
        let latest = Mutex::new(None);
        let options = LoopOptions {
            max_ticks: Some(3 * TICK_RATE as u64),
            paced: false,
            script: demo_script(),
        };

        run_game_loop(&mut engine, &rx, &latest, options);
        let player = engine.layout().player;
        let x = engine.scene().world_position(player).x;
        // One second of left input at speed 200 from the centre.
        assert!(x < 320.0 - 150.0, "player at x = {x}");
        let projectiles = {
            let mut query = engine
                .scene()
                .world()
                .query::<&skyforce_sim::nodes::projectile::Projectile>();
            query.iter().count()
        };
        assert!(projectiles > 0);
    }

    #[test]
    fn test_demo_script_is_balanced() {
        let script = demo_script();
        let presses = script
            .iter()
            .filter(|s| matches!(s.event, InputEvent::KeyPressed(_)))
            .count();
        let releases = script.len() - presses;
        // The trigger stays held for the whole run.
        assert_eq!(presses, releases + 1);
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
