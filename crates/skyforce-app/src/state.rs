//! Application state shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use skyforce_sim::engine::{SimConfig, TickReport};
use skyforce_sim::player::InputEvent;

use crate::game_loop::{self, LoopOptions, LoopSummary};

/// Commands sent to the game loop thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameLoopCommand {
    /// A key press or release to forward to the player's input binder.
    Input(InputEvent),
    /// Stop the game loop after the current tick.
    Shutdown,
}

/// Handles to a running game loop.
///
/// - `command_tx` is `None` until `start_simulation` is called
/// - `latest_report` is shared with the game loop thread and updated every tick
pub struct AppState {
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    pub latest_report: Arc<Mutex<Option<TickReport>>>,
    pub running: Mutex<bool>,
    handle: Mutex<Option<JoinHandle<LoopSummary>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_report: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
            handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop thread if it is not already running.
    pub fn start_simulation(&self, config: SimConfig, options: LoopOptions) -> Result<(), String> {
        let mut running = self.running.lock().map_err(|e| e.to_string())?;
        if *running {
            return Err("Simulation already running".into());
        }

        let (cmd_tx, handle) =
            game_loop::spawn_game_loop(config, options, self.latest_report.clone())?;

        *self.command_tx.lock().map_err(|e| e.to_string())? = Some(cmd_tx);
        *self.handle.lock().map_err(|e| e.to_string())? = Some(handle);
        *running = true;
        Ok(())
    }

    pub fn send_input(&self, event: InputEvent) -> Result<(), String> {
        self.send(GameLoopCommand::Input(event))
    }

    pub fn shutdown(&self) -> Result<(), String> {
        self.send(GameLoopCommand::Shutdown)
    }

    pub fn latest_report(&self) -> Result<Option<TickReport>, String> {
        let lock = self.latest_report.lock().map_err(|e| e.to_string())?;
        Ok(lock.clone())
    }

    /// Block until the game loop finishes and return its summary.
    pub fn wait(&self) -> Result<LoopSummary, String> {
        let handle = self
            .handle
            .lock()
            .map_err(|e| e.to_string())?
            .take()
            .ok_or_else(|| "Simulation not started".to_string())?;
        let summary = handle
            .join()
            .map_err(|_| "Game loop thread panicked".to_string())?;

        *self.running.lock().map_err(|e| e.to_string())? = false;
        *self.command_tx.lock().map_err(|e| e.to_string())? = None;
        Ok(summary)
    }

    fn send(&self, command: GameLoopCommand) -> Result<(), String> {
        let tx_lock = self.command_tx.lock().map_err(|e| e.to_string())?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(command)
                .map_err(|e| format!("Failed to send command: {}", e)),
            None => Err("Simulation not started".into()),
        }
    }
}
