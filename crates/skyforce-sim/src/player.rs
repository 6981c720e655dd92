//! Player input: key bindings and the commands they produce.
//!
//! Keys map to abstract actions, and actions map to command templates
//! aimed at the player aircraft. Real-time actions (movement, guns) are
//! sampled every tick while their key is held; the others fire once per
//! key press.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::info;

use skyforce_core::enums::{Action, Key, MissionStatus};
use skyforce_core::Category;

use crate::command::{derived_action, Command, CommandQueue};
use crate::nodes::aircraft::Aircraft;

/// Raw input events delivered by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyPressed(Key),
    KeyReleased(Key),
}

/// Live keyboard state, polled for real-time actions.
pub trait KeyboardState {
    fn is_key_pressed(&self, key: Key) -> bool;
}

impl KeyboardState for HashSet<Key> {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.contains(&key)
    }
}

impl KeyboardState for BTreeSet<Key> {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.contains(&key)
    }
}

pub struct Player {
    key_binding: BTreeMap<Key, Action>,
    action_binding: BTreeMap<Action, Command>,
    mission_status: MissionStatus,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        let key_binding = BTreeMap::from([
            (Key::Left, Action::MoveLeft),
            (Key::Right, Action::MoveRight),
            (Key::Up, Action::MoveUp),
            (Key::Down, Action::MoveDown),
            (Key::Space, Action::Fire),
            (Key::M, Action::LaunchMissile),
        ]);

        let action_binding = Action::ALL
            .into_iter()
            .map(|action| (action, action_command(action)))
            .collect();

        Self {
            key_binding,
            action_binding,
            mission_status: MissionStatus::Running,
        }
    }

    /// Edge-triggered input: a key press queues its action once,
    /// unless the action is real-time.
    pub fn handle_event(&self, event: &InputEvent, commands: &mut CommandQueue) {
        if let InputEvent::KeyPressed(key) = event {
            if let Some(action) = self.key_binding.get(key) {
                if !action.is_real_time() {
                    self.push_action(*action, commands);
                }
            }
        }
    }

    /// Level-triggered input: every held key bound to a real-time action
    /// queues that action. Two keys bound to one action queue it twice.
    pub fn handle_real_time_input(
        &self,
        keyboard: &impl KeyboardState,
        commands: &mut CommandQueue,
    ) {
        for (key, action) in &self.key_binding {
            if keyboard.is_key_pressed(*key) && action.is_real_time() {
                self.push_action(*action, commands);
            }
        }
    }

    /// Bind `key` to `action`, first unbinding every key currently bound to `action`.
    pub fn assign_key(&mut self, action: Action, key: Key) {
        self.key_binding.retain(|_, bound| *bound != action);
        self.key_binding.insert(key, action);
    }

    /// The key bound to `action`, if any.
    pub fn assigned_key(&self, action: Action) -> Option<Key> {
        self.key_binding
            .iter()
            .find(|(_, bound)| **bound == action)
            .map(|(key, _)| *key)
    }

    pub fn set_mission_status(&mut self, status: MissionStatus) {
        if status != self.mission_status {
            info!(?status, "mission status changed");
        }
        self.mission_status = status;
    }

    pub fn mission_status(&self) -> MissionStatus {
        self.mission_status
    }

    fn push_action(&self, action: Action, commands: &mut CommandQueue) {
        if let Some(command) = self.action_binding.get(&action) {
            commands.push(command.clone());
        }
    }
}

/// Command template for an action, aimed at the player aircraft.
fn action_command(action: Action) -> Command {
    let act = match action {
        Action::MoveLeft => aircraft_mover(Vec2::new(-1.0, 0.0)),
        Action::MoveRight => aircraft_mover(Vec2::new(1.0, 0.0)),
        Action::MoveUp => aircraft_mover(Vec2::new(0.0, -1.0)),
        Action::MoveDown => aircraft_mover(Vec2::new(0.0, 1.0)),
        Action::Fire => derived_action::<Aircraft, _>(|aircraft, _dt| aircraft.fire()),
        Action::LaunchMissile => {
            derived_action::<Aircraft, _>(|aircraft, _dt| aircraft.launch_missile())
        }
    };
    Command::new(Category::PLAYER_AIRCRAFT, act)
}

/// Accelerate by a unit direction scaled by the aircraft's own speed.
fn aircraft_mover(direction: Vec2) -> crate::command::Action {
    derived_action::<Aircraft, _>(move |aircraft, _dt| {
        let speed = aircraft.speed();
        aircraft.accelerate(direction * speed);
    })
}
