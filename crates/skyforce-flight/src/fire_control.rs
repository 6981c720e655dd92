//! Fire-control state machine.
//!
//! Intents are raised by input or AI and consumed once per tick by
//! `evaluate`, which decides whether a bullet volley and/or a missile leave
//! the aircraft this tick. Spawning itself happens later, when the queued
//! commands are dispatched.

use glam::Vec2;

use skyforce_core::constants::{
    CENTER_SHOT_Y_OFFSET, INITIAL_MISSILE_AMMO, MAX_FIRE_RATE_LEVEL, MAX_SPREAD_LEVEL,
    SIDE_SHOT_Y_OFFSET,
};

const SPREAD_1: [Vec2; 1] = [Vec2::new(0.0, CENTER_SHOT_Y_OFFSET)];
const SPREAD_2: [Vec2; 2] = [
    Vec2::new(-0.33, SIDE_SHOT_Y_OFFSET),
    Vec2::new(0.33, SIDE_SHOT_Y_OFFSET),
];
const SPREAD_3: [Vec2; 3] = [
    Vec2::new(-0.5, SIDE_SHOT_Y_OFFSET),
    Vec2::new(0.0, CENTER_SHOT_Y_OFFSET),
    Vec2::new(0.5, SIDE_SHOT_Y_OFFSET),
];

/// Launch offset for missiles, always centred.
pub const MISSILE_OFFSET: Vec2 = Vec2::new(0.0, CENTER_SHOT_Y_OFFSET);

/// What left the aircraft during one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchDecision {
    pub fire_bullets: bool,
    pub launch_missile: bool,
}

/// Per-aircraft weapons state.
#[derive(Debug, Clone, PartialEq)]
pub struct FireControl {
    fire_rate_level: u32,
    spread_level: u32,
    missile_ammo: u32,
    /// Seconds until the guns may fire again. Non-positive means ready.
    countdown: f32,
    is_firing: bool,
    is_launching_missile: bool,
}

impl Default for FireControl {
    fn default() -> Self {
        Self {
            fire_rate_level: 1,
            spread_level: 1,
            missile_ammo: INITIAL_MISSILE_AMMO,
            countdown: 0.0,
            is_firing: false,
            is_launching_missile: false,
        }
    }
}

impl FireControl {
    pub fn fire_rate_level(&self) -> u32 {
        self.fire_rate_level
    }

    pub fn spread_level(&self) -> u32 {
        self.spread_level
    }

    pub fn missile_ammo(&self) -> u32 {
        self.missile_ammo
    }

    pub fn countdown(&self) -> f32 {
        self.countdown
    }

    pub fn is_firing(&self) -> bool {
        self.is_firing
    }

    pub fn is_launching_missile(&self) -> bool {
        self.is_launching_missile
    }

    pub fn increase_fire_rate(&mut self) {
        if self.fire_rate_level < MAX_FIRE_RATE_LEVEL {
            self.fire_rate_level += 1;
        }
    }

    pub fn increase_spread(&mut self) {
        if self.spread_level < MAX_SPREAD_LEVEL {
            self.spread_level += 1;
        }
    }

    pub fn collect_missiles(&mut self, count: u32) {
        self.missile_ammo = self.missile_ammo.saturating_add(count);
    }

    /// Raise the firing intent. Types without a fire interval cannot fire.
    pub fn request_fire(&mut self, fire_interval_secs: f32) {
        if fire_interval_secs > 0.0 {
            self.is_firing = true;
        }
    }

    /// Raise the missile intent. Ammo is checked when the intent is evaluated.
    pub fn request_missile(&mut self) {
        self.is_launching_missile = true;
    }

    /// Reload time after a volley at the current fire-rate level.
    pub fn reload_time(&self, fire_interval_secs: f32) -> f32 {
        fire_interval_secs / (self.fire_rate_level as f32 + 1.0)
    }

    /// Consume this tick's intents.
    ///
    /// A volley fires when the intent is set and the countdown has run out;
    /// the countdown is then reloaded. While the countdown is still running
    /// it ticks down and any intent is discarded, so an early trigger is
    /// never carried over. A missile launches when requested and ammo
    /// remains; without ammo the request is dropped.
    pub fn evaluate(&mut self, dt: f32, fire_interval_secs: f32) -> LaunchDecision {
        let mut decision = LaunchDecision::default();

        if self.is_firing && self.countdown <= 0.0 {
            decision.fire_bullets = true;
            self.countdown = self.reload_time(fire_interval_secs);
            self.is_firing = false;
        } else if self.countdown > 0.0 {
            self.countdown -= dt;
            self.is_firing = false;
        }

        if self.is_launching_missile {
            if self.missile_ammo > 0 {
                decision.launch_missile = true;
                self.missile_ammo -= 1;
            }
            self.is_launching_missile = false;
        }

        decision
    }
}

/// Launch offsets of one volley, as fractions of the shooter's sprite size.
///
/// Levels above the cap are treated as the cap.
pub fn bullet_offsets(spread_level: u32) -> &'static [Vec2] {
    match spread_level {
        0 | 1 => &SPREAD_1,
        2 => &SPREAD_2,
        _ => &SPREAD_3,
    }
}

/// Which way projectiles travel: allied shots go up the screen, hostile ones down.
pub fn side_sign(allied: bool) -> f32 {
    if allied {
        -1.0
    } else {
        1.0
    }
}

/// World-space offset from the shooter for a fractional launch offset.
pub fn launch_offset(offset: Vec2, sprite_size: Vec2, allied: bool) -> Vec2 {
    offset * sprite_size * side_sign(allied)
}

/// Initial velocity of a projectile with the given speed.
pub fn launch_velocity(speed: f32, allied: bool) -> Vec2 {
    Vec2::new(0.0, speed) * side_sign(allied)
}
