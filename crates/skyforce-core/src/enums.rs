//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Aircraft archetypes. Each indexes one row of the aircraft data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftType {
    /// The player's fighter.
    Eagle,
    /// Light enemy, flies a zig-zag pattern, unarmed.
    Raptor,
    /// Heavy enemy, slow pattern, armed.
    Avenger,
}

impl AircraftType {
    pub const ALL: [AircraftType; 3] = [Self::Eagle, Self::Raptor, Self::Avenger];

    /// Row index into the aircraft data table.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Allied aircraft fly for the player; everything else is hostile.
    pub fn is_allied(self) -> bool {
        self == Self::Eagle
    }
}

/// Projectile archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileType {
    AlliedBullet,
    EnemyBullet,
    /// Guided, allied only.
    Missile,
}

impl ProjectileType {
    pub const ALL: [ProjectileType; 3] = [Self::AlliedBullet, Self::EnemyBullet, Self::Missile];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_allied(self) -> bool {
        !matches!(self, Self::EnemyBullet)
    }

    pub fn is_guided(self) -> bool {
        self == Self::Missile
    }
}

/// Pickup archetypes dropped by destroyed enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupType {
    HealthRefill,
    MissileRefill,
    FireSpread,
    FireRate,
}

impl PickupType {
    pub const ALL: [PickupType; 4] = [
        Self::HealthRefill,
        Self::MissileRefill,
        Self::FireSpread,
        Self::FireRate,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Sound effect identifiers understood by the external audio player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    AlliedGunfire,
    EnemyGunfire,
    Explosion1,
    Explosion2,
    LaunchMissile,
}

/// Texture identifiers for the external asset holder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureId {
    #[default]
    Entities,
    Explosion,
    Jungle,
}

/// Font identifiers for the external asset holder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontId {
    #[default]
    Main,
}

/// Physical keys the input layer can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Escape,
    LShift,
    LControl,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
}

/// Abstract player actions that keys are bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Fire,
    LaunchMissile,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Self::MoveLeft,
        Self::MoveRight,
        Self::MoveUp,
        Self::MoveDown,
        Self::Fire,
        Self::LaunchMissile,
    ];

    /// Real-time actions fire every tick while their key is held;
    /// the rest fire once per key press.
    pub fn is_real_time(self) -> bool {
        match self {
            Self::MoveLeft | Self::MoveRight | Self::MoveUp | Self::MoveDown | Self::Fire => true,
            Self::LaunchMissile => false,
        }
    }
}

/// Outcome of the current mission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionStatus {
    #[default]
    Running,
    Success,
    Failure,
}
