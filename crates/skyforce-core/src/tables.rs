//! Static per-type data tables.
//!
//! The registry is built once (defaults or JSON), validated, and then shared
//! read-only by every node that needs its row. Rows are indexed by the
//! `index()` of the matching type enumeration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::enums::{AircraftType, PickupType, ProjectileType, TextureId};
use crate::error::TableError;
use crate::types::IntRect;

/// One leg of a waypoint movement pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    /// Heading in degrees; 0 points down the screen.
    pub angle: f32,
    /// Distance flown on this heading before turning to the next leg.
    pub distance: f32,
}

impl Direction {
    pub fn new(angle: f32, distance: f32) -> Self {
        Self { angle, distance }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftData {
    pub hitpoints: i32,
    pub speed: f32,
    /// Base reload time in seconds. Zero means the type never fires.
    pub fire_interval_secs: f32,
    pub score_value: u32,
    pub texture: TextureId,
    pub texture_rect: IntRect,
    /// Whether the texture strip holds bank-left / bank-right frames.
    #[serde(default)]
    pub has_roll_animation: bool,
    /// Waypoint legs, empty for the player-controlled type.
    #[serde(default)]
    pub directions: Vec<Direction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileData {
    pub damage: i32,
    pub speed: f32,
    pub texture: TextureId,
    pub texture_rect: IntRect,
}

/// What a pickup does to the aircraft that collects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PickupEffect {
    Repair { points: i32 },
    Missiles { count: u32 },
    FireSpread,
    FireRate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupData {
    pub effect: PickupEffect,
    pub texture: TextureId,
    pub texture_rect: IntRect,
}

/// Registry of every per-type table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTables {
    pub aircraft: Vec<AircraftData>,
    pub projectiles: Vec<ProjectileData>,
    pub pickups: Vec<PickupData>,
}

impl Default for DataTables {
    fn default() -> Self {
        Self {
            aircraft: vec![
                // Eagle
                AircraftData {
                    hitpoints: 100,
                    speed: 200.0,
                    fire_interval_secs: 1.0,
                    score_value: 0,
                    texture: TextureId::Entities,
                    texture_rect: IntRect::new(0, 0, 48, 64),
                    has_roll_animation: true,
                    directions: Vec::new(),
                },
                // Raptor
                AircraftData {
                    hitpoints: 20,
                    speed: 80.0,
                    fire_interval_secs: 0.0,
                    score_value: 100,
                    texture: TextureId::Entities,
                    texture_rect: IntRect::new(144, 0, 84, 64),
                    has_roll_animation: false,
                    directions: vec![
                        Direction::new(45.0, 80.0),
                        Direction::new(-45.0, 160.0),
                        Direction::new(45.0, 80.0),
                    ],
                },
                // Avenger
                AircraftData {
                    hitpoints: 40,
                    speed: 50.0,
                    fire_interval_secs: 2.0,
                    score_value: 200,
                    texture: TextureId::Entities,
                    texture_rect: IntRect::new(228, 0, 60, 59),
                    has_roll_animation: false,
                    directions: vec![
                        Direction::new(45.0, 50.0),
                        Direction::new(0.0, 50.0),
                        Direction::new(-45.0, 100.0),
                        Direction::new(0.0, 50.0),
                        Direction::new(45.0, 50.0),
                    ],
                },
            ],
            projectiles: vec![
                // AlliedBullet
                ProjectileData {
                    damage: 10,
                    speed: 300.0,
                    texture: TextureId::Entities,
                    texture_rect: IntRect::new(175, 64, 3, 14),
                },
                // EnemyBullet
                ProjectileData {
                    damage: 10,
                    speed: 300.0,
                    texture: TextureId::Entities,
                    texture_rect: IntRect::new(178, 64, 3, 14),
                },
                // Missile
                ProjectileData {
                    damage: 200,
                    speed: 150.0,
                    texture: TextureId::Entities,
                    texture_rect: IntRect::new(160, 64, 15, 32),
                },
            ],
            pickups: vec![
                PickupData {
                    effect: PickupEffect::Repair { points: 25 },
                    texture: TextureId::Entities,
                    texture_rect: IntRect::new(0, 64, 40, 40),
                },
                PickupData {
                    effect: PickupEffect::Missiles { count: 3 },
                    texture: TextureId::Entities,
                    texture_rect: IntRect::new(40, 64, 40, 40),
                },
                PickupData {
                    effect: PickupEffect::FireSpread,
                    texture: TextureId::Entities,
                    texture_rect: IntRect::new(80, 64, 40, 40),
                },
                PickupData {
                    effect: PickupEffect::FireRate,
                    texture: TextureId::Entities,
                    texture_rect: IntRect::new(120, 64, 40, 40),
                },
            ],
        }
    }
}

impl DataTables {
    /// Parse and validate tables from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let tables: DataTables = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Read, parse and validate tables from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check that every type has a usable row.
    pub fn validate(&self) -> Result<(), TableError> {
        check_rows("aircraft", AircraftType::ALL.len(), self.aircraft.len())?;
        check_rows("projectile", ProjectileType::ALL.len(), self.projectiles.len())?;
        check_rows("pickup", PickupType::ALL.len(), self.pickups.len())?;

        for (index, row) in self.aircraft.iter().enumerate() {
            if row.hitpoints <= 0 {
                return Err(invalid("aircraft", index, "hitpoints must be positive"));
            }
            if row.speed < 0.0 || row.fire_interval_secs < 0.0 {
                return Err(invalid(
                    "aircraft",
                    index,
                    "speed and fire interval must not be negative",
                ));
            }
            if row.texture_rect.width <= 0 || row.texture_rect.height <= 0 {
                return Err(invalid("aircraft", index, "texture rect is empty"));
            }
            if row.directions.iter().any(|d| d.distance <= 0.0) {
                return Err(invalid("aircraft", index, "waypoint legs need a positive distance"));
            }
        }

        for (index, row) in self.projectiles.iter().enumerate() {
            if row.speed <= 0.0 {
                return Err(invalid("projectile", index, "speed must be positive"));
            }
        }

        for (index, row) in self.pickups.iter().enumerate() {
            if let PickupEffect::Repair { points } = row.effect {
                if points <= 0 {
                    return Err(invalid("pickup", index, "repair amount must be positive"));
                }
            }
        }

        Ok(())
    }

    pub fn aircraft(&self, kind: AircraftType) -> &AircraftData {
        &self.aircraft[kind.index()]
    }

    pub fn projectile(&self, kind: ProjectileType) -> &ProjectileData {
        &self.projectiles[kind.index()]
    }

    pub fn pickup(&self, kind: PickupType) -> &PickupData {
        &self.pickups[kind.index()]
    }
}

fn check_rows(table: &'static str, expected: usize, found: usize) -> Result<(), TableError> {
    if found < expected {
        return Err(TableError::MissingRows {
            table,
            expected,
            found,
        });
    }
    Ok(())
}

fn invalid(table: &'static str, index: usize, reason: &str) -> TableError {
    TableError::InvalidRow {
        table,
        index,
        reason: reason.to_string(),
    }
}
