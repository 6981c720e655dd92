//! Enemy spawning: release scheduled spawn points as the view scrolls.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use skyforce_core::constants::ENEMY_SPAWN_ROTATION_DEG;
use skyforce_core::enums::AircraftType;
use skyforce_core::types::FloatRect;

use crate::nodes::aircraft;
use crate::scene::{NodeId, SceneGraph, Transform};

/// An enemy waiting at a fixed world position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub kind: AircraftType,
    pub position: Vec2,
}

/// Pending spawn points, released nearest-first as the battlefield reaches them.
#[derive(Debug, Clone, Default)]
pub struct SpawnSchedule {
    /// Sorted by ascending y; the next point to release is at the back.
    points: Vec<SpawnPoint>,
}

impl SpawnSchedule {
    pub fn new(mut points: Vec<SpawnPoint>) -> Self {
        points.sort_by(|a, b| a.position.y.total_cmp(&b.position.y));
        Self { points }
    }

    /// The default level, given the player's start position.
    /// Offsets are (x right of start, distance up the level).
    pub fn default_level(start: Vec2) -> Self {
        const LEVEL: [(AircraftType, f32, f32); 13] = [
            (AircraftType::Raptor, 0.0, 500.0),
            (AircraftType::Raptor, 0.0, 1000.0),
            (AircraftType::Raptor, 100.0, 1150.0),
            (AircraftType::Raptor, -100.0, 1150.0),
            (AircraftType::Avenger, 70.0, 1500.0),
            (AircraftType::Avenger, -70.0, 1500.0),
            (AircraftType::Avenger, -70.0, 1710.0),
            (AircraftType::Avenger, 70.0, 1700.0),
            (AircraftType::Avenger, 30.0, 1850.0),
            (AircraftType::Raptor, 300.0, 2200.0),
            (AircraftType::Raptor, -300.0, 2200.0),
            (AircraftType::Raptor, 0.0, 2200.0),
            (AircraftType::Raptor, 0.0, 2500.0),
        ];
        Self::new(
            LEVEL
                .iter()
                .map(|&(kind, x, up)| SpawnPoint {
                    kind,
                    position: Vec2::new(start.x + x, start.y - up),
                })
                .collect(),
        )
    }

    pub fn remaining(&self) -> usize {
        self.points.len()
    }

    /// Points at or below `top`, removed from the schedule in release order.
    fn release_below(&mut self, top: f32) -> Vec<SpawnPoint> {
        let mut released = Vec::new();
        while let Some(point) = self.points.last() {
            if point.position.y <= top {
                break;
            }
            released.extend(self.points.pop());
        }
        released
    }
}

/// Spawn every scheduled enemy the battlefield has reached, under `layer`.
pub fn run(
    scene: &mut SceneGraph,
    schedule: &mut SpawnSchedule,
    battlefield: FloatRect,
    layer: NodeId,
) -> Vec<NodeId> {
    let mut spawned = Vec::new();
    for point in schedule.release_below(battlefield.top) {
        let transform = Transform {
            position: point.position,
            rotation: ENEMY_SPAWN_ROTATION_DEG,
        };
        let id = aircraft::spawn(scene, point.kind, transform);
        scene.attach_child(layer, id);
        debug!(?id, kind = ?point.kind, position = ?point.position, "enemy spawned");
        spawned.push(id);
    }
    spawned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_order_and_threshold() {
        let mut schedule = SpawnSchedule::new(vec![
            SpawnPoint {
                kind: AircraftType::Raptor,
                position: Vec2::new(0.0, 100.0),
            },
            SpawnPoint {
                kind: AircraftType::Avenger,
                position: Vec2::new(0.0, 500.0),
            },
            SpawnPoint {
                kind: AircraftType::Raptor,
                position: Vec2::new(0.0, 300.0),
            },
        ]);

        assert!(schedule.release_below(600.0).is_empty());
        let released = schedule.release_below(250.0);
        let ys: Vec<f32> = released.iter().map(|p| p.position.y).collect();
        assert_eq!(ys, vec![500.0, 300.0]);
        assert_eq!(schedule.remaining(), 1);
    }

    #[test]
    fn test_default_level_is_relative_to_start() {
        let start = Vec2::new(320.0, 1760.0);
        let mut schedule = SpawnSchedule::default_level(start);
        assert_eq!(schedule.remaining(), 13);

        let first = schedule.release_below(1250.0);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].kind, AircraftType::Raptor);
        assert_eq!(first[0].position, Vec2::new(320.0, 1260.0));
    }
}
