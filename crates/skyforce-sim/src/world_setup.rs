//! Node factories for setting up a mission.
//!
//! Builds the layer structure under the scene root, the sound node, the
//! scrolling background, and the player aircraft.

use glam::Vec2;

use skyforce_core::enums::{AircraftType, TextureId};
use skyforce_core::types::{FloatRect, IntRect};
use skyforce_core::Category;

use crate::nodes::aircraft;
use crate::nodes::sound::SoundNode;
use crate::nodes::sprite::{Layer, Sprite, SpriteNode};
use crate::scene::{NodeId, SceneGraph, Transform};

/// Handles to the fixed nodes of a mission scene.
#[derive(Debug, Clone, Copy)]
pub struct MissionLayout {
    pub background: NodeId,
    /// Receives spawned aircraft, projectiles, and pickups.
    pub air: NodeId,
    pub sound: NodeId,
    pub player: NodeId,
}

/// Build the mission scene and return handles to its fixed nodes.
pub fn setup_mission(
    scene: &mut SceneGraph,
    world_bounds: FloatRect,
    player_start: Vec2,
) -> MissionLayout {
    let root = scene.root();

    let background = scene.spawn_node(Layer, Category::empty(), Transform::default());
    scene.attach_child(root, background);

    // The air layer is the only SCENE node, so spawn commands land once.
    let air = scene.spawn_node(Layer, Category::SCENE, Transform::default());
    scene.attach_child(root, air);

    spawn_background(scene, background, world_bounds);

    let sound = scene.spawn_node(SoundNode::new(), Category::SOUND_EFFECT, Transform::default());
    scene.attach_child(root, sound);

    let player = spawn_player(scene, air, player_start);

    MissionLayout {
        background,
        air,
        sound,
        player,
    }
}

/// Tile the background texture over the whole level.
fn spawn_background(scene: &mut SceneGraph, layer: NodeId, world_bounds: FloatRect) -> NodeId {
    let rect = IntRect::new(0, 0, world_bounds.width as i32, world_bounds.height as i32);
    let node = scene.spawn_node(
        SpriteNode {
            sprite: Sprite::new(TextureId::Jungle, rect),
        },
        Category::empty(),
        Transform::at(world_bounds.center()),
    );
    scene.attach_child(layer, node);
    node
}

/// Spawn the player's aircraft under `layer`.
pub fn spawn_player(scene: &mut SceneGraph, layer: NodeId, position: Vec2) -> NodeId {
    let player = aircraft::spawn(scene, AircraftType::Eagle, Transform::at(position));
    scene.attach_child(layer, player);
    player
}
