//! Aircraft: the player's fighter and every enemy plane.
//!
//! Each tick an aircraft refreshes its labels, picks its roll frame, and then
//! either plays out its explosion (when destroyed) or runs fire control and
//! its waypoint pattern before moving. Everything that touches the rest of
//! the tree (bullets, missiles, pickups, sounds) leaves as a queued command
//! that refers back to the aircraft by node id.

use std::sync::Arc;

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use skyforce_core::constants::*;
use skyforce_core::enums::{
    AircraftType, FontId, PickupType, ProjectileType, SoundEffect, TextureId,
};
use skyforce_core::tables::AircraftData;
use skyforce_core::{Category, DataTables};
use skyforce_flight::fire_control::{
    bullet_offsets, launch_offset, launch_velocity, FireControl, MISSILE_OFFSET,
};
use skyforce_flight::pattern::PatternState;
use skyforce_flight::roll::RollFrame;

use crate::animation::Animation;
use crate::command::{derived_action, Command, CommandQueue};
use crate::entity::{Entity, Simulated};
use crate::nodes::pickup::Pickup;
use crate::nodes::projectile::Projectile;
use crate::nodes::sound::SoundNode;
use crate::nodes::sprite::Sprite;
use crate::nodes::text::TextNode;
use crate::scene::{NodeId, NodeKind, SceneComponent, SceneGraph, Transform, Visual};

#[derive(Debug, Clone)]
pub struct Aircraft {
    kind: AircraftType,
    entity: Entity,
    sprite: Sprite,
    explosion: Animation,
    fire: FireControl,
    pattern: PatternState,
    /// Cleared by `remove()`, which skips the explosion entirely.
    show_explosion: bool,
    spawned_pickup: bool,
    played_explosion_sound: bool,
    score_counted: bool,
    health_display: Option<NodeId>,
    missile_display: Option<NodeId>,
    tables: Arc<DataTables>,
}

impl Aircraft {
    pub fn new(kind: AircraftType, tables: Arc<DataTables>) -> Self {
        let data = tables.aircraft(kind);
        let entity = Entity::new(data.hitpoints);
        let sprite = Sprite::new(data.texture, data.texture_rect);
        Self {
            kind,
            entity,
            sprite,
            explosion: Animation::new(
                (EXPLOSION_FRAME_SIZE, EXPLOSION_FRAME_SIZE),
                EXPLOSION_SHEET_COLUMNS,
                EXPLOSION_FRAME_COUNT,
                EXPLOSION_DURATION_SECS,
            ),
            fire: FireControl::default(),
            pattern: PatternState::default(),
            show_explosion: true,
            spawned_pickup: false,
            played_explosion_sound: false,
            score_counted: false,
            health_display: None,
            missile_display: None,
            tables,
        }
    }

    pub fn kind(&self) -> AircraftType {
        self.kind
    }

    pub fn data(&self) -> &AircraftData {
        self.tables.aircraft(self.kind)
    }

    pub fn is_allied(&self) -> bool {
        self.kind.is_allied()
    }

    pub fn category(&self) -> Category {
        if self.is_allied() {
            Category::PLAYER_AIRCRAFT
        } else {
            Category::ENEMY_AIRCRAFT
        }
    }

    pub fn speed(&self) -> f32 {
        self.data().speed
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn explosion(&self) -> &Animation {
        &self.explosion
    }

    pub fn fire_control(&self) -> &FireControl {
        &self.fire
    }

    pub fn pattern(&self) -> PatternState {
        self.pattern
    }

    pub fn health_display(&self) -> Option<NodeId> {
        self.health_display
    }

    pub fn missile_display(&self) -> Option<NodeId> {
        self.missile_display
    }

    // --- Entity passthroughs ---

    pub fn velocity(&self) -> Vec2 {
        self.entity.velocity()
    }

    pub fn accelerate(&mut self, velocity: Vec2) {
        self.entity.accelerate(velocity);
    }

    pub fn hitpoints(&self) -> i32 {
        self.entity.hitpoints()
    }

    pub fn is_destroyed(&self) -> bool {
        self.entity.is_destroyed()
    }

    // --- Upgrades and intents ---

    pub fn increase_fire_rate(&mut self) {
        self.fire.increase_fire_rate();
    }

    pub fn increase_spread(&mut self) {
        self.fire.increase_spread();
    }

    pub fn collect_missiles(&mut self, count: u32) {
        self.fire.collect_missiles(count);
    }

    /// Ask the guns to fire on the next update. Ignored for unarmed types.
    pub fn fire(&mut self) {
        let interval = self.data().fire_interval_secs;
        self.fire.request_fire(interval);
    }

    /// Ask for a missile launch on the next update.
    pub fn launch_missile(&mut self) {
        self.fire.request_missile();
    }

    // --- Scoring ---

    /// Score awarded for destroying this aircraft. Does not consume it.
    pub fn score_value(&self) -> u32 {
        self.data().score_value
    }

    /// Consume the score: `Some` on the first call, `None` afterwards.
    pub fn take_score(&mut self) -> Option<u32> {
        if self.score_counted {
            return None;
        }
        self.score_counted = true;
        Some(self.score_value())
    }

    pub fn is_score_counted(&self) -> bool {
        self.score_counted
    }

    // --- Destruction bookkeeping ---

    pub fn shows_explosion(&self) -> bool {
        self.show_explosion
    }

    pub fn has_spawned_pickup(&self) -> bool {
        self.spawned_pickup
    }

    pub fn has_played_explosion_sound(&self) -> bool {
        self.played_explosion_sound
    }

    /// Sprite or explosion frame, depending on life state.
    pub fn visual(&self) -> Visual {
        if self.is_destroyed() && self.show_explosion {
            Visual::Sprite {
                texture: TextureId::Explosion,
                rect: self.explosion.frame_rect(),
            }
        } else {
            self.sprite.visual()
        }
    }

    pub fn health_text(&self) -> String {
        if self.is_destroyed() {
            String::new()
        } else {
            format!("{} HP", self.hitpoints())
        }
    }

    pub fn missile_text(&self) -> String {
        if self.fire.missile_ammo() == 0 || self.is_destroyed() {
            String::new()
        } else {
            format!("M: {}", self.fire.missile_ammo())
        }
    }

    /// One tick of the aircraft's own behavior. Steps run in a fixed order;
    /// a destroyed aircraft stops after its explosion bookkeeping.
    fn update_current(
        &mut self,
        id: NodeId,
        world_position: Vec2,
        transform: &mut Transform,
        dt: f32,
        rng: &mut ChaCha8Rng,
        commands: &mut CommandQueue,
    ) -> DisplayRefresh {
        let refresh = self.display_refresh(transform.rotation);
        self.update_roll_animation();

        if self.is_destroyed() {
            self.check_pickup_drop(id, rng, commands);
            self.explosion.update(dt);

            if !self.played_explosion_sound {
                let effect = if rng.gen_range(0..2) == 0 {
                    SoundEffect::Explosion1
                } else {
                    SoundEffect::Explosion2
                };
                commands.push(sound_command(effect, world_position));
                self.played_explosion_sound = true;
            }

            return refresh;
        }

        self.check_projectile_launch(id, world_position, dt, commands);
        self.update_movement_pattern(dt);
        self.entity.update(dt, transform);
        refresh
    }

    fn display_refresh(&self, rotation: f32) -> DisplayRefresh {
        DisplayRefresh {
            health: self.health_display.map(|node| (node, self.health_text())),
            missile: self.missile_display.map(|node| (node, self.missile_text())),
            rotation: -rotation,
        }
    }

    fn update_roll_animation(&mut self) {
        let data = self.tables.aircraft(self.kind);
        if data.has_roll_animation {
            let frame = RollFrame::from_velocity_x(self.entity.velocity().x);
            self.sprite.rect = frame.texture_rect(data.texture_rect);
        }
    }

    fn update_movement_pattern(&mut self, dt: f32) {
        let data = self.tables.aircraft(self.kind);
        if let Some(velocity) = self.pattern.advance(&data.directions, data.speed, dt) {
            self.entity.set_velocity(velocity);
        }
    }

    /// Roll for a pickup once per aircraft, on the first destroyed tick.
    fn check_pickup_drop(&mut self, id: NodeId, rng: &mut ChaCha8Rng, commands: &mut CommandQueue) {
        if self.spawned_pickup {
            return;
        }
        self.spawned_pickup = true;

        if !self.is_allied() && rng.gen_range(0..PICKUP_DROP_ODDS) == 0 {
            debug!(?id, kind = ?self.kind, "pickup drop queued");
            commands.push(drop_pickup_command(id));
        }
    }

    fn check_projectile_launch(
        &mut self,
        id: NodeId,
        world_position: Vec2,
        dt: f32,
        commands: &mut CommandQueue,
    ) {
        let interval = self.data().fire_interval_secs;

        // Enemies keep their trigger held; the countdown paces them.
        if !self.is_allied() {
            self.fire.request_fire(interval);
        }

        let decision = self.fire.evaluate(dt, interval);

        if decision.fire_bullets {
            commands.push(fire_command(id));
            let gunfire = if self.is_allied() {
                SoundEffect::AlliedGunfire
            } else {
                SoundEffect::EnemyGunfire
            };
            commands.push(sound_command(gunfire, world_position));
        }

        if decision.launch_missile {
            commands.push(missile_command(id));
            commands.push(sound_command(SoundEffect::LaunchMissile, world_position));
        }
    }
}

impl Simulated for Aircraft {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn is_marked_for_removal(&self) -> bool {
        self.is_destroyed() && (self.explosion.is_finished() || !self.show_explosion)
    }

    fn remove(&mut self) {
        self.entity.remove();
        self.show_explosion = false;
    }
}

impl SceneComponent for Aircraft {
    const KIND: NodeKind = NodeKind::Aircraft;
}

/// Label updates computed at the start of an aircraft's tick.
struct DisplayRefresh {
    health: Option<(NodeId, String)>,
    missile: Option<(NodeId, String)>,
    /// Counter-rotation that keeps labels upright.
    rotation: f32,
}

impl DisplayRefresh {
    fn apply(self, scene: &mut SceneGraph) {
        if let Some((node, text)) = self.health {
            if let Some(mut label) = scene.component_mut::<TextNode>(node) {
                label.set_text(text);
            }
            scene.set_position(node, Vec2::from(HEALTH_DISPLAY_OFFSET));
            scene.set_rotation(node, self.rotation);
        }
        if let Some((node, text)) = self.missile {
            if let Some(mut label) = scene.component_mut::<TextNode>(node) {
                label.set_text(text);
            }
            scene.set_rotation(node, self.rotation);
        }
    }
}

/// Build an aircraft node with its label children. The node is left detached.
pub fn spawn(scene: &mut SceneGraph, kind: AircraftType, transform: Transform) -> NodeId {
    let mut aircraft = Aircraft::new(kind, scene.tables().clone());
    let category = aircraft.category();
    let allied = aircraft.is_allied();

    let health = scene.spawn_node(
        TextNode::new(FontId::Main, aircraft.health_text()),
        Category::empty(),
        Transform::at(Vec2::from(HEALTH_DISPLAY_OFFSET)),
    );
    aircraft.health_display = Some(health);

    let missile = allied.then(|| {
        scene.spawn_node(
            TextNode::new(FontId::Main, aircraft.missile_text()),
            Category::empty(),
            Transform::at(Vec2::from(MISSILE_DISPLAY_OFFSET)),
        )
    });
    aircraft.missile_display = missile;

    let id = scene.spawn_node(aircraft, category, transform);
    scene.attach_child(id, health);
    if let Some(missile) = missile {
        scene.attach_child(id, missile);
    }
    debug!(?id, ?kind, "aircraft spawned");
    id
}

/// Per-tick update entry used by the scene graph.
pub(crate) fn update(scene: &mut SceneGraph, id: NodeId, dt: f32, commands: &mut CommandQueue) {
    let world_position = scene.world_position(id);
    let refresh = {
        let Ok((aircraft, transform)) = scene
            .world
            .query_one_mut::<(&mut Aircraft, &mut Transform)>(id)
        else {
            return;
        };
        let had_exploded = aircraft.played_explosion_sound;
        let refresh =
            aircraft.update_current(id, world_position, transform, dt, &mut scene.rng, commands);
        if !had_exploded && aircraft.played_explosion_sound {
            info!(?id, kind = ?aircraft.kind, "aircraft destroyed");
        }
        refresh
    };
    refresh.apply(scene);
}

// --- Commands produced by aircraft ---

/// Spawn one bullet volley from `shooter` under the receiving node.
pub fn fire_command(shooter: NodeId) -> Command {
    Command::new(
        Category::SCENE,
        Arc::new(move |scene: &mut SceneGraph, node: NodeId, _dt: f32| {
            create_bullets(scene, node, shooter);
        }),
    )
}

/// Spawn one missile from `shooter` under the receiving node.
pub fn missile_command(shooter: NodeId) -> Command {
    Command::new(
        Category::SCENE,
        Arc::new(move |scene: &mut SceneGraph, node: NodeId, _dt: f32| {
            if let Some(info) = ShooterInfo::read(scene, shooter) {
                create_projectile(scene, node, &info, ProjectileType::Missile, MISSILE_OFFSET);
            }
        }),
    )
}

/// Spawn a random pickup where `source` is, under the receiving node.
pub fn drop_pickup_command(source: NodeId) -> Command {
    Command::new(
        Category::SCENE,
        Arc::new(move |scene: &mut SceneGraph, node: NodeId, _dt: f32| {
            create_pickup(scene, node, source);
        }),
    )
}

/// Play `effect` at a world position through the sound node.
pub fn sound_command(effect: SoundEffect, position: Vec2) -> Command {
    Command::new(
        Category::SOUND_EFFECT,
        derived_action::<SoundNode, _>(move |sound, _dt| sound.play_sound(effect, position)),
    )
}

/// What a spawn command needs to know about the aircraft that queued it,
/// read when the command runs.
#[derive(Debug, Clone, Copy)]
struct ShooterInfo {
    position: Vec2,
    sprite_size: Vec2,
    allied: bool,
    spread_level: u32,
}

impl ShooterInfo {
    fn read(scene: &SceneGraph, shooter: NodeId) -> Option<Self> {
        let Some(aircraft) = scene.component::<Aircraft>(shooter) else {
            debug!(?shooter, "shooter gone before its projectiles spawned");
            return None;
        };
        Some(Self {
            position: scene.world_position(shooter),
            sprite_size: aircraft.sprite.size(),
            allied: aircraft.is_allied(),
            spread_level: aircraft.fire.spread_level(),
        })
    }
}

/// Spawn one volley: 1, 2 or 3 bullets depending on the spread level.
pub(crate) fn create_bullets(scene: &mut SceneGraph, parent: NodeId, shooter: NodeId) {
    let Some(info) = ShooterInfo::read(scene, shooter) else {
        return;
    };
    let kind = if info.allied {
        ProjectileType::AlliedBullet
    } else {
        ProjectileType::EnemyBullet
    };
    for offset in bullet_offsets(info.spread_level) {
        create_projectile(scene, parent, &info, kind, *offset);
    }
}

fn create_projectile(
    scene: &mut SceneGraph,
    parent: NodeId,
    info: &ShooterInfo,
    kind: ProjectileType,
    offset: Vec2,
) -> NodeId {
    let mut projectile = Projectile::new(kind, scene.tables().clone());
    let velocity = launch_velocity(projectile.max_speed(), info.allied);
    projectile.entity_mut().set_velocity(velocity);
    let category = projectile.category();

    let position = info.position + launch_offset(offset, info.sprite_size, info.allied);
    let local = scene.to_local(parent, position);
    let id = scene.spawn_node(projectile, category, Transform::at(local));
    scene.attach_child(parent, id);
    id
}

fn create_pickup(scene: &mut SceneGraph, parent: NodeId, source: NodeId) {
    if !scene.contains(source) {
        debug!(?source, "pickup source gone before drop");
        return;
    }
    let position = scene.world_position(source);
    let kind = PickupType::ALL[scene.rng.gen_range(0..PickupType::ALL.len())];

    let mut pickup = Pickup::new(kind, scene.tables().clone());
    pickup
        .entity_mut()
        .set_velocity(Vec2::from(PICKUP_DRIFT_VELOCITY));

    let local = scene.to_local(parent, position);
    let id = scene.spawn_node(pickup, Category::PICKUP, Transform::at(local));
    scene.attach_child(parent, id);
    info!(?id, ?kind, "pickup dropped");
}
