//! Scene graph backed by a hecs world.
//!
//! Every node is a hecs entity carrying a `SceneNode` (tree links, category,
//! kind tag), a local `Transform`, and exactly one kind component
//! (`Aircraft`, `Projectile`, `TextNode`, ...). Node ids are generational,
//! so a command that captured the id of a node removed in the meantime
//! simply fails to find it instead of touching freed state.

use std::sync::Arc;

use glam::{Affine2, Vec2};
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use skyforce_core::enums::{FontId, TextureId};
use skyforce_core::events::SoundEvent;
use skyforce_core::types::{FloatRect, IntRect};
use skyforce_core::{Category, DataTables};

use crate::command::{Command, CommandQueue};
use crate::entity::Simulated;
use crate::nodes::aircraft::{self, Aircraft};
use crate::nodes::pickup::Pickup;
use crate::nodes::projectile::{self, Projectile};
use crate::nodes::sound::SoundNode;
use crate::nodes::sprite::{Layer, SpriteNode};
use crate::nodes::text::TextNode;

/// Stable handle to a scene node.
pub type NodeId = hecs::Entity;

/// Kind tag stored on every node; mirrors the node's kind component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Layer,
    Sprite,
    Aircraft,
    Projectile,
    Pickup,
    Text,
    Sound,
}

/// A component that makes a node of a particular kind.
pub trait SceneComponent: hecs::Component {
    const KIND: NodeKind;
}

/// Tree links and routing data for one node.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub category: Category,
    pub kind: NodeKind,
}

/// Local transform relative to the parent node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    /// Degrees, clockwise on screen (y points down).
    pub rotation: f32,
}

impl Transform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
        }
    }

    pub fn to_affine(&self) -> Affine2 {
        Affine2::from_angle_translation(self.rotation.to_radians(), self.position)
    }
}

/// What a node contributes to the frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    Sprite {
        texture: TextureId,
        rect: IntRect,
    },
    Text {
        font: FontId,
        text: String,
    },
}

/// One entry of the draw list handed to the external renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub node: NodeId,
    pub transform: Affine2,
    pub visual: Visual,
}

/// Owner of every node, the shared data tables, and the simulation RNG.
pub struct SceneGraph {
    pub(crate) world: World,
    pub(crate) rng: ChaCha8Rng,
    root: NodeId,
    tables: Arc<DataTables>,
}

impl SceneGraph {
    pub fn new(tables: Arc<DataTables>, seed: u64) -> Self {
        let mut world = World::new();
        let root = world.spawn((
            SceneNode {
                parent: None,
                children: Vec::new(),
                category: Category::empty(),
                kind: NodeKind::Layer,
            },
            Transform::default(),
            Layer,
        ));
        Self {
            world,
            rng: ChaCha8Rng::seed_from_u64(seed),
            root,
            tables,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn tables(&self) -> &Arc<DataTables> {
        &self.tables
    }

    /// Read-only access to the underlying world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.world.contains(id)
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.world.len() as usize
    }

    // --- Construction ---

    /// Spawn a detached node; attach it with `attach_child`.
    pub fn spawn_node<T: SceneComponent>(
        &mut self,
        component: T,
        category: Category,
        transform: Transform,
    ) -> NodeId {
        self.world.spawn((
            SceneNode {
                parent: None,
                children: Vec::new(),
                category,
                kind: T::KIND,
            },
            transform,
            component,
        ))
    }

    /// Make `child` the last child of `parent`, detaching it from any previous parent.
    pub fn attach_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) || parent == child {
            return;
        }
        let creates_cycle = self.is_ancestor(child, parent);
        debug_assert!(!creates_cycle, "cannot attach a node under its own descendant");
        if creates_cycle {
            return;
        }
        if let Some(old_parent) = self.parent(child) {
            self.detach_child(old_parent, child);
        }
        if let Ok(mut node) = self.world.get::<&mut SceneNode>(parent) {
            node.children.push(child);
        }
        if let Ok(mut node) = self.world.get::<&mut SceneNode>(child) {
            node.parent = Some(parent);
        }
    }

    /// Unlink `child` from `parent`. Returns false if it was not a child.
    pub fn detach_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let removed = match self.world.get::<&mut SceneNode>(parent) {
            Ok(mut node) => {
                let before = node.children.len();
                node.children.retain(|c| *c != child);
                node.children.len() != before
            }
            Err(_) => false,
        };
        if removed {
            if let Ok(mut node) = self.world.get::<&mut SceneNode>(child) {
                node.parent = None;
            }
        }
        removed
    }

    /// Detach a node and despawn it together with its whole subtree.
    pub fn despawn_subtree(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            self.detach_child(parent, id);
        }
        for node in self.subtree(id) {
            let _ = self.world.despawn(node);
        }
    }

    // --- Queries ---

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.world.get::<&SceneNode>(id).ok().and_then(|n| n.parent)
    }

    /// True if `ancestor` lies on the parent chain of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.world
            .get::<&SceneNode>(id)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn category(&self, id: NodeId) -> Category {
        self.world
            .get::<&SceneNode>(id)
            .map(|n| n.category)
            .unwrap_or_else(|_| Category::empty())
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.world.get::<&SceneNode>(id).ok().map(|n| n.kind)
    }

    /// `id` followed by all of its descendants, depth first, parents before children.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            let Ok(scene_node) = self.world.get::<&SceneNode>(node) else {
                continue;
            };
            order.push(node);
            stack.extend(scene_node.children.iter().rev().copied());
        }
        order
    }

    /// Shared access to a node's kind component, checked against its kind tag.
    pub fn component<T: SceneComponent>(&self, id: NodeId) -> Option<hecs::Ref<'_, T>> {
        if self.kind(id)? != T::KIND {
            return None;
        }
        self.world.get::<&T>(id).ok()
    }

    /// Exclusive access to a node's kind component, checked against its kind tag.
    pub fn component_mut<T: SceneComponent>(&self, id: NodeId) -> Option<hecs::RefMut<'_, T>> {
        if self.kind(id)? != T::KIND {
            return None;
        }
        self.world.get::<&mut T>(id).ok()
    }

    // --- Transforms ---

    pub fn transform(&self, id: NodeId) -> Option<Transform> {
        self.world.get::<&Transform>(id).ok().map(|t| *t)
    }

    pub fn set_position(&mut self, id: NodeId, position: Vec2) {
        if let Ok(mut t) = self.world.get::<&mut Transform>(id) {
            t.position = position;
        }
    }

    pub fn set_rotation(&mut self, id: NodeId, degrees: f32) {
        if let Ok(mut t) = self.world.get::<&mut Transform>(id) {
            t.rotation = degrees;
        }
    }

    /// Combined transform from node-local to world coordinates.
    pub fn world_transform(&self, id: NodeId) -> Affine2 {
        let mut transform = Affine2::IDENTITY;
        let mut current = Some(id);
        while let Some(node) = current {
            if let Ok(local) = self.world.get::<&Transform>(node) {
                transform = local.to_affine() * transform;
            }
            current = self.parent(node);
        }
        transform
    }

    pub fn world_position(&self, id: NodeId) -> Vec2 {
        self.world_transform(id).translation
    }

    /// Convert a world-space point into the local frame of `id`.
    pub fn to_local(&self, id: NodeId, point: Vec2) -> Vec2 {
        self.world_transform(id).inverse().transform_point2(point)
    }

    /// World-space bounds of a node's sprite, if it has one.
    pub fn bounding_rect(&self, id: NodeId) -> Option<FloatRect> {
        let local = match self.kind(id)? {
            NodeKind::Aircraft => self.component::<Aircraft>(id)?.sprite().local_bounds(),
            NodeKind::Projectile => self.component::<Projectile>(id)?.sprite().local_bounds(),
            NodeKind::Pickup => self.component::<Pickup>(id)?.sprite().local_bounds(),
            NodeKind::Sprite => self.component::<SpriteNode>(id)?.sprite.local_bounds(),
            _ => return None,
        };
        let transform = self.world_transform(id);
        let corners = [
            Vec2::new(local.left, local.top),
            Vec2::new(local.left + local.width, local.top),
            Vec2::new(local.left, local.top + local.height),
            Vec2::new(local.left + local.width, local.top + local.height),
        ]
        .map(|c| transform.transform_point2(c));
        Some(FloatRect::bounding(&corners))
    }

    // --- Lifecycle ---

    /// Take an entity node out of play. Non-entity nodes are unaffected.
    pub fn remove(&mut self, id: NodeId) {
        match self.kind(id) {
            Some(NodeKind::Aircraft) => {
                if let Some(mut a) = self.component_mut::<Aircraft>(id) {
                    a.remove();
                }
            }
            Some(NodeKind::Projectile) => {
                if let Some(mut p) = self.component_mut::<Projectile>(id) {
                    p.remove();
                }
            }
            Some(NodeKind::Pickup) => {
                if let Some(mut p) = self.component_mut::<Pickup>(id) {
                    p.remove();
                }
            }
            _ => {}
        }
    }

    pub fn is_marked_for_removal(&self, id: NodeId) -> bool {
        match self.kind(id) {
            Some(NodeKind::Aircraft) => self
                .component::<Aircraft>(id)
                .is_some_and(|a| a.is_marked_for_removal()),
            Some(NodeKind::Projectile) => self
                .component::<Projectile>(id)
                .is_some_and(|p| p.is_marked_for_removal()),
            Some(NodeKind::Pickup) => self
                .component::<Pickup>(id)
                .is_some_and(|p| p.is_marked_for_removal()),
            _ => false,
        }
    }

    /// Despawn every node marked for removal, along with its children.
    pub fn remove_wrecks(&mut self) -> usize {
        let wrecks: Vec<NodeId> = self
            .subtree(self.root)
            .into_iter()
            .filter(|id| self.is_marked_for_removal(*id))
            .collect();
        let mut removed = 0;
        for id in wrecks {
            if self.contains(id) {
                self.despawn_subtree(id);
                removed += 1;
            }
        }
        if removed > 0 {
            trace!(removed, "wrecks removed");
        }
        removed
    }

    // --- Per-tick passes ---

    /// Run every node's per-tick update in tree order.
    ///
    /// Nodes only push commands here; none of them changes the tree.
    pub fn update(&mut self, dt: f32, commands: &mut CommandQueue) {
        for id in self.subtree(self.root) {
            match self.kind(id) {
                Some(NodeKind::Aircraft) => aircraft::update(self, id, dt, commands),
                Some(NodeKind::Projectile) => projectile::update(self, id, dt),
                Some(NodeKind::Pickup) => {
                    if let Ok((pickup, transform)) =
                        self.world.query_one_mut::<(&Pickup, &mut Transform)>(id)
                    {
                        pickup.entity().update(dt, transform);
                    }
                }
                _ => {}
            }
        }
    }

    /// Run `command` on every node whose category intersects the command's.
    ///
    /// Matching nodes are collected before any action runs, so nodes the
    /// command itself attaches are not visited in the same pass. A command
    /// that matches nothing is dropped.
    pub fn on_command(&mut self, command: &Command, dt: f32) {
        let targets: Vec<NodeId> = self
            .subtree(self.root)
            .into_iter()
            .filter(|id| command.category.matches(self.category(*id)))
            .collect();
        if targets.is_empty() {
            trace!(category = ?command.category, "command matched no node");
            return;
        }
        for id in targets {
            if self.contains(id) {
                (command.action)(self, id, dt);
            }
        }
    }

    /// Drain `commands`, dispatching each against the whole tree.
    pub fn dispatch_all(&mut self, commands: &mut CommandQueue, dt: f32) -> usize {
        let mut dispatched = 0;
        while let Some(command) = commands.pop() {
            self.on_command(&command, dt);
            dispatched += 1;
        }
        dispatched
    }

    /// Collect sounds requested through sound nodes since the last call.
    pub fn drain_sounds(&mut self) -> Vec<SoundEvent> {
        let mut events = Vec::new();
        for (_id, sound) in self.world.query_mut::<&mut SoundNode>() {
            events.append(&mut sound.pending);
        }
        events
    }

    /// Build the draw list: each node before its children.
    pub fn draw(&self) -> Vec<DrawItem> {
        let mut items = Vec::new();
        for id in self.subtree(self.root) {
            let visual = match self.kind(id) {
                Some(NodeKind::Aircraft) => self.component::<Aircraft>(id).map(|a| a.visual()),
                Some(NodeKind::Projectile) => {
                    self.component::<Projectile>(id).map(|p| p.sprite().visual())
                }
                Some(NodeKind::Pickup) => self.component::<Pickup>(id).map(|p| p.sprite().visual()),
                Some(NodeKind::Sprite) => {
                    self.component::<SpriteNode>(id).map(|s| s.sprite.visual())
                }
                Some(NodeKind::Text) => self
                    .component::<TextNode>(id)
                    .filter(|t| !t.text().is_empty())
                    .map(|t| Visual::Text {
                        font: t.font(),
                        text: t.text().to_string(),
                    }),
                _ => None,
            };
            if let Some(visual) = visual {
                items.push(DrawItem {
                    node: id,
                    transform: self.world_transform(id),
                    visual,
                });
            }
        }
        trace!(items = items.len(), "draw list built");
        items
    }
}
