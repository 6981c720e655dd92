//! Sprites, plain layers, and static sprite nodes.

use skyforce_core::enums::TextureId;
use skyforce_core::types::{FloatRect, IntRect, Vec2};

use crate::scene::{NodeKind, SceneComponent, Visual};

/// A textured quad centred on its node's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub texture: TextureId,
    pub rect: IntRect,
}

impl Sprite {
    pub fn new(texture: TextureId, rect: IntRect) -> Self {
        Self { texture, rect }
    }

    pub fn size(&self) -> Vec2 {
        self.rect.size()
    }

    /// Bounds in node-local coordinates.
    pub fn local_bounds(&self) -> FloatRect {
        FloatRect::centered(Vec2::ZERO, self.size())
    }

    pub fn visual(&self) -> Visual {
        Visual::Sprite {
            texture: self.texture,
            rect: self.rect,
        }
    }
}

/// Grouping node with no content of its own (scene root, layers).
#[derive(Debug, Clone, Copy, Default)]
pub struct Layer;

impl SceneComponent for Layer {
    const KIND: NodeKind = NodeKind::Layer;
}

/// A static sprite, e.g. the scrolling background.
#[derive(Debug, Clone, Copy)]
pub struct SpriteNode {
    pub sprite: Sprite,
}

impl SceneComponent for SpriteNode {
    const KIND: NodeKind = NodeKind::Sprite;
}
