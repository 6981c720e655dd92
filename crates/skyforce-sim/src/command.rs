//! Deferred commands routed through the scene graph by category.
//!
//! Producers push commands while the tree is being updated; the owner of the
//! tree drains the queue afterwards and dispatches each command to every node
//! whose category intersects the command's category. Structural changes to
//! the tree (spawning projectiles, pickups) therefore only ever happen during
//! the dispatch pass, never while the update pass is walking the tree.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use skyforce_core::Category;

use crate::scene::{NodeId, SceneComponent, SceneGraph};

/// Work performed on one matching node: the graph, the node, and the tick delta.
pub type Action = Arc<dyn Fn(&mut SceneGraph, NodeId, f32) + Send + Sync>;

/// A category mask plus the action to run on every node it reaches.
#[derive(Clone)]
pub struct Command {
    pub category: Category,
    pub action: Action,
}

impl Command {
    pub fn new(category: Category, action: Action) -> Self {
        Self { category, action }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// Adapt an action on a concrete node type into a uniform `Action`.
///
/// Categories are a coarse filter: a node can match the category mask and
/// still be a different kind of node. The wrapper checks the node's kind
/// and component before invoking `f`, and skips nodes that don't match.
pub fn derived_action<T, F>(f: F) -> Action
where
    T: SceneComponent,
    F: Fn(&mut T, f32) + Send + Sync + 'static,
{
    Arc::new(move |scene: &mut SceneGraph, node: NodeId, dt: f32| {
        match scene.component_mut::<T>(node) {
            Some(mut target) => f(&mut target, dt),
            None => trace!(?node, kind = ?T::KIND, "command target type mismatch; skipped"),
        }
    })
}

/// FIFO of commands produced during one tick.
#[derive(Debug, Default)]
pub struct CommandQueue {
    queue: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    /// Remove and return the oldest command.
    pub fn pop(&mut self) -> Option<Command> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Categories of the pending commands, oldest first.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.queue.iter().map(|c| c.category)
    }
}
