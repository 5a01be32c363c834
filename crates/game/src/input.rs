//! Collaborator seams: the window layer feeds input in, a renderer takes
//! world matrices out. Neither is implemented here.

use std::collections::HashSet;

use corelib::{Mat4, NodeId};

/// Keys the game reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    I,
    J,
    K,
    L,
    U,
    O,
    T,
    Space,
    RightShift,
}

/// Per-frame key state query.
pub trait InputSource {
    fn is_down(&self, key: Key) -> bool;
}

/// Set of currently held keys.
#[derive(Clone, Debug, Default)]
pub struct KeyState {
    held: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }
}

impl<const N: usize> From<[Key; N]> for KeyState {
    fn from(keys: [Key; N]) -> Self {
        Self {
            held: keys.into_iter().collect(),
        }
    }
}

impl InputSource for KeyState {
    fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

/// Receives what to draw for one frame.
pub trait RenderSink {
    /// Called once per frame before any draw.
    fn begin(&mut self, view: Mat4, proj: Mat4);

    fn draw(&mut self, node: NodeId, world: Mat4);
}
