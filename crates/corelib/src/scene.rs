//! Scene graph arena: nodes stored densely, parents referenced by handle.

use std::ops::{Index, IndexMut};

use crate::transform::Transform;
use crate::{Aabb, CoreError, CoreResult, Mat4, Quat, Vec3};

/// Handle of a node inside the [`SceneGraph`] that spawned it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Owns every node of a scene. Nodes live as long as the graph; there is no
/// despawn, so a handle obtained from this graph stays valid.
///
/// Parent links are checked on insertion so the chain from any node always
/// terminates at a root.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Transform>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root node.
    pub fn spawn(&mut self, mut t: Transform) -> NodeId {
        t.parent = None;
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(t);
        id
    }

    /// Add a node already attached under `parent`.
    pub fn spawn_child(&mut self, parent: NodeId, t: Transform) -> CoreResult<NodeId> {
        let id = self.spawn(t);
        self.set_parent(id, Some(parent))?;
        Ok(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Transform)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, t)| (NodeId(i as u32), t))
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self[id].parent
    }

    /// True if `ancestor` appears on the parent chain of `id` (or is `id`).
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self[n].parent;
        }
        false
    }

    /// Re-link `child` under `parent`. The child's local matrix is kept, so
    /// its world placement changes with the new parent.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> CoreResult<()> {
        if let Some(p) = parent {
            if self.is_ancestor(child, p) {
                return Err(CoreError::CycleDetected { child, parent: p });
            }
        }
        self[child].parent = parent;
        Ok(())
    }

    /// Local matrices composed from the root down to `id`.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = &self[id];
        let mut world = node.model_matrix();
        let mut cur = node.parent;
        while let Some(p) = cur {
            let parent = &self[p];
            world = parent.model_matrix() * world;
            cur = parent.parent;
        }
        world
    }

    #[inline]
    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).w_axis.truncate()
    }

    #[inline]
    pub fn world_x_axis(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).x_axis.truncate().normalize()
    }

    #[inline]
    pub fn world_y_axis(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).y_axis.truncate().normalize()
    }

    #[inline]
    pub fn world_z_axis(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).z_axis.truncate().normalize()
    }

    /// Store `m` as the local matrix; under a parent the parent's world
    /// matrix is multiplied in from the left.
    pub fn set_world_matrix(&mut self, id: NodeId, m: Mat4) {
        let local = match self[id].parent {
            Some(p) => self.world_matrix(p) * m,
            None => m,
        };
        self[id].set_model_matrix(local);
    }

    /// Turn the node so its world -Z points at `target`.
    ///
    /// The shortest-arc rotation from the current forward to the target
    /// direction is post-multiplied in the node's own frame, so the node keeps
    /// its position and existing orientation composes with the turn. Fails
    /// without touching the node if the target sits on the node's position.
    pub fn look_at(&mut self, id: NodeId, target: Vec3) -> CoreResult<()> {
        let world = self.world_matrix(id);
        let position = world.w_axis.truncate();
        let forward = (-world.z_axis.truncate()).normalize_or_zero();
        let to_target = (target - position).normalize_or_zero();
        if forward == Vec3::ZERO || to_target == Vec3::ZERO {
            return Err(CoreError::DegenerateDirection);
        }
        // world-space turn about the node's own position
        let turn = Mat4::from_translation(position)
            * Mat4::from_quat(Quat::from_rotation_arc(forward, to_target))
            * Mat4::from_translation(-position);
        let local = self[id].model_matrix() * (world.inverse() * turn * world);
        self[id].set_model_matrix(local);
        Ok(())
    }

    /// Box at index 0 of the node.
    pub fn primary_box(&self, id: NodeId) -> CoreResult<Aabb> {
        self[id]
            .bounding_boxes
            .first()
            .copied()
            .ok_or(CoreError::MissingBoundingBox(id))
    }

    /// Replace (or create) the primary box of the node.
    pub fn set_primary_box(&mut self, id: NodeId, b: Aabb) {
        let boxes = &mut self[id].bounding_boxes;
        match boxes.first_mut() {
            Some(first) => *first = b,
            None => boxes.push(b),
        }
    }

    /// Primary box of `a` against any box of `b`.
    pub fn overlaps(&self, a: NodeId, b: NodeId) -> CoreResult<bool> {
        let mover = self.primary_box(a)?;
        Ok(self[b].bounding_boxes.iter().any(|o| mover.collides_with(o)))
    }
}

impl Index<NodeId> for SceneGraph {
    type Output = Transform;

    /// Panics if `id` was not produced by this graph.
    #[inline]
    fn index(&self, id: NodeId) -> &Transform {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for SceneGraph {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id.index()]
    }
}
