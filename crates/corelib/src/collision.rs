//! Per-frame collision pass: keep a moving node out of static obstacles.

use crate::aabb::{Aabb, BoxExtent, Correction, DEFAULT_NUDGE};
use crate::scene::{NodeId, SceneGraph};
use crate::CoreResult;

/// Applies fixed-size nudges to a mover that overlaps obstacle boxes.
///
/// One pass per frame: obstacles are visited in the given order, each box
/// of each obstacle once, and a nudge is applied as soon as it is found.
/// The mover's box is re-derived after every nudge, so later tests see the
/// corrected position, but earlier obstacles are not revisited until the
/// next frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionResolver {
    pub nudge: f32,
}

impl CollisionResolver {
    pub fn new(nudge: f32) -> Self {
        Self { nudge }
    }

    /// Rebuild the mover's primary box from its world position.
    pub fn refresh_box(
        graph: &mut SceneGraph,
        mover: NodeId,
        extent: BoxExtent,
    ) -> CoreResult<Aabb> {
        let b = Aabb::around(graph.world_position(mover), extent)?;
        graph.set_primary_box(mover, b);
        Ok(b)
    }

    /// Run the pass and return the corrections that were applied, in order.
    pub fn resolve(
        &self,
        graph: &mut SceneGraph,
        mover: NodeId,
        extent: BoxExtent,
        obstacles: &[NodeId],
    ) -> CoreResult<Vec<Correction>> {
        let mut applied = Vec::new();
        let mut mover_box = Self::refresh_box(graph, mover, extent)?;

        for &obstacle in obstacles {
            for i in 0..graph[obstacle].bounding_boxes.len() {
                let other = graph[obstacle].bounding_boxes[i];
                if !mover_box.collides_with(&other) {
                    continue;
                }
                let Some(axis) = mover_box.axis_to_correct(&other) else {
                    continue;
                };
                graph[mover].pre_translate(axis.offset(self.nudge));
                log::debug!("collision {mover:?} vs {obstacle:?}[{i}]: nudged {axis:?}");
                applied.push(axis);
                mover_box = Self::refresh_box(graph, mover, extent)?;
            }
        }
        Ok(applied)
    }
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new(DEFAULT_NUDGE)
    }
}
