//! Errors raised by the scene graph and the collision primitives.

use thiserror::Error;

use crate::{NodeId, Vec3};

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("parenting {child:?} under {parent:?} would create a cycle")]
    CycleDetected { child: NodeId, parent: NodeId },

    #[error("invalid bounding box: min {min} exceeds max {max}")]
    InvalidBounds { min: Vec3, max: Vec3 },

    #[error("look-at target coincides with the node position")]
    DegenerateDirection,

    #[error("node {0:?} has no bounding box")]
    MissingBoundingBox(NodeId),
}

pub type CoreResult<T> = Result<T, CoreError>;
