//! Core types: math re-exports, scene graph, collision, orbit camera.

pub use glam::{Mat4, Quat, Vec3, Vec4, vec3};

pub mod aabb;
pub mod camera;
pub mod collision;
pub mod error;
pub mod scene;
pub mod transform;

pub use aabb::{Aabb, BoxExtent, Correction, DEFAULT_NUDGE};
pub use camera::{Lens, OrbitCamera, OrbitLimits};
pub use collision::CollisionResolver;
pub use error::{CoreError, CoreResult};
pub use scene::{NodeId, SceneGraph};
pub use transform::Transform;
