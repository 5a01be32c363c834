use crate::scene::{NodeId, SceneGraph};
use crate::{Mat4, Transform, Vec3, vec3};

/// Vertical field of view (radians), clip planes and aspect ratio of a
/// perspective camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lens {
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl Lens {
    pub fn new(fov_y: f32, near: f32, far: f32, aspect: f32) -> Self {
        Self { fov_y, near, far, aspect }
    }

    /// Right-handed projection with clip depth in [-1, 1].
    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }
}

impl Default for Lens {
    fn default() -> Self {
        Self::new(90f32.to_radians(), 0.1, 1000.0, 16.0 / 9.0)
    }
}

/// Allowed ranges for the orbit parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Degrees.
    pub min_elevation: f32,
    /// Degrees.
    pub max_elevation: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: 2.0,
            max_distance: 20.0,
            min_elevation: 2.0,
            max_elevation: 60.0,
        }
    }
}

/// Camera placed on a sphere around a tracked node, always looking at it.
///
/// The camera owns a node in the scene graph; its world matrix is rebuilt
/// from scratch by [`OrbitCamera::update_camera_position`], which has to run
/// every frame after the target has moved.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    node: NodeId,
    target: NodeId,
    distance: f32,
    elevation: f32,
    azimuth: f32,
    limits: OrbitLimits,
    pub lens: Lens,
    positioned: bool,
}

impl OrbitCamera {
    /// Spawn the camera node and start at distance 5, elevation 40, azimuth 0.
    pub fn new(graph: &mut SceneGraph, target: NodeId) -> Self {
        Self::with_limits(graph, target, OrbitLimits::default())
    }

    pub fn with_limits(graph: &mut SceneGraph, target: NodeId, limits: OrbitLimits) -> Self {
        let node = graph.spawn(Transform::identity());
        let mut cam = Self {
            node,
            target,
            distance: limits.min_distance,
            elevation: limits.min_elevation,
            azimuth: 0.0,
            limits,
            lens: Lens::default(),
            positioned: false,
        };
        cam.set_distance(5.0);
        cam.set_elevation(40.0);
        cam
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    #[inline]
    pub fn target(&self) -> NodeId {
        self.target
    }

    #[inline]
    pub fn limits(&self) -> OrbitLimits {
        self.limits
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Clamped into `[min_distance, max_distance]`.
    pub fn set_distance(&mut self, d: f32) {
        self.distance = d.clamp(self.limits.min_distance, self.limits.max_distance);
    }

    /// Degrees.
    #[inline]
    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    /// Clamped into `[min_elevation, max_elevation]` degrees.
    pub fn set_elevation(&mut self, deg: f32) {
        self.elevation = deg.clamp(self.limits.min_elevation, self.limits.max_elevation);
    }

    /// Degrees.
    #[inline]
    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    /// Wrapped into `[0, 360)` by a single add/subtract of 360, so inputs
    /// more than one turn out of range stay out of range.
    pub fn set_azimuth(&mut self, deg: f32) {
        let mut a = deg;
        if a >= 360.0 {
            a -= 360.0;
        }
        if a < 0.0 {
            a += 360.0;
        }
        self.azimuth = a;
    }

    #[inline]
    pub fn is_positioned(&self) -> bool {
        self.positioned
    }

    /// Offset from the target to the camera for the current parameters.
    pub fn spherical_offset(&self) -> Vec3 {
        let (sin_el, cos_el) = self.elevation.to_radians().sin_cos();
        let (sin_az, cos_az) = self.azimuth.to_radians().sin_cos();
        let horizontal = self.distance * cos_el;
        vec3(
            horizontal * sin_az,
            self.distance * sin_el,
            horizontal * cos_az,
        )
    }

    /// Re-derive the camera world matrix from the target's world position.
    pub fn update_camera_position(&mut self, graph: &mut SceneGraph) {
        let target = graph.world_position(self.target);
        let eye = target + self.spherical_offset();
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        graph.set_world_matrix(self.node, view.inverse());
        self.positioned = true;
    }

    /// View matrix, or `None` before the first update.
    pub fn view(&self, graph: &SceneGraph) -> Option<Mat4> {
        self.positioned
            .then(|| graph.world_matrix(self.node).inverse())
    }

    pub fn proj_view(&self, graph: &SceneGraph) -> Option<Mat4> {
        self.view(graph).map(|v| self.lens.proj() * v)
    }
}
