use crate::{Aabb, Mat4, NodeId, Vec3};

/// Scene node: an affine local matrix, an optional parent and the node's
/// collision boxes. Index 0 of `bounding_boxes` is the primary box.
///
/// Everything here works in the node's local frame. Queries and mutations
/// that need the parent chain live on [`SceneGraph`](crate::SceneGraph).
#[derive(Clone, Debug)]
pub struct Transform {
    local: Mat4,
    pub(crate) parent: Option<NodeId>,
    pub bounding_boxes: Vec<Aabb>,
}

impl Transform {
    /// Identity transform carrying one placeholder box.
    #[inline]
    pub fn identity() -> Self {
        Self::from_matrix(Mat4::IDENTITY)
    }

    pub fn from_matrix(local: Mat4) -> Self {
        Self {
            local,
            parent: None,
            bounding_boxes: vec![Aabb::ZERO],
        }
    }

    /// Build matrix = T * R * S with R composed pitch -> yaw -> roll.
    pub fn from_trs(translation: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        let rotation = euler_xyz(rotation.x, rotation.y, rotation.z);
        Self::from_matrix(Mat4::from_translation(translation) * rotation * Mat4::from_scale(scale))
    }

    pub fn with_boxes(mut self, boxes: Vec<Aabb>) -> Self {
        self.bounding_boxes = boxes;
        self
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Copy of the local matrix.
    #[inline]
    pub fn model_matrix(&self) -> Mat4 {
        self.local
    }

    #[inline]
    pub(crate) fn set_model_matrix(&mut self, m: Mat4) {
        self.local = m;
    }

    /// Rotate about the node's own axes (radians).
    pub fn rotate(&mut self, pitch: f32, yaw: f32, roll: f32) {
        self.local *= euler_xyz(pitch, yaw, roll);
    }

    /// Rotate about `center`, given in the parent's frame.
    pub fn rotate_around_point(&mut self, pitch: f32, yaw: f32, roll: f32, center: Vec3) {
        let pivot = Mat4::from_translation(center)
            * euler_xyz(pitch, yaw, roll)
            * Mat4::from_translation(-center);
        self.local = pivot * self.local;
    }

    /// Move along the node's own axes.
    pub fn translate(&mut self, delta: Vec3) {
        self.local *= Mat4::from_translation(delta);
    }

    /// Move along the parent's axes (world axes for a root node).
    pub fn pre_translate(&mut self, delta: Vec3) {
        self.local = Mat4::from_translation(delta) * self.local;
    }

    pub fn scale(&mut self, factor: Vec3) {
        self.local *= Mat4::from_scale(factor);
    }

    /// Translation column of the local matrix.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.local.w_axis.truncate()
    }

    #[inline]
    pub fn x_axis(&self) -> Vec3 {
        self.local.x_axis.truncate().normalize()
    }

    #[inline]
    pub fn y_axis(&self) -> Vec3 {
        self.local.y_axis.truncate().normalize()
    }

    #[inline]
    pub fn z_axis(&self) -> Vec3 {
        self.local.z_axis.truncate().normalize()
    }

    /// Left-multiplies a translation to `position`.
    ///
    /// This offsets the current translation by `position` rather than
    /// replacing it; a node sitting at the origin ends up at `position`.
    pub fn set_position(&mut self, position: Vec3) {
        self.local = Mat4::from_translation(position) * self.local;
    }

    /// Replaces the whole local matrix with a pure translation.
    /// Any rotation or scale the node carried is dropped.
    pub fn set_world_position(&mut self, position: Vec3) {
        self.local = Mat4::from_translation(position);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rx(pitch) * Ry(yaw) * Rz(roll).
#[inline]
pub fn euler_xyz(pitch: f32, yaw: f32, roll: f32) -> Mat4 {
    Mat4::from_rotation_x(pitch) * Mat4::from_rotation_y(yaw) * Mat4::from_rotation_z(roll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    #[test]
    fn identity_transform_is_identity_matrix() {
        let t = Transform::identity();
        assert_eq!(t.model_matrix(), Mat4::IDENTITY);
        assert_eq!(t.bounding_boxes, vec![Aabb::ZERO]);
    }

    #[test]
    fn from_trs_matches_step_by_step_build() {
        let (pitch, yaw, roll) = (0.4, -1.1, 0.25);
        let built = Transform::from_trs(
            vec3(1.0, -2.0, 3.0),
            vec3(pitch, yaw, roll),
            vec3(2.0, 1.0, 0.5),
        );

        let mut stepped = Transform::identity();
        stepped.translate(vec3(1.0, -2.0, 3.0));
        stepped.rotate(pitch, yaw, roll);
        stepped.scale(vec3(2.0, 1.0, 0.5));
        assert!(built.model_matrix().abs_diff_eq(stepped.model_matrix(), EPS));

        // pitch is applied outermost: swapping the order gives another matrix
        let swapped =
            Mat4::from_rotation_z(roll) * Mat4::from_rotation_y(yaw) * Mat4::from_rotation_x(pitch);
        assert!(!euler_xyz(pitch, yaw, roll).abs_diff_eq(swapped, 1e-3));
    }

    #[test]
    fn translate_follows_rotated_axes() {
        let mut t = Transform::identity();
        t.rotate(0.0, FRAC_PI_2, 0.0);
        t.translate(vec3(1.0, 0.0, 0.0));
        assert!(t.position().abs_diff_eq(vec3(0.0, 0.0, -1.0), EPS));
    }

    #[test]
    fn pre_translate_ignores_rotation() {
        let mut t = Transform::identity();
        t.rotate(0.0, FRAC_PI_2, 0.0);
        t.pre_translate(vec3(1.0, 0.0, 0.0));
        assert!(t.position().abs_diff_eq(vec3(1.0, 0.0, 0.0), EPS));
        // orientation is untouched by the pre-translation
        assert!(t.x_axis().abs_diff_eq(vec3(0.0, 0.0, -1.0), EPS));
    }

    #[test]
    fn rotate_around_point_swings_position() {
        let mut t = Transform::from_matrix(Mat4::from_translation(vec3(0.0, 0.0, 1.0)));
        t.rotate_around_point(0.0, FRAC_PI_2, 0.0, vec3(0.0, 0.0, 2.0));
        // (0,0,1) around (0,0,2) by +90 deg yaw lands on (-1,0,2)
        assert!(t.position().abs_diff_eq(vec3(-1.0, 0.0, 2.0), EPS));
    }

    #[test]
    fn axes_are_normalized() {
        let mut t = Transform::identity();
        t.scale(vec3(3.0, 4.0, 5.0));
        assert!(t.x_axis().abs_diff_eq(Vec3::X, EPS));
        assert!(t.y_axis().abs_diff_eq(Vec3::Y, EPS));
        assert!(t.z_axis().abs_diff_eq(Vec3::Z, EPS));
    }

    #[test]
    fn set_position_composes_with_existing_translation() {
        let mut t = Transform::from_matrix(Mat4::from_translation(vec3(1.0, 0.0, 0.0)));
        t.rotate(0.0, FRAC_PI_2, 0.0);
        t.set_position(vec3(0.0, 2.0, 0.0));
        assert!(t.position().abs_diff_eq(vec3(1.0, 2.0, 0.0), EPS));
        assert!(t.x_axis().abs_diff_eq(vec3(0.0, 0.0, -1.0), EPS));
    }

    #[test]
    fn set_world_position_discards_orientation() {
        let mut t = Transform::identity();
        t.rotate(0.3, 0.2, 0.1);
        t.scale(Vec3::splat(2.0));
        t.set_world_position(vec3(4.0, 5.0, 6.0));
        assert_eq!(t.model_matrix(), Mat4::from_translation(vec3(4.0, 5.0, 6.0)));
    }

    #[test]
    fn operations_keep_matrix_affine() {
        let mut t = Transform::identity();
        t.rotate(0.4, -1.1, 0.7);
        t.translate(vec3(1.0, 2.0, 3.0));
        t.scale(vec3(0.5, 2.0, 1.5));
        t.pre_translate(vec3(-3.0, 0.0, 1.0));
        t.rotate_around_point(0.2, 0.0, 0.3, vec3(1.0, 1.0, 1.0));
        let row3 = t.model_matrix().row(3);
        assert!(row3.abs_diff_eq(crate::Vec4::new(0.0, 0.0, 0.0, 1.0), EPS));
    }
}
