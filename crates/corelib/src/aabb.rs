//! Axis-aligned bounding boxes.
//!
//! Overlap is tested on all three axes, but corrections only ever move along
//! X or Z: characters walk on the ground plane and may overlap vertically.

use crate::{CoreError, CoreResult, Vec3, vec3};

/// Default length of a single correction step.
pub const DEFAULT_NUDGE: f32 = 0.1;

/// Box with `min <= max` on every axis. Zero thickness is allowed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Placeholder box collapsed onto the origin.
    pub const ZERO: Self = Self {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
    };

    pub fn new(min: Vec3, max: Vec3) -> CoreResult<Self> {
        if min.cmpgt(max).any() || min.is_nan() || max.is_nan() {
            return Err(CoreError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Box spanning `center + extent.lo ..= center + extent.hi`.
    pub fn around(center: Vec3, extent: BoxExtent) -> CoreResult<Self> {
        Self::new(center + extent.lo, center + extent.hi)
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// True unless the boxes are strictly apart on some axis.
    /// Boxes that only touch on a face still collide.
    pub fn collides_with(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y
            || self.max.z < other.min.z
            || self.min.z > other.max.z)
    }

    /// Direction in which `self` should be nudged to back out of `other`.
    ///
    /// X is checked before Z; Y is never corrected. Returns `None` when the
    /// boxes overlap on neither X nor Z.
    pub fn axis_to_correct(&self, other: &Aabb) -> Option<Correction> {
        if self.max.x > other.min.x && self.min.x < other.max.x {
            if self.max.x - other.min.x < other.max.x - self.min.x {
                Some(Correction::MinX)
            } else {
                Some(Correction::MaxX)
            }
        } else if self.max.z > other.min.z && self.min.z < other.max.z {
            if self.max.z - other.min.z < other.max.z - self.min.z {
                Some(Correction::MinZ)
            } else {
                Some(Correction::MaxZ)
            }
        } else {
            None
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Offsets from an entity's position to the corners of its box.
/// Tuned per scene rather than derived from mesh geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxExtent {
    pub lo: Vec3,
    pub hi: Vec3,
}

impl BoxExtent {
    pub const fn new(lo: Vec3, hi: Vec3) -> Self {
        Self { lo, hi }
    }

    /// Cube of half-size `h` around the position.
    pub fn cube(h: f32) -> Self {
        Self::new(Vec3::splat(-h), Vec3::splat(h))
    }
}

/// Side of the obstacle the mover is pushed towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Correction {
    MinX,
    MaxX,
    MinZ,
    MaxZ,
}

impl Correction {
    /// Translation of length `nudge` along the corrected axis.
    pub fn offset(self, nudge: f32) -> Vec3 {
        match self {
            Correction::MinX => vec3(-nudge, 0.0, 0.0),
            Correction::MaxX => vec3(nudge, 0.0, 0.0),
            Correction::MinZ => vec3(0.0, 0.0, -nudge),
            Correction::MaxZ => vec3(0.0, 0.0, nudge),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bx(min: [f32; 3], max: [f32; 3]) -> Aabb {
        Aabb::new(Vec3::from(min), Vec3::from(max)).expect("valid box")
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = Aabb::new(vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 1.0)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidBounds { .. }));
    }

    #[test]
    fn accepts_flat_wall() {
        // back wall of the garden has no thickness along Z
        let wall = Aabb::new(vec3(-4.8, 0.0, -6.0), vec3(5.1, 0.0, -6.0));
        assert!(wall.is_ok());
    }

    #[test]
    fn around_offsets_center() {
        let b = Aabb::around(
            vec3(1.0, 0.0, 1.0),
            BoxExtent::new(vec3(-1.0, 0.0, -2.0), vec3(4.0, 0.0, 2.0)),
        )
        .unwrap();
        assert_eq!(b.min(), vec3(0.0, 0.0, -1.0));
        assert_eq!(b.max(), vec3(5.0, 0.0, 3.0));
    }

    #[test]
    fn overlap_is_symmetric() {
        let boxes = [
            bx([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]),
            bx([0.5, -1.0, -1.0], [2.0, 1.0, 1.0]),
            bx([1.0, 0.0, 0.0], [3.0, 0.5, 0.5]),
            bx([5.0, 5.0, 5.0], [6.0, 6.0, 6.0]),
            bx([-4.8, 0.0, -6.0], [-4.6, 0.0, 3.0]),
            bx([-10.0, -0.1, -0.1], [10.0, 0.1, 0.1]),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.collides_with(b), b.collides_with(a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn separated_on_one_axis_never_collides() {
        let a = bx([-1.0, -5.0, -5.0], [1.0, 5.0, 5.0]);
        let b = bx([1.5, -5.0, -5.0], [3.0, 5.0, 5.0]);
        assert!(!a.collides_with(&b));

        let above = bx([-1.0, 5.5, -5.0], [1.0, 6.0, 5.0]);
        assert!(!a.collides_with(&above));
    }

    #[test]
    fn touching_faces_collide() {
        let a = bx([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = bx([1.0, 0.0, 0.0], [2.0, 1.0, 1.0]);
        assert!(a.collides_with(&b));
        // X only touches, so the correction falls through to Z
        assert_eq!(a.axis_to_correct(&b), Some(Correction::MaxZ));
    }

    #[test]
    fn x_wins_when_both_axes_overlap() {
        let a = bx([0.0, 0.0, 0.0], [2.0, 1.0, 2.0]);
        let b = bx([1.0, 0.0, 1.0], [3.0, 1.0, 3.0]);
        assert_eq!(a.axis_to_correct(&b), Some(Correction::MinX));
        assert_eq!(b.axis_to_correct(&a), Some(Correction::MaxX));
    }

    #[test]
    fn penetration_from_the_left_pushes_towards_min_x() {
        let a = bx([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]);
        let b = bx([0.5, -1.0, -1.0], [2.0, 1.0, 1.0]);
        assert!(a.collides_with(&b));
        let c = a.axis_to_correct(&b).unwrap();
        assert_eq!(c, Correction::MinX);
        assert_eq!(c.offset(DEFAULT_NUDGE), vec3(-0.1, 0.0, 0.0));
    }

    #[test]
    fn z_correction_when_x_is_disjoint() {
        let a = bx([0.0, 0.0, 2.5], [1.0, 1.0, 3.5]);
        let b = bx([2.0, 0.0, 0.0], [3.0, 1.0, 3.0]);
        assert_eq!(a.axis_to_correct(&b), Some(Correction::MaxZ));
        assert_eq!(Correction::MaxZ.offset(0.25), vec3(0.0, 0.0, 0.25));
    }

    #[test]
    fn vertical_overlap_is_not_corrected() {
        let a = bx([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = bx([3.0, 0.0, 3.0], [4.0, 1.0, 4.0]);
        assert_eq!(a.axis_to_correct(&b), None);

        // boxes stacked on Y still report a planar correction
        let high = bx([0.0, 5.0, 0.0], [1.0, 6.0, 1.0]);
        assert!(!a.collides_with(&high));
        assert!(a.axis_to_correct(&high).is_some());
    }
}
