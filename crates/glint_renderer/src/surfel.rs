//! Surface interaction record produced by ray intersection.

use crate::primitive::GeometricPrimitive;
use glint_core::Material;
use glint_math::Vec3;

/// Record of a ray-surface contact.
///
/// Shapes fill in the geometry; only [`GeometricPrimitive::intersect`] sets
/// `primitive`. The borrow ties the record to the scene it came from.
#[derive(Clone, Copy, Debug)]
pub struct Surfel<'a> {
    /// Contact point
    pub p: Vec3,
    /// Unit surface normal
    pub n: Vec3,
    /// Unit outgoing direction (negated ray direction)
    pub wo: Vec3,
    /// Ray parameter of the contact
    pub time: f32,
    /// Primitive that owns the surface
    pub primitive: Option<&'a GeometricPrimitive>,
}

impl<'a> Surfel<'a> {
    /// Create a record; `n` and `wo` are normalized here.
    pub fn new(p: Vec3, n: Vec3, wo: Vec3, time: f32) -> Self {
        Self {
            p,
            n: n.normalize_or_zero(),
            wo: wo.normalize_or_zero(),
            time,
            primitive: None,
        }
    }

    /// Material of the owning primitive, if the record has been stamped.
    pub fn material(&self) -> Option<&'a Material> {
        self.primitive.map(|prim| prim.material())
    }

    /// Keep whichever record is closer; `current` wins ties.
    pub fn closest(current: Option<Self>, candidate: Option<Self>) -> Option<Self> {
        match (current, candidate) {
            (Some(a), Some(b)) => Some(if b.time < a.time { b } else { a }),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes() {
        let s = Surfel::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, 0.0, -2.0), 1.0);
        assert_eq!(s.n, Vec3::Y);
        assert_eq!(s.wo, -Vec3::Z);
        assert!(s.primitive.is_none());
        assert!(s.material().is_none());
    }

    #[test]
    fn test_closest_keeps_smaller_time() {
        let near = Surfel::new(Vec3::ZERO, Vec3::Y, Vec3::Y, 1.0);
        let far = Surfel::new(Vec3::ONE, Vec3::Y, Vec3::Y, 2.0);

        assert_eq!(Surfel::closest(Some(far), Some(near)).unwrap().time, 1.0);
        assert_eq!(Surfel::closest(Some(near), Some(far)).unwrap().time, 1.0);
        assert_eq!(Surfel::closest(None, Some(far)).unwrap().time, 2.0);
        assert!(Surfel::closest(None, None).is_none());
    }
}
