// Affine transform with a cached inverse.
//
// Wraps a glam::Mat4 pair. Points use `m`, normals use the transpose of
// `m_inv`, rays transform origin and direction with `m`.

use crate::{Bounds3f, Mat4, Ray, Vec3};

/// Affine 4x4 transform carrying its inverse.
///
/// `m_inv` is derived once at construction and never recomputed, so
/// `m * m_inv == I` holds up to floating-point tolerance for the lifetime of
/// the value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    m: Mat4,
    m_inv: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Build from a matrix; the inverse is computed here.
    pub fn new(m: Mat4) -> Self {
        Self {
            m,
            m_inv: m.inverse(),
        }
    }

    /// Build from a matrix and a known inverse.
    pub fn from_parts(m: Mat4, m_inv: Mat4) -> Self {
        Self { m, m_inv }
    }

    pub fn identity() -> Self {
        Self::from_parts(Mat4::IDENTITY, Mat4::IDENTITY)
    }

    pub fn translate(delta: Vec3) -> Self {
        Self::from_parts(Mat4::from_translation(delta), Mat4::from_translation(-delta))
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        Self::from_parts(
            Mat4::from_scale(Vec3::new(x, y, z)),
            Mat4::from_scale(Vec3::new(1.0 / x, 1.0 / y, 1.0 / z)),
        )
    }

    /// Rotation of `degrees` around an arbitrary axis.
    pub fn rotate(degrees: f32, axis: Vec3) -> Self {
        let m = Mat4::from_axis_angle(axis.normalize(), degrees.to_radians());
        Self::from_parts(m, m.transpose())
    }

    pub fn rotate_x(degrees: f32) -> Self {
        let m = Mat4::from_rotation_x(degrees.to_radians());
        Self::from_parts(m, m.transpose())
    }

    pub fn rotate_y(degrees: f32) -> Self {
        let m = Mat4::from_rotation_y(degrees.to_radians());
        Self::from_parts(m, m.transpose())
    }

    pub fn rotate_z(degrees: f32) -> Self {
        let m = Mat4::from_rotation_z(degrees.to_radians());
        Self::from_parts(m, m.transpose())
    }

    /// The inverse transform. No matrix inversion happens here.
    pub fn inverse(&self) -> Self {
        Self::from_parts(self.m_inv, self.m)
    }

    /// `self ∘ other`: applies `other` first, then `self`.
    pub fn compose(&self, other: &Transform) -> Self {
        Self::from_parts(self.m * other.m, other.m_inv * self.m_inv)
    }

    pub fn is_identity(&self) -> bool {
        self.m.abs_diff_eq(Mat4::IDENTITY, 1e-6)
    }

    pub fn matrix(&self) -> &Mat4 {
        &self.m
    }

    pub fn inverse_matrix(&self) -> &Mat4 {
        &self.m_inv
    }

    /// Transform a point (w = 1).
    #[inline]
    pub fn apply_p(&self, p: Vec3) -> Vec3 {
        self.m.transform_point3(p)
    }

    /// Transform a vector (w = 0); translation does not apply.
    #[inline]
    pub fn apply_v(&self, v: Vec3) -> Vec3 {
        self.m.transform_vector3(v)
    }

    /// Transform a normal with the inverse-transpose rule. Not renormalized.
    #[inline]
    pub fn apply_n(&self, n: Vec3) -> Vec3 {
        self.m_inv.transpose().transform_vector3(n)
    }

    /// Transform origin and direction; interval and time are kept.
    pub fn apply_r(&self, r: &Ray) -> Ray {
        Ray {
            origin: self.apply_p(r.origin),
            direction: self.apply_v(r.direction),
            ..*r
        }
    }

    /// Box around the eight transformed corners.
    pub fn apply_b(&self, b: &Bounds3f) -> Bounds3f {
        if b.is_empty() {
            return *b;
        }
        let corners = b.corners().map(|c| self.apply_p(c));
        Bounds3f::create_box(&corners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    fn composite() -> Transform {
        Transform::translate(Vec3::new(3.0, -2.0, 7.5))
            .compose(&Transform::rotate(37.0, Vec3::new(1.0, 2.0, -0.5)))
            .compose(&Transform::scale(2.0, 0.5, 3.0))
    }

    #[test]
    fn test_apply_p_translation() {
        let t = Transform::translate(Vec3::new(10.0, 20.0, 30.0));
        assert_eq!(t.apply_p(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(11.0, 22.0, 33.0));
    }

    #[test]
    fn test_apply_v_ignores_translation() {
        let t = Transform::translate(Vec3::new(10.0, 20.0, 30.0));
        assert_eq!(t.apply_v(Vec3::X), Vec3::X);
    }

    #[test]
    fn test_rotate_z_quarter_turn() {
        let t = Transform::rotate_z(90.0);
        assert!(approx(t.apply_v(Vec3::X), Vec3::Y));
    }

    #[test]
    fn test_matrix_times_inverse_is_identity() {
        let t = composite();
        assert!((*t.matrix() * *t.inverse_matrix()).abs_diff_eq(Mat4::IDENTITY, 1e-5));
        assert!(Transform::identity().is_identity());
        assert!(!t.is_identity());
    }

    #[test]
    fn test_point_round_trip() {
        let t = composite();
        let inv = t.inverse();
        for p in [
            Vec3::ZERO,
            Vec3::new(5.0, 3.0, 2.0),
            Vec3::new(-100.0, 0.25, 42.0),
        ] {
            assert!(approx(inv.apply_p(t.apply_p(p)), p));
        }
    }

    #[test]
    fn test_new_derives_inverse() {
        let t = Transform::new(*composite().matrix());
        let p = Vec3::new(1.0, -1.0, 0.5);
        assert!(approx(t.inverse().apply_p(t.apply_p(p)), p));
    }

    #[test]
    fn test_normal_stays_perpendicular_under_nonuniform_scale() {
        let t = Transform::scale(4.0, 1.0, 1.0);
        // Plane x = y, tangent (1,1,0), normal (1,-1,0).
        let tangent = t.apply_v(Vec3::new(1.0, 1.0, 0.0));
        let normal = t.apply_n(Vec3::new(1.0, -1.0, 0.0));
        assert!(tangent.dot(normal).abs() < 1e-5);
    }

    #[test]
    fn test_apply_r() {
        let t = Transform::translate(Vec3::new(0.0, 0.0, 5.0));
        let r = Ray::new(Vec3::ZERO, Vec3::X).with_t_max(3.0);
        let moved = t.apply_r(&r);

        assert_eq!(moved.origin, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(moved.direction, Vec3::X);
        assert_eq!(moved.t_max, 3.0);
    }

    #[test]
    fn test_apply_b_translation() {
        let t = Transform::translate(Vec3::splat(5.0));
        let b = t.apply_b(&Bounds3f::new(Vec3::ZERO, Vec3::ONE));

        assert!(approx(b.min_point, Vec3::splat(5.0)));
        assert!(approx(b.max_point, Vec3::splat(6.0)));
    }

    #[test]
    fn test_apply_b_rotation_grows_box() {
        let t = Transform::rotate_y(45.0);
        let b = t.apply_b(&Bounds3f::new(Vec3::splat(-1.0), Vec3::splat(1.0)));
        let half_diag = 2.0_f32.sqrt();

        assert!((b.max_point.x - half_diag).abs() < 1e-3);
        assert!((b.max_point.y - 1.0).abs() < 1e-3);
    }
}
