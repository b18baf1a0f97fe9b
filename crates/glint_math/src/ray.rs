use crate::Vec3;

/// Smallest parameter accepted as a hit; keeps rays from re-hitting their origin surface.
pub const RAY_EPSILON: f32 = 1e-4;

/// A ray in 3D space with origin, direction, valid parameter range and time.
///
/// A ray is consumed by value by every intersection routine. Shapes accept
/// hits with `t_min < t < t_max`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub t_min: f32,
    pub t_max: f32,
    pub time: f32,
}

impl Ray {
    /// Create a new ray with `t_min = RAY_EPSILON` and no upper bound.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            t_min: RAY_EPSILON,
            t_max: f32::INFINITY,
            time: 0.0,
        }
    }

    /// Same ray with a different upper bound.
    pub fn with_t_max(mut self, t_max: f32) -> Self {
        self.t_max = t_max;
        self
    }

    /// Same ray tagged with a time value.
    pub fn with_time(mut self, time: f32) -> Self {
        self.time = time;
        self
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let direction = Vec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction).with_time(0.5);

        assert_eq!(ray.origin, origin);
        assert_eq!(ray.direction, direction);
        assert_eq!(ray.time, 0.5);
        assert_eq!(ray.t_min, RAY_EPSILON);
        assert!(ray.t_max.is_infinite());
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }
}
