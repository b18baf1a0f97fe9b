//! Sphere shape, optionally placed by an object-to-world transform.

use crate::surfel::Surfel;
use glint_math::{Bounds3f, Ray, Transform, Vec3};
use std::sync::Arc;

/// Object-to-world transform shared between shapes, plus its cached inverse.
#[derive(Debug, Clone)]
struct Placement {
    object_to_world: Arc<Transform>,
    world_to_object: Transform,
}

/// A sphere primitive.
///
/// Without a transform `center` and `radius` are in world space. With one,
/// they are in object space and rays are mapped there before solving.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    placement: Option<Placement>,
}

impl Sphere {
    /// Create a world-space sphere.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            placement: None,
        }
    }

    /// Create a sphere in object space, placed by `object_to_world`.
    pub fn with_transform(center: Vec3, radius: f32, object_to_world: Arc<Transform>) -> Self {
        let world_to_object = object_to_world.inverse();
        Self {
            center,
            radius: radius.max(0.0),
            placement: Some(Placement {
                object_to_world,
                world_to_object,
            }),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Quadratic coefficients `A`, `B` and the discriminant `B² - 4AC`.
    pub fn calc_delta(&self, ray: &Ray) -> (f32, f32, f32) {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;
        (a, b, b * b - 4.0 * a * c)
    }

    /// Smallest root beyond `ray.t_min`, in the space of `ray`.
    fn nearest_root(&self, ray: &Ray) -> Option<f32> {
        let (a, b, delta) = self.calc_delta(ray);
        if delta < 0.0 || a == 0.0 {
            return None;
        }

        let sqrt_delta = delta.sqrt();
        let mut t0 = (-b - sqrt_delta) / (2.0 * a);
        let mut t1 = (-b + sqrt_delta) / (2.0 * a);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        if t0 > ray.t_min {
            Some(t0)
        } else if t1 > ray.t_min {
            Some(t1)
        } else {
            None
        }
    }

    /// Find the nearest hit in front of the ray.
    ///
    /// With a transform, the root is solved in object space and the contact
    /// and normal are mapped back; the reported parameter is the world-space
    /// distance to the contact measured in units of the ray direction.
    pub fn intersect<'a>(&self, ray: &Ray) -> Option<Surfel<'a>> {
        match &self.placement {
            None => {
                let t = self.nearest_root(ray)?;
                if t >= ray.t_max {
                    return None;
                }
                let p = ray.at(t);
                Some(Surfel::new(p, p - self.center, -ray.direction, t))
            }
            Some(placement) => {
                let local_ray = placement.world_to_object.apply_r(ray);
                let local_t = self.nearest_root(&local_ray)?;
                let local_p = local_ray.at(local_t);

                let p = placement.object_to_world.apply_p(local_p);
                let n = placement.object_to_world.apply_n(local_p - self.center);
                let t = world_parameter(ray, p);
                if t >= ray.t_max {
                    return None;
                }
                Some(Surfel::new(p, n, -ray.direction, t))
            }
        }
    }

    /// True if the ray hits the sphere before `max_t`.
    pub fn intersect_p(&self, ray: &Ray, max_t: f32) -> bool {
        let t = match &self.placement {
            None => self.nearest_root(ray),
            Some(placement) => {
                let local_ray = placement.world_to_object.apply_r(ray);
                self.nearest_root(&local_ray).map(|local_t| {
                    world_parameter(ray, placement.object_to_world.apply_p(local_ray.at(local_t)))
                })
            }
        };
        t.is_some_and(|t| t < max_t)
    }

    /// Box of side `2 * radius` around the center, in world space.
    pub fn compute_bounds(&self) -> Bounds3f {
        let r = Vec3::splat(self.radius);
        let local = Bounds3f::new(self.center - r, self.center + r);
        match &self.placement {
            None => local,
            Some(placement) => placement.object_to_world.apply_b(&local),
        }
    }
}

/// Distance from the ray origin to `p`, in multiples of `|direction|`.
fn world_parameter(ray: &Ray, p: Vec3) -> f32 {
    (p - ray.origin).length() / ray.direction.length()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_hit_from_outside() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.p - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        assert!((hit.n - Vec3::Z).length() < 1e-5);
        assert!((hit.time - 4.0).abs() < 1e-5);
        assert_eq!(hit.wo, Vec3::Z);
    }

    #[test]
    fn test_sphere_hit_from_inside_uses_far_root() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.time - 1.0).abs() < 1e-5);
        assert!((hit.p - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_sphere_behind_ray() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);

        assert!(sphere.intersect(&ray).is_none());
        assert!(!sphere.intersect_p(&ray, f32::INFINITY));
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);

        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_sphere_intersect_p_max_t() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        assert!(sphere.intersect_p(&ray, 4.5));
        assert!(!sphere.intersect_p(&ray, 3.5));
    }

    #[test]
    fn test_sphere_bounds() {
        let b = Sphere::new(Vec3::new(1.0, 2.0, 3.0), 0.5).compute_bounds();
        assert_eq!(b.min_point, Vec3::new(0.5, 1.5, 2.5));
        assert_eq!(b.max_point, Vec3::new(1.5, 2.5, 3.5));
    }

    #[test]
    fn test_translated_sphere() {
        let transform = Arc::new(Transform::translate(Vec3::new(0.0, 0.0, -10.0)));
        let sphere = Sphere::with_transform(Vec3::ZERO, 1.0, transform);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.time - 9.0).abs() < 1e-4);
        assert!((hit.p - Vec3::new(0.0, 0.0, -9.0)).length() < 1e-4);
        assert!((hit.n - Vec3::Z).length() < 1e-4);

        let b = sphere.compute_bounds();
        assert!((b.centroid() - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-3);
    }

    #[test]
    fn test_scaled_sphere_reports_world_distance() {
        // Ellipsoid with x semi-axis 3.
        let transform = Arc::new(Transform::scale(3.0, 1.0, 1.0));
        let sphere = Sphere::with_transform(Vec3::ZERO, 1.0, transform);
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));

        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.time - 7.0).abs() < 1e-4);
        assert!((hit.p - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-4);
        assert!((hit.n - Vec3::X).length() < 1e-4);
        assert!(sphere.intersect_p(&ray, 7.5));
        assert!(!sphere.intersect_p(&ray, 6.5));
    }

    #[test]
    fn test_scaled_sphere_normal_uses_inverse_transpose() {
        let transform = Arc::new(Transform::scale(2.0, 1.0, 1.0));
        let sphere = Sphere::with_transform(Vec3::ZERO, 1.0, transform);
        // Aim at the ellipse point (sqrt(2), sqrt(0.5), 0).
        let target = Vec3::new(2.0_f32.sqrt(), 0.5_f32.sqrt(), 0.0);
        let origin = target + Vec3::new(0.0, 5.0, 0.0);
        let ray = Ray::new(origin, Vec3::new(0.0, -1.0, 0.0));

        let hit = sphere.intersect(&ray).unwrap();
        let expected = Vec3::new(target.x / 4.0, target.y, 0.0).normalize();
        assert!((hit.n - expected).length() < 1e-3);
    }
}
