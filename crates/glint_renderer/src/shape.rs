//! Closed set of intersectable shapes.

use crate::sphere::Sphere;
use crate::surfel::Surfel;
use crate::triangle::Triangle;
use glint_math::{Bounds3f, Ray};

#[derive(Debug, Clone)]
pub enum Shape {
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Shape {
    pub fn compute_bounds(&self) -> Bounds3f {
        match self {
            Shape::Sphere(s) => s.compute_bounds(),
            Shape::Triangle(t) => t.compute_bounds(),
        }
    }

    /// Nearest hit, unstamped: the caller owns the primitive reference.
    pub fn intersect<'a>(&self, ray: &Ray) -> Option<Surfel<'a>> {
        match self {
            Shape::Sphere(s) => s.intersect(ray),
            Shape::Triangle(t) => t.intersect(ray),
        }
    }

    pub fn intersect_p(&self, ray: &Ray, max_t: f32) -> bool {
        match self {
            Shape::Sphere(s) => s.intersect_p(ray, max_t),
            Shape::Triangle(t) => t.intersect_p(ray, max_t),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}
