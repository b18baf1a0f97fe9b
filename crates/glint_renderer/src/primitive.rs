//! Primitive hierarchy: shapes bound to materials, and aggregates of them.

use crate::bvh::BvhAccel;
use crate::shape::Shape;
use crate::surfel::Surfel;
use glint_core::Material;
use glint_math::{Bounds3f, Ray};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A shape paired with the material it is shaded with.
#[derive(Debug, Clone)]
pub struct GeometricPrimitive {
    shape: Shape,
    material: Arc<Material>,
    bounds: Bounds3f,
}

impl GeometricPrimitive {
    pub fn new(shape: impl Into<Shape>, material: Arc<Material>) -> Self {
        let shape = shape.into();
        let bounds = shape.compute_bounds();
        Self {
            shape,
            material,
            bounds,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn bounds(&self) -> Bounds3f {
        self.bounds
    }

    /// Delegate to the shape and stamp the hit with this primitive.
    pub fn intersect<'a>(&'a self, ray: &Ray) -> Option<Surfel<'a>> {
        let mut hit = self.shape.intersect(ray)?;
        hit.primitive = Some(self);
        Some(hit)
    }

    pub fn intersect_p(&self, ray: &Ray, max_t: f32) -> bool {
        self.shape.intersect_p(ray, max_t)
    }
}

/// Flat list aggregate; every query scans all children.
#[derive(Debug, Clone, Default)]
pub struct PrimList {
    primitives: Vec<Primitive>,
    bounds: Bounds3f,
}

impl PrimList {
    pub fn new(primitives: Vec<Primitive>) -> Self {
        let bounds = primitives
            .iter()
            .fold(Bounds3f::EMPTY, |acc, p| Bounds3f::insert(&acc, &p.bounds()));
        Self { primitives, bounds }
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn bounds(&self) -> Bounds3f {
        self.bounds
    }

    /// Nearest hit over all children.
    pub fn intersect<'a>(&'a self, ray: &Ray) -> Option<Surfel<'a>> {
        self.primitives
            .iter()
            .fold(None, |closest, prim| Surfel::closest(closest, prim.intersect(ray)))
    }

    /// Stops at the first child hit before `max_t`.
    pub fn intersect_p(&self, ray: &Ray, max_t: f32) -> bool {
        self.primitives.iter().any(|prim| prim.intersect_p(ray, max_t))
    }
}

/// Anything the scene can intersect, leaf or aggregate.
#[derive(Debug, Clone)]
pub enum Primitive {
    Geometric(GeometricPrimitive),
    List(PrimList),
    Bvh(BvhAccel),
}

impl Primitive {
    pub fn intersect<'a>(&'a self, ray: &Ray) -> Option<Surfel<'a>> {
        match self {
            Primitive::Geometric(p) => p.intersect(ray),
            Primitive::List(list) => list.intersect(ray),
            Primitive::Bvh(bvh) => bvh.intersect(ray),
        }
    }

    pub fn intersect_p(&self, ray: &Ray, max_t: f32) -> bool {
        match self {
            Primitive::Geometric(p) => p.intersect_p(ray, max_t),
            Primitive::List(list) => list.intersect_p(ray, max_t),
            Primitive::Bvh(bvh) => bvh.intersect_p(ray, max_t),
        }
    }

    pub fn bounds(&self) -> Bounds3f {
        match self {
            Primitive::Geometric(p) => p.bounds(),
            Primitive::List(list) => list.bounds(),
            Primitive::Bvh(bvh) => bvh.bounds(),
        }
    }
}

impl From<GeometricPrimitive> for Primitive {
    fn from(p: GeometricPrimitive) -> Self {
        Primitive::Geometric(p)
    }
}

/// Aggregate used to hold the scene's primitives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Accelerator {
    #[default]
    List,
    Bvh,
}

impl Accelerator {
    /// Wrap `primitives` in the chosen aggregate.
    pub fn build(self, primitives: Vec<Primitive>) -> Primitive {
        match self {
            Accelerator::List => Primitive::List(PrimList::new(primitives)),
            Accelerator::Bvh => Primitive::Bvh(BvhAccel::build(primitives)),
        }
    }
}

impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accelerator::List => write!(f, "list"),
            Accelerator::Bvh => write!(f, "bvh"),
        }
    }
}

impl FromStr for Accelerator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "list" => Ok(Accelerator::List),
            "bvh" => Ok(Accelerator::Bvh),
            other => Err(format!("unknown accelerator '{other}' (expected list or bvh)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::Sphere;
    use glint_math::Vec3;

    fn sphere_prim(z: f32, name: &str) -> Primitive {
        let material = Arc::new(Material::flat(name, glint_core::Color::WHITE));
        GeometricPrimitive::new(Sphere::new(Vec3::new(0.0, 0.0, z), 0.5), material).into()
    }

    #[test]
    fn test_geometric_stamps_primitive() {
        let prim = sphere_prim(-3.0, "a");
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let hit = prim.intersect(&ray).unwrap();
        assert_eq!(hit.material().unwrap().name, "a");
    }

    #[test]
    fn test_list_returns_nearest() {
        let list = PrimList::new(vec![
            sphere_prim(-10.0, "far"),
            sphere_prim(-3.0, "near"),
            sphere_prim(-6.0, "mid"),
        ]);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let hit = list.intersect(&ray).unwrap();
        assert_eq!(hit.material().unwrap().name, "near");
        assert!((hit.time - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_list_intersect_p() {
        let list = PrimList::new(vec![sphere_prim(-10.0, "far"), sphere_prim(-3.0, "near")]);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert!(list.intersect_p(&ray, 3.0));
        assert!(!list.intersect_p(&ray, 2.0));
        assert!(!list.intersect_p(&Ray::new(Vec3::ZERO, Vec3::Y), f32::INFINITY));
    }

    #[test]
    fn test_empty_list() {
        let list = PrimList::new(Vec::new());
        assert!(list.is_empty());
        assert!(list.bounds().is_empty());
        assert!(list.intersect(&Ray::new(Vec3::ZERO, Vec3::X)).is_none());
    }

    #[test]
    fn test_accelerator_parse() {
        assert_eq!("BVH".parse::<Accelerator>().unwrap(), Accelerator::Bvh);
        assert_eq!("list".parse::<Accelerator>().unwrap(), Accelerator::List);
        assert!("kd".parse::<Accelerator>().is_err());
        assert_eq!(Accelerator::default(), Accelerator::List);
    }
}
