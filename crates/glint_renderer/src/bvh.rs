//! Bounding Volume Hierarchy (BVH) aggregate.
//!
//! Built bottom-up: primitives are sorted once by the minimum x of their
//! boxes, wrapped as singleton leaves, and adjacent nodes are paired level by
//! level until a single root remains.

use crate::primitive::Primitive;
use crate::surfel::Surfel;
use glint_math::{Bounds3f, Ray};

/// BVH node - either a branch with two children or a leaf with one primitive.
#[derive(Debug, Clone)]
pub enum BvhNode {
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bounds: Bounds3f,
    },
    Leaf {
        primitive: Primitive,
        bounds: Bounds3f,
    },
}

impl BvhNode {
    pub fn bounds(&self) -> Bounds3f {
        match self {
            BvhNode::Branch { bounds, .. } | BvhNode::Leaf { bounds, .. } => *bounds,
        }
    }

    fn leaf(primitive: Primitive) -> Self {
        let bounds = primitive.bounds();
        BvhNode::Leaf { primitive, bounds }
    }

    fn branch(left: BvhNode, right: BvhNode) -> Self {
        let bounds = Bounds3f::insert(&left.bounds(), &right.bounds());
        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bounds,
        }
    }

    fn intersect<'a>(&'a self, ray: &Ray) -> Option<Surfel<'a>> {
        if self.bounds().intersect_box(ray).is_none() {
            return None;
        }

        match self {
            BvhNode::Leaf { primitive, .. } => primitive.intersect(ray),
            BvhNode::Branch { left, right, .. } => {
                let hit_left = left.intersect(ray);
                let hit_right = right.intersect(ray);
                Surfel::closest(hit_left, hit_right)
            }
        }
    }

    /// A ray starting inside the box always descends; only the entry
    /// distance is compared against `max_t`.
    fn intersect_p(&self, ray: &Ray, max_t: f32) -> bool {
        match self.bounds().intersect_box(ray) {
            Some((t_near, _)) if t_near < max_t => {}
            _ => return false,
        }

        match self {
            BvhNode::Leaf { primitive, .. } => primitive.intersect_p(ray, max_t),
            BvhNode::Branch { left, right, .. } => {
                left.intersect_p(ray, max_t) || right.intersect_p(ray, max_t)
            }
        }
    }

    /// (node count, depth) of the subtree.
    fn stats(&self) -> (usize, usize) {
        match self {
            BvhNode::Leaf { .. } => (1, 1),
            BvhNode::Branch { left, right, .. } => {
                let (ln, ld) = left.stats();
                let (rn, rd) = right.stats();
                (ln + rn + 1, ld.max(rd) + 1)
            }
        }
    }
}

/// Binary aggregation tree over primitives.
#[derive(Debug, Clone, Default)]
pub struct BvhAccel {
    root: Option<Box<BvhNode>>,
}

impl BvhAccel {
    /// Build the tree. An empty input gives an empty aggregate that never hits.
    pub fn build(mut primitives: Vec<Primitive>) -> Self {
        if primitives.is_empty() {
            return Self::default();
        }

        let count = primitives.len();
        primitives.sort_by(|a, b| a.bounds().min_point.x.total_cmp(&b.bounds().min_point.x));

        let mut level: Vec<BvhNode> = primitives.into_iter().map(BvhNode::leaf).collect();
        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len().div_ceil(2));
            let mut nodes = level.into_iter();
            while let Some(left) = nodes.next() {
                match nodes.next() {
                    Some(right) => next.push(BvhNode::branch(left, right)),
                    None => next.push(left),
                }
            }
            level = next;
        }

        let root = level.pop().map(Box::new);
        if let Some(root) = &root {
            let (nodes, depth) = root.stats();
            log::debug!(
                "Built BVH over {} primitives: {} nodes, depth {}",
                count,
                nodes,
                depth
            );
        }
        Self { root }
    }

    pub fn root(&self) -> Option<&BvhNode> {
        self.root.as_deref()
    }

    pub fn bounds(&self) -> Bounds3f {
        self.root.as_ref().map_or(Bounds3f::EMPTY, |root| root.bounds())
    }

    pub fn intersect<'a>(&'a self, ray: &Ray) -> Option<Surfel<'a>> {
        self.root.as_ref()?.intersect(ray)
    }

    pub fn intersect_p(&self, ray: &Ray, max_t: f32) -> bool {
        self.root
            .as_ref()
            .is_some_and(|root| root.intersect_p(ray, max_t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{GeometricPrimitive, PrimList};
    use crate::sphere::Sphere;
    use glint_core::{Color, Material};
    use glint_math::Vec3;
    use std::sync::Arc;

    fn spheres(n: usize) -> Vec<Primitive> {
        let material = Arc::new(Material::flat("white", Color::WHITE));
        (0..n)
            .map(|i| {
                // Scatter along x in a non-sorted order.
                let x = ((i * 7) % n) as f32 * 2.0;
                let y = (i % 3) as f32;
                let sphere = Sphere::new(Vec3::new(x, y, -5.0), 0.5);
                GeometricPrimitive::new(sphere, Arc::clone(&material)).into()
            })
            .collect()
    }

    #[test]
    fn test_root_bounds_match_list_union() {
        for n in 1..=9 {
            let list = PrimList::new(spheres(n));
            let bvh = BvhAccel::build(spheres(n));
            assert_eq!(bvh.bounds(), list.bounds(), "n = {}", n);
        }
    }

    #[test]
    fn test_single_primitive_is_leaf() {
        let bvh = BvhAccel::build(spheres(1));
        assert!(matches!(bvh.root(), Some(BvhNode::Leaf { .. })));
    }

    #[test]
    fn test_odd_count_promotes_last_node() {
        let bvh = BvhAccel::build(spheres(3));
        let (nodes, depth) = bvh.root().unwrap().stats();
        // ((a b) c): 3 leaves, 2 branches
        assert_eq!(nodes, 5);
        assert_eq!(depth, 3);
    }

    #[test]
    fn test_empty_bvh() {
        let bvh = BvhAccel::build(Vec::new());
        assert!(bvh.root().is_none());
        assert!(bvh.bounds().is_empty());
        assert!(bvh.intersect(&Ray::new(Vec3::ZERO, Vec3::X)).is_none());
        assert!(!bvh.intersect_p(&Ray::new(Vec3::ZERO, Vec3::X), f32::INFINITY));
    }

    #[test]
    fn test_bvh_agrees_with_list() {
        let list = PrimList::new(spheres(9));
        let bvh = BvhAccel::build(spheres(9));

        for i in 0..40 {
            let x = i as f32 * 0.45 - 1.0;
            let ray = Ray::new(Vec3::new(x, 0.2, 0.0), Vec3::new(0.0, 0.0, -1.0));
            let a = list.intersect(&ray).map(|s| s.time);
            let b = bvh.intersect(&ray).map(|s| s.time);
            assert_eq!(a, b, "ray at x = {}", x);
            assert_eq!(
                list.intersect_p(&ray, f32::INFINITY),
                bvh.intersect_p(&ray, f32::INFINITY)
            );
        }
    }

    #[test]
    fn test_bvh_hit_is_stamped() {
        let bvh = BvhAccel::build(spheres(4));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = bvh.intersect(&ray).unwrap();
        assert!(hit.primitive.is_some());
        assert!((hit.time - 4.5).abs() < 1e-5);
    }
}
