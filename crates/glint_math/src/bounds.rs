use crate::{Ray, Vec3};

/// Stand-in for `1 / 0` in the slab test; keeps min/max comparisons finite.
const INV_DIR_SENTINEL: f32 = 1e18;

/// Padding applied per axis by [`Bounds3f::create_box`] so flat geometry never
/// produces a zero-thickness box.
const BOX_EPSILON: f32 = 0.0001;

/// Axis-aligned bounding box used by shapes and aggregates.
///
/// The default box is empty (`min = +inf`, `max = -inf` on every axis) and is
/// the identity of [`Bounds3f::insert`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds3f {
    pub min_point: Vec3,
    pub max_point: Vec3,
}

impl Default for Bounds3f {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Bounds3f {
    /// The empty box (contains nothing).
    pub const EMPTY: Bounds3f = Bounds3f {
        min_point: Vec3::INFINITY,
        max_point: Vec3::NEG_INFINITY,
    };

    /// Create a box from its two corners, taken as given.
    pub fn new(min_point: Vec3, max_point: Vec3) -> Self {
        Self {
            min_point,
            max_point,
        }
    }

    /// True when some axis has `min > max`.
    pub fn is_empty(&self) -> bool {
        self.min_point.cmpgt(self.max_point).any()
    }

    /// Slab test against the infinite line of the ray.
    ///
    /// Returns the overlap `(t_near, t_far)` when `t_near < t_far` and the box
    /// is not entirely behind the origin.
    pub fn intersect_box(&self, ray: &Ray) -> Option<(f32, f32)> {
        if self.is_empty() {
            return None;
        }

        let mut t_near = -INV_DIR_SENTINEL;
        let mut t_far = INV_DIR_SENTINEL;

        for axis in 0..3 {
            let dir = ray.direction[axis];
            let inv_dir = if dir == 0.0 { INV_DIR_SENTINEL } else { 1.0 / dir };

            let mut t0 = (self.min_point[axis] - ray.origin[axis]) * inv_dir;
            let mut t1 = (self.max_point[axis] - ray.origin[axis]) * inv_dir;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
        }

        if t_near < t_far && t_far > 0.0 {
            Some((t_near, t_far))
        } else {
            None
        }
    }

    /// True if the ray enters (or is inside) the box before `max_t`.
    pub fn intersect_p(&self, ray: &Ray, max_t: f32) -> bool {
        match self.intersect_box(ray) {
            None => false,
            Some((t_near, t_far)) => {
                if t_near > 0.0 {
                    t_near < max_t
                } else if t_far > 0.0 {
                    t_far < max_t
                } else {
                    false
                }
            }
        }
    }

    /// Union of two boxes.
    pub fn insert(a: &Bounds3f, b: &Bounds3f) -> Bounds3f {
        Bounds3f {
            min_point: a.min_point.min(b.min_point),
            max_point: a.max_point.max(b.max_point),
        }
    }

    /// Tight box over a point set, padded by a small epsilon on every axis.
    ///
    /// An empty slice yields the empty box.
    pub fn create_box(points: &[Vec3]) -> Bounds3f {
        let Some((first, rest)) = points.split_first() else {
            return Bounds3f::EMPTY;
        };

        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));

        let eps = Vec3::splat(BOX_EPSILON);
        Bounds3f::new(min - eps, max + eps)
    }

    /// The eight corners; bit `j` of the corner index selects `max` on axis `j`.
    pub fn corners(&self) -> [Vec3; 8] {
        let mut corners = [self.min_point; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            for axis in 0..3 {
                if i & (1 << axis) != 0 {
                    corner[axis] = self.max_point[axis];
                }
            }
        }
        corners
    }

    /// Returns true if `p` is inside the box (inclusive).
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min_point).all() && p.cmple(self.max_point).all()
    }

    /// Returns true if `other` lies entirely inside this box (inclusive).
    pub fn contains(&self, other: &Bounds3f) -> bool {
        other.is_empty()
            || (other.min_point.cmpge(self.min_point).all()
                && other.max_point.cmple(self.max_point).all())
    }

    /// Vector from `min_point` to `max_point`.
    pub fn diagonal(&self) -> Vec3 {
        self.max_point - self.min_point
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        (self.min_point + self.max_point) * 0.5
    }
}
