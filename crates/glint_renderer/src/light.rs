//! Light sources and shadow-ray visibility.

use crate::scene::Scene;
use crate::surfel::Surfel;
use glint_core::Color;
use glint_math::{Bounds3f, Ray, Vec3, RAY_EPSILON};

/// Light sources understood by the integrators.
///
/// Directions are unit vectors pointing the way the light travels.
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    /// Uniform light with no direction; never occluded.
    Ambient { intensity: Color },
    /// Isotropic point light without attenuation.
    Point { intensity: Color, position: Vec3 },
    /// Light arriving along a single direction from outside the scene.
    ///
    /// `world_diagonal` is how far back the shadow ray starts; the scene
    /// builder sets it from the scene bounds.
    Directional {
        intensity: Color,
        direction: Vec3,
        world_diagonal: f32,
    },
    /// Cone light; angles in degrees. Full intensity up to `falloff`, zero
    /// past `cutoff`, smooth in between.
    Spot {
        intensity: Color,
        position: Vec3,
        direction: Vec3,
        cutoff: f32,
        falloff: f32,
    },
}

/// Result of sampling a non-ambient light at a surface point.
#[derive(Debug, Clone, Copy)]
pub struct LightSample {
    /// Incident color at the point
    pub color: Color,
    /// Unit direction of travel from the light to the point
    pub direction: Vec3,
    /// Shadow query between the point and the light
    pub visibility: VisibilityTester,
}

impl Light {
    pub fn ambient(intensity: Color) -> Self {
        Light::Ambient { intensity }
    }

    pub fn point(intensity: Color, position: Vec3) -> Self {
        Light::Point {
            intensity,
            position,
        }
    }

    /// Directional light shining from `from` toward `to`.
    pub fn directional(intensity: Color, from: Vec3, to: Vec3) -> Self {
        Light::Directional {
            intensity,
            direction: (to - from).normalize_or_zero(),
            world_diagonal: 0.0,
        }
    }

    /// Spot light at `from` aimed at `to`.
    pub fn spot(intensity: Color, from: Vec3, to: Vec3, cutoff: f32, falloff: f32) -> Self {
        Light::Spot {
            intensity,
            position: from,
            direction: (to - from).normalize_or_zero(),
            cutoff,
            falloff,
        }
    }

    pub fn is_ambient(&self) -> bool {
        matches!(self, Light::Ambient { .. })
    }

    pub fn intensity(&self) -> Color {
        match self {
            Light::Ambient { intensity }
            | Light::Point { intensity, .. }
            | Light::Directional { intensity, .. }
            | Light::Spot { intensity, .. } => *intensity,
        }
    }

    /// Size directional lights to the scene extent.
    pub fn fit_to_world(&mut self, world: &Bounds3f) {
        if let Light::Directional { world_diagonal, .. } = self {
            *world_diagonal = if world.is_empty() {
                0.0
            } else {
                world.diagonal().length()
            };
        }
    }

    /// Sample incident light at `hit`. Ambient lights return `None`.
    pub fn sample_li(&self, hit: &Surfel) -> Option<LightSample> {
        match *self {
            Light::Ambient { .. } => None,
            Light::Point {
                intensity,
                position,
            } => Some(LightSample {
                color: intensity,
                direction: (hit.p - position).normalize_or_zero(),
                visibility: VisibilityTester::new(hit.p, position),
            }),
            Light::Directional {
                intensity,
                direction,
                world_diagonal,
            } => Some(LightSample {
                color: intensity,
                direction,
                visibility: VisibilityTester::new(hit.p, hit.p - direction * world_diagonal),
            }),
            Light::Spot {
                intensity,
                position,
                direction,
                cutoff,
                falloff,
            } => {
                let to_point = (hit.p - position).normalize_or_zero();
                let angle = direction.dot(to_point).clamp(-1.0, 1.0).acos().to_degrees();
                Some(LightSample {
                    color: intensity * spot_factor(angle, cutoff, falloff),
                    direction: to_point,
                    visibility: VisibilityTester::new(hit.p, position),
                })
            }
        }
    }
}

fn spot_factor(angle: f32, cutoff: f32, falloff: f32) -> f32 {
    if angle > cutoff {
        0.0
    } else if angle > falloff {
        (1.0 - (angle - falloff) / (cutoff - falloff)).powi(4)
    } else {
        1.0
    }
}

/// Shadow-ray query between a shading point and a light sample point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityTester {
    pub from: Vec3,
    pub to: Vec3,
}

impl VisibilityTester {
    pub fn new(from: Vec3, to: Vec3) -> Self {
        Self { from, to }
    }

    /// True when nothing in `scene` blocks the segment `from -> to`.
    pub fn unoccluded(&self, scene: &Scene) -> bool {
        let offset = self.to - self.from;
        let dist = offset.length();
        if dist <= RAY_EPSILON {
            return true;
        }

        let ray = Ray::new(self.from, offset / dist);
        !scene.intersect_p(&ray, dist - RAY_EPSILON)
    }
}
