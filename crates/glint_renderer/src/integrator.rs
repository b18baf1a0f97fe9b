//! Radiance integrators.
//!
//! All integrators return `None` when the ray leaves the scene; the caller
//! samples the background in that case.

use crate::scene::Scene;
use crate::surfel::Surfel;
use glint_core::{Color, Material};
use glint_math::{Ray, Vec3, RAY_EPSILON};
use std::fmt;
use std::str::FromStr;

/// Default reflection depth for [`Integrator::Whitted`].
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Which integrator renders the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integrator {
    /// Diffuse color of whatever is hit
    Flat,
    /// Surface normal mapped from `[-1, 1]` to `[0, 1]`
    NormalMap,
    /// Direct lighting with shadows plus mirror reflection
    Whitted(WhittedIntegrator),
}

impl Default for Integrator {
    fn default() -> Self {
        Integrator::Whitted(WhittedIntegrator::default())
    }
}

impl Integrator {
    /// Radiance along `ray`, or `None` on a miss.
    pub fn li(&self, ray: &Ray, scene: &Scene) -> Option<Color> {
        match self {
            Integrator::Flat => {
                let hit = scene.intersect(ray)?;
                Some(hit.material().map_or(Color::BLACK, |m| m.diffuse))
            }
            Integrator::NormalMap => {
                let hit = scene.intersect(ray)?;
                Some(Color::from((hit.n + Vec3::ONE) * 0.5))
            }
            Integrator::Whitted(whitted) => whitted.li(ray, scene),
        }
    }
}

impl fmt::Display for Integrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integrator::Flat => write!(f, "flat"),
            Integrator::NormalMap => write!(f, "normal_map"),
            Integrator::Whitted(w) => write!(f, "whitted (max depth {})", w.max_depth),
        }
    }
}

impl FromStr for Integrator {
    type Err = String;

    /// Parse an integrator name; `whitted` uses the default depth.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flat" => Ok(Integrator::Flat),
            "normal_map" | "normal-map" | "normals" => Ok(Integrator::NormalMap),
            "whitted" | "blinn_phong" => Ok(Integrator::default()),
            other => Err(format!(
                "unknown integrator '{other}' (expected flat, normal_map or whitted)"
            )),
        }
    }
}

/// Recursive Blinn-Phong shading with shadow rays and mirror reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhittedIntegrator {
    /// Number of `li` levels evaluated for one primary ray, the primary
    /// hit included
    pub max_depth: u32,
}

impl Default for WhittedIntegrator {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl WhittedIntegrator {
    pub fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }

    pub fn li(&self, ray: &Ray, scene: &Scene) -> Option<Color> {
        self.li_depth(ray, scene, 1)
    }

    /// Radiance at recursion level `depth` (1 for primary rays).
    pub fn li_depth(&self, ray: &Ray, scene: &Scene, depth: u32) -> Option<Color> {
        let hit = scene.intersect(ray)?;
        if hit.wo.dot(hit.n) < 0.0 {
            return None;
        }
        let material = hit.material()?;

        let mut color = direct_lighting(&hit, material, scene);

        if depth < self.max_depth && material.is_reflective() {
            let d = ray.direction.normalize_or_zero();
            let r = d - 2.0 * d.dot(hit.n) * hit.n;
            let reflected = Ray::new(hit.p + r * RAY_EPSILON, r).with_time(ray.time);
            if let Some(bounce) = self.li_depth(&reflected, scene, depth + 1) {
                color += material.mirror * bounce;
            }
        }

        Some(color)
    }
}

/// Ambient plus shadowed diffuse and specular terms over every light.
fn direct_lighting(hit: &Surfel, material: &Material, scene: &Scene) -> Color {
    let mut color = Color::BLACK;

    for light in scene.lights() {
        let Some(sample) = light.sample_li(hit) else {
            color += material.ambient * light.intensity();
            continue;
        };
        if sample.color.is_black() || !sample.visibility.unoccluded(scene) {
            continue;
        }

        let l = -sample.direction;
        color += material.diffuse * sample.color * hit.n.dot(l).max(0.0);

        if let Some(glossiness) = material.glossiness {
            let half = (hit.wo + l).normalize_or_zero();
            color += material.specular * sample.color * hit.n.dot(half).max(0.0).powf(glossiness);
        }
    }

    color
}
