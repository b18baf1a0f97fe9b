//! Blinn-Phong style material coefficients.

use crate::Color;

/// Shading coefficients read by the integrators.
///
/// `glossiness` is the specular exponent; `None` disables the specular term.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Material name (for logging)
    pub name: String,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    /// Reflectance applied to the mirrored ray
    pub mirror: Color,
    pub glossiness: Option<f32>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Color::BLACK,
            diffuse: Color::gray(0.5),
            specular: Color::BLACK,
            mirror: Color::BLACK,
            glossiness: None,
        }
    }
}

impl Material {
    /// Create a Blinn-Phong material. A glossiness of zero turns the specular
    /// lobe off.
    pub fn blinn_phong(
        name: impl Into<String>,
        ambient: Color,
        diffuse: Color,
        specular: Color,
        mirror: Color,
        glossiness: f32,
    ) -> Self {
        Self {
            name: name.into(),
            ambient,
            diffuse,
            specular,
            mirror,
            glossiness: (glossiness > 0.0).then_some(glossiness),
        }
    }

    /// Single-color material for the flat integrator.
    pub fn flat(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            diffuse: color,
            ..Default::default()
        }
    }

    /// Check if this material reflects anything along the mirror direction.
    pub fn is_reflective(&self) -> bool {
        !self.mirror.is_black()
    }
}
