//! Camera for primary ray generation.

use glint_math::{Ray, Vec3};

/// How screen-space positions map to rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Parallel rays along the gaze direction.
    Orthographic,
    /// Pinhole camera; `fovy` is the vertical field of view in degrees.
    Perspective { fovy: f32 },
}

/// Camera with a look-at frame and a screen window `[left, right, bottom, top]`.
///
/// One ray is generated through the centre of every pixel, row 0 at the top.
#[derive(Debug, Clone)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,
    projection: Projection,
    screen_window: [f32; 4],

    // Frame: `u` right, `v` up, `w` backward (opposite the gaze).
    eye: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Camera at the origin looking down `-Z`, with the default screen window
    /// for the image aspect ratio.
    pub fn new(projection: Projection, image_width: u32, image_height: u32) -> Self {
        let image_width = image_width.max(1);
        let image_height = image_height.max(1);
        Self {
            image_width,
            image_height,
            projection,
            screen_window: default_screen_window(image_width, image_height),
            eye: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
        }
    }

    pub fn orthographic(image_width: u32, image_height: u32) -> Self {
        Self::new(Projection::Orthographic, image_width, image_height)
    }

    pub fn perspective(fovy: f32, image_width: u32, image_height: u32) -> Self {
        Self::new(Projection::Perspective { fovy }, image_width, image_height)
    }

    /// Place the camera at `eye` looking at `target`.
    pub fn look_at(mut self, eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let w = (eye - target).normalize_or_zero();
        let u = up.cross(w).normalize_or_zero();
        self.eye = eye;
        self.w = w;
        self.u = u;
        self.v = w.cross(u);
        self
    }

    /// Override the screen window `[left, right, bottom, top]`.
    pub fn with_screen_window(mut self, window: [f32; 4]) -> Self {
        self.screen_window = window;
        self
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn screen_window(&self) -> [f32; 4] {
        self.screen_window
    }

    /// Ray through the centre of pixel `(x, y)`.
    pub fn generate_ray(&self, x: u32, y: u32) -> Ray {
        let [left, right, bottom, top] = self.screen_window;
        let su = left + (right - left) * (x as f32 + 0.5) / self.image_width as f32;
        let sv = top - (top - bottom) * (y as f32 + 0.5) / self.image_height as f32;

        match self.projection {
            Projection::Orthographic => {
                let origin = self.eye + su * self.u + sv * self.v;
                Ray::new(origin, -self.w)
            }
            Projection::Perspective { fovy } => {
                let scale = (fovy.to_radians() * 0.5).tan();
                let direction = -self.w + scale * (su * self.u + sv * self.v);
                Ray::new(self.eye, direction.normalize())
            }
        }
    }
}

/// `±aspect` horizontally and `±1` vertically.
fn default_screen_window(width: u32, height: u32) -> [f32; 4] {
    let aspect = width as f32 / height as f32;
    [-aspect, aspect, -1.0, 1.0]
}
