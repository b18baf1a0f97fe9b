//! Render driver and film.
//!
//! Each primary ray is independent: the image is cut into buckets and the
//! buckets are traced in parallel against the read-only scene.

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{Accelerator, Camera, Color, Integrator, Scene};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;

/// Errors raised while writing the film.
#[derive(Error, Debug)]
pub enum FilmError {
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Integrator used for every pixel
    pub integrator: Integrator,
    /// Aggregate the scene builder should use
    pub accelerator: Accelerator,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
    /// Trace buckets on the rayon thread pool
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            integrator: Integrator::default(),
            accelerator: Accelerator::default(),
            bucket_size: DEFAULT_BUCKET_SIZE,
            parallel: true,
        }
    }
}

/// Color of pixel `(x, y)`; misses fall back to the scene background
/// sampled at the pixel centre.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    integrator: &Integrator,
    x: u32,
    y: u32,
) -> Color {
    let ray = camera.generate_ray(x, y);
    integrator.li(&ray, scene).unwrap_or_else(|| {
        let u = (x as f32 + 0.5) / camera.image_width as f32;
        let v = (y as f32 + 0.5) / camera.image_height as f32;
        scene.background().sample(u, v)
    })
}

/// Image buffer of colors, row 0 at the top.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; (width * height) as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Copy a finished bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let i = i as u32;
            self.set(bucket.x + i % bucket.width, bucket.y + i / bucket.width, *color);
        }
    }

    /// Packed 8-bit RGB, no gamma.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgb8()).collect()
    }

    /// Write the buffer as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), FilmError> {
        let bytes = self.to_rgb8();
        let expected = (self.width * self.height * 3) as usize;
        let actual = bytes.len();
        let img = image::RgbImage::from_raw(self.width, self.height, bytes)
            .ok_or(FilmError::BufferSize { expected, actual })?;
        img.save_with_format(path.as_ref(), image::ImageFormat::Png)?;
        log::info!("Wrote {}", path.as_ref().display());
        Ok(())
    }
}

/// Render the whole image.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let (width, height) = (camera.image_width, camera.image_height);
    let buckets = generate_buckets(width, height, config.bucket_size.max(1));
    log::info!(
        "Rendering {}x{} with {} integrator in {} buckets",
        width,
        height,
        config.integrator,
        buckets.len()
    );

    let start = Instant::now();
    let results: Vec<BucketResult> = if config.parallel {
        buckets
            .par_iter()
            .map(|bucket| render_bucket(bucket, camera, scene, &config.integrator))
            .collect()
    } else {
        buckets
            .iter()
            .map(|bucket| render_bucket(bucket, camera, scene, &config.integrator))
            .collect()
    };

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    image
}
