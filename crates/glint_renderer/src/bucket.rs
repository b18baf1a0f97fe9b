//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon.

use crate::renderer::render_pixel;
use crate::{Camera, Color, Integrator, Scene};

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of the top-left corner
    pub x: u32,
    /// Y coordinate of the top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position in render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Cut a `width` x `height` image into buckets, centre buckets first.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(bucket_size as usize)
        .flat_map(|y| {
            (0..width).step_by(bucket_size as usize).map(move |x| {
                Bucket::new(
                    x,
                    y,
                    bucket_size.min(width - x),
                    bucket_size.min(height - y),
                    0,
                )
            })
        })
        .collect();

    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let dist = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - cx).powi(2) + (by - cy).powi(2)
    };
    buckets.sort_by(|a, b| dist(a).total_cmp(&dist(b)));

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }
    buckets
}

/// Pixels of a rendered bucket in row-major order.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    pub pixels: Vec<Color>,
}

/// Render every pixel of `bucket`.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene,
    integrator: &Integrator,
) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);
    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            pixels.push(render_pixel(
                camera,
                scene,
                integrator,
                bucket.x + local_x,
                bucket.y + local_y,
            ));
        }
    }
    BucketResult {
        bucket: *bucket,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets_cover_image() {
        for (w, h, size) in [(128, 128, 64), (100, 37, 32), (5, 3, 16)] {
            let buckets = generate_buckets(w, h, size);
            let total: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
            assert_eq!(total, w * h);
        }
        assert_eq!(generate_buckets(100, 100, 64).len(), 4);
    }

    #[test]
    fn test_center_bucket_first() {
        let buckets = generate_buckets(96, 96, 32);
        assert_eq!(buckets.len(), 9);
        assert_eq!((buckets[0].x, buckets[0].y), (32, 32));
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }
}
