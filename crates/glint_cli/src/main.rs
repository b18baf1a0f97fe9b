//! glint - render the demo scene to a PNG.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use glint_core::MeshOptions;
use glint_math::Vec3;
use glint_renderer::{
    render, Accelerator, Camera, Integrator, RenderConfig, WhittedIntegrator, DEFAULT_BUCKET_SIZE,
    DEFAULT_MAX_DEPTH,
};
use std::path::PathBuf;
use std::time::Instant;

mod demo;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CameraKind {
    Perspective,
    Orthographic,
}

#[derive(Parser, Debug)]
#[command(name = "glint", version)]
#[command(about = "Whitted-style CPU ray tracer", long_about = None)]
struct Cli {
    /// Output PNG file
    #[arg(short, long, default_value = "glint.png")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 360)]
    height: u32,

    /// Integrator: flat, normal_map or whitted
    #[arg(short, long, default_value = "whitted")]
    integrator: Integrator,

    /// Reflection depth for the whitted integrator
    #[arg(short = 'd', long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,

    /// Aggregate: list or bvh
    #[arg(short, long, default_value = "list")]
    accel: Accelerator,

    #[arg(long, value_enum, default_value_t = CameraKind::Perspective)]
    camera: CameraKind,

    /// Vertical field of view in degrees (perspective camera)
    #[arg(long, default_value_t = 40.0)]
    fovy: f32,

    /// Camera position
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    eye: Option<Vec<f32>>,

    /// Point the camera looks at
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    look_at: Option<Vec<f32>>,

    /// OBJ mesh added to the demo scene
    #[arg(long)]
    mesh: Option<PathBuf>,

    /// Swap the winding of every mesh triangle
    #[arg(long)]
    reverse_vertex_order: bool,

    /// Recompute smooth mesh normals
    #[arg(long)]
    compute_normals: bool,

    /// Negate mesh normals
    #[arg(long)]
    flip_normals: bool,

    /// Ignore mesh faces seen from behind
    #[arg(long)]
    backface_cull: bool,

    /// Bucket edge length in pixels
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE)]
    bucket_size: u32,

    /// Render on a single thread
    #[arg(long)]
    serial: bool,
}

impl Cli {
    fn render_config(&self) -> RenderConfig {
        let integrator = match self.integrator {
            Integrator::Whitted(_) => Integrator::Whitted(WhittedIntegrator::new(self.max_depth)),
            other => other,
        };
        RenderConfig {
            integrator,
            accelerator: self.accel,
            bucket_size: self.bucket_size,
            parallel: !self.serial,
        }
    }

    fn mesh_options(&self) -> MeshOptions {
        MeshOptions {
            reverse_vertex_order: self.reverse_vertex_order,
            compute_normals: self.compute_normals,
            flip_normals: self.flip_normals,
            backface_cull: self.backface_cull,
        }
    }

    fn camera(&self) -> Camera {
        let eye = to_vec3(self.eye.as_deref()).unwrap_or(Vec3::new(0.0, 2.5, 9.0));
        let target = to_vec3(self.look_at.as_deref()).unwrap_or(Vec3::new(0.0, 0.8, 0.0));
        let camera = match self.camera {
            CameraKind::Perspective => Camera::perspective(self.fovy, self.width, self.height),
            CameraKind::Orthographic => {
                let aspect = self.width.max(1) as f32 / self.height.max(1) as f32;
                let half = 3.0;
                Camera::orthographic(self.width, self.height).with_screen_window([
                    -half * aspect,
                    half * aspect,
                    -half,
                    half,
                ])
            }
        };
        camera.look_at(eye, target, Vec3::Y)
    }
}

fn to_vec3(values: Option<&[f32]>) -> Option<Vec3> {
    match values? {
        [x, y, z] => Some(Vec3::new(*x, *y, *z)),
        _ => None,
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = cli.render_config();
    log::debug!("{:?}", config);

    let start = Instant::now();
    let mesh = cli.mesh.as_deref().map(|path| (path, cli.mesh_options()));
    let scene = demo::build(config.accelerator, mesh)?;
    log::info!("Scene built in {:.2?}", start.elapsed());

    let image = render(&cli.camera(), &scene, &config);
    image.save_png(&cli.output)?;

    Ok(())
}
