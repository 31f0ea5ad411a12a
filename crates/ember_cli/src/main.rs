//! Command-line entry point: parse arguments, build a scene, render one
//! chunk selection to stdout as a P3 stream.

mod scenes;

use std::io::{self, BufWriter, Write};

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use ember_render::ChunkSelect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Cornell box with a smoke box and a mirror sphere
    Cornell,
    /// Two diffuse spheres under a sky-colored background
    Spheres,
    /// Texture and motion-blur showcase
    Demo,
}

#[derive(Debug, Parser)]
#[command(name = "ember", about = "CPU Monte Carlo path tracer")]
struct Args {
    /// Scanline chunk to render: -1 for the whole image, -2 for the header
    /// only, 0..chunks for one band
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    chunk: i64,

    /// Number of scanline bands the image is split into
    #[arg(long, default_value_t = 30)]
    chunks: u32,

    /// Scene to render
    #[arg(long, value_enum, default_value_t = SceneKind::Cornell)]
    scene: SceneKind,

    /// Override the image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Override the samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Override the maximum bounce depth
    #[arg(long)]
    depth: Option<u32>,

    /// Base seed; row j of the image draws from seed + j
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    let select = ChunkSelect::from_index(args.chunk, args.chunks).ok_or_else(|| {
        anyhow!(
            "chunk index {} out of range for {} chunks",
            args.chunk,
            args.chunks
        )
    })?;

    let scene = scenes::build(args.scene, args.width, args.samples, args.depth)?;
    log::debug!(
        "scene {:?}, {}x{}",
        args.scene,
        scene.camera.image_width(),
        scene.camera.image_height()
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    ember_render::render_chunk(
        &scene.camera,
        &scene.world,
        scene.lights.as_ref(),
        select,
        args.chunks,
        args.seed,
        &mut out,
    )?;
    out.flush()?;

    Ok(())
}
