use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use hemi_renderer::{SamplerKind, Vec3};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Radiance estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IntegratorChoice {
    /// Recursive diffuse path tracing
    Path,
    /// Single-bounce ambient occlusion
    Ao,
}

/// Bounce direction sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SamplerChoice {
    /// normalize(n + normalize(r)), r uniform in a cube
    Biased,
    /// Cosine-weighted via the concentric disk mapping
    Cosine,
}

impl From<SamplerChoice> for SamplerKind {
    fn from(choice: SamplerChoice) -> Self {
        match choice {
            SamplerChoice::Biased => SamplerKind::Biased,
            SamplerChoice::Cosine => SamplerKind::Cosine,
        }
    }
}

/// Parse a vector written as `x,y,z`.
pub fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let components = s
        .split(',')
        .map(|c| c.trim().parse::<f32>().map_err(|e| format!("{c:?}: {e}")))
        .collect::<Result<Vec<f32>, String>>()?;

    match components.as_slice() {
        &[x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(format!("expected x,y,z, got {} components", components.len())),
    }
}

#[derive(Debug, Parser)]
#[command(name = "hemi")]
#[command(about = "A band-parallel diffuse path tracer")]
pub struct Args {
    /// JSON scene file; the built-in demo scene is used when omitted
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, default_value = "1000")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "1000")]
    pub height: u32,

    /// Worker threads, one horizontal band each (defaults to available parallelism)
    #[arg(long, short = 'j')]
    pub workers: Option<usize>,

    /// Samples per pixel
    #[arg(long, short = 's', default_value = "4")]
    pub samples: u32,

    /// Maximum bounce depth for the path integrator
    #[arg(long, default_value = "3")]
    pub max_depth: u32,

    /// Base RNG seed
    #[arg(long, default_value = "0")]
    pub seed: u64,

    #[arg(long, value_enum, default_value = "path")]
    pub integrator: IntegratorChoice,

    /// Occlusion rays per hit for the ao integrator
    #[arg(long, default_value = "16")]
    pub ao_samples: u32,

    /// Direction toward a directional light for the ao integrator, as x,y,z
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    pub light: Option<Vec3>,

    /// Share of the direct light term in [0, 1]; ambient occlusion gets the rest
    #[arg(long, default_value = "0.5")]
    pub light_weight: f32,

    #[arg(long, value_enum, default_value = "biased")]
    pub sampler: SamplerChoice,

    /// Jitter primary rays within each pixel
    #[arg(long)]
    pub jitter: bool,

    /// Apply gamma 2 before quantizing
    #[arg(long)]
    pub gamma: bool,

    /// Output image; format follows the extension (png, bmp, ppm)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
