//! Hemi command line renderer.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use hemi_core::{load_scene, Scene};
use hemi_renderer::{
    render_with, AmbientOcclusion, Camera, Integrator, PathIntegrator, RenderConfig, SamplerKind,
    DEFAULT_ORIGIN,
};

use cli::{Args, IntegratorChoice};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Hemi");

    let (scene, origin) = match &args.scene {
        Some(path) => {
            let description = load_scene(path)
                .with_context(|| format!("Failed to load scene {}", path.display()))?;
            let origin = description.camera.unwrap_or(DEFAULT_ORIGIN);
            (description.into_scene(), origin)
        }
        None => (Scene::demo(), DEFAULT_ORIGIN),
    };

    let camera = Camera::new(origin)
        .with_resolution(args.width, args.height)
        .with_jitter(args.jitter);

    let sampler = SamplerKind::from(args.sampler);
    let integrator: Box<dyn Integrator> = match args.integrator {
        IntegratorChoice::Path => {
            Box::new(PathIntegrator::new(args.max_depth).with_sampler(sampler))
        }
        IntegratorChoice::Ao => {
            let mut ao = AmbientOcclusion::new(args.ao_samples);
            if let Some(light) = args.light {
                ao = ao.with_light(light, args.light_weight);
            }
            Box::new(ao.with_sampler(sampler))
        }
    };

    let mut config = RenderConfig {
        samples_per_pixel: args.samples,
        seed: args.seed,
        ..Default::default()
    };
    if let Some(workers) = args.workers {
        config.workers = workers;
    }

    let output =
        render_with(&scene, &camera, integrator.as_ref(), &config).context("Render failed")?;

    output
        .image
        .save(&args.output, args.gamma)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
