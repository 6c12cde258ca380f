//! Demo scene example.
//!
//! Renders the ground plane and three spheres and saves a PNG.

use hemi_renderer::{render_with, Camera, PathIntegrator, RenderConfig, Scene, DEFAULT_ORIGIN};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Hemi Path Tracer - Demo Scene");
    println!("=============================");

    let scene = Scene::demo();
    println!("Scene has {} primitives", scene.len());

    let camera = Camera::new(DEFAULT_ORIGIN).with_resolution(400, 400);
    let integrator = PathIntegrator::new(3);
    let config = RenderConfig {
        workers: 8,
        samples_per_pixel: 16,
        seed: 42,
    };

    println!(
        "Rendering {}x{} @ {} spp...",
        camera.image_width, camera.image_height, config.samples_per_pixel
    );

    let output = render_with(&scene, &camera, &integrator, &config).expect("Render failed");
    println!("Rendered in {:?}", output.elapsed);

    for stats in &output.bands {
        println!(
            "  band {} on {}: rows {:?}, {} pixels, {:?}",
            stats.band.index,
            stats.worker_name.as_deref().unwrap_or("?"),
            stats.rows_rendered,
            stats.pixels,
            stats.elapsed
        );
    }

    let filename = "demo.png";
    output.image.save(filename, true).expect("Failed to save image");
    println!("Saved to {}", filename);
}
