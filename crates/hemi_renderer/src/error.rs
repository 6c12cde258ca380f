use thiserror::Error;

/// Errors surfaced by a render call.
///
/// Misses, tangent hits and empty scenes are ordinary outcomes and never
/// show up here; only bad configuration and I/O do.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Worker count must be at least 1")]
    ZeroWorkers,

    #[error("Image dimensions must be nonzero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("Samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("Max bounce depth is 0, every sample would terminate immediately; use at least 1")]
    ZeroDepth,

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Worker for band {band} panicked")]
    WorkerPanicked { band: usize },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
