use anyhow::Result;
use renderer::{Renderer, RendererConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> Result<()> {
    let config = RendererConfig {
        surface_size: cli.size,
        gpu_debug: cli.gpu_debug,
    };
    tracing::info!(
        width = config.surface_size.0,
        height = config.surface_size.1,
        gpu_debug = config.gpu_debug,
        "bootstrapping renderer"
    );

    let mut renderer = Renderer::new(config);
    renderer.run()
}
