//! Atlas: builds the constellation atlas JSON from the Stellarium tables
//! and a Hipparcos catalog export.

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use tracing::info;
use tracing_subscriber::EnvFilter;

use constellation_atlas::catalogs::{hipparcos, stellarium};
use constellation_atlas::{build_atlas, write_atlas_to_file, AtlasConfig, StarCatalog};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    configure_thread_pool(cli.threads)?;
    run(&cli)
}

fn configure_thread_pool(threads: usize) -> anyhow::Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .context("Failed to configure worker pool")
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = AtlasConfig::default();

    let names = stellarium::load_constellation_names_from_file(&cli.names)
        .with_context(|| format!("Failed to read name table {}", cli.names.display()))?;
    info!("Loaded {} constellation names", names.len());

    let lines = stellarium::load_constellation_lines_from_file(&cli.lines)
        .with_context(|| format!("Failed to read line table {}", cli.lines.display()))?;
    info!("Loaded {} constellation line lists", lines.len());

    let rows = hipparcos::load_hipparcos_catalog_from_file(&cli.stars)
        .with_context(|| format!("Failed to read star catalog {}", cli.stars.display()))?;
    let catalog = StarCatalog::from_hipparcos(&rows, config.load_magnitude_limit());

    let report = build_atlas(&lines, &names, &catalog, &config);
    if report.atlas.is_empty() && !lines.is_empty() {
        anyhow::bail!("No constellation could be sketched");
    }

    write_atlas_to_file(&report.atlas, &cli.output)?;
    info!(
        "Wrote {} constellations to {}",
        report.atlas.len(),
        cli.output.display()
    );
    Ok(())
}
