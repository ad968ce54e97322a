//! CLI argument definitions for atlas

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "atlas")]
#[command(about = "Build the constellation atlas consumed by the sketching client")]
#[command(version)]
pub struct Cli {
    /// Stellarium name table (constellation_names.eng.fab)
    #[arg(long)]
    pub names: PathBuf,

    /// Stellarium line table (constellationship.fab)
    #[arg(long)]
    pub lines: PathBuf,

    /// Hipparcos catalog exported from VizieR as semicolon-separated values
    #[arg(long)]
    pub stars: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = "constellation_data.json")]
    pub output: PathBuf,

    /// Number of worker threads (0 = all cores)
    #[arg(short, long, default_value = "0")]
    pub threads: usize,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
