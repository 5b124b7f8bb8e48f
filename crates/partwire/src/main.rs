//! partwire - Entry Point
//!
//! Loads the configuration, initializes logging and builds the composition
//! container from every part type linked into the binary, then reports what
//! was wired.

use std::path::PathBuf;

use clap::Parser;
use partwire::domain::{ComposablePartCatalog, ComposablePartDefinition};
use partwire::infrastructure::logging::init_logging;
use partwire::providers::DiscoveredCatalog;
use partwire::{CompositionBootstrap, ConfigLoader};
use tracing::info;

/// Command line interface for partwire
#[derive(Parser, Debug)]
#[command(name = "partwire")]
#[command(about = "partwire - inspect the parts wired into a composition container")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only list discovered part types, do not build the container
    #[arg(long)]
    pub list: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;
    init_logging(&config.logging)?;

    let excluded = &config.composition.excluded_parts;
    let discovered = DiscoveredCatalog::filtered(|name| !excluded.iter().any(|skip| skip == name));
    for (name, part) in discovered.names().iter().zip(discovered.parts()) {
        println!("{name}: {}", describe_exports(part.as_ref()));
    }
    if cli.list {
        return Ok(());
    }

    let container = CompositionBootstrap::new(config.composition).build()?;
    info!(registrations = container.registration_count(), "Container built");
    println!("{} registrations", container.registration_count());
    container.dispose();
    Ok(())
}

fn describe_exports(part: &dyn ComposablePartDefinition) -> String {
    let contracts: Vec<&str> = part
        .export_definitions()
        .iter()
        .map(|export| export.contract_name().as_str())
        .collect();
    if contracts.is_empty() {
        "no exports".to_string()
    } else {
        contracts.join(", ")
    }
}
