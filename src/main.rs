use std::error::Error;
use std::path::PathBuf;

use bmrot::bmfont;
use bmrot::config::{self, Options, DEFAULT_CONFIG_PATH};
use clap::Parser;
use log::{error, info, warn};

/// Rotate a BMFont text descriptor 90 degrees clockwise and print the result.
#[derive(Parser)]
#[command(name = "bmrot")]
#[command(version)]
struct Cli {
    /// Font descriptor (.fnt, text format)
    file: PathBuf,

    /// Clockwise quarter turns to apply (overrides the config file)
    #[arg(short, long)]
    turns: Option<u32>,

    /// Config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Logging is configured from the config file, so read it first and report
    // problems once the logger is up.
    let loaded = config::load(&cli.config);
    let Options { turns, log_level } = loaded
        .as_ref()
        .cloned()
        .unwrap_or_default()
        .with_cli(cli.turns, cli.verbose);

    // --- Logging Setup ---
    // RUST_LOG directives are applied last, so they win over the default level.
    env_logger::Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .init();

    if let Err(e) = loaded {
        warn!("{}; using defaults.", e);
    }

    let mut desc = match bmfont::load_descriptor(&cli.file) {
        Ok(desc) => desc,
        Err(e) => {
            error!("Failed to load font descriptor: {}", e);
            return Err(e.into());
        }
    };

    for _ in 0..turns {
        bmfont::rotate(&mut desc);
    }
    info!("Applied {} clockwise quarter turn(s) to {:?}", turns, cli.file);

    println!("{}", bmfont::render(&desc));
    Ok(())
}
