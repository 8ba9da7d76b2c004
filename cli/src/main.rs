//! Command-line interface for the meshnest pipeline.

use clap::{Parser, Subcommand};
use log::LevelFilter;
use meshnest::correspondence::{CorrespondenceReport, DEFAULT_MATCH_THRESHOLD};
use meshnest::pipeline::{NestConfig, NestPipeline};
use meshnest::tetgen::load_volume;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "meshnest")]
#[command(about = "Nest closed surface meshes into one tetrahedral volume")]
#[command(version)]
struct Cli {
    /// Raise log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Nest PLY surfaces into one volume and split it back into regions
    Nest {
        /// Input PLY files, outermost surface first
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Base name for the combined output files
        #[arg(short, long, default_value = "combined")]
        output: PathBuf,

        /// Tetgen executable to use instead of searching PATH
        #[arg(long)]
        tetgen: Option<PathBuf>,
    },
    /// Report vertices of a volume that are missing from a reference volume
    Check {
        /// Basename of the `.node`/`.ele` pair to check
        target: PathBuf,

        /// Basename of the `.node`/`.ele` pair to check against
        reference: PathBuf,

        /// Distance threshold for matching displaced vertices
        #[arg(short, long, default_value_t = DEFAULT_MATCH_THRESHOLD)]
        threshold: f64,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(error) = run(cli.command) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .init();
}

fn run(command: Commands) -> meshnest::Result<()> {
    match command {
        Commands::Nest {
            inputs,
            output,
            tetgen,
        } => nest(&inputs, output, tetgen),
        Commands::Check {
            target,
            reference,
            threshold,
        } => check(&target, &reference, threshold),
    }
}

fn nest(inputs: &[PathBuf], output: PathBuf, tetgen: Option<PathBuf>) -> meshnest::Result<()> {
    let mut config = NestConfig::new().output_base(output);
    config.executable = tetgen;

    let pipeline = NestPipeline::new(config)?;
    let report = pipeline.run(inputs)?;

    for input in &report.inputs {
        println!(
            "{}: {} vertices, {} faces, {} tetrahedra, seed {}",
            input.name, input.vertices, input.faces, input.tetrahedra, input.seed
        );
    }
    println!(
        "combined: {} tetrahedra in {} regions ({})",
        report.combined_tetrahedra,
        report.regions.len(),
        report.smesh.display()
    );
    for (region, path) in &report.regions {
        println!("  region {}: {}", region, path.display());
    }
    Ok(())
}

/// Gaps are a report, not a failure; only I/O and parse problems error.
fn check(target: &Path, reference: &Path, threshold: f64) -> meshnest::Result<()> {
    let target_volume = load_volume(target)?;
    let reference_volume = load_volume(reference)?;

    let report = CorrespondenceReport::compare(
        target_volume.vertices(),
        reference_volume.vertices(),
        threshold,
    );

    println!("{report}");
    for (point, distance) in report.matches.iter().zip(&report.distances) {
        println!("  matched {point} at distance {distance}");
    }
    for point in &report.near_misses {
        println!("  displaced {point}");
    }
    Ok(())
}
