//! elementary-ca CLI - Evolve an elementary automaton and render it.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};

use elementary_ca::{
    compute::{GridStats, run},
    render::{PbmOptions, TextStyle, title, write_pbm, write_text},
    schema::{RunConfig, Seed},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One line of characters per generation
    Text,
    /// Binary PBM bitmap
    Pbm,
    /// Serialized grid
    Json,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Evolve a 1D elementary cellular automaton",
    long_about = None,
    allow_negative_numbers = true
)]
struct Args {
    /// Wolfram rule number (0-255)
    #[arg(required_unless_present_any = ["config", "example"])]
    rule: Option<String>,

    /// Row width in cells (at least 3)
    #[arg(required_unless_present_any = ["config", "example"])]
    size: Option<String>,

    /// Number of generations, seed included (at least 1)
    #[arg(required_unless_present_any = ["config", "example"])]
    iterations: Option<String>,

    /// Boundary condition: strict or periodic
    #[arg(required_unless_present_any = ["config", "example"])]
    boundary: Option<String>,

    /// Load the run from a JSON configuration instead of positional arguments
    #[arg(short, long, conflicts_with_all = ["rule", "size", "iterations", "boundary"])]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pixels per cell for PBM output
    #[arg(long, default_value_t = 8)]
    scale: usize,

    /// Draw cell borders in PBM output
    #[arg(long)]
    gridlines: bool,

    /// Print an example JSON configuration and exit
    #[arg(long)]
    example: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    if args.example {
        return print_example_config();
    }

    let config = load_config(&args)?;
    log::info!(
        "rule {} ({:08b}), width {}, {} iterations, {} boundary",
        config.rule,
        config.rule,
        config.width,
        config.iterations,
        config.boundary
    );

    let start = Instant::now();
    let grid = run(&config)?;
    let stats = GridStats::from_grid(&grid);

    log::info!(
        "{}: {} generations in {:.2?}, population {} -> {} (max {})",
        title(&grid),
        stats.iterations,
        start.elapsed(),
        stats.initial_population,
        stats.final_population,
        stats.max_population
    );
    if let Some(period) = stats.period() {
        log::info!("row repeats with period {}", period);
    }

    let options = PbmOptions {
        scale: args.scale,
        gridlines: args.gridlines,
    };
    if args.format == OutputFormat::Pbm {
        options.validate(&grid)?;
    }

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        OutputFormat::Text => write_text(&mut out, &grid, &TextStyle::default())?,
        OutputFormat::Pbm => write_pbm(&mut out, &grid, &options)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &grid)?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<RunConfig> {
    if let Some(path) = &args.config {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        return RunConfig::from_json(&json)
            .with_context(|| format!("loading config file {}", path.display()));
    }

    match (&args.rule, &args.size, &args.iterations, &args.boundary) {
        (Some(rule), Some(size), Some(iterations), Some(boundary)) => {
            Ok(RunConfig::from_args(rule, size, iterations, boundary)?)
        }
        _ => bail!("expected <RULE> <SIZE> <ITERATIONS> <BOUNDARY> or --config <FILE>"),
    }
}

fn print_example_config() -> anyhow::Result<()> {
    let config = RunConfig {
        seed: Seed::cells(vec![32]),
        ..RunConfig::default()
    };

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use elementary_ca::schema::{Boundary, ConfigError};

    fn config_error(argv: &[&str]) -> ConfigError {
        let args = Args::try_parse_from(argv).unwrap();
        let err = load_config(&args).unwrap_err();
        err.downcast_ref::<ConfigError>().cloned().unwrap()
    }

    #[test]
    fn test_positionals() {
        let args = Args::try_parse_from(["elementary-ca", "30", "101", "50", "periodic"]).unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!((config.rule, config.width, config.iterations), (30, 101, 50));
        assert_eq!(config.boundary, Boundary::Periodic);
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_negative_positionals_reach_validation() {
        assert_eq!(
            config_error(&["elementary-ca", "90", "10", "-1", "strict"]),
            ConfigError::InvalidIterations("-1".to_string())
        );
        assert_eq!(
            config_error(&["elementary-ca", "-5", "10", "10", "strict"]),
            ConfigError::InvalidRule("-5".to_string())
        );
        assert_eq!(
            config_error(&["elementary-ca", "90", "-3", "10", "strict"]),
            ConfigError::InvalidWidth("-3".to_string())
        );
    }

    #[test]
    fn test_missing_positionals() {
        assert!(Args::try_parse_from(["elementary-ca", "90", "10"]).is_err());
        assert!(Args::try_parse_from(["elementary-ca", "--example"]).is_ok());
    }
}
