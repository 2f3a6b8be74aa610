//! EMG burst analysis command-line interface
//!
//! - `analyze` conditions a recording, extracts bursts and compares their means
//! - `default-config` prints the default TOML configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use emg_burst::config::{load_config, AnalysisConfig, ConfigLoader};
use emg_burst::io::load_recording;
use emg_burst::processing::BurstPipeline;
use emg_burst::report::AnalysisReport;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "emg-burst")]
#[command(author, version, about = "EMG burst extraction and analysis", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a two-column `time,voltage` recording
    Analyze {
        /// Recording to analyze
        file: PathBuf,

        /// TOML configuration file (defaults to ./emg-burst.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Samples per tapering window
        #[arg(short, long)]
        window_size: Option<usize>,

        /// Sample rate of the recording in Hz
        #[arg(short, long)]
        sample_rate: Option<f64>,

        /// Significance level of the variance test
        #[arg(short, long)]
        alpha: Option<f64>,

        /// Skip the variance test
        #[arg(long)]
        descriptive: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default configuration as TOML
    DefaultConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze {
            file,
            config,
            window_size,
            sample_rate,
            alpha,
            descriptive,
            json,
        } => {
            let mut analysis_config = match &config {
                Some(path) => load_config(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => ConfigLoader::new().load().context("Failed to load config")?,
            };
            if let Some(window_size) = window_size {
                analysis_config.window_size = window_size;
            }
            if let Some(sample_rate) = sample_rate {
                analysis_config.sample_rate_hz = sample_rate;
            }
            if let Some(alpha) = alpha {
                analysis_config.significance_level = alpha;
            }

            cmd_analyze(&file, &analysis_config, descriptive, json)
        }

        Commands::DefaultConfig => {
            let toml = AnalysisConfig::default()
                .to_toml()
                .context("Failed to render default config")?;
            print!("{}", toml);
            Ok(())
        }
    }
}

fn cmd_analyze(file: &Path, config: &AnalysisConfig, descriptive: bool, json: bool) -> Result<()> {
    let pipeline = BurstPipeline::new(config).context("Invalid analysis configuration")?;
    let recording = load_recording(file, config.sample_rate_hz)
        .with_context(|| format!("Failed to read recording {}", file.display()))?;

    info!(
        samples = recording.len(),
        window_size = config.window_size,
        sample_rate_hz = config.sample_rate_hz,
        "analyzing recording"
    );

    let output = if descriptive {
        pipeline.run_descriptive(&recording.signal)
    } else {
        pipeline.run(&recording.signal)
    }
    .with_context(|| format!("Analysis of {} failed", file.display()))?;

    let report = AnalysisReport::from_output(&output, config.significance_level);
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }

    Ok(())
}
