//! Forecastlab CLI — inspect, convert and submit continuous forecasts.
//!
//! Commands:
//! - `bins` — discretize a forecast, print its summary, optionally export CSV
//! - `quantiles` — show a forecast as a quantile table
//! - `fit` — show a forecast as slider components (quantile input is fitted)
//! - `submit` — build the submission JSON with a standardized `continuousCdf`

mod export;
mod input;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use forecastlab_core::config::EngineConfig;
use forecastlab_core::engine::summarize;
use forecastlab_core::submission::ForecastSubmission;

use crate::export::{export_bins_csv, print_fit, print_quantiles, print_summary};
use crate::input::ForecastFile;

#[derive(Parser)]
#[command(
    name = "forecastlab",
    about = "Forecastlab CLI — continuous forecast distributions"
)]
struct Cli {
    /// Log at debug level (RUST_LOG still takes precedence).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    /// Engine config TOML (fit and standardization settings).
    #[arg(long, global = true)]
    engine_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discretize a forecast and print its summary.
    Bins {
        /// Forecast TOML file.
        #[arg(long)]
        input: PathBuf,

        /// Write the bin table (bin,location,value,pmf,cdf) to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Convert a forecast to quantile form.
    Quantiles {
        #[arg(long)]
        input: PathBuf,
    },
    /// Convert a forecast to slider form.
    Fit {
        #[arg(long)]
        input: PathBuf,
    },
    /// Build the submission JSON.
    Submit {
        #[arg(long)]
        input: PathBuf,

        /// Overrides `question_id` from the forecast file.
        #[arg(long)]
        question_id: Option<u64>,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = load_engine_config(cli.engine_config.as_deref())?;

    match cli.command {
        Commands::Bins { input, csv } => run_bins(&input, csv.as_deref()),
        Commands::Quantiles { input } => run_quantiles(&input),
        Commands::Fit { input } => run_fit(&input, &config),
        Commands::Submit {
            input,
            question_id,
            output,
        } => run_submit(&input, question_id, output.as_deref(), &config),
    }
}

fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let config = EngineConfig::from_file(path)?;
            log::debug!("loaded engine config from {}", path.display());
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Load a forecast file; quantile problems are warnings here since the engine
/// sanitizes its input.
fn load_forecast(path: &Path) -> Result<ForecastFile> {
    let file = ForecastFile::from_file(path)?;
    if let Err(e) = file.check() {
        log::warn!("{}: {e}", path.display());
    }
    Ok(file)
}

fn run_bins(input: &Path, csv_path: Option<&Path>) -> Result<()> {
    let file = load_forecast(input)?;
    let dataset = file.forecast.to_dataset(&file.question);
    let summary = summarize(&dataset, &file.question.scaling);
    print_summary(file.forecast.mode_name(), &summary, dataset.bin_count());

    if let Some(path) = csv_path {
        let csv = export_bins_csv(&dataset, &file.question.scaling)?;
        std::fs::write(path, csv)
            .with_context(|| format!("failed to write CSV: {}", path.display()))?;
        println!();
        println!("Bin table saved to: {}", path.display());
    }
    Ok(())
}

fn run_quantiles(input: &Path) -> Result<()> {
    let file = load_forecast(input)?;
    let quantiles = file.forecast.to_quantiles(&file.question);
    print_quantiles(&quantiles, &file.question.scaling);
    Ok(())
}

fn run_fit(input: &Path, config: &EngineConfig) -> Result<()> {
    let file = load_forecast(input)?;
    let fit = file.forecast.to_sliders(&file.question, &config.fit);
    if !fit.converged {
        log::warn!(
            "slider fit stopped after {} iterations (residual {:.3e})",
            fit.iterations,
            fit.residual
        );
    }
    print_fit(&fit);
    Ok(())
}

fn run_submit(
    input: &Path,
    question_id: Option<u64>,
    output: Option<&Path>,
    config: &EngineConfig,
) -> Result<()> {
    let file = ForecastFile::from_file(input)?;
    if let Err(e) = file.check() {
        bail!("refusing to submit {}: {e}", input.display());
    }

    let submission = ForecastSubmission::build(
        question_id.or(file.question_id),
        file.forecast,
        &file.question,
        &config.standardize,
    )?;
    let json = submission.to_json()?;
    log::info!("submission fingerprint {}", submission.fingerprint()?);

    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write submission: {}", path.display()))?;
            eprintln!("Submission saved to: {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
