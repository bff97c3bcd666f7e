//! duffing - integrate the forced, damped Duffing oscillator
//!
//! Usage:
//!   duffing init > run.yaml                    # Write a template config
//!   duffing run run.yaml -o trajectory.csv     # Full trajectory as CSV
//!   duffing strobe run.yaml --periods 200      # Once-per-period section as CSV
//!   duffing plot run.yaml --kind phase         # Render-ready series as JSON

mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::{load_run_config, TEMPLATE};
use duffing_core::plot::{series_for, PlotKind};
use duffing_core::strobe::stroboscopic_section;
use output::{open_output, write_section_csv, write_series_json, write_trajectory_csv};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "duffing")]
#[command(about = "Fixed-step RK4 integration of the forced, damped Duffing oscillator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Integrate and write t, x, y and the recorded rates as CSV
    Run {
        /// YAML run config
        config: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the stroboscopic section (state once per forcing period) as CSV
    Strobe {
        /// YAML run config
        config: PathBuf,

        /// Number of periods to sample (default: config value, else all covered periods)
        #[arg(long)]
        periods: Option<usize>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a render-ready plot series as JSON
    Plot {
        /// YAML run config
        config: PathBuf,

        /// line, phase or strobe
        #[arg(long, default_value = "phase")]
        kind: String,

        /// Periods for the stroboscopic view
        #[arg(long)]
        periods: Option<usize>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a template run config
    Init,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            let run = load_run_config(&config)?;
            let trajectory = run.integrate()?;
            info!(
                samples = trajectory.len(),
                scheme = %run.settings.scheme,
                "integrated {}",
                config.display()
            );
            let mut writer = open_output(output.as_deref())?;
            write_trajectory_csv(&mut writer, &trajectory)?;
        }

        Commands::Strobe {
            config,
            periods,
            output,
        } => {
            let run = load_run_config(&config)?;
            let trajectory = run.integrate()?;
            let periods = run.strobe_periods(&trajectory, periods)?;
            let section = stroboscopic_section(&trajectory, periods)?;
            info!(periods, "sampled stroboscopic section");
            let mut writer = open_output(output.as_deref())?;
            write_section_csv(&mut writer, &section)?;
        }

        Commands::Plot {
            config,
            kind,
            periods,
            output,
        } => {
            let kind: PlotKind = kind.parse()?;
            let run = load_run_config(&config)?;
            let trajectory = run.integrate()?;
            let periods = run.strobe_periods(&trajectory, periods)?;
            let series = series_for(kind, &trajectory, periods, run.plot.clone())?;
            info!(points = series.horizontal.len(), ?kind, "built plot series");
            let mut writer = open_output(output.as_deref())?;
            write_series_json(&mut writer, &series)?;
        }

        Commands::Init => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(TEMPLATE.as_bytes())?;
        }
    }

    Ok(())
}
