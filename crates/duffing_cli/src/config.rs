//! YAML run configuration.

use anyhow::{Context, Result};
use duffing_core::plot::PlotConfig;
use duffing_core::strobe::{available_periods, strobe_stride};
use duffing_core::{
    integrate_with, DuffingParams, IntegrationSettings, PositionRate, TimeWindow, Trajectory,
    VelocityRate,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

pub const TEMPLATE: &str = "\
# Integration window in units of 2*pi: t runs from 2*pi*a to 2*pi*b.
window:
  a: 0.0
  b: 50.0
initial:
  x0: 1.0
  y0: 0.0
params:
  nu: 0.25
  forcing: 0.4
settings:
  scheme: semi_coupled   # or fully_coupled
strobe_periods: 50
plot:
  title: Forced Duffing oscillator
  color: green
  math_labels: true
";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialState {
    pub x0: f64,
    pub y0: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub window: TimeWindow,
    #[serde(default)]
    pub initial: InitialState,
    #[serde(default)]
    pub params: DuffingParams,
    #[serde(default)]
    pub settings: IntegrationSettings,
    #[serde(default)]
    pub strobe_periods: Option<usize>,
    #[serde(default)]
    pub plot: PlotConfig,
}

impl RunConfig {
    pub fn integrate(&self) -> Result<Trajectory> {
        integrate_with(
            self.window,
            self.initial.x0,
            self.initial.y0,
            self.params,
            &PositionRate,
            &VelocityRate,
            self.settings,
        )
        .context("Integration failed")
    }

    /// Explicit override, then the configured count, then every period the run covers.
    pub fn strobe_periods(
        &self,
        trajectory: &Trajectory,
        requested: Option<usize>,
    ) -> Result<usize> {
        if let Some(periods) = requested.or(self.strobe_periods) {
            return Ok(periods);
        }
        let stride = strobe_stride(trajectory.dt)?;
        Ok(available_periods(trajectory.len(), stride))
    }
}

pub fn parse_run_config(text: &str) -> Result<RunConfig> {
    serde_yaml::from_str(text).context("Failed to parse run config")
}

pub fn load_run_config(path: &Path) -> Result<RunConfig> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open config file {}", path.display()))?;
    serde_yaml::from_reader(file)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}
