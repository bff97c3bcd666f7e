//! Render-ready series for the line, phase-portrait and stroboscopic views.
//!
//! Nothing here draws. Each builder takes its own [`PlotConfig`] so a renderer never
//! needs shared styling state.

use crate::error::{Error, Result};
use crate::integrator::Trajectory;
use crate::strobe::stroboscopic_section;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub title: String,
    pub color: String,
    pub axis_font_size: f64,
    pub tick_font_size: f64,
    pub title_font_size: f64,
    /// Emit TeX-style axis labels (`$x$`) instead of plain text.
    pub math_labels: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            color: "green".to_string(),
            axis_font_size: 18.0,
            tick_font_size: 16.0,
            title_font_size: 20.0,
            math_labels: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotKind {
    Line,
    Phase,
    Stroboscopic,
}

impl FromStr for PlotKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "line" => Ok(PlotKind::Line),
            "phase" | "parametric" => Ok(PlotKind::Phase),
            "stroboscopic" | "strobe" | "scatter" => Ok(PlotKind::Stroboscopic),
            other => Err(Error::UnknownPlotKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    Line,
    Scatter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSeries {
    pub kind: PlotKind,
    pub mark: Mark,
    pub horizontal: Vec<f64>,
    pub vertical: Vec<f64>,
    pub horizontal_label: String,
    pub vertical_label: String,
    pub config: PlotConfig,
}

enum Axis {
    Position,
    Velocity,
    Time,
}

fn label(axis: Axis, math: bool) -> String {
    let (tex, plain) = match axis {
        Axis::Position => (r"$x$", "x"),
        Axis::Velocity => (r"$\dot{x}$", "x'"),
        Axis::Time => (r"$t$", "t"),
    };
    let text = if math { tex } else { plain };
    text.to_string()
}

fn check_lengths(horizontal: &[f64], vertical: &[f64]) -> Result<()> {
    if horizontal.len() != vertical.len() {
        return Err(Error::SeriesLengthMismatch {
            horizontal: horizontal.len(),
            vertical: vertical.len(),
        });
    }
    Ok(())
}

/// Position against time, with position on the horizontal axis.
pub fn line_series(x: &[f64], t: &[f64], config: PlotConfig) -> Result<PlotSeries> {
    check_lengths(x, t)?;
    Ok(PlotSeries {
        kind: PlotKind::Line,
        mark: Mark::Line,
        horizontal: x.to_vec(),
        vertical: t.to_vec(),
        horizontal_label: label(Axis::Position, config.math_labels),
        vertical_label: label(Axis::Time, config.math_labels),
        config,
    })
}

/// Phase portrait: velocity against position.
pub fn phase_series(x: &[f64], y: &[f64], config: PlotConfig) -> Result<PlotSeries> {
    check_lengths(x, y)?;
    Ok(PlotSeries {
        kind: PlotKind::Phase,
        mark: Mark::Line,
        horizontal: x.to_vec(),
        vertical: y.to_vec(),
        horizontal_label: label(Axis::Position, config.math_labels),
        vertical_label: label(Axis::Velocity, config.math_labels),
        config,
    })
}

/// Scatter of the state at the start of each of the first `periods` forcing periods.
pub fn stroboscopic_series(
    trajectory: &Trajectory,
    periods: usize,
    config: PlotConfig,
) -> Result<PlotSeries> {
    let section = stroboscopic_section(trajectory, periods)?;
    Ok(PlotSeries {
        kind: PlotKind::Stroboscopic,
        mark: Mark::Scatter,
        horizontal: section.iter().map(|p| p.x).collect(),
        vertical: section.iter().map(|p| p.y).collect(),
        horizontal_label: label(Axis::Position, config.math_labels),
        vertical_label: label(Axis::Velocity, config.math_labels),
        config,
    })
}

/// Builds the series of the requested kind from a full trajectory.
pub fn series_for(
    kind: PlotKind,
    trajectory: &Trajectory,
    periods: usize,
    config: PlotConfig,
) -> Result<PlotSeries> {
    match kind {
        PlotKind::Line => line_series(&trajectory.x, &trajectory.t, config),
        PlotKind::Phase => phase_series(&trajectory.x, &trajectory.y, config),
        PlotKind::Stroboscopic => stroboscopic_series(trajectory, periods, config),
    }
}
