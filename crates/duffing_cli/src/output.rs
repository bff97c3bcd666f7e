//! CSV and JSON writers.

use anyhow::{Context, Result};
use duffing_core::plot::PlotSeries;
use duffing_core::strobe::StrobePoint;
use duffing_core::Trajectory;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Buffered writer to `path`, or to stdout when no path is given.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

pub fn write_trajectory_csv<W: Write>(writer: &mut W, trajectory: &Trajectory) -> io::Result<()> {
    writeln!(writer, "t,x,y,x_rate,y_rate")?;
    for k in 0..trajectory.len() {
        writeln!(
            writer,
            "{},{},{},{},{}",
            trajectory.t[k],
            trajectory.x[k],
            trajectory.y[k],
            trajectory.x_rate[k],
            trajectory.y_rate[k]
        )?;
    }
    writer.flush()
}

pub fn write_section_csv<W: Write>(writer: &mut W, section: &[StrobePoint]) -> io::Result<()> {
    writeln!(writer, "t,x,y")?;
    for point in section {
        writeln!(writer, "{},{},{}", point.t, point.x, point.y)?;
    }
    writer.flush()
}

pub fn write_series_json<W: Write>(writer: &mut W, series: &PlotSeries) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, series).context("Failed to serialize plot series")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
