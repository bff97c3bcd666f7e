use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Input-validation failures. None of these are raised from inside the stepping loop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Time window bounds must be finite (a = {a}, b = {b}).")]
    NonFiniteWindow { a: f64, b: f64 },

    #[error("Time window end must not precede its start (a = {a}, b = {b}).")]
    ReversedWindow { a: f64, b: f64 },

    #[error("Time window with a = {a}, b = {b} needs {samples} samples, which cannot be allocated.")]
    GridTooLarge { a: f64, b: f64, samples: f64 },

    #[error("Requested {periods} stroboscopic periods but the trajectory only covers {available}.")]
    StrobeOutOfRange { periods: usize, available: usize },

    #[error("Cannot derive a stroboscopic stride from step size {dt}.")]
    StrideMismatch { dt: f64 },

    #[error("Series lengths differ: {horizontal} horizontal samples vs {vertical} vertical samples.")]
    SeriesLengthMismatch { horizontal: usize, vertical: usize },

    #[error("Unknown step scheme \"{0}\".")]
    UnknownScheme(String),

    #[error("Unknown plot kind \"{0}\".")]
    UnknownPlotKind(String),
}
