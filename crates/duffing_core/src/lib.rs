pub mod duffing;
pub mod error;
pub mod grid;
pub mod integrator;
pub mod plot;
pub mod solvers;
pub mod strobe;
/// The `duffing_core` crate integrates the forced, damped Duffing oscillator
/// (and any other two-variable system of the same shape) with a fixed-step RK4 scheme.
/// It is generic over the scalar type, so `f32` and `f64` runs share one code path.
///
/// Key components:
/// - **Traits**: `Scalar` (numeric type abstraction), `FastDerivative`/`SlowDerivative` (rate laws).
/// - **Grid**: the time window and its evenly spaced sample grid at the fixed step size.
/// - **Solvers**: the semi-coupled RK4 stepper and the opt-in fully coupled variant.
/// - **Integrator**: runs a stepper over the grid and returns an index-aligned `Trajectory`.
/// - **Strobe/Plot**: once-per-period sampling and render-ready series.
pub mod traits;

pub use duffing::{DuffingParams, PositionRate, VelocityRate};
pub use error::{Error, Result};
pub use grid::{TimeWindow, STEP_SIZE};
pub use integrator::{
    integrate, integrate_duffing, integrate_with, IntegrationSettings, Trajectory,
};
pub use solvers::StepScheme;
