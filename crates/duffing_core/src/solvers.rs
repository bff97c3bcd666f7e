use crate::duffing::DuffingParams;
use crate::error::Error;
use crate::traits::{constant, FastDerivative, Scalar, SlowDerivative};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A stepper that advances the coupled pair `(x, y)` by one step of size dt.
pub trait CoupledStepper<T: Scalar> {
    /// t: time at the start of the step
    /// x, y: current state (updated after step)
    #[allow(clippy::too_many_arguments)]
    fn step(
        &self,
        fast: &impl FastDerivative<T>,
        slow: &impl SlowDerivative<T>,
        params: &DuffingParams<T>,
        t: T,
        x: &mut T,
        y: &mut T,
        dt: T,
    );
}

/// Semi-coupled Runge-Kutta 4th order stepper.
///
/// Each variable runs its own four stages with the other variable frozen at the
/// start-of-step value:
/// - the `y` stages hold `x` fixed and advance `y` through the slow rate law;
/// - the `x` stages are seeded by the frozen `y` and fed back their own increments,
///   `K2x = dt * f(y + K1x/2)` and so on.
///
/// This is not the textbook coupled RK4 (see [`FullyCoupledRk4`]) and the two give
/// different trajectories.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiCoupledRk4;

impl<T: Scalar> CoupledStepper<T> for SemiCoupledRk4 {
    fn step(
        &self,
        fast: &impl FastDerivative<T>,
        slow: &impl SlowDerivative<T>,
        params: &DuffingParams<T>,
        t: T,
        x: &mut T,
        y: &mut T,
        dt: T,
    ) {
        let half = constant::<T>(0.5);
        let two = constant::<T>(2.0);
        let six = constant::<T>(6.0);
        let (x0, y0) = (*x, *y);
        let (nu, forcing) = (params.nu, params.forcing);

        let k1y = dt * slow.rate(t, y0, x0, nu, forcing);
        let k2y = dt * slow.rate(t + dt / two, y0 + k1y * half, x0, nu, forcing);
        let k3y = dt * slow.rate(t + dt / two, y0 + k2y * half, x0, nu, forcing);
        let k4y = dt * slow.rate(t + dt, y0 + k3y, x0, nu, forcing);

        let k1x = dt * fast.rate(y0);
        let k2x = dt * fast.rate(y0 + k1x * half);
        let k3x = dt * fast.rate(y0 + k2x * half);
        let k4x = dt * fast.rate(y0 + k3x);

        *y = y0 + (k1y + two * k2y + two * k3y + k4y) / six;
        *x = x0 + (k1x + two * k2x + two * k3x + k4x) / six;
    }
}

/// Classic Runge-Kutta 4th order over the two-variable state.
///
/// Every stage advances `x` and `y` together, so each rate sees the other variable's
/// intermediate estimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullyCoupledRk4;

impl<T: Scalar> CoupledStepper<T> for FullyCoupledRk4 {
    fn step(
        &self,
        fast: &impl FastDerivative<T>,
        slow: &impl SlowDerivative<T>,
        params: &DuffingParams<T>,
        t: T,
        x: &mut T,
        y: &mut T,
        dt: T,
    ) {
        let half = constant::<T>(0.5);
        let two = constant::<T>(2.0);
        let six = constant::<T>(6.0);
        let (x0, y0) = (*x, *y);
        let (nu, forcing) = (params.nu, params.forcing);
        let t_mid = t + dt * half;

        // k1 = f(t, s)
        let k1x = fast.rate(y0);
        let k1y = slow.rate(t, y0, x0, nu, forcing);

        // k2 = f(t + dt/2, s + dt*k1/2)
        let (xs, ys) = (x0 + dt * k1x * half, y0 + dt * k1y * half);
        let k2x = fast.rate(ys);
        let k2y = slow.rate(t_mid, ys, xs, nu, forcing);

        // k3 = f(t + dt/2, s + dt*k2/2)
        let (xs, ys) = (x0 + dt * k2x * half, y0 + dt * k2y * half);
        let k3x = fast.rate(ys);
        let k3y = slow.rate(t_mid, ys, xs, nu, forcing);

        // k4 = f(t + dt, s + dt*k3)
        let (xs, ys) = (x0 + dt * k3x, y0 + dt * k3y);
        let k4x = fast.rate(ys);
        let k4y = slow.rate(t + dt, ys, xs, nu, forcing);

        // s_next = s + dt/6 * (k1 + 2k2 + 2k3 + k4)
        *x = x0 + dt * (k1x + two * k2x + two * k3x + k4x) / six;
        *y = y0 + dt * (k1y + two * k2y + two * k3y + k4y) / six;
    }
}

/// Stepping scheme selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepScheme {
    /// Reference behaviour; see [`SemiCoupledRk4`].
    #[default]
    SemiCoupled,
    /// Opt-in textbook RK4; see [`FullyCoupledRk4`].
    FullyCoupled,
}

impl StepScheme {
    pub fn name(self) -> &'static str {
        match self {
            StepScheme::SemiCoupled => "semi_coupled",
            StepScheme::FullyCoupled => "fully_coupled",
        }
    }
}

impl fmt::Display for StepScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StepScheme {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "semi_coupled" | "semi-coupled" | "semi" => Ok(StepScheme::SemiCoupled),
            "fully_coupled" | "fully-coupled" | "rk4" => Ok(StepScheme::FullyCoupled),
            other => Err(Error::UnknownScheme(other.to_string())),
        }
    }
}
