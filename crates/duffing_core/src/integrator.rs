use crate::duffing::{DuffingParams, PositionRate, VelocityRate};
use crate::error::Result;
use crate::grid::{TimeWindow, STEP_SIZE};
use crate::solvers::{CoupledStepper, FullyCoupledRk4, SemiCoupledRk4, StepScheme};
use crate::traits::{constant, FastDerivative, Scalar, SlowDerivative};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationSettings {
    pub scheme: StepScheme,
}

/// Output of one integration run.
///
/// `t`, `x`, `y`, `x_rate` and `y_rate` always have the same length and share indices.
/// `x_rate`/`y_rate` hold the rate laws evaluated at each recorded sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory<T = f64> {
    pub t: Vec<T>,
    pub x: Vec<T>,
    pub y: Vec<T>,
    pub x_rate: Vec<T>,
    pub y_rate: Vec<T>,
    /// Step size the trajectory was integrated with.
    pub dt: T,
}

impl<T: Scalar> Trajectory<T> {
    fn with_grid(window: &TimeWindow<T>, t: Vec<T>, dt: T) -> Result<Self> {
        let n = t.len();
        let zeroed = || -> Result<Vec<T>> {
            let mut column = window.allocate(n)?;
            column.resize(n, T::zero());
            Ok(column)
        };
        Ok(Self {
            x: zeroed()?,
            y: zeroed()?,
            x_rate: zeroed()?,
            y_rate: zeroed()?,
            t,
            dt,
        })
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// `(t, x, y)` at sample `k`.
    pub fn sample(&self, k: usize) -> Option<(T, T, T)> {
        Some((*self.t.get(k)?, *self.x.get(k)?, *self.y.get(k)?))
    }

    pub fn into_parts(self) -> (Vec<T>, Vec<T>, Vec<T>) {
        (self.t, self.x, self.y)
    }
}

/// Integrates the coupled pair `x' = fast(y)`, `y' = slow(t, y, x, nu, F)` over the
/// window with the fixed step size and the semi-coupled RK4 scheme.
pub fn integrate<T, X, Y>(
    window: TimeWindow<T>,
    x0: T,
    y0: T,
    params: DuffingParams<T>,
    fast: &X,
    slow: &Y,
) -> Result<Trajectory<T>>
where
    T: Scalar,
    X: FastDerivative<T>,
    Y: SlowDerivative<T>,
{
    integrate_with(
        window,
        x0,
        y0,
        params,
        fast,
        slow,
        IntegrationSettings::default(),
    )
}

/// Same as [`integrate`] with an explicit stepping scheme.
pub fn integrate_with<T, X, Y>(
    window: TimeWindow<T>,
    x0: T,
    y0: T,
    params: DuffingParams<T>,
    fast: &X,
    slow: &Y,
    settings: IntegrationSettings,
) -> Result<Trajectory<T>>
where
    T: Scalar,
    X: FastDerivative<T>,
    Y: SlowDerivative<T>,
{
    let grid = window.time_grid()?;
    debug!(
        a = ?window.a,
        b = ?window.b,
        samples = grid.len(),
        scheme = %settings.scheme,
        "integrating coupled system"
    );
    if grid.is_empty() {
        warn!(a = ?window.a, b = ?window.b, "time window is empty; returning empty trajectory");
    }

    let mut trajectory = Trajectory::with_grid(&window, grid, constant::<T>(STEP_SIZE))?;
    match settings.scheme {
        StepScheme::SemiCoupled => {
            run(&SemiCoupledRk4, &mut trajectory, x0, y0, &params, fast, slow)
        }
        StepScheme::FullyCoupled => {
            run(&FullyCoupledRk4, &mut trajectory, x0, y0, &params, fast, slow)
        }
    }

    debug!(samples = trajectory.len(), "integration finished");
    Ok(trajectory)
}

/// Integrates the Duffing oscillator with the default rate laws.
pub fn integrate_duffing<T: Scalar>(
    window: TimeWindow<T>,
    x0: T,
    y0: T,
    params: DuffingParams<T>,
) -> Result<Trajectory<T>> {
    integrate(window, x0, y0, params, &PositionRate, &VelocityRate)
}

fn run<T, S, X, Y>(
    stepper: &S,
    trajectory: &mut Trajectory<T>,
    x0: T,
    y0: T,
    params: &DuffingParams<T>,
    fast: &X,
    slow: &Y,
) where
    T: Scalar,
    S: CoupledStepper<T>,
    X: FastDerivative<T>,
    Y: SlowDerivative<T>,
{
    let n = trajectory.len();
    if n == 0 {
        return;
    }
    let dt = trajectory.dt;
    trajectory.x[0] = x0;
    trajectory.y[0] = y0;

    for k in 0..n {
        let (t, x, y) = (trajectory.t[k], trajectory.x[k], trajectory.y[k]);
        trajectory.x_rate[k] = fast.rate(y);
        trajectory.y_rate[k] = slow.rate(t, y, x, params.nu, params.forcing);

        if k == n - 1 {
            break;
        }

        let (mut x_next, mut y_next) = (x, y);
        stepper.step(fast, slow, params, t, &mut x_next, &mut y_next, dt);
        trajectory.x[k + 1] = x_next;
        trajectory.y[k + 1] = y_next;
    }
}
