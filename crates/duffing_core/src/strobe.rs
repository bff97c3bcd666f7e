//! Stroboscopic (once per forcing period) sampling of a trajectory.

use crate::error::{Error, Result};
use crate::grid::to_f64;
use crate::integrator::Trajectory;
use crate::traits::Scalar;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrobePoint<T = f64> {
    pub t: T,
    pub x: T,
    pub y: T,
}

/// Number of integration steps in one forcing period, `round(2π / dt)`.
pub fn strobe_stride(dt: f64) -> Result<usize> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(Error::StrideMismatch { dt });
    }
    let stride = (TAU / dt).round();
    if stride < 1.0 {
        return Err(Error::StrideMismatch { dt });
    }
    Ok(stride as usize)
}

/// How many stroboscopic samples fit in a trajectory of `len` samples.
pub fn available_periods(len: usize, stride: usize) -> usize {
    if len == 0 || stride == 0 {
        0
    } else {
        (len - 1) / stride + 1
    }
}

/// Indices `k * stride` for `k in 0..periods`.
pub fn stroboscopic_indices(len: usize, periods: usize, stride: usize) -> Result<Vec<usize>> {
    let available = available_periods(len, stride);
    if periods > available {
        return Err(Error::StrobeOutOfRange { periods, available });
    }
    Ok((0..periods).map(|k| k * stride).collect())
}

/// State at the start of each of the first `periods` forcing periods.
///
/// The stride comes from the trajectory's own step size, so it tracks any change to it.
pub fn stroboscopic_section<T: Scalar>(
    trajectory: &Trajectory<T>,
    periods: usize,
) -> Result<Vec<StrobePoint<T>>> {
    let stride = strobe_stride(to_f64(trajectory.dt))?;
    let indices = stroboscopic_indices(trajectory.len(), periods, stride)?;
    Ok(indices
        .into_iter()
        .map(|k| StrobePoint {
            t: trajectory.t[k],
            x: trajectory.x[k],
            y: trajectory.y[k],
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{TimeWindow, STEP_SIZE};

    #[test]
    fn stride_for_fixed_step_is_6283() {
        assert_eq!(strobe_stride(STEP_SIZE), Ok(6283));
    }

    #[test]
    fn stride_rejects_unusable_steps() {
        assert!(strobe_stride(0.0).is_err());
        assert!(strobe_stride(-0.001).is_err());
        assert!(strobe_stride(f64::NAN).is_err());
        assert!(strobe_stride(100.0).is_err());
    }

    #[test]
    fn indices_stay_in_bounds_for_whole_period_windows() {
        let stride = strobe_stride(STEP_SIZE).expect("stride");
        for periods in 1..=12 {
            let n = TimeWindow::<f64>::periods(periods)
                .sample_count()
                .expect("count");
            let indices = stroboscopic_indices(n, periods, stride).expect("indices");
            assert_eq!(indices.len(), periods);
            assert!(indices.iter().all(|&k| k < n));
        }
    }

    #[test]
    fn requesting_too_many_periods_fails() {
        assert_eq!(available_periods(6284, 6283), 2);
        assert_eq!(
            stroboscopic_indices(6284, 3, 6283),
            Err(Error::StrobeOutOfRange {
                periods: 3,
                available: 2
            })
        );
        assert_eq!(available_periods(0, 6283), 0);
        assert_eq!(stroboscopic_indices(0, 0, 6283), Ok(Vec::new()));
    }

    #[test]
    fn section_samples_trajectory_at_stride() {
        let n = 13_000;
        let trajectory = Trajectory {
            t: (0..n).map(|k| k as f64).collect(),
            x: (0..n).map(|k| 2.0 * k as f64).collect(),
            y: (0..n).map(|k| -(k as f64)).collect(),
            x_rate: vec![0.0; n],
            y_rate: vec![0.0; n],
            dt: STEP_SIZE,
        };
        let section = stroboscopic_section(&trajectory, 3).expect("section");
        assert_eq!(
            section,
            vec![
                StrobePoint { t: 0.0, x: 0.0, y: 0.0 },
                StrobePoint { t: 6283.0, x: 12566.0, y: -6283.0 },
                StrobePoint { t: 12566.0, x: 25132.0, y: -12566.0 },
            ]
        );
    }
}
