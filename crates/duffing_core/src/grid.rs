use crate::error::{Error, Result};
use crate::traits::{constant, Scalar};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::mem::size_of;

/// Fixed integration step.
pub const STEP_SIZE: f64 = 0.001;

/// Integration window in units of 2π: the run covers `[2πa, 2πb]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow<T = f64> {
    pub a: T,
    pub b: T,
}

impl<T: Scalar> TimeWindow<T> {
    pub fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    /// Window spanning `periods` forcing periods from `t = 0`.
    pub fn periods(periods: usize) -> Self {
        Self {
            a: T::zero(),
            b: T::from_usize(periods).unwrap_or_else(T::infinity),
        }
    }

    pub fn start(&self) -> T {
        constant::<T>(2.0) * self.a * constant::<T>(PI)
    }

    pub fn end(&self) -> T {
        constant::<T>(2.0) * self.b * constant::<T>(PI)
    }

    /// Rejects non-finite bounds and reversed windows. `a == b` is accepted and
    /// yields an empty grid.
    pub fn validate(&self) -> Result<()> {
        if !self.a.is_finite() || !self.b.is_finite() {
            return Err(Error::NonFiniteWindow {
                a: to_f64(self.a),
                b: to_f64(self.b),
            });
        }
        if self.b < self.a {
            return Err(Error::ReversedWindow {
                a: to_f64(self.a),
                b: to_f64(self.b),
            });
        }
        Ok(())
    }

    /// `ceil((end - start) / dt)` with the fixed step size.
    ///
    /// Counts whose grid could never be addressed (more than `isize::MAX` bytes) are
    /// rejected here rather than at allocation time.
    pub fn sample_count(&self) -> Result<usize> {
        self.validate()?;
        let raw = ((self.end() - self.start()) / constant::<T>(STEP_SIZE)).ceil();
        match raw.to_usize() {
            Some(n) if n <= isize::MAX as usize / size_of::<T>() => Ok(n),
            _ => Err(self.too_large(to_f64(raw))),
        }
    }

    /// Evenly spaced samples over `[start, end]`, both endpoints included.
    pub fn time_grid(&self) -> Result<Vec<T>> {
        let n = self.sample_count()?;
        let mut grid = self.allocate(n)?;
        fill_linspace(&mut grid, self.start(), self.end(), n);
        Ok(grid)
    }

    /// Empty vector with room for `n` samples, or `GridTooLarge` if the allocator refuses.
    pub(crate) fn allocate(&self, n: usize) -> Result<Vec<T>> {
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(n)
            .map_err(|_| self.too_large(n as f64))?;
        Ok(buffer)
    }

    fn too_large(&self, samples: f64) -> Error {
        Error::GridTooLarge {
            a: to_f64(self.a),
            b: to_f64(self.b),
            samples,
        }
    }
}

/// `n` evenly spaced samples from `start` to `end` inclusive.
///
/// The spacing is `(end - start) / (n - 1)` and the last sample is pinned to `end`.
/// A single sample is `[start]`; zero samples is the empty grid.
pub fn linspace<T: Scalar>(start: T, end: T, n: usize) -> Vec<T> {
    let mut grid = Vec::with_capacity(n);
    fill_linspace(&mut grid, start, end, n);
    grid
}

fn fill_linspace<T: Scalar>(grid: &mut Vec<T>, start: T, end: T, n: usize) {
    match n {
        0 => {}
        1 => grid.push(start),
        _ => {
            let step = (end - start) / constant::<T>((n - 1) as f64);
            grid.extend((0..n - 1).map(|i| constant::<T>(i as f64) * step + start));
            grid.push(end);
        }
    }
}

pub(crate) fn to_f64<T: Scalar>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_period_grid_has_expected_length_and_endpoints() {
        let window = TimeWindow::new(0.0_f64, 1.0);
        let grid = window.time_grid().expect("grid");
        assert_eq!(grid.len(), 6284);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[grid.len() - 1], 2.0 * PI);
    }

    #[test]
    fn spacing_is_close_to_but_not_exactly_step_size() {
        let grid = TimeWindow::new(0.0_f64, 1.0).time_grid().expect("grid");
        let spacing = grid[1] - grid[0];
        assert!((spacing - 2.0 * PI / 6283.0).abs() < 1e-15);
        assert!((spacing - STEP_SIZE).abs() < 1e-6);
        assert_ne!(spacing, STEP_SIZE);
    }

    #[test]
    fn offset_window_starts_at_two_pi_a() {
        let grid = TimeWindow::new(1.5_f64, 2.0).time_grid().expect("grid");
        assert_eq!(grid[0], 2.0 * 1.5 * PI);
        assert_eq!(grid[grid.len() - 1], 2.0 * 2.0 * PI);
        assert_eq!(grid.len(), (PI / STEP_SIZE).ceil() as usize);
    }

    #[test]
    fn equal_bounds_give_empty_grid() {
        let window = TimeWindow::new(0.75_f64, 0.75);
        assert_eq!(window.sample_count().expect("count"), 0);
        assert!(window.time_grid().expect("grid").is_empty());
    }

    #[test]
    fn tiny_window_gives_single_sample() {
        let window = TimeWindow::new(0.0_f64, 1e-5);
        assert_eq!(window.time_grid().expect("grid"), vec![0.0]);
    }

    #[test]
    fn reversed_window_is_rejected() {
        let err = TimeWindow::new(1.0_f64, 0.5).time_grid().expect_err("reversed");
        assert_eq!(err, Error::ReversedWindow { a: 1.0, b: 0.5 });
    }

    #[test]
    fn non_finite_window_is_rejected() {
        let err = TimeWindow::new(0.0_f64, f64::INFINITY)
            .sample_count()
            .expect_err("infinite");
        assert!(matches!(err, Error::NonFiniteWindow { .. }));
        let err = TimeWindow::new(f64::NAN, 1.0)
            .sample_count()
            .expect_err("nan");
        assert!(matches!(err, Error::NonFiniteWindow { .. }));
    }

    #[test]
    fn unaddressable_window_is_rejected_before_allocating() {
        let window = TimeWindow::new(0.0_f64, 1e15);
        match window.time_grid() {
            Err(Error::GridTooLarge { a, b, samples }) => {
                assert_eq!((a, b), (0.0, 1e15));
                assert!(samples > 6e18);
            }
            other => panic!("expected GridTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn linspace_pins_endpoints() {
        let grid = linspace(-1.0_f64, 1.0, 5);
        assert_eq!(grid, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert!(linspace(0.0_f64, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0_f64, 4.0, 1), vec![3.0]);
    }
}
