//! Default rate laws: the forced, damped Duffing oscillator
//! `x'' = -nu x' + x - x^3 + F cos(t)` written as `x' = y`, `y' = -nu y + x - x^3 + F cos(t)`.

use crate::traits::{constant, FastDerivative, Scalar, SlowDerivative};
use serde::{Deserialize, Serialize};

/// Damping coefficient and forcing amplitude, constant over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuffingParams<T = f64> {
    pub nu: T,
    pub forcing: T,
}

impl<T: Scalar> DuffingParams<T> {
    pub fn new(nu: T, forcing: T) -> Self {
        Self { nu, forcing }
    }

    /// Undamped, unforced oscillator.
    pub fn conservative() -> Self {
        Self {
            nu: T::zero(),
            forcing: T::zero(),
        }
    }
}

/// `x' = y`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionRate;

impl<T: Scalar> FastDerivative<T> for PositionRate {
    fn rate(&self, y: T) -> T {
        y
    }
}

/// `y' = -nu y + x - x^3 + F cos(t)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VelocityRate;

impl<T: Scalar> SlowDerivative<T> for VelocityRate {
    fn rate(&self, t: T, y: T, x: T, nu: T, forcing: T) -> T {
        -(nu * y) + x - x.powi(3) + forcing * t.cos()
    }
}

/// Mechanical energy of the conservative system (`nu = F = 0`).
///
/// The restoring force `x - x^3` derives from the double-well potential
/// `V(x) = -x^2/2 + x^4/4`, so `E = y^2/2 + V(x)`.
pub fn conservative_energy<T: Scalar>(x: T, y: T) -> T {
    let half = constant::<T>(0.5);
    let quarter = constant::<T>(0.25);
    half * y * y - half * x * x + quarter * x.powi(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_rate_matches_closed_form() {
        let t = 0.3_f64;
        let (y, x, nu, forcing) = (0.7, -1.2, 0.25, 0.4);
        let expected = -(nu * y) + x - x * x * x + forcing * t.cos();
        let rate = SlowDerivative::rate(&VelocityRate, t, y, x, nu, forcing);
        assert!((rate - expected).abs() < 1e-15);
    }

    #[test]
    fn position_rate_is_velocity() {
        assert_eq!(FastDerivative::<f64>::rate(&PositionRate, -2.5), -2.5);
    }

    #[test]
    fn well_bottoms_are_equilibria_with_lowest_energy() {
        for x in [-1.0_f64, 1.0] {
            let rate = SlowDerivative::rate(&VelocityRate, 0.0, 0.0, x, 0.0, 0.0);
            assert_eq!(rate, 0.0);
            assert!((conservative_energy(x, 0.0) + 0.25).abs() < 1e-15);
        }
        assert!(conservative_energy(0.5, 0.0) > conservative_energy(1.0, 0.0));
    }

    #[test]
    fn params_default_to_zero() {
        let params = DuffingParams::<f64>::default();
        assert_eq!(params, DuffingParams::conservative());
        assert_eq!(params.nu, 0.0);
        assert_eq!(params.forcing, 0.0);
    }
}
