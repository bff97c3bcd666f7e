use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars in the integrator.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// Rate law of the fast (position-like) variable.
///
/// The rate depends on the slow variable only: `dx/dt = f(y)`.
pub trait FastDerivative<T: Scalar> {
    fn rate(&self, y: T) -> T;
}

/// Rate law of the slow (velocity-like) variable.
///
/// The rate depends on time, both state variables and the two run parameters:
/// `dy/dt = g(t, y, x, nu, forcing)`.
pub trait SlowDerivative<T: Scalar> {
    fn rate(&self, t: T, y: T, x: T, nu: T, forcing: T) -> T;
}

impl<T: Scalar, F> FastDerivative<T> for F
where
    F: Fn(T) -> T,
{
    fn rate(&self, y: T) -> T {
        self(y)
    }
}

impl<T: Scalar, F> SlowDerivative<T> for F
where
    F: Fn(T, T, T, T, T) -> T,
{
    fn rate(&self, t: T, y: T, x: T, nu: T, forcing: T) -> T {
        self(t, y, x, nu, forcing)
    }
}

/// Converts an f64 literal into the scalar type.
///
/// Every constant used by the integrator is representable in both `f32` and `f64`.
pub(crate) fn constant<T: Scalar>(value: f64) -> T {
    T::from_f64(value).unwrap_or_else(T::nan)
}
