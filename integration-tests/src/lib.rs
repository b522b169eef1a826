//! Shared fixtures for the workspace integration tests.

use std::sync::Arc;

use phaseplot_systems::{
    FnSystem, Parameters, PhasePoint, SecondOrderSolver, SystemError, builtin::DampedOscillator,
};

/// A damped oscillator with the given coefficients and integration settings.
#[must_use]
pub fn oscillator(
    start: PhasePoint,
    [k, b, m]: [f64; 3],
    dt: f64,
    time_range: f64,
) -> SecondOrderSolver {
    let parameters = Parameters::new(dt, time_range)
        .with("k", k)
        .with("b", b)
        .with("m", m);
    SecondOrderSolver::new(start.x, start.v, parameters, Arc::new(DampedOscillator))
}

/// Mechanical energy `½·m·v² + ½·k·x²` of an oscillator state.
#[must_use]
pub fn energy(point: PhasePoint, k: f64, m: f64) -> f64 {
    0.5 * m * point.v * point.v + 0.5 * k * point.x * point.x
}

/// `x'' = x'²`: velocity blows up in finite time from any positive start.
#[must_use]
pub fn runaway() -> FnSystem {
    FnSystem::new(
        "runaway",
        |_, _, v, _| Ok(v),
        |_, _, v, _| Ok(v * v),
        Parameters::new(0.01, 10.0),
    )
}

/// `x'' = 1/x`: undefined at the origin.
#[must_use]
pub fn singular() -> FnSystem {
    FnSystem::new(
        "singular",
        |_, _, v, _| Ok(v),
        |_, x, _, _| {
            if x == 0.0 {
                Err(SystemError::Other("division by zero".into()))
            } else {
                Ok(1.0 / x)
            }
        },
        Parameters::new(0.01, 10.0),
    )
}
