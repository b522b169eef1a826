use crate::{Parameters, SecondOrderSystem, SystemError};

/// A damped harmonic oscillator: `m·x'' + b·x' + k·x = 0`.
///
/// As a first-order pair:
///
/// ```text
/// dx/dt = v
/// dv/dt = -(k/m)·x - (b/m)·v
/// ```
///
/// Parameters: stiffness `k`, damping `b`, mass `m`. A zero mass makes the
/// derivative non-finite, which collapses any trajectory through it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DampedOscillator;

impl SecondOrderSystem for DampedOscillator {
    fn name(&self) -> &str {
        "damped oscillator"
    }

    fn dx(&self, _params: &Parameters, _x: f64, v: f64, _t: f64) -> Result<f64, SystemError> {
        Ok(v)
    }

    fn dv(&self, params: &Parameters, x: f64, v: f64, _t: f64) -> Result<f64, SystemError> {
        let k = params.get("k")?;
        let b = params.get("b")?;
        let m = params.get("m")?;
        Ok(-k / m * x - b / m * v)
    }

    fn default_parameters(&self) -> Parameters {
        Parameters::new(0.01, 100.0)
            .with("k", 5.0)
            .with("b", 2.0)
            .with("m", 1.0)
    }
}
