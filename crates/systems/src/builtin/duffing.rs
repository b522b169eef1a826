use crate::{Parameters, SecondOrderSystem, SystemError};

/// A forced, damped Duffing oscillator.
///
/// ```text
/// dx/dt = v
/// dv/dt = γ·cos(ω·t) - δ·v - α·x - β·x³
/// ```
///
/// Parameters are named `delta`, `alpha`, `beta`, `gamma`, `omega`. With the
/// defaults (`α < 0 < β`) the unforced system is a double well with minima at
/// `x = ±1`; setting `gamma` to zero removes the forcing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Duffing;

impl SecondOrderSystem for Duffing {
    fn name(&self) -> &str {
        "Duffing"
    }

    fn dx(&self, _params: &Parameters, _x: f64, v: f64, _t: f64) -> Result<f64, SystemError> {
        Ok(v)
    }

    fn dv(&self, params: &Parameters, x: f64, v: f64, t: f64) -> Result<f64, SystemError> {
        let delta = params.get("delta")?;
        let alpha = params.get("alpha")?;
        let beta = params.get("beta")?;
        let gamma = params.get("gamma")?;
        let omega = params.get("omega")?;
        Ok(gamma * (omega * t).cos() - delta * v - alpha * x - beta * x.powi(3))
    }

    fn default_parameters(&self) -> Parameters {
        Parameters::new(0.01, 2.0)
            .with("delta", 2.0)
            .with("alpha", -0.5)
            .with("beta", 0.5)
            .with("gamma", 1.0)
            .with("omega", 1.0)
    }
}
