use crate::{Parameters, SecondOrderSystem, SystemError};

/// Lotka–Volterra predator–prey dynamics.
///
/// `x` is the prey population and `v` the predator population:
///
/// ```text
/// dx/dt =  a·x - b·v·x
/// dv/dt = -c·v + d·v·x
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LotkaVolterra;

impl SecondOrderSystem for LotkaVolterra {
    fn name(&self) -> &str {
        "Lotka-Volterra"
    }

    fn dx(&self, params: &Parameters, x: f64, v: f64, _t: f64) -> Result<f64, SystemError> {
        Ok(params.get("a")? * x - params.get("b")? * v * x)
    }

    fn dv(&self, params: &Parameters, x: f64, v: f64, _t: f64) -> Result<f64, SystemError> {
        Ok(-params.get("c")? * v + params.get("d")? * v * x)
    }

    fn default_parameters(&self) -> Parameters {
        Parameters::new(0.01, 100.0)
            .with("a", 1.0)
            .with("b", 2.0)
            .with("c", 3.0)
            .with("d", 4.0)
    }
}
