//! Named sets of solvers the viewer can open with.

use std::sync::Arc;

use phaseplot_systems::{
    SecondOrderSolver, SecondOrderSystem,
    builtin::{DampedOscillator, Duffing, LotkaVolterra},
};

/// Every scenario name accepted by [`by_name`], the default first.
pub const NAMES: [&str; 3] = ["default", "duffing", "oscillator"];

/// Returns the solvers for a named scenario, or `None` if the name is unknown.
#[must_use]
pub fn by_name(name: &str) -> Option<Vec<SecondOrderSolver>> {
    match name {
        "default" => Some(default()),
        "duffing" => Some(duffing()),
        "oscillator" => Some(vec![oscillator()]),
        _ => None,
    }
}

/// A damped oscillator at (1, 0) next to a Lotka–Volterra system at (1, 1).
fn default() -> Vec<SecondOrderSolver> {
    vec![
        oscillator(),
        SecondOrderSolver::with_defaults(1.0, 1.0, Arc::new(LotkaVolterra)),
    ]
}

fn oscillator() -> SecondOrderSolver {
    SecondOrderSolver::with_defaults(1.0, 0.0, Arc::new(DampedOscillator))
}

/// The Duffing system at the origin, with and without forcing.
fn duffing() -> Vec<SecondOrderSolver> {
    let system: Arc<dyn SecondOrderSystem> = Arc::new(Duffing);
    let unforced = system.default_parameters().with("gamma", 0.0);

    vec![
        SecondOrderSolver::with_defaults(0.0, 0.0, Arc::clone(&system)),
        SecondOrderSolver::new(0.0, 0.0, unforced, system),
    ]
}
