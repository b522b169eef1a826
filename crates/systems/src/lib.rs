//! Second-order ODE systems and their phase-space trajectories.
//!
//! A second-order system is written as a pair of first-order equations in
//! position `x` and velocity `v`:
//!
//! ```text
//! dx/dt = f(x, v, t)
//! dv/dt = g(x, v, t)
//! ```
//!
//! - [`SecondOrderSystem`]: the pair of derivative functions
//! - [`Parameters`]: named coefficients, always including `dt` and `time_range`
//! - [`SecondOrderSolver`]: an initial condition plus a system, producing
//!   the trajectory through it by symmetric explicit Euler integration
//! - [`builtin`]: ready-made systems (damped oscillator, Lotka–Volterra, Duffing)

pub mod builtin;

mod model;
mod parameters;
mod phase;
mod solver;
mod system;

pub use model::{PhaseModel, PhaseProblem};
pub use parameters::{DT, ParameterError, Parameters, TIME_RANGE};
pub use phase::{PhaseDerivative, PhaseInput, PhasePoint};
pub use solver::{SecondOrderSolver, TrajectoryError};
pub use system::{Derivative, FnSystem, SecondOrderSystem, SystemError};
