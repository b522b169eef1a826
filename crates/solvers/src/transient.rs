//! Solvers for transient problems, integrating a state through time.
//!
//! An [`OdeProblem`] extracts a steppable state from a model input, reads its
//! derivative from the model output, and rebuilds the input after each step.
//!
//! # Solvers
//!
//! - [`euler`]: fixed-step explicit Euler, one-sided or symmetric in time
//!
//! [`OdeProblem`]: phaseplot_core::OdeProblem

pub mod euler;
