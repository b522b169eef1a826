//! Numerical solvers for phaseplot.
//!
//! # Modules
//!
//! - [`transient`]: time integration of ODE problems

pub mod transient;
