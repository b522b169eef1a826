//! Core traits and types for phaseplot.
//!
//! This crate defines the shared abstractions that the Euler solver, the
//! built-in systems, and the display layer build on:
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`OdeProblem`]: adapts a model to a steppable state and its derivative
//! - [`StepIntegrable`]: a state that can be advanced by `derivative * delta`

mod model;
mod observer;
mod problems;
mod step;

pub use observer::Observer;
pub use problems::OdeProblem;
pub use step::{DerivativeOf, StepIntegrable};
pub use {model::Model, model::Snapshot};
