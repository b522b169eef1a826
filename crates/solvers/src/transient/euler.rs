//! Forward Euler solver for ODE problems.
//!
//! This module provides a fixed-step explicit Euler integrator:
//!
//! ```text
//! state_{n+1} = state_n + derivative_n * dt
//! ```
//!
//! [`solve`] integrates in one direction. [`solve_symmetric`] integrates the
//! same number of steps forward (`+dt`) and backward (`-dt`) from one initial
//! input and returns a single time-ordered history, which is what a phase
//! portrait centered on an initial condition needs.
//!
//! # Example
//!
//! ```ignore
//! use phaseplot_solvers::transient::euler;
//!
//! let steps = euler::steps_for_span(time_range / 2.0, dt, &euler::Config::default())?;
//! let solution = euler::solve_symmetric_unobserved(&model, &problem, initial, dt, steps)?;
//!
//! for snapshot in &solution.history {
//!     println!("{:?} -> {:?}", snapshot.input, snapshot.output);
//! }
//! ```

mod action;
mod config;
mod direction;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use direction::Direction;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status, SymmetricSolution};

use std::ops::Neg;

use phaseplot_core::{Model, Observer, OdeProblem, Snapshot, StepIntegrable};

/// Relative slack when converting a span to a step count, so that a span that
/// is an exact multiple of `dt` up to rounding does not gain an extra step.
const SPAN_TOLERANCE: f64 = 1e-9;

/// Returns the number of steps of size `dt` needed to cover `span`.
///
/// This is the smallest `n` with `n * dt >= span`. A span that is zero or
/// negative needs no steps.
///
/// # Errors
///
/// Returns [`Error::InvalidStep`] if `dt` is not finite and positive,
/// [`Error::InvalidSpan`] if `span` is NaN, and [`Error::TooManySteps`] if
/// `n` exceeds [`Config::max_steps`].
pub fn steps_for_span(span: f64, dt: f64, config: &Config) -> Result<usize, Error> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(Error::InvalidStep(dt));
    }
    if span.is_nan() {
        return Err(Error::InvalidSpan);
    }
    if span <= 0.0 {
        return Ok(0);
    }

    let steps = (span / dt * (1.0 - SPAN_TOLERANCE)).ceil();

    #[allow(clippy::cast_precision_loss)]
    let max = config.max_steps() as f64;
    if !steps.is_finite() || steps > max {
        return Err(Error::TooManySteps {
            requested: steps,
            max: config.max_steps(),
        });
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = steps as usize;
    Ok(steps)
}

/// Returns the smallest step that covers `span` within [`Config::max_steps`].
///
/// Any `dt` at or above this value passes [`steps_for_span`]'s step limit.
#[must_use]
pub fn min_step_for_span(span: f64, config: &Config) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let max = config.max_steps() as f64;
    span / max
}

/// Integrates an ODE problem using forward Euler.
///
/// # Algorithm
///
/// 1. Call the model with the initial input to get the initial snapshot.
/// 2. For each step:
///    - Extract the state from the current input.
///    - Compute the derivative from the current input and output.
///    - Step the state: `state + derivative * dt`.
///    - Build the next input from the stepped state.
///    - Finalize the step (rejecting states the problem cannot accept).
///    - Call the model to get the next output.
///    - Emit an `Event` to the observer.
///    - If the observer returns `StopEarly`, terminate.
/// 3. Return the solution with the full history.
///
/// A negative `dt` integrates backward in time. Events from this function are
/// always labeled [`Direction::Forward`]; use [`solve_symmetric`] when the
/// direction matters to the observer.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    let (initial, status) = start(model, initial, &mut observer)?;

    let mut history = Vec::with_capacity(steps + 1);
    history.push(initial.clone());

    if status == Status::StoppedByObserver {
        return Ok(Solution {
            status,
            history,
            steps: 0,
        });
    }

    let (status, completed) = integrate(
        model,
        problem,
        initial,
        &dt,
        steps,
        Direction::Forward,
        &mut observer,
        &mut history,
    )?;

    Ok(Solution {
        status,
        history,
        steps: completed,
    })
}

/// Integrates an ODE problem using forward Euler without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
{
    solve(model, problem, initial, dt, steps, ())
}

/// Integrates `steps` forward and `steps` backward from the same initial input.
///
/// The forward half is integrated first with `+dt`, then the backward half
/// with `-dt`, each starting from the initial snapshot. The observer sees the
/// initial snapshot once (step 0), then every forward step, then every
/// backward step. Returning `StopEarly` ends the whole integration, including
/// a backward half that has not started yet.
///
/// The returned history is ordered by time: it holds `2 * steps + 1`
/// snapshots when the integration completes.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point,
/// in either direction.
pub fn solve_symmetric<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
    mut observer: Obs,
) -> Result<SymmetricSolution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone + Neg<Output = P::Delta>,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    let (initial, status) = start(model, initial, &mut observer)?;

    let mut forward = Vec::with_capacity(steps + 1);
    forward.push(initial.clone());

    let (status, forward_steps) = match status {
        Status::Complete => integrate(
            model,
            problem,
            initial.clone(),
            &dt,
            steps,
            Direction::Forward,
            &mut observer,
            &mut forward,
        )?,
        Status::StoppedByObserver => (status, 0),
    };

    let mut backward = Vec::with_capacity(steps);
    let (status, backward_steps) = match status {
        Status::Complete => integrate(
            model,
            problem,
            initial,
            &-dt,
            steps,
            Direction::Backward,
            &mut observer,
            &mut backward,
        )?,
        Status::StoppedByObserver => (status, 0),
    };

    backward.reverse();
    let origin = backward.len();
    backward.append(&mut forward);

    Ok(SymmetricSolution {
        status,
        history: backward,
        origin,
        forward_steps,
        backward_steps,
    })
}

/// Integrates symmetrically in time without observation.
///
/// This is a convenience wrapper around [`solve_symmetric`] that discards
/// events.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point.
pub fn solve_symmetric_unobserved<M, P>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
) -> Result<SymmetricSolution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone + Neg<Output = P::Delta>,
{
    solve_symmetric(model, problem, initial, dt, steps, ())
}

/// Evaluates the initial input and emits step 0.
fn start<M, Obs>(
    model: &M,
    initial: M::Input,
    observer: &mut Obs,
) -> Result<(Snapshot<M::Input, M::Output>, Status), Error>
where
    M: Model,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    let initial_output = model.call(&initial).map_err(Error::model)?;
    let event = Event {
        step: 0,
        direction: Direction::Forward,
        snapshot: Snapshot::new(initial, initial_output),
    };

    let status = match observer.observe(&event) {
        Some(Action::StopEarly) => Status::StoppedByObserver,
        None => Status::Complete,
    };
    Ok((event.snapshot, status))
}

/// Takes up to `steps` Euler steps from `current`, appending each snapshot.
///
/// Returns the termination status and the number of steps completed.
#[allow(clippy::too_many_arguments)]
fn integrate<M, P, Obs>(
    model: &M,
    problem: &P,
    mut current: Snapshot<M::Input, M::Output>,
    dt: &P::Delta,
    steps: usize,
    direction: Direction,
    observer: &mut Obs,
    history: &mut Vec<Snapshot<M::Input, M::Output>>,
) -> Result<(Status, usize), Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    for step in 1..=steps {
        // Extract state and compute derivative.
        let state = problem.state(&current.input).map_err(Error::problem)?;
        let derivative = problem
            .derivative(&current.input, &current.output)
            .map_err(Error::problem)?;

        let next_state = state.step(derivative, dt.clone());

        // Build and finalize next input.
        let next_input = problem
            .build_input(&current.input, &next_state, dt)
            .map_err(Error::problem)?;
        let next_input = problem
            .finalize_step(next_input, &current.input, &current.output, dt)
            .map_err(Error::problem)?;

        let next_output = model.call(&next_input).map_err(Error::model)?;

        let event = Event {
            step,
            direction,
            snapshot: Snapshot::new(next_input, next_output),
        };
        history.push(event.snapshot.clone());

        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok((Status::StoppedByObserver, step));
        }

        current = event.snapshot;
    }

    Ok((Status::Complete, steps))
}
