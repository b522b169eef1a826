use std::{fmt, sync::Arc};

use phaseplot_core::Observer;
use phaseplot_solvers::transient::euler;
use thiserror::Error;

use crate::{
    ParameterError, Parameters, PhaseDerivative, PhaseInput, PhaseModel, PhasePoint,
    PhaseProblem, SecondOrderSystem,
};

/// Errors that prevent a trajectory from being computed.
#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error(transparent)]
    Solve(#[from] euler::Error),
}

/// An initial condition in the phase plane and the trajectory through it.
///
/// The trajectory is integrated with explicit Euler for `time_range / 2`
/// forward and backward from the initial point, so the initial point sits in
/// the middle of [`points`](Self::points). If anything goes wrong while
/// stepping (a derivative that overflows, divides by zero, or reads a
/// missing parameter), the whole trajectory is discarded and replaced with
/// the single initial point.
///
/// Setters do not recompute; call [`calculate_points`](Self::calculate_points)
/// after changing the initial point or parameters.
#[derive(Clone)]
pub struct SecondOrderSolver {
    initial: PhasePoint,
    parameters: Parameters,
    system: Arc<dyn SecondOrderSystem>,
    config: euler::Config,
    points: Vec<PhasePoint>,
    last_error: Option<String>,
}

impl SecondOrderSolver {
    /// Creates a solver at `(x0, v0)`.
    ///
    /// The trajectory holds only the initial point until it is calculated.
    pub fn new(
        x0: f64,
        v0: f64,
        parameters: Parameters,
        system: Arc<dyn SecondOrderSystem>,
    ) -> Self {
        let initial = PhasePoint::new(x0, v0);
        Self {
            initial,
            parameters,
            system,
            config: euler::Config::default(),
            points: vec![initial],
            last_error: None,
        }
    }

    /// Creates a solver at `(x0, v0)` using the system's default parameters.
    pub fn with_defaults(x0: f64, v0: f64, system: Arc<dyn SecondOrderSystem>) -> Self {
        let parameters = system.default_parameters();
        Self::new(x0, v0, parameters, system)
    }

    /// Replaces the solver configuration.
    #[must_use]
    pub fn with_config(mut self, config: euler::Config) -> Self {
        self.config = config;
        self
    }

    /// Recomputes the trajectory with the current `dt` and `time_range`.
    pub fn calculate_points(&mut self) -> &[PhasePoint] {
        self.calculate_points_with(None, None)
    }

    /// Recomputes the trajectory, optionally overriding `dt` and `time_range`.
    ///
    /// Overrides apply to this computation only and are not written back to
    /// the parameters. On failure the trajectory collapses to the initial
    /// point and the error is logged and kept in
    /// [`last_error`](Self::last_error).
    pub fn calculate_points_with(
        &mut self,
        dt: Option<f64>,
        time_range: Option<f64>,
    ) -> &[PhasePoint] {
        let dt = dt.unwrap_or_else(|| self.parameters.dt());
        let time_range = time_range.unwrap_or_else(|| self.parameters.time_range());

        match self.trajectory(dt, time_range) {
            Ok(points) => {
                log::debug!(
                    "{}: {} points from ({}, {}) with dt={dt}, time_range={time_range}",
                    self.system.name(),
                    points.len(),
                    self.initial.x,
                    self.initial.v,
                );
                self.points = points;
                self.last_error = None;
            }
            Err(err) => {
                log::warn!(
                    "{}: trajectory from ({}, {}) failed, keeping only the initial point: {err}",
                    self.system.name(),
                    self.initial.x,
                    self.initial.v,
                );
                self.points = vec![self.initial];
                self.last_error = Some(err.to_string());
            }
        }

        &self.points
    }

    /// Integrates the trajectory without touching the solver's state.
    ///
    /// # Errors
    ///
    /// Returns an error if the step size is invalid, the step count exceeds
    /// the configured limit, or the system fails at any step.
    pub fn trajectory(
        &self,
        dt: f64,
        time_range: f64,
    ) -> Result<Vec<PhasePoint>, TrajectoryError> {
        let solution = self.integrate(dt, time_range, ())?;
        Ok(solution
            .history
            .into_iter()
            .map(|snapshot| snapshot.input.point)
            .collect())
    }

    /// Integrates the trajectory, reporting every step to `observer`.
    ///
    /// # Errors
    ///
    /// See [`trajectory`](Self::trajectory).
    pub fn integrate<Obs>(
        &self,
        dt: f64,
        time_range: f64,
        observer: Obs,
    ) -> Result<euler::SymmetricSolution<PhaseInput, PhaseDerivative>, TrajectoryError>
    where
        Obs: Observer<euler::Event<PhaseInput, PhaseDerivative>, euler::Action>,
    {
        let steps = euler::steps_for_span(time_range / 2.0, dt, &self.config)?;
        let model = PhaseModel::new(self.system.as_ref(), &self.parameters);
        let initial = PhaseInput::new(self.initial, 0.0);

        Ok(euler::solve_symmetric(
            &model,
            &PhaseProblem,
            initial,
            dt,
            steps,
            observer,
        )?)
    }

    /// Returns a fresh solver at the origin sharing this one's system and a
    /// copy of its parameters.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self::new(0.0, 0.0, self.parameters.clone(), Arc::clone(&self.system))
            .with_config(self.config)
    }

    /// The most recently calculated trajectory, ordered by time.
    #[must_use]
    pub fn points(&self) -> &[PhasePoint] {
        &self.points
    }

    #[must_use]
    pub fn initial(&self) -> PhasePoint {
        self.initial
    }

    /// Moves the initial condition.
    pub fn set_initial(&mut self, point: PhasePoint) {
        self.initial = point;
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Updates an existing parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::Missing`] if the system has no such parameter.
    pub fn set_parameter(&mut self, name: &str, value: f64) -> Result<(), ParameterError> {
        self.parameters.set(name, value)
    }

    #[must_use]
    pub fn config(&self) -> &euler::Config {
        &self.config
    }

    /// The smallest `dt` that covers the current time range within the step limit.
    ///
    /// NaN if the time range is missing or NaN.
    #[must_use]
    pub fn min_dt(&self) -> f64 {
        euler::min_step_for_span(self.parameters.time_range() / 2.0, &self.config)
    }

    #[must_use]
    pub fn system(&self) -> &Arc<dyn SecondOrderSystem> {
        &self.system
    }

    /// The message of the error that caused the last collapse, if the most
    /// recent calculation failed.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

impl fmt::Debug for SecondOrderSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecondOrderSolver")
            .field("system", &self.system.name())
            .field("initial", &self.initial)
            .field("parameters", &self.parameters)
            .field("points", &self.points.len())
            .field("last_error", &self.last_error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{FnSystem, SystemError, builtin::DampedOscillator};

    fn oscillator(x0: f64, v0: f64) -> SecondOrderSolver {
        SecondOrderSolver::new(
            x0,
            v0,
            Parameters::new(0.1, 2.0)
                .with("k", 1.0)
                .with("b", 0.0)
                .with("m", 1.0),
            Arc::new(DampedOscillator),
        )
    }

    #[test]
    fn starts_with_only_the_initial_point() {
        let solver = oscillator(1.0, 0.5);
        assert_eq!(solver.points(), [PhasePoint::new(1.0, 0.5)]);
    }

    #[test]
    fn trajectory_is_centered_on_initial_point() {
        let mut solver = oscillator(1.0, 0.0);
        let points = solver.calculate_points();

        // time_range 2, dt 0.1: ten steps each way.
        assert_eq!(points.len(), 21);
        assert_eq!(points[10], PhasePoint::new(1.0, 0.0));
        assert_eq!(solver.last_error(), None);
    }

    #[test]
    fn first_steps_follow_euler_in_each_direction() {
        let mut solver = oscillator(1.0, 0.0);
        let points = solver.calculate_points().to_vec();

        // Forward: (1, 0) + (0, -1)·0.1. Backward: (1, 0) - (0, -1)·0.1.
        assert_relative_eq!(points[11].x, 1.0);
        assert_relative_eq!(points[11].v, -0.1);
        assert_relative_eq!(points[9].x, 1.0);
        assert_relative_eq!(points[9].v, 0.1);
    }

    #[test]
    fn overrides_do_not_change_parameters() {
        let mut solver = oscillator(1.0, 0.0);
        let count = solver.calculate_points_with(Some(0.5), Some(1.0)).len();

        assert_eq!(count, 3);
        assert_relative_eq!(solver.parameters().dt(), 0.1);
        assert_relative_eq!(solver.parameters().time_range(), 2.0);
    }

    #[test]
    fn zero_time_range_yields_single_point() {
        let mut solver = oscillator(2.0, 3.0);
        let points = solver.calculate_points_with(None, Some(0.0));
        assert_eq!(points, [PhasePoint::new(2.0, 3.0)]);
        assert_eq!(solver.last_error(), None);
    }

    #[test]
    fn zero_mass_collapses_to_initial_point() {
        let mut solver = oscillator(1.0, 0.0);
        solver.set_parameter("m", 0.0).unwrap();

        assert_eq!(solver.calculate_points(), [PhasePoint::new(1.0, 0.0)]);
        assert!(solver.last_error().is_some());
    }

    #[test]
    fn invalid_step_collapses_to_initial_point() {
        let mut solver = oscillator(1.0, 0.0);
        solver.set_parameter("dt", 0.0).unwrap();

        assert_eq!(solver.calculate_points(), [PhasePoint::new(1.0, 0.0)]);
        assert!(solver.last_error().unwrap().contains("step size"));
    }

    #[test]
    fn step_limit_collapses_to_initial_point() {
        let mut solver = oscillator(1.0, 0.0).with_config(euler::Config::new(5).unwrap());

        assert_eq!(solver.calculate_points().len(), 1);
        assert!(solver.last_error().is_some());
    }

    #[test]
    fn failing_derivative_collapses_and_recovers() {
        let system = FnSystem::new(
            "guarded",
            |_, _, v, _| Ok(v),
            |p, x, _, _| {
                if x.abs() > p.get("limit")? {
                    Err(SystemError::Other("left the domain".into()))
                } else {
                    Ok(1.0)
                }
            },
            Parameters::new(0.1, 10.0).with("limit", 100.0),
        );
        let mut solver = SecondOrderSolver::with_defaults(0.0, 0.0, Arc::new(system));

        assert_eq!(solver.calculate_points().len(), 101);

        solver.set_parameter("limit", 0.1).unwrap();
        assert_eq!(solver.calculate_points().len(), 1);
        assert_eq!(solver.last_error(), Some("model error: left the domain"));

        solver.set_parameter("limit", 100.0).unwrap();
        assert_eq!(solver.calculate_points().len(), 101);
        assert_eq!(solver.last_error(), None);
    }

    #[test]
    fn min_dt_is_the_step_limit_boundary() {
        let mut solver = oscillator(1.0, 0.0).with_config(euler::Config::new(100).unwrap());
        assert_relative_eq!(solver.min_dt(), 0.01);

        solver.set_parameter("dt", solver.min_dt()).unwrap();
        assert_eq!(solver.calculate_points().len(), 201);
        assert_eq!(solver.last_error(), None);
    }

    #[test]
    fn copy_starts_at_origin_with_same_parameters() {
        let mut solver = oscillator(3.0, -2.0);
        solver.set_parameter("k", 4.0).unwrap();
        solver.calculate_points();

        let copy = solver.copy();
        assert_eq!(copy.initial(), PhasePoint::default());
        assert_eq!(copy.parameters(), solver.parameters());
        assert_eq!(copy.points().len(), 1);
        assert!(Arc::ptr_eq(copy.system(), solver.system()));
    }

    #[test]
    fn moving_initial_point_then_recalculating() {
        let mut solver = oscillator(1.0, 0.0);
        solver.calculate_points();
        solver.set_initial(PhasePoint::new(0.0, 1.0));

        let points = solver.calculate_points();
        assert_eq!(points[points.len() / 2], PhasePoint::new(0.0, 1.0));
    }
}
