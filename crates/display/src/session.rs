//! Window-independent state of the interactive viewer.

use phaseplot_systems::{DT, ParameterError, PhasePoint, SecondOrderSolver, TIME_RANGE};
use thiserror::Error;

use crate::{ConfigError, DisplayConfig, SliderSet, Viewport};

/// Step size restored by [`Command::ResetStepSize`].
pub const RESET_DT: f64 = 0.01;

/// Curve colors, handed out in order and reused once exhausted.
pub const PALETTE: [[u8; 3]; 8] = [
    [31, 119, 180],
    [255, 127, 14],
    [44, 160, 44],
    [214, 39, 40],
    [148, 103, 189],
    [140, 86, 75],
    [227, 119, 194],
    [23, 190, 207],
];

/// Actions triggered from the menu or the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Restore the starting zoom and center the origin.
    Home,
    /// Add a copy of the selected solver at the origin.
    AddInitialCondition,
    /// Remove the selected solver, unless it is the only one.
    DeleteInitialCondition,
    /// Show or hide the individual integration points.
    ToggleRenderPoints,
    /// Set the selected solver's step size to [`RESET_DT`].
    ResetStepSize,
}

/// Errors raised by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a session needs at least one solver")]
    Empty,

    #[error("no solver at index {0}")]
    NoSolver(usize),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error("invalid display config: {0}")]
    Config(#[from] ConfigError),
}

/// What the primary pointer button is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Drag {
    #[default]
    Idle,
    /// Dragging empty space moves the view.
    Pan,
    /// Dragging an initial condition moves it.
    InitialCondition(usize),
}

/// A solver together with what the viewer needs to draw and edit it.
#[derive(Debug, Clone)]
pub struct Curve {
    solver: SecondOrderSolver,
    sliders: SliderSet,
    color: [u8; 3],
}

impl Curve {
    #[must_use]
    pub fn solver(&self) -> &SecondOrderSolver {
        &self.solver
    }

    #[must_use]
    pub fn sliders(&self) -> &SliderSet {
        &self.sliders
    }

    #[must_use]
    pub fn color(&self) -> [u8; 3] {
        self.color
    }
}

/// Everything the viewer shows, and the operations the window maps input onto.
///
/// Screen positions passed in are pixels relative to the top-left corner of
/// the plot area, and `size` is that area's size in pixels.
#[derive(Debug, Clone)]
pub struct Session {
    curves: Vec<Curve>,
    selected: usize,
    render_points: bool,
    viewport: Viewport,
    drag: Drag,
    config: DisplayConfig,
    colors_used: usize,
}

impl Session {
    /// Creates a session and calculates every solver's trajectory.
    ///
    /// The first solver starts selected.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Empty`] if `solvers` is empty, or
    /// [`SessionError::Config`] if `config` is invalid.
    pub fn new(
        solvers: Vec<SecondOrderSolver>,
        config: DisplayConfig,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        if solvers.is_empty() {
            return Err(SessionError::Empty);
        }

        let mut session = Self {
            curves: Vec::with_capacity(solvers.len()),
            selected: 0,
            render_points: false,
            viewport: Viewport::new(config.scale()),
            drag: Drag::Idle,
            config,
            colors_used: 0,
        };
        for solver in solvers {
            session.push(solver);
        }
        Ok(session)
    }

    #[must_use]
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_curve(&self) -> &Curve {
        &self.curves[self.selected]
    }

    #[must_use]
    pub fn render_points(&self) -> bool {
        self.render_points
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn drag(&self) -> Drag {
        self.drag
    }

    #[must_use]
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Selects the solver whose sliders are shown.
    ///
    /// Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.curves.len() {
            self.selected = index;
        }
    }

    pub fn apply(&mut self, command: Command) {
        log::info!("session command: {command:?}");
        match command {
            Command::Home => self.viewport.home(),
            Command::AddInitialCondition => {
                let solver = self.selected_curve().solver.copy();
                self.push(solver);
            }
            Command::DeleteInitialCondition => {
                if self.curves.len() > 1 {
                    self.curves.remove(self.selected);
                    self.selected = 0;
                    self.drag = Drag::Idle;
                } else {
                    log::info!("keeping the last initial condition");
                }
            }
            Command::ToggleRenderPoints => self.render_points = !self.render_points,
            Command::ResetStepSize => {
                if let Err(err) = self.set_parameter(self.selected, DT, RESET_DT) {
                    log::warn!("cannot reset step size: {err}");
                }
            }
        }
    }

    /// Sets a parameter of one solver and recalculates its trajectory.
    ///
    /// The value is clamped to the parameter's slider range first. Returns
    /// the value actually stored. A longer time range can raise the step
    /// size floor, in which case `dt` is raised with it.
    ///
    /// # Errors
    ///
    /// Fails if there is no solver at `index` or it has no such parameter.
    pub fn set_parameter(
        &mut self,
        index: usize,
        name: &str,
        value: f64,
    ) -> Result<f64, SessionError> {
        let curve = self
            .curves
            .get_mut(index)
            .ok_or(SessionError::NoSolver(index))?;
        let value = curve
            .sliders
            .get(name)
            .map_or(value, |slider| slider.clamp_for(value, &curve.solver));
        curve.solver.set_parameter(name, value)?;

        if name == TIME_RANGE {
            if let Some(slider) = curve.sliders.get(DT) {
                let dt = curve.solver.parameters().dt();
                let raised = slider.clamp_for(dt, &curve.solver);
                if raised != dt {
                    log::info!("raising dt from {dt} to {raised} to cover time_range {value}");
                    curve.solver.set_parameter(DT, raised)?;
                }
            }
        }
        curve.solver.calculate_points();
        Ok(value)
    }

    /// Returns the solver whose initial-condition marker is under `pos`.
    ///
    /// When markers overlap, the closest one wins.
    #[must_use]
    pub fn hit_initial_condition(&self, pos: [f64; 2], size: [f64; 2]) -> Option<usize> {
        let radius = self.config.grab_radius();
        self.curves
            .iter()
            .enumerate()
            .map(|(i, curve)| {
                let [sx, sy] = self
                    .viewport
                    .sim_to_screen(curve.solver.initial().into(), size);
                (i, (sx - pos[0]).hypot(sy - pos[1]))
            })
            .filter(|&(_, distance)| distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Starts a drag at `pos`.
    ///
    /// Pressing on an initial condition selects it and starts moving it;
    /// pressing anywhere else starts panning.
    pub fn press(&mut self, pos: [f64; 2], size: [f64; 2]) {
        self.drag = match self.hit_initial_condition(pos, size) {
            Some(index) => {
                self.selected = index;
                Drag::InitialCondition(index)
            }
            None => Drag::Pan,
        };
    }

    /// Continues a drag with the pointer now at `pos`, having moved `delta` pixels.
    ///
    /// A dragged initial condition follows the pointer, and its trajectory
    /// is recomputed with the coarse preview settings.
    pub fn drag_to(&mut self, pos: [f64; 2], delta: [f64; 2], size: [f64; 2]) {
        match self.drag {
            Drag::Idle => {}
            Drag::Pan => self.viewport.pan_pixels(delta),
            Drag::InitialCondition(index) => {
                let point = PhasePoint::from(self.viewport.screen_to_sim(pos, size));
                let config = self.config;
                if let Some(curve) = self.curves.get_mut(index) {
                    let parameters = curve.solver.parameters();
                    let (dt, time_range) =
                        config.preview_settings(parameters.dt(), parameters.time_range());
                    curve.solver.set_initial(point);
                    curve.solver.calculate_points_with(Some(dt), Some(time_range));
                }
            }
        }
    }

    /// Ends a drag, recomputing a moved trajectory at full resolution.
    pub fn release(&mut self) {
        if let Drag::InitialCondition(index) = self.drag {
            if let Some(curve) = self.curves.get_mut(index) {
                curve.solver.calculate_points();
            }
        }
        self.drag = Drag::Idle;
    }

    /// Zooms by `factor`, keeping the simulation point under `anchor` in place.
    pub fn zoom(&mut self, factor: f64, anchor: [f64; 2], size: [f64; 2]) {
        let anchor = self.viewport.screen_to_sim(anchor, size);
        self.viewport.zoom_about(factor, anchor);
    }

    fn push(&mut self, mut solver: SecondOrderSolver) {
        solver.calculate_points();
        let sliders = SliderSet::for_parameters(solver.parameters());
        let color = PALETTE[self.colors_used % PALETTE.len()];
        self.colors_used += 1;
        self.curves.push(Curve {
            solver,
            sliders,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_relative_eq;
    use phaseplot_solvers::transient::euler;
    use phaseplot_systems::{Parameters, builtin::DampedOscillator};

    use crate::MIN_DT;

    use super::*;

    const SIZE: [f64; 2] = [800.0, 600.0];

    fn solver(x0: f64, v0: f64) -> SecondOrderSolver {
        SecondOrderSolver::new(
            x0,
            v0,
            Parameters::new(0.001, 10.0)
                .with("k", 1.0)
                .with("b", 0.0)
                .with("m", 1.0),
            Arc::new(DampedOscillator),
        )
    }

    fn session() -> Session {
        Session::new(
            vec![solver(1.0, 0.0), solver(-1.0, 1.0)],
            DisplayConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_empty_and_bad_config() {
        assert!(matches!(
            Session::new(Vec::new(), DisplayConfig::default()),
            Err(SessionError::Empty)
        ));
        assert!(matches!(
            Session::new(
                vec![solver(0.0, 0.0)],
                DisplayConfig::default().initial_scale(-1.0)
            ),
            Err(SessionError::Config(ConfigError::Scale))
        ));
    }

    #[test]
    fn new_calculates_every_trajectory() {
        let session = session();
        for curve in session.curves() {
            assert_eq!(curve.solver().points().len(), 10_001);
        }
        assert_eq!(session.selected(), 0);
        assert_ne!(session.curves()[0].color(), session.curves()[1].color());
    }

    #[test]
    fn add_copies_selected_solver_at_origin() {
        let mut session = session();
        session.select(1);
        session.set_parameter(1, "k", 4.0).unwrap();
        session.apply(Command::AddInitialCondition);

        let added = &session.curves()[2];
        assert_eq!(added.solver().initial(), PhasePoint::default());
        assert_relative_eq!(added.solver().parameters().get("k").unwrap(), 4.0);
        assert_eq!(added.color(), PALETTE[2]);
        assert_eq!(session.selected(), 1);
    }

    #[test]
    fn delete_removes_selected_but_keeps_the_last() {
        let mut session = session();
        session.select(1);
        session.apply(Command::DeleteInitialCondition);
        assert_eq!(session.curves().len(), 1);
        assert_eq!(session.selected(), 0);
        assert_eq!(
            session.selected_curve().solver().initial(),
            PhasePoint::new(1.0, 0.0)
        );

        session.apply(Command::DeleteInitialCondition);
        assert_eq!(session.curves().len(), 1);
    }

    #[test]
    fn toggles_points_and_resets_step_size() {
        let mut session = session();
        session.apply(Command::ToggleRenderPoints);
        assert!(session.render_points());
        session.apply(Command::ToggleRenderPoints);
        assert!(!session.render_points());

        session.apply(Command::ResetStepSize);
        let solver = session.selected_curve().solver();
        assert_relative_eq!(solver.parameters().dt(), RESET_DT);
        assert_eq!(solver.points().len(), 1001);
    }

    #[test]
    fn parameter_changes_are_clamped_and_recomputed() {
        let mut session = session();
        let stored = session.set_parameter(0, TIME_RANGE, 0.0).unwrap();
        assert_relative_eq!(stored, 1.0);
        assert_eq!(session.curves()[0].solver().points().len(), 1001);

        assert!(matches!(
            session.set_parameter(0, "q", 1.0),
            Err(SessionError::Parameter(_))
        ));
        assert!(matches!(
            session.set_parameter(9, "k", 1.0),
            Err(SessionError::NoSolver(9))
        ));
    }

    #[test]
    fn smallest_step_size_still_draws_a_trajectory() {
        // time_range 10 with at most 1000 steps per direction: dt >= 0.005.
        let limited = solver(1.0, 0.0).with_config(euler::Config::new(1000).unwrap());
        let mut session = Session::new(vec![limited], DisplayConfig::default()).unwrap();

        let stored = session.set_parameter(0, DT, MIN_DT).unwrap();
        assert_relative_eq!(stored, 0.005);
        let solver = session.selected_curve().solver();
        assert_eq!(solver.points().len(), 2001);
        assert_eq!(solver.last_error(), None);

        // Doubling the time range doubles the floor, and dt follows.
        session.set_parameter(0, TIME_RANGE, 20.0).unwrap();
        let solver = session.selected_curve().solver();
        assert_relative_eq!(solver.parameters().dt(), 0.01);
        assert_eq!(solver.points().len(), 2001);
        assert_eq!(solver.last_error(), None);
    }

    #[test]
    fn hit_test_uses_marker_radius() {
        let session = session();
        // (1, 0) sits at (500, 300) and (-1, 1) at (300, 200).
        assert_eq!(session.hit_initial_condition([505.0, 305.0], SIZE), Some(0));
        assert_eq!(session.hit_initial_condition([300.0, 209.0], SIZE), Some(1));
        assert_eq!(session.hit_initial_condition([400.0, 300.0], SIZE), None);
    }

    #[test]
    fn dragging_a_marker_previews_then_recomputes() {
        let mut session = session();
        session.press([300.0, 200.0], SIZE);
        assert_eq!(session.drag(), Drag::InitialCondition(1));
        assert_eq!(session.selected(), 1);

        session.drag_to([400.0, 100.0], [100.0, -100.0], SIZE);
        let solver = session.curves()[1].solver();
        assert_eq!(solver.initial(), PhasePoint::new(0.0, 2.0));
        // Preview: dt 0.01 over 10 time units.
        assert_eq!(solver.points().len(), 1001);

        session.release();
        assert_eq!(session.drag(), Drag::Idle);
        assert_eq!(session.curves()[1].solver().points().len(), 10_001);
        assert_eq!(session.viewport().center(), [0.0, 0.0]);
    }

    #[test]
    fn dragging_empty_space_pans() {
        let mut session = session();
        session.press([100.0, 100.0], SIZE);
        assert_eq!(session.drag(), Drag::Pan);

        session.drag_to([150.0, 100.0], [50.0, 0.0], SIZE);
        session.release();
        assert_relative_eq!(session.viewport().center()[0], -0.5);

        session.apply(Command::Home);
        assert_eq!(session.viewport().center(), [0.0, 0.0]);
    }

    #[test]
    fn zoom_is_anchored_at_the_pointer() {
        let mut session = session();
        let anchor = [600.0, 150.0];
        let before = session.viewport().screen_to_sim(anchor, SIZE);

        session.zoom(session.config().zoom_in(), anchor, SIZE);
        let after = session.viewport().screen_to_sim(anchor, SIZE);

        assert_relative_eq!(session.viewport().scale(), 110.0, epsilon = 1e-9);
        assert_relative_eq!(after[0], before[0], epsilon = 1e-9);
        assert_relative_eq!(after[1], before[1], epsilon = 1e-9);
    }
}
