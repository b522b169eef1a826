use phaseplot_core::StepIntegrable;

/// A point in the phase plane: position `x` and velocity `v`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhasePoint {
    pub x: f64,
    pub v: f64,
}

impl PhasePoint {
    #[must_use]
    pub fn new(x: f64, v: f64) -> Self {
        Self { x, v }
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.v.is_finite()
    }
}

impl From<PhasePoint> for [f64; 2] {
    fn from(point: PhasePoint) -> Self {
        [point.x, point.v]
    }
}

impl From<[f64; 2]> for PhasePoint {
    fn from([x, v]: [f64; 2]) -> Self {
        Self { x, v }
    }
}

/// Rates of change of a [`PhasePoint`] with respect to time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseDerivative {
    pub dx: f64,
    pub dv: f64,
}

/// Input to a derivative model: where in phase space, and when.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseInput {
    pub point: PhasePoint,
    pub t: f64,
}

impl PhaseInput {
    #[must_use]
    pub fn new(point: PhasePoint, t: f64) -> Self {
        Self { point, t }
    }
}

impl StepIntegrable<f64> for PhasePoint {
    type Derivative = PhaseDerivative;

    fn step(&self, derivative: PhaseDerivative, dt: f64) -> Self {
        PhasePoint {
            x: self.x + derivative.dx * dt,
            v: self.v + derivative.dv * dt,
        }
    }
}
