use std::ops::RangeInclusive;

use phaseplot_systems::{DT, Parameters, SecondOrderSolver, TIME_RANGE};

/// Smallest step size a slider allows.
pub const MIN_DT: f64 = 1e-5;

/// Largest step size a slider allows.
pub const MAX_DT: f64 = 0.1;

/// Smallest time range a slider allows.
pub const MIN_TIME_RANGE: f64 = 1.0;

/// Distance a generic slider reaches either side of its starting value.
pub const SPAN: f64 = 100.0;

/// The range a parameter can be dragged through.
///
/// Ranges are fixed when the slider is created and do not follow later
/// changes to the value. The one exception is the step size, whose lower
/// bound is raised while the solver's time range would otherwise need more
/// steps than its limit allows.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSlider {
    name: String,
    min: f64,
    max: f64,
}

impl ParameterSlider {
    /// Creates the slider for a parameter currently set to `value`.
    ///
    /// - `dt` spans `[1e-5, 0.1]`.
    /// - `time_range` spans `[1, value + 100]`.
    /// - Anything else spans `[value - 100, value + 100]`, or `[-100, 100]`
    ///   when `value` is not finite.
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        let name = name.into();
        let (min, max) = match name.as_str() {
            DT => (MIN_DT, MAX_DT),
            TIME_RANGE => (MIN_TIME_RANGE, (value + SPAN).max(MIN_TIME_RANGE)),
            _ if value.is_finite() => (value - SPAN, value + SPAN),
            _ => (-SPAN, SPAN),
        };
        Self { name, min, max }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The range fixed at creation.
    #[must_use]
    pub fn range(&self) -> RangeInclusive<f64> {
        self.min..=self.max
    }

    /// The range usable with `solver`'s current time range and step limit.
    #[must_use]
    pub fn range_for(&self, solver: &SecondOrderSolver) -> RangeInclusive<f64> {
        let floor = solver.min_dt();
        if self.name == DT && floor.is_finite() {
            self.min.max(floor).min(self.max)..=self.max
        } else {
            self.range()
        }
    }

    /// Clamps `value` into [`range_for`](Self::range_for).
    #[must_use]
    pub fn clamp_for(&self, value: f64, solver: &SecondOrderSolver) -> f64 {
        let range = self.range_for(solver);
        value.clamp(*range.start(), *range.end())
    }

    /// Whether the slider reads better on a logarithmic scale.
    #[must_use]
    pub fn logarithmic(&self) -> bool {
        self.name == DT
    }
}

/// One slider per parameter, in parameter order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SliderSet {
    sliders: Vec<ParameterSlider>,
}

impl SliderSet {
    #[must_use]
    pub fn for_parameters(parameters: &Parameters) -> Self {
        Self {
            sliders: parameters
                .iter()
                .map(|(name, value)| ParameterSlider::new(name, value))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterSlider> {
        self.sliders.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterSlider> {
        self.sliders.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use approx::assert_relative_eq;
    use phaseplot_systems::builtin::DampedOscillator;

    fn oscillator() -> SecondOrderSolver {
        SecondOrderSolver::with_defaults(1.0, 0.0, Arc::new(DampedOscillator))
    }

    #[test]
    fn step_size_has_fixed_range() {
        let slider = ParameterSlider::new(DT, 0.01);
        assert_eq!(slider.range(), MIN_DT..=MAX_DT);
        assert!(slider.logarithmic());
    }

    #[test]
    fn time_range_never_drops_below_one() {
        let slider = ParameterSlider::new(TIME_RANGE, 100.0);
        assert_eq!(slider.range(), 1.0..=200.0);
        assert_eq!(slider.clamp_for(-5.0, &oscillator()), 1.0);
    }

    #[test]
    fn generic_parameter_spans_around_its_value() {
        let slider = ParameterSlider::new("k", 5.0);
        assert_eq!(slider.range(), -95.0..=105.0);
        assert_eq!(slider.clamp_for(3.0, &oscillator()), 3.0);
        assert!(!slider.logarithmic());
    }

    #[test]
    fn non_finite_start_gets_a_usable_range() {
        let slider = ParameterSlider::new("k", f64::NAN);
        assert_eq!(slider.range(), -SPAN..=SPAN);
        assert_eq!(slider.clamp_for(500.0, &oscillator()), SPAN);

        let slider = ParameterSlider::new("k", f64::INFINITY);
        assert_eq!(slider.range(), -SPAN..=SPAN);
    }

    #[test]
    fn step_size_floor_follows_time_range() {
        let mut solver = oscillator();
        let slider = ParameterSlider::new(DT, solver.parameters().dt());

        // time_range 100: 50 per direction over a million steps.
        assert_relative_eq!(*slider.range_for(&solver).start(), 5e-5);
        assert_relative_eq!(slider.clamp_for(MIN_DT, &solver), 5e-5);

        solver.set_parameter(TIME_RANGE, 200.0).unwrap();
        assert_relative_eq!(*slider.range_for(&solver).start(), 1e-4);

        solver.set_parameter(TIME_RANGE, 2.0).unwrap();
        assert_eq!(slider.range_for(&solver), MIN_DT..=MAX_DT);
    }

    #[test]
    fn set_follows_parameter_order() {
        let parameters = Parameters::new(0.01, 100.0).with("k", 5.0).with("b", 2.0);
        let set = SliderSet::for_parameters(&parameters);

        let names: Vec<_> = set.iter().map(ParameterSlider::name).collect();
        assert_eq!(names, [DT, TIME_RANGE, "k", "b"]);
        assert_eq!(set.get("b").map(ParameterSlider::range), Some(-98.0..=102.0));
        assert!(set.get("m").is_none());
    }
}
