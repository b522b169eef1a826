use phaseplot_core::{DerivativeOf, Model, OdeProblem};

use crate::{Parameters, PhaseDerivative, PhaseInput, PhasePoint, SecondOrderSystem, SystemError};

/// Binds a [`SecondOrderSystem`] to a parameter set as a [`Model`].
///
/// Any derivative that comes back NaN or infinite is reported as
/// [`SystemError::NonFinite`].
pub struct PhaseModel<'a> {
    system: &'a dyn SecondOrderSystem,
    parameters: &'a Parameters,
}

impl<'a> PhaseModel<'a> {
    #[must_use]
    pub fn new(system: &'a dyn SecondOrderSystem, parameters: &'a Parameters) -> Self {
        Self { system, parameters }
    }
}

impl Model for PhaseModel<'_> {
    type Input = PhaseInput;
    type Output = PhaseDerivative;
    type Error = SystemError;

    fn call(&self, input: &PhaseInput) -> Result<PhaseDerivative, SystemError> {
        let PhaseInput {
            point: PhasePoint { x, v },
            t,
        } = *input;

        let dx = finite("dx/dt", self.system.dx(self.parameters, x, v, t)?, t)?;
        let dv = finite("dv/dt", self.system.dv(self.parameters, x, v, t)?, t)?;

        Ok(PhaseDerivative { dx, dv })
    }
}

/// The ODE problem for a phase-plane trajectory.
///
/// The state is the phase point, time advances by the (signed) step, and a
/// stepped point that overflowed is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseProblem;

impl OdeProblem for PhaseProblem {
    type Input = PhaseInput;
    type Output = PhaseDerivative;
    type Delta = f64;
    type State = PhasePoint;
    type Error = SystemError;

    fn state(&self, input: &PhaseInput) -> Result<PhasePoint, SystemError> {
        Ok(input.point)
    }

    fn derivative(
        &self,
        _input: &PhaseInput,
        output: &PhaseDerivative,
    ) -> Result<DerivativeOf<PhasePoint, f64>, SystemError> {
        Ok(*output)
    }

    fn build_input(
        &self,
        base: &PhaseInput,
        state: &PhasePoint,
        dt: &f64,
    ) -> Result<PhaseInput, SystemError> {
        Ok(PhaseInput {
            point: *state,
            t: base.t + dt,
        })
    }

    fn finalize_step(
        &self,
        next_input: PhaseInput,
        _prev_input: &PhaseInput,
        _prev_output: &PhaseDerivative,
        _step_delta: &f64,
    ) -> Result<PhaseInput, SystemError> {
        let PhaseInput {
            point: PhasePoint { x, v },
            t,
        } = next_input;
        finite("x", x, t)?;
        finite("v", v, t)?;
        Ok(next_input)
    }
}

fn finite(quantity: &'static str, value: f64, t: f64) -> Result<f64, SystemError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SystemError::NonFinite { quantity, value, t })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::FnSystem;

    fn reciprocal() -> FnSystem {
        FnSystem::new(
            "reciprocal",
            |_, _, v, _| Ok(v),
            |_, x, _, _| Ok(1.0 / x),
            Parameters::new(0.1, 1.0),
        )
    }

    #[test]
    fn evaluates_both_derivatives() {
        let system = reciprocal();
        let params = system.default_parameters();
        let model = PhaseModel::new(&system, &params);

        let out = model
            .call(&PhaseInput::new(PhasePoint::new(2.0, 3.0), 0.0))
            .unwrap();
        assert_eq!(out, PhaseDerivative { dx: 3.0, dv: 0.5 });
    }

    #[test]
    fn division_by_zero_is_non_finite() {
        let system = reciprocal();
        let params = system.default_parameters();
        let model = PhaseModel::new(&system, &params);

        let err = model
            .call(&PhaseInput::new(PhasePoint::new(0.0, 1.0), 0.25))
            .unwrap_err();
        assert!(matches!(
            err,
            SystemError::NonFinite {
                quantity: "dv/dt",
                t,
                ..
            } if t == 0.25
        ));
    }

    #[test]
    fn problem_advances_time_by_signed_step() {
        let base = PhaseInput::new(PhasePoint::new(0.0, 0.0), 1.0);
        let next = PhaseProblem
            .build_input(&base, &PhasePoint::new(1.0, 2.0), &-0.5)
            .unwrap();
        assert_eq!(next, PhaseInput::new(PhasePoint::new(1.0, 2.0), 0.5));
    }

    #[test]
    fn problem_rejects_overflowed_state() {
        let prev = PhaseInput::default();
        let overflowed = PhaseInput::new(PhasePoint::new(f64::INFINITY, 0.0), 0.1);

        let result =
            PhaseProblem.finalize_step(overflowed, &prev, &PhaseDerivative::default(), &0.1);
        assert!(matches!(
            result,
            Err(SystemError::NonFinite { quantity: "x", .. })
        ));
    }
}
