use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{ParameterError, Parameters};

/// Errors raised while evaluating a system's derivatives or stepping its state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SystemError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error("{quantity} is not finite ({value}) at t = {t}")]
    NonFinite {
        quantity: &'static str,
        value: f64,
        t: f64,
    },

    #[error("{0}")]
    Other(String),
}

/// A pair of first-order equations describing a second-order system.
///
/// Implementors compute `dx/dt` and `dv/dt` at a point `(x, v)` and time `t`,
/// reading any coefficients they need from `params`. A missing coefficient
/// should be reported with `?` on [`Parameters::get`] rather than defaulted.
pub trait SecondOrderSystem {
    /// A short human-readable name, used in logs and window titles.
    fn name(&self) -> &str;

    /// Rate of change of position.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError`] if the derivative cannot be evaluated.
    fn dx(&self, params: &Parameters, x: f64, v: f64, t: f64) -> Result<f64, SystemError>;

    /// Rate of change of velocity.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError`] if the derivative cannot be evaluated.
    fn dv(&self, params: &Parameters, x: f64, v: f64, t: f64) -> Result<f64, SystemError>;

    /// The parameters this system is normally started with.
    fn default_parameters(&self) -> Parameters {
        Parameters::new(0.01, 100.0)
    }
}

/// A derivative function: `(params, x, v, t) -> rate`.
pub type Derivative =
    Arc<dyn Fn(&Parameters, f64, f64, f64) -> Result<f64, SystemError> + Send + Sync>;

/// A system assembled from two closures.
///
/// This is how scripts supply their own models without defining a type:
///
/// ```
/// use phaseplot_systems::{FnSystem, Parameters};
///
/// let pendulum = FnSystem::new(
///     "pendulum",
///     |_, _, v, _| Ok(v),
///     |p, x, _, _| Ok(-p.get("g")? * x.sin()),
///     Parameters::new(0.01, 20.0).with("g", 9.81),
/// );
/// ```
#[derive(Clone)]
pub struct FnSystem {
    name: String,
    dx: Derivative,
    dv: Derivative,
    defaults: Parameters,
}

impl FnSystem {
    pub fn new<F, G>(name: impl Into<String>, dx: F, dv: G, defaults: Parameters) -> Self
    where
        F: Fn(&Parameters, f64, f64, f64) -> Result<f64, SystemError> + Send + Sync + 'static,
        G: Fn(&Parameters, f64, f64, f64) -> Result<f64, SystemError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            dx: Arc::new(dx),
            dv: Arc::new(dv),
            defaults,
        }
    }
}

impl fmt::Debug for FnSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSystem")
            .field("name", &self.name)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl SecondOrderSystem for FnSystem {
    fn name(&self) -> &str {
        &self.name
    }

    fn dx(&self, params: &Parameters, x: f64, v: f64, t: f64) -> Result<f64, SystemError> {
        (self.dx)(params, x, v, t)
    }

    fn dv(&self, params: &Parameters, x: f64, v: f64, t: f64) -> Result<f64, SystemError> {
        (self.dv)(params, x, v, t)
    }

    fn default_parameters(&self) -> Parameters {
        self.defaults.clone()
    }
}
