use thiserror::Error;

/// Name of the step size parameter.
pub const DT: &str = "dt";

/// Name of the total simulated time span, centered on the initial condition.
pub const TIME_RANGE: &str = "time_range";

/// Errors that can occur when reading or writing parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("unknown parameter `{0}`")]
    Missing(String),
}

/// Named numeric parameters of a system, in insertion order.
///
/// Every parameter set holds [`DT`] and [`TIME_RANGE`]; model coefficients
/// (`k`, `b`, `m`, ...) are added with [`with`](Parameters::with). The order
/// is kept because it is the order the sliders are laid out in.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    entries: Vec<(String, f64)>,
}

impl Parameters {
    /// Creates a parameter set holding only the step size and time range.
    #[must_use]
    pub fn new(dt: f64, time_range: f64) -> Self {
        Self {
            entries: vec![(DT.to_owned(), dt), (TIME_RANGE.to_owned(), time_range)],
        }
    }

    /// Adds a parameter, or overwrites it if the name already exists.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a parameter, or overwrites it if the name already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns the value of a parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::Missing`] if no parameter has that name.
    pub fn get(&self, name: &str) -> Result<f64, ParameterError> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, value)| value)
            .ok_or_else(|| ParameterError::Missing(name.to_owned()))
    }

    /// Updates an existing parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::Missing`] if no parameter has that name.
    pub fn set(&mut self, name: &str, value: f64) -> Result<(), ParameterError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .ok_or_else(|| ParameterError::Missing(name.to_owned()))?;
        entry.1 = value;
        Ok(())
    }

    /// Returns the step size.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.get(DT).unwrap_or(f64::NAN)
    }

    /// Returns the time range.
    #[must_use]
    pub fn time_range(&self) -> f64 {
        self.get(TIME_RANGE).unwrap_or(f64::NAN)
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }
}
