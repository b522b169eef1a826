use thiserror::Error;

/// Configuration for the Euler solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    max_steps: usize,
}

/// Errors that can occur when validating an Euler solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_steps must be at least 1")]
    MaxSteps,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good value, unwrap is safe
        Self::new(1_000_000).unwrap()
    }
}

impl Config {
    /// Creates a new config.
    ///
    /// `max_steps` caps the number of steps taken in a single direction, which
    /// bounds the memory a trajectory can use.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_steps` is zero.
    pub fn new(max_steps: usize) -> Result<Self, ConfigError> {
        if max_steps == 0 {
            return Err(ConfigError::MaxSteps);
        }
        Ok(Self { max_steps })
    }

    /// Returns the maximum number of steps per direction.
    #[must_use]
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }
}
