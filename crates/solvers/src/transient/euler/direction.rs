/// The direction in time an Euler step was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Stepping with `+dt`.
    Forward,

    /// Stepping with `-dt`.
    Backward,
}

impl Direction {
    /// Returns `1` for forward and `-1` for backward.
    #[must_use]
    pub fn sign(self) -> isize {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}
