use phaseplot_core::Snapshot;

/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Completed all requested steps.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a one-sided Euler integration.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    /// How the solver terminated.
    pub status: Status,

    /// History of snapshots from each step (including initial state).
    pub history: Vec<Snapshot<I, O>>,

    /// Number of integration steps completed.
    pub steps: usize,
}

/// The result of integrating forward and backward from one initial input.
#[derive(Debug, Clone)]
pub struct SymmetricSolution<I, O> {
    /// How the solver terminated.
    pub status: Status,

    /// Snapshots ordered by time: backward steps (earliest first), the
    /// initial snapshot, then forward steps.
    pub history: Vec<Snapshot<I, O>>,

    /// Index of the initial snapshot within `history`.
    pub origin: usize,

    /// Number of forward steps completed.
    pub forward_steps: usize,

    /// Number of backward steps completed.
    pub backward_steps: usize,
}

impl<I, O> SymmetricSolution<I, O> {
    /// Returns the initial snapshot.
    #[must_use]
    pub fn initial(&self) -> &Snapshot<I, O> {
        &self.history[self.origin]
    }
}
