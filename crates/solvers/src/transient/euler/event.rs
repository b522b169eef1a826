use phaseplot_core::Snapshot;

use super::Direction;

/// Event emitted by the Euler solver for each snapshot.
///
/// Step 0 is the initial state before any integration and is emitted once,
/// labeled [`Direction::Forward`]. Steps 1..N are emitted after each
/// integration step in the direction being integrated.
#[derive(Debug, Clone)]
pub struct Event<I, O> {
    /// The step number (0 for initial, 1..N for integration steps).
    pub step: usize,

    /// Which way in time this step was taken.
    pub direction: Direction,

    /// Snapshot of the model input and output at this step.
    pub snapshot: Snapshot<I, O>,
}

impl<I, O> Event<I, O> {
    /// Returns the step number signed by direction (negative when backward).
    #[must_use]
    pub fn signed_step(&self) -> isize {
        #[allow(clippy::cast_possible_wrap)]
        let step = self.step as isize;
        self.direction.sign() * step
    }
}
