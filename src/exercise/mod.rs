//! Guided wellness exercises.
//!
//! Each exercise is a small state machine owned by one activation. The host
//! hands it a completion callback at start; the callback runs exactly once,
//! whether the exercise finishes or the user closes it.

pub mod breathing;
pub mod driver;
pub mod grounding;

use std::fmt;

pub use breathing::{BreathPhase, BreathingExercise, PhaseTimer, BREATHING_CYCLES, PHASE_DURATION};
pub use driver::drive_breathing;
pub use grounding::{GroundingExercise, GroundingStep, GROUNDING_STEPS, GROUNDING_STEP_COUNT};

/// How an activation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseOutcome {
    Finished,
    Dismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseStatus {
    Active,
    Ended(ExerciseOutcome),
}

impl ExerciseStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, ExerciseStatus::Active)
    }
}

/// One-shot completion callback.
pub struct Completion {
    callback: Option<Box<dyn FnOnce(ExerciseOutcome) + Send>>,
}

impl Completion {
    pub fn new(callback: impl FnOnce(ExerciseOutcome) + Send + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// Runs the callback; later calls are no-ops.
    pub fn fire(&mut self, outcome: ExerciseOutcome) {
        if let Some(callback) = self.callback.take() {
            callback(outcome);
        }
    }

    pub fn has_fired(&self) -> bool {
        self.callback.is_none()
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("fired", &self.has_fired())
            .finish()
    }
}
