use tracing::debug;

use super::{Completion, ExerciseOutcome, ExerciseStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundingStep {
    pub sense: &'static str,
    pub count: u8,
    pub prompt: &'static str,
}

pub const GROUNDING_STEP_COUNT: usize = 5;

/// The 5-4-3-2-1 sequence.
pub const GROUNDING_STEPS: [GroundingStep; GROUNDING_STEP_COUNT] = [
    GroundingStep { sense: "See", count: 5, prompt: "Name 5 things you can see around you" },
    GroundingStep { sense: "Touch", count: 4, prompt: "Name 4 things you can physically feel" },
    GroundingStep { sense: "Hear", count: 3, prompt: "Name 3 things you can hear right now" },
    GroundingStep { sense: "Smell", count: 2, prompt: "Name 2 things you can smell" },
    GroundingStep { sense: "Taste", count: 1, prompt: "Name 1 thing you can taste" },
];

/// User-paced stepper over [`GROUNDING_STEPS`]. Counts are prompts, not checked.
#[derive(Debug)]
pub struct GroundingExercise {
    index: usize,
    status: ExerciseStatus,
    completion: Completion,
}

impl GroundingExercise {
    pub fn start(on_complete: impl FnOnce(ExerciseOutcome) + Send + 'static) -> Self {
        debug!("Grounding exercise started");
        Self {
            index: 0,
            status: ExerciseStatus::Active,
            completion: Completion::new(on_complete),
        }
    }

    pub fn step_index(&self) -> usize {
        self.index
    }

    pub fn current_step(&self) -> &'static GroundingStep {
        &GROUNDING_STEPS[self.index]
    }

    pub fn total_steps(&self) -> usize {
        GROUNDING_STEP_COUNT
    }

    pub fn is_last_step(&self) -> bool {
        self.index == GROUNDING_STEP_COUNT - 1
    }

    pub fn status(&self) -> ExerciseStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Label for the advance control.
    pub fn advance_label(&self) -> &'static str {
        if self.is_last_step() {
            "Complete"
        } else {
            "Next"
        }
    }

    /// One flag per step; reached steps are `true`.
    pub fn progress(&self) -> [bool; GROUNDING_STEP_COUNT] {
        let mut dots = [false; GROUNDING_STEP_COUNT];
        for (i, dot) in dots.iter_mut().enumerate() {
            *dot = i <= self.index;
        }
        dots
    }

    /// Moves to the next step, or finishes from the last one.
    pub fn advance(&mut self) {
        if !self.is_active() {
            return;
        }
        if self.is_last_step() {
            self.finish(ExerciseOutcome::Finished);
        } else {
            self.index += 1;
            debug!("Grounding: step {} ({})", self.index, self.current_step().sense);
        }
    }

    pub fn dismiss(&mut self) {
        if self.is_active() {
            self.finish(ExerciseOutcome::Dismissed);
        }
    }

    fn finish(&mut self, outcome: ExerciseOutcome) {
        self.status = ExerciseStatus::Ended(outcome);
        debug!("Grounding exercise ended: {outcome:?}");
        self.completion.fire(outcome);
    }
}
