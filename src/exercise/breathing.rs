use std::time::Duration;

use tracing::debug;

use super::{Completion, ExerciseOutcome, ExerciseStatus};

pub const BREATHING_CYCLES: u32 = 3;
pub const PHASE_DURATION: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathPhase {
    pub fn duration(&self) -> Duration {
        PHASE_DURATION
    }

    /// Phase that follows within the same cycle; `None` after exhale.
    pub fn next(&self) -> Option<BreathPhase> {
        match self {
            BreathPhase::Inhale => Some(BreathPhase::Hold),
            BreathPhase::Hold => Some(BreathPhase::Exhale),
            BreathPhase::Exhale => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Breathe In",
            BreathPhase::Hold => "Hold",
            BreathPhase::Exhale => "Breathe Out",
        }
    }

    pub fn cue(&self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Slowly fill your lungs with air...",
            BreathPhase::Hold => "Gently hold your breath...",
            BreathPhase::Exhale => "Release slowly and relax...",
        }
    }
}

/// A scheduled phase transition.
///
/// The host waits `delay`, then hands the timer back through
/// [`BreathingExercise::on_timer`]. Timers from an earlier generation are stale
/// and never touch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTimer {
    generation: u64,
    pub delay: Duration,
}

/// Paced breathing: inhale, hold, exhale, three cycles, four seconds each.
#[derive(Debug)]
pub struct BreathingExercise {
    phase: BreathPhase,
    cycle: u32,
    status: ExerciseStatus,
    generation: u64,
    completion: Completion,
}

impl BreathingExercise {
    pub fn start(on_complete: impl FnOnce(ExerciseOutcome) + Send + 'static) -> (Self, PhaseTimer) {
        let exercise = Self {
            phase: BreathPhase::Inhale,
            cycle: 1,
            status: ExerciseStatus::Active,
            generation: 0,
            completion: Completion::new(on_complete),
        };
        let timer = exercise.current_timer();
        debug!("Breathing exercise started");
        (exercise, timer)
    }

    pub fn phase(&self) -> BreathPhase {
        self.phase
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    pub fn total_cycles(&self) -> u32 {
        BREATHING_CYCLES
    }

    pub fn status(&self) -> ExerciseStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Applies the transition `timer` was scheduled for and returns the next one.
    ///
    /// Returns `None` when the timer is stale, when the exercise has already
    /// ended, or when this transition finished the last cycle.
    pub fn on_timer(&mut self, timer: PhaseTimer) -> Option<PhaseTimer> {
        if !self.is_active() || timer.generation != self.generation {
            debug!(
                "Ignoring stale breathing timer (generation {}, current {})",
                timer.generation, self.generation
            );
            return None;
        }

        self.generation += 1;
        match self.phase.next() {
            Some(next) => self.phase = next,
            None if self.cycle >= BREATHING_CYCLES => {
                self.finish(ExerciseOutcome::Finished);
                return None;
            }
            None => {
                self.cycle += 1;
                self.phase = BreathPhase::Inhale;
            }
        }
        debug!("Breathing: cycle {} {:?}", self.cycle, self.phase);
        Some(self.current_timer())
    }

    /// Closes the exercise early. Outstanding timers become stale.
    pub fn dismiss(&mut self) {
        if self.is_active() {
            self.generation += 1;
            self.finish(ExerciseOutcome::Dismissed);
        }
    }

    fn finish(&mut self, outcome: ExerciseOutcome) {
        self.status = ExerciseStatus::Ended(outcome);
        debug!("Breathing exercise ended: {outcome:?}");
        self.completion.fire(outcome);
    }

    fn current_timer(&self) -> PhaseTimer {
        PhaseTimer {
            generation: self.generation,
            delay: self.phase.duration(),
        }
    }
}
