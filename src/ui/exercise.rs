use crate::exercise::{BreathingExercise, GroundingExercise};

pub const BREATHING_TITLE: &str = "Take a moment to breathe  (press Enter to close)";
pub const GROUNDING_TITLE: &str =
    "5-4-3-2-1 Grounding: let's bring you back to the present moment";

pub fn breathing_frame(exercise: &BreathingExercise) -> String {
    let phase = exercise.phase();
    format!(
        "Cycle {} of {}  ·  {}\n  {}",
        exercise.cycle(),
        exercise.total_cycles(),
        phase.label(),
        phase.cue()
    )
}

pub fn grounding_frame(exercise: &GroundingExercise) -> String {
    let dots: String = exercise
        .progress()
        .iter()
        .map(|reached| if *reached { '●' } else { '○' })
        .collect();
    let step = exercise.current_step();
    format!(
        "{dots}  step {} of {}\n  {} {}\n  {}\n[Enter] {}  [q] Close",
        exercise.step_index() + 1,
        exercise.total_steps(),
        step.count,
        step.sense,
        step.prompt,
        exercise.advance_label()
    )
}
