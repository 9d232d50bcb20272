use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::breathing::{BreathingExercise, PhaseTimer};

/// Runs the breathing timer chain on tokio time.
///
/// `on_phase` is called whenever a new phase begins, starting with the first.
/// Cancelling `cancel` dismisses the exercise; once this returns no timer is
/// left that could change `exercise`.
pub async fn drive_breathing<F>(
    exercise: &mut BreathingExercise,
    first: PhaseTimer,
    cancel: &CancellationToken,
    mut on_phase: F,
) where
    F: FnMut(&BreathingExercise),
{
    let mut timer = first;
    loop {
        if !exercise.is_active() {
            return;
        }
        on_phase(exercise);

        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Breathing exercise cancelled by host");
                exercise.dismiss();
                return;
            }
            _ = tokio::time::sleep(timer.delay) => {}
        }

        match exercise.on_timer(timer) {
            Some(next) => timer = next,
            None => return,
        }
    }
}
