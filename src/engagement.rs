use std::collections::HashSet;

use tracing::debug;

pub const MAX_ENGAGEMENT: u8 = 100;
/// Where a fresh client starts.
pub const INITIAL_ENGAGEMENT: u8 = 70;

/// Actions that earn engagement points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementEvent {
    MessageExchanged,
    ActionItemCompleted,
}

impl EngagementEvent {
    pub fn points(&self) -> u8 {
        match self {
            EngagementEvent::MessageExchanged => 2,
            EngagementEvent::ActionItemCompleted => 5,
        }
    }
}

/// Local gamification counter in `0..=100`. It only goes up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngagementScore(u8);

impl EngagementScore {
    pub fn new(initial: u8) -> Self {
        Self(initial.min(MAX_ENGAGEMENT))
    }

    pub fn starting() -> Self {
        Self::new(INITIAL_ENGAGEMENT)
    }

    pub fn tier(&self) -> EngagementTier {
        EngagementTier::from_score(self.0)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn record(&mut self, event: EngagementEvent) -> u8 {
        self.0 = self.0.saturating_add(event.points()).min(MAX_ENGAGEMENT);
        debug!("Engagement +{} for {event:?} -> {}", event.points(), self.0);
        self.0
    }
}

/// Encouragement shown next to the engagement score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementTier {
    Thriving,
    Progressing,
    Growing,
    Starting,
}

impl EngagementTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => EngagementTier::Thriving,
            60..=79 => EngagementTier::Progressing,
            40..=59 => EngagementTier::Growing,
            _ => EngagementTier::Starting,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            EngagementTier::Thriving => "You're thriving! Keep nurturing yourself.",
            EngagementTier::Progressing => "Good progress. Every check-in counts.",
            EngagementTier::Growing => "Your vault is growing. Stay consistent.",
            EngagementTier::Starting => "Let's build together. Start a conversation.",
        }
    }
}

/// Checked state of action items, keyed by (plan session id, item index).
#[derive(Debug, Clone, Default)]
pub struct ActionChecklist {
    checked: HashSet<(i64, usize)>,
}

impl ActionChecklist {
    pub fn is_checked(&self, plan: i64, item: usize) -> bool {
        self.checked.contains(&(plan, item))
    }

    /// Flips one item. Checking it earns points; unchecking never takes any back.
    /// Returns the new checked state.
    pub fn toggle(&mut self, plan: i64, item: usize, score: &mut EngagementScore) -> bool {
        if self.checked.remove(&(plan, item)) {
            return false;
        }
        self.checked.insert((plan, item));
        score.record(EngagementEvent::ActionItemCompleted);
        true
    }

    pub fn checked_count(&self, plan: i64) -> usize {
        self.checked.iter().filter(|(p, _)| *p == plan).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_add_fixed_points() {
        let mut score = EngagementScore::default();
        assert_eq!(score.record(EngagementEvent::MessageExchanged), 2);
        assert_eq!(score.record(EngagementEvent::ActionItemCompleted), 7);
    }

    #[test]
    fn score_is_clamped_at_one_hundred() {
        let mut score = EngagementScore::new(97);
        score.record(EngagementEvent::ActionItemCompleted);
        assert_eq!(score.value(), 100);

        for _ in 0..500 {
            score.record(EngagementEvent::MessageExchanged);
            score.record(EngagementEvent::ActionItemCompleted);
            assert!(score.value() <= MAX_ENGAGEMENT);
        }
        assert_eq!(score.value(), 100);
        assert_eq!(EngagementScore::new(250).value(), 100);
    }

    #[test]
    fn fresh_client_starts_at_seventy() {
        let score = EngagementScore::starting();
        assert_eq!(score.value(), 70);
        assert_eq!(score.tier(), EngagementTier::Progressing);
    }

    #[test]
    fn tier_boundaries() {
        let cases = [
            (100, EngagementTier::Thriving),
            (80, EngagementTier::Thriving),
            (79, EngagementTier::Progressing),
            (60, EngagementTier::Progressing),
            (59, EngagementTier::Growing),
            (40, EngagementTier::Growing),
            (39, EngagementTier::Starting),
            (0, EngagementTier::Starting),
        ];
        for (score, tier) in cases {
            assert_eq!(EngagementTier::from_score(score), tier, "score {score}");
        }
        assert_eq!(
            EngagementScore::new(85).tier().message(),
            "You're thriving! Keep nurturing yourself."
        );
    }

    #[test]
    fn unchecking_keeps_points() {
        let mut score = EngagementScore::new(10);
        let mut checklist = ActionChecklist::default();

        assert!(checklist.toggle(1, 0, &mut score));
        assert_eq!(score.value(), 15);
        assert!(checklist.is_checked(1, 0));

        assert!(!checklist.toggle(1, 0, &mut score));
        assert_eq!(score.value(), 15);
        assert!(!checklist.is_checked(1, 0));
    }

    #[test]
    fn items_are_tracked_per_plan() {
        let mut score = EngagementScore::default();
        let mut checklist = ActionChecklist::default();
        checklist.toggle(1, 0, &mut score);
        checklist.toggle(1, 2, &mut score);
        checklist.toggle(2, 0, &mut score);

        assert_eq!(checklist.checked_count(1), 2);
        assert_eq!(checklist.checked_count(2), 1);
        assert!(!checklist.is_checked(2, 2));
        assert_eq!(score.value(), 15);
    }
}
