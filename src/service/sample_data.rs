//! Built-in placeholder data shown when the backend can't supply its own.

use crate::models::{
    ActionCategory, ActionItem, ActionPlan, DataPoint, Priority, Session, TrendDirection,
    WellbeingTrend,
};

pub fn sample_sessions() -> Vec<Session> {
    [
        (1, "2026-01-16T10:30:00Z", "2026-01-16T10:45:00Z", 7.5, "Discussed work-life balance and stress management techniques."),
        (2, "2026-01-15T14:00:00Z", "2026-01-15T14:20:00Z", 7.2, "Explored coping strategies for anxiety."),
        (3, "2026-01-14T09:15:00Z", "2026-01-14T09:35:00Z", 6.8, "Reflected on recent positive experiences."),
        (4, "2026-01-13T16:45:00Z", "2026-01-13T17:00:00Z", 5.5, "Worked through difficult emotions about relationships."),
        (5, "2026-01-12T11:00:00Z", "2026-01-12T11:30:00Z", 6.1, "Identified triggers and practiced grounding techniques."),
    ]
    .into_iter()
    .map(|(id, started, ended, score, summary)| Session {
        id,
        user_id: 1,
        started_at: started.to_string(),
        ended_at: Some(ended.to_string()),
        wellbeing_score: Some(score),
        session_summary: Some(summary.to_string()),
        action_plan: None,
    })
    .collect()
}

pub fn sample_trend() -> WellbeingTrend {
    let data_points = [
        ("2026-01-10", 5.2, 2, 12),
        ("2026-01-11", 5.8, 1, 8),
        ("2026-01-12", 6.1, 3, 18),
        ("2026-01-13", 5.5, 2, 14),
        ("2026-01-14", 6.8, 2, 10),
        ("2026-01-15", 7.2, 1, 6),
        ("2026-01-16", 7.5, 2, 15),
    ]
    .into_iter()
    .map(|(date, score, sessions, messages)| DataPoint {
        date: date.to_string(),
        average_wellbeing_score: Some(score),
        session_count: sessions,
        total_messages: messages,
    })
    .collect();

    WellbeingTrend {
        data_points,
        trend: TrendDirection::Improving,
        recommendation: Some(
            "Your wellbeing has been improving! Keep up the positive momentum.".to_string(),
        ),
    }
}

fn item(title: &str, description: &str, priority: Priority, category: ActionCategory) -> ActionItem {
    ActionItem {
        title: title.to_string(),
        description: description.to_string(),
        priority,
        category,
    }
}

pub fn sample_action_plans() -> Vec<ActionPlan> {
    vec![
        ActionPlan {
            session_id: 1,
            generated_at: "2026-01-16T10:45:00Z".to_string(),
            summary: "Focus on establishing better boundaries at work and prioritizing self-care activities.".to_string(),
            actions: vec![
                item(
                    "Set clear work hours",
                    "Define and communicate your working hours to colleagues. Avoid checking emails after 6pm.",
                    Priority::High,
                    ActionCategory::Workplace,
                ),
                item(
                    "Daily 10-minute walk",
                    "Take a short walk during lunch break to reset and recharge.",
                    Priority::Medium,
                    ActionCategory::Personal,
                ),
                item(
                    "Schedule therapy session",
                    "Consider booking a session with a professional counselor for deeper support.",
                    Priority::Low,
                    ActionCategory::ProfessionalHelp,
                ),
            ],
        },
        ActionPlan {
            session_id: 2,
            generated_at: "2026-01-15T14:20:00Z".to_string(),
            summary: "Implement anxiety management techniques and build a support network.".to_string(),
            actions: vec![
                item(
                    "Practice breathing exercises",
                    "Use the 4-7-8 breathing technique when feeling anxious.",
                    Priority::High,
                    ActionCategory::Personal,
                ),
                item(
                    "Reach out to a friend",
                    "Connect with someone you trust this week to share how you're feeling.",
                    Priority::Medium,
                    ActionCategory::Personal,
                ),
            ],
        },
    ]
}
