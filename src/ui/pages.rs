use super::{format_day, format_time, indent};
use crate::engagement::{ActionChecklist, EngagementScore};
use crate::models::{ActionPlan, MessageRole, Session, SessionWithMessages, WellbeingTrend};
use crate::service::{Loaded, TrendSummary};
use crate::wellbeing::{format_score, ScoreBand};

const SAMPLE_NOTE: &str = "(showing sample data: the server could not be reached)";

fn score_badge(score: Option<f64>) -> String {
    format!("{} {}", ScoreBand::from_score(score).emoji(), format_score(score))
}

fn with_sample_note<T>(loaded: &Loaded<T>, mut lines: Vec<String>) -> String {
    if loaded.is_sample() {
        lines.insert(1, SAMPLE_NOTE.to_string());
    }
    lines.join("\n")
}

pub fn render_history(history: &Loaded<Vec<Session>>) -> String {
    let mut lines = vec!["Session History".to_string()];
    for session in &history.data {
        lines.push(format!(
            "#{:<4} {}  {}  {}",
            session.id,
            format_day(&session.started_at),
            format_time(&session.started_at),
            score_badge(session.wellbeing_score)
        ));
        if let Some(summary) = &session.session_summary {
            lines.push(format!("      {summary}"));
        }
    }
    with_sample_note(history, lines)
}

pub fn render_session_detail(detail: &SessionWithMessages) -> String {
    let session = &detail.session;
    let mut lines = vec![format!(
        "Session #{} · {} {} · {}",
        session.id,
        format_day(&session.started_at),
        format_time(&session.started_at),
        score_badge(session.wellbeing_score)
    )];
    if let Some(summary) = &session.session_summary {
        lines.push(format!("Summary: {summary}"));
    }
    for message in detail.messages.iter().filter(|m| m.role != MessageRole::System) {
        lines.push(format!("{} [{}]", message.role, format_time(&message.timestamp)));
        lines.push(indent(&message.content, "  "));
    }
    lines.join("\n")
}

pub fn render_dashboard(trend: &Loaded<WellbeingTrend>, engagement: &EngagementScore) -> String {
    let summary = TrendSummary::from_trend(&trend.data);
    let mut lines = vec![
        "Dashboard".to_string(),
        format!("Current wellbeing: {}", score_badge(summary.latest_score)),
        format!("Trend: {}", summary.direction.as_str()),
        format!(
            "Activity: {} sessions, {} messages",
            summary.total_sessions, summary.total_messages
        ),
        format!(
            "Engagement: {}/100 · {}",
            engagement.value(),
            engagement.tier().message()
        ),
        "Wellbeing over time:".to_string(),
    ];
    for point in &trend.data.data_points {
        lines.push(format!(
            "  {:<12} {}",
            format_day(&point.date),
            format_score(point.average_wellbeing_score)
        ));
    }
    if let Some(recommendation) = &summary.recommendation {
        lines.push(format!("Recommendation: {recommendation}"));
    }
    with_sample_note(trend, lines)
}

pub fn render_action_plans(plans: &Loaded<Vec<ActionPlan>>, checklist: &ActionChecklist) -> String {
    let mut lines = vec!["Action Plans".to_string()];
    if plans.data.is_empty() {
        lines.push("No action plans yet. Complete a chat session to generate one!".to_string());
    }
    for (plan_no, plan) in plans.data.iter().enumerate() {
        lines.push(format!("[{}] {}", plan_no + 1, format_day(&plan.generated_at)));
        lines.push(format!("    {}", plan.summary));
        for (item_no, action) in plan.actions.iter().enumerate() {
            let mark = if checklist.is_checked(plan.session_id, item_no) { 'x' } else { ' ' };
            lines.push(format!(
                "    [{mark}] {}.{} {} ({} priority, {})",
                plan_no + 1,
                item_no + 1,
                action.title,
                action.priority.label(),
                action.category.label()
            ));
            lines.push(format!("          {}", action.description));
        }
    }
    with_sample_note(plans, lines)
}

pub const HELP: &str = "\
Type a message and press Enter to talk to Vault.
Commands:
  /1, /2, /3             send a quick-start prompt in an empty conversation
  /new                   start a new session
  /transcript            reprint the current conversation
  /end                   end the current session on the server
  /history               list past sessions
  /session <id>          show one past session
  /dashboard [days]      wellbeing trend
  /scores                recent wellbeing scores
  /plans                 list action plans
  /plan                  generate an action plan for this session
  /done <plan>.<item>    check or uncheck an action item
  /breathe, /ground      start an exercise
  /health                check the backend
  /help, /quit";
