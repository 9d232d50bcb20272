use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Chat (UI state) ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single turn in the live conversation, as the client shows it.
///
/// Only the `user` and `assistant` constructors exist, so a chat log never
/// carries system turns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Present only on replies built from a server response.
    pub wellbeing_score: Option<f64>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: format!("user-{}", uuid::Uuid::new_v4()),
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
            wellbeing_score: None,
        }
    }

    pub fn assistant(content: impl Into<String>, wellbeing_score: Option<f64>) -> Self {
        Self {
            id: format!("assistant-{}", uuid::Uuid::new_v4()),
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            wellbeing_score,
        }
    }

    /// Assistant-authored notice shown in place of a reply that never arrived.
    pub fn fallback(content: impl Into<String>) -> Self {
        Self {
            id: format!("error-{}", uuid::Uuid::new_v4()),
            ..Self::assistant(content, None)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterventionType {
    Breathing,
    Grounding,
}

impl InterventionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionType::Breathing => "breathing",
            InterventionType::Grounding => "grounding",
        }
    }
}

impl std::fmt::Display for InterventionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Chat (wire) ──────────────────────────────────────────────────────────────

/// Request body for `POST /api/v1/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<i64>,
}

/// Response from `POST /api/v1/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: i64,
    pub message: String,
    #[serde(default)]
    pub wellbeing_score: Option<f64>,
    #[serde(default)]
    pub requires_intervention: bool,
    #[serde(default)]
    pub intervention_type: Option<InterventionType>,
}

impl ChatResponse {
    /// The exercise the server asked for, if it asked for one.
    pub fn requested_intervention(&self) -> Option<InterventionType> {
        if self.requires_intervention {
            self.intervention_type
        } else {
            None
        }
    }
}

// ── Sessions ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub started_at: String,
    #[serde(default)]
    pub ended_at: Option<String>,
    #[serde(default)]
    pub wellbeing_score: Option<f64>,
    #[serde(default)]
    pub session_summary: Option<String>,
    #[serde(default)]
    pub action_plan: Option<String>,
}

/// A message as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: i64,
    pub session_id: i64,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionWithMessages {
    #[serde(flatten)]
    pub session: Session,
    #[serde(default)]
    pub messages: Vec<StoredMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub sessions: Vec<Session>,
    pub total: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedSession {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

// ── Action plans ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Workplace,
    Personal,
    ProfessionalHelp,
}

impl ActionCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ActionCategory::Workplace => "Workplace",
            ActionCategory::Personal => "Personal",
            ActionCategory::ProfessionalHelp => "Professional Help",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: ActionCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub session_id: i64,
    pub generated_at: String,
    pub actions: Vec<ActionItem>,
    pub summary: String,
}

// ── Analytics ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: String,
    #[serde(default)]
    pub average_wellbeing_score: Option<f64>,
    pub session_count: u32,
    pub total_messages: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Improving => "improving",
            TrendDirection::Declining => "declining",
            TrendDirection::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellbeingTrend {
    pub data_points: Vec<DataPoint>,
    pub trend: TrendDirection,
    #[serde(default)]
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorePoint {
    pub date: String,
    pub score: f64,
}
