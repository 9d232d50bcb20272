use super::indent;
use crate::engagement::EngagementScore;
use crate::models::{ChatMessage, MessageRole};
use crate::service::ChatSnapshot;
use crate::wellbeing::{format_score, ScoreBand};

pub const WELCOME: &str = "Welcome to Vault\n\
    This is a safe space to share what's on your mind. How are you feeling today?";

pub const TYPING: &str = "vault is typing…";

/// Openers offered while the conversation is empty.
pub const QUICK_STARTS: [&str; 3] = [
    "I need to get something off my chest...",
    "I'd like to reflect on my day...",
    "I'm facing a challenge at work...",
];

/// Quick-start prompt by its 1-based number on the welcome screen.
pub fn quick_start(number: usize) -> Option<&'static str> {
    number.checked_sub(1).and_then(|i| QUICK_STARTS.get(i).copied())
}

pub fn render_welcome() -> String {
    let mut lines = vec![
        WELCOME.to_string(),
        "Would you like space to offload, reflect, or problem-solve?".to_string(),
    ];
    for (i, prompt) in QUICK_STARTS.iter().enumerate() {
        lines.push(format!("  /{}  {prompt}", i + 1));
    }
    lines.join("\n")
}

/// One chat bubble: a role/time line, then the body indented verbatim.
pub fn render_message(msg: &ChatMessage) -> String {
    let time = msg.timestamp.format("%H:%M");
    let label = match msg.role {
        MessageRole::User => format!("you [{time}]"),
        MessageRole::Assistant | MessageRole::System => match msg.wellbeing_score {
            Some(score) => format!(
                "vault [{time}] {} {}",
                ScoreBand::from_score(Some(score)).emoji(),
                format_score(Some(score))
            ),
            None => format!("vault [{time}]"),
        },
    };
    format!("{label}\n{}", indent(&msg.content, "  "))
}

pub fn render_header(snapshot: &ChatSnapshot, engagement: &EngagementScore) -> String {
    let band = ScoreBand::from_score(snapshot.current_score);
    let session = match snapshot.session_id {
        Some(id) => format!("session #{id}"),
        None => "new session".to_string(),
    };
    format!(
        "Chat Session · {} {} · {session} · engagement {}/100 · {}",
        band.emoji(),
        format_score(snapshot.current_score),
        engagement.value(),
        engagement.tier().message()
    )
}

pub fn render_transcript(snapshot: &ChatSnapshot) -> String {
    if snapshot.messages.is_empty() {
        return render_welcome();
    }
    let mut out: Vec<String> = snapshot.messages.iter().map(render_message).collect();
    if snapshot.is_loading {
        out.push(TYPING.to_string());
    }
    out.join("\n\n")
}
