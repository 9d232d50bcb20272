use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, warn};

use crate::api::ChatTransport;
use crate::errors::{AppError, SubmitRejected};
use crate::models::{ChatMessage, ChatRequest, ChatResponse, InterventionType};

/// Shown in place of a reply when the chat request fails for any reason.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChatPhase {
    #[default]
    Idle,
    AwaitingReply,
}

/// Everything the presentation layer needs to draw the chat view.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSnapshot {
    pub messages: Vec<ChatMessage>,
    pub session_id: Option<i64>,
    pub is_loading: bool,
    pub intervention: Option<InterventionType>,
    pub current_score: Option<f64>,
}

/// What happened to an accepted submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Replied {
        reply: ChatMessage,
        intervention: Option<InterventionType>,
    },
    /// The request failed; `notice` is the fallback message appended instead.
    Failed { notice: ChatMessage },
    /// The conversation was reset while the request was in flight.
    Discarded,
}

#[derive(Debug, Default)]
struct Conversation {
    messages: Vec<ChatMessage>,
    session_id: Option<i64>,
    current_score: Option<f64>,
    intervention: Option<InterventionType>,
    phase: ChatPhase,
    /// Bumped on every reset so late replies can tell they are orphaned.
    epoch: u64,
}

impl Conversation {
    fn apply_reply(&mut self, epoch: u64, result: Result<ChatResponse, AppError>) -> SubmitOutcome {
        if self.epoch != epoch {
            info!("Dropping reply for a conversation that has since been reset");
            return SubmitOutcome::Discarded;
        }

        match result {
            Ok(response) => {
                match self.session_id {
                    None => {
                        info!("Chat session {} started", response.session_id);
                        self.session_id = Some(response.session_id);
                    }
                    Some(held) if held != response.session_id => {
                        warn!(
                            "Backend answered with session {} but this conversation holds {held}; keeping {held}",
                            response.session_id
                        );
                    }
                    Some(_) => {}
                }

                let reply = ChatMessage::assistant(response.message.as_str(), response.wellbeing_score);
                self.messages.push(reply.clone());
                self.current_score = response.wellbeing_score;

                let intervention = response.requested_intervention();
                if let Some(kind) = intervention {
                    if let Some(active) = self.intervention {
                        debug!("Intervention {kind} replaces active {active}");
                    }
                    info!("Backend requested a {kind} exercise");
                    self.intervention = Some(kind);
                }

                SubmitOutcome::Replied { reply, intervention }
            }
            Err(e) => {
                error!("Chat request failed: {e}");
                let notice = ChatMessage::fallback(FALLBACK_REPLY);
                self.messages.push(notice.clone());
                SubmitOutcome::Failed { notice }
            }
        }
    }
}

fn lock(state: &Mutex<Conversation>) -> MutexGuard<'_, Conversation> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks the conversation as awaiting a reply for as long as it lives.
///
/// Dropping it returns the conversation to idle, whether the request settled
/// or the submitting future was abandoned.
struct InFlight<'a> {
    state: &'a Mutex<Conversation>,
    epoch: u64,
}

impl InFlight<'_> {
    fn settle(self, result: Result<ChatResponse, AppError>) -> SubmitOutcome {
        let mut conversation = lock(self.state);
        let outcome = conversation.apply_reply(self.epoch, result);
        drop(conversation);
        outcome
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut conversation = lock(self.state);
        if conversation.epoch == self.epoch {
            conversation.phase = ChatPhase::Idle;
        }
    }
}

/// Owns one live conversation: message log, session id, latest score and
/// the pending intervention.
///
/// Clones share the same conversation. At most one request is in flight.
pub struct ChatController<T> {
    transport: Arc<T>,
    state: Arc<Mutex<Conversation>>,
}

impl<T> Clone for ChatController<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T: ChatTransport> ChatController<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            state: Arc::new(Mutex::new(Conversation::default())),
        }
    }

    /// Sends `content` as the next user turn.
    ///
    /// The user message is visible in the log before the request goes out.
    /// Content is stored and sent exactly as given. Whitespace-only input and
    /// a submission made while a reply is pending are rejected without
    /// touching the log.
    pub async fn submit(&self, content: &str) -> Result<SubmitOutcome, SubmitRejected> {
        if content.trim().is_empty() {
            return Err(SubmitRejected::Blank);
        }

        let (request, in_flight) = self.begin(content)?;
        let result = self.transport.send_message(&request).await;
        Ok(in_flight.settle(result))
    }

    fn begin(&self, content: &str) -> Result<(ChatRequest, InFlight<'_>), SubmitRejected> {
        let mut conversation = lock(&self.state);
        if conversation.phase == ChatPhase::AwaitingReply {
            debug!("Ignoring submit while a reply is pending");
            return Err(SubmitRejected::AwaitingReply);
        }

        conversation.messages.push(ChatMessage::user(content));
        conversation.phase = ChatPhase::AwaitingReply;

        let request = ChatRequest {
            message: content.to_string(),
            session_id: conversation.session_id,
        };
        let in_flight = InFlight {
            state: &self.state,
            epoch: conversation.epoch,
        };
        Ok((request, in_flight))
    }
}

impl<T> ChatController<T> {
    pub fn clear_intervention(&self) {
        lock(&self.state).intervention = None;
    }

    /// Discards the conversation locally. The server is not told.
    pub fn start_new_session(&self) {
        let mut conversation = lock(&self.state);
        let epoch = conversation.epoch + 1;
        *conversation = Conversation {
            epoch,
            ..Conversation::default()
        };
        info!("Started a new chat session");
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        let conversation = lock(&self.state);
        ChatSnapshot {
            messages: conversation.messages.clone(),
            session_id: conversation.session_id,
            is_loading: conversation.phase == ChatPhase::AwaitingReply,
            intervention: conversation.intervention,
            current_score: conversation.current_score,
        }
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        lock(&self.state).messages.clone()
    }

    pub fn session_id(&self) -> Option<i64> {
        lock(&self.state).session_id
    }

    pub fn intervention(&self) -> Option<InterventionType> {
        lock(&self.state).intervention
    }

    pub fn current_score(&self) -> Option<f64> {
        lock(&self.state).current_score
    }

    pub fn phase(&self) -> ChatPhase {
        lock(&self.state).phase
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.phase() == ChatPhase::AwaitingReply
    }
}
