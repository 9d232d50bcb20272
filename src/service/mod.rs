pub mod chat_controller;
pub mod insights_service;
pub mod sample_data;

pub use chat_controller::{ChatController, ChatPhase, ChatSnapshot, SubmitOutcome, FALLBACK_REPLY};
pub use insights_service::{DataSource, InsightsService, Loaded, TrendSummary};
