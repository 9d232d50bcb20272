//! Backend access.
//!
//! The controller and the insights loaders only see the traits below, so
//! tests can swap the HTTP client for queued mock responses.

pub mod client;

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{ActionPlan, ChatRequest, ChatResponse, SessionsResponse, WellbeingTrend};

pub use client::ApiClient;

/// Sends one chat turn to the backend.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;
}

/// Read-only endpoints behind the history, dashboard and action-plan views.
#[async_trait]
pub trait InsightsSource: Send + Sync {
    async fn sessions(&self, limit: u32, offset: u32) -> Result<SessionsResponse, AppError>;

    async fn wellbeing_trend(&self, days: u32) -> Result<WellbeingTrend, AppError>;

    async fn action_plans(&self) -> Result<Vec<ActionPlan>, AppError>;
}

// ============================================================================
// Arc implementations for shared clients
// ============================================================================

#[async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for Arc<T> {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        (**self).send_message(request).await
    }
}

#[async_trait]
impl<T: InsightsSource + ?Sized> InsightsSource for Arc<T> {
    async fn sessions(&self, limit: u32, offset: u32) -> Result<SessionsResponse, AppError> {
        (**self).sessions(limit, offset).await
    }

    async fn wellbeing_trend(&self, days: u32) -> Result<WellbeingTrend, AppError> {
        (**self).wellbeing_trend(days).await
    }

    async fn action_plans(&self) -> Result<Vec<ActionPlan>, AppError> {
        (**self).action_plans().await
    }
}
