use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{ChatTransport, InsightsSource};
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::{
    ActionPlan, ChatRequest, ChatResponse, CreatedSession, HealthStatus, ScorePoint,
    SessionWithMessages, SessionsResponse, WellbeingTrend,
};

pub const DEFAULT_SESSION_PAGE: u32 = 20;
pub const DEFAULT_TREND_DAYS: u32 = 30;
pub const DEFAULT_SCORE_LIMIT: u32 = 30;

/// Error detail used when a failed response has no readable JSON body.
pub const REQUEST_FAILED: &str = "Request failed";

/// Error body returned by the backend on non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// HTTP client for the Vault REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(AppError::ClientBuild)?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthStatus, AppError> {
        self.request(Method::GET, "/health", None::<&()>).await
    }

    pub async fn session(&self, id: i64) -> Result<SessionWithMessages, AppError> {
        self.request(Method::GET, &format!("/api/v1/sessions/{id}"), None::<&()>)
            .await
    }

    pub async fn create_session(&self) -> Result<CreatedSession, AppError> {
        self.request(Method::POST, "/api/v1/sessions", None::<&()>).await
    }

    pub async fn end_session(&self, id: i64) -> Result<SessionWithMessages, AppError> {
        self.request(Method::POST, &format!("/api/v1/sessions/{id}/end"), None::<&()>)
            .await
    }

    pub async fn score_history(&self, limit: u32) -> Result<Vec<ScorePoint>, AppError> {
        self.request(
            Method::GET,
            &format!("/api/v1/analytics/scores?limit={limit}"),
            None::<&()>,
        )
        .await
    }

    pub async fn generate_action_plan(&self, session_id: i64) -> Result<ActionPlan, AppError> {
        self.request(
            Method::POST,
            &format!("/api/v1/sessions/{session_id}/action-plan"),
            None::<&()>,
        )
        .await
    }

    /// Issues one JSON request; any non-success status becomes [`AppError::Status`].
    async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{endpoint}", self.base_url);
        debug!("{method} {url}");

        let mut builder = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(|e| {
            error!("Request to {endpoint} failed: {e}");
            AppError::transport(endpoint, e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            // Unreadable bodies say "Request failed"; JSON without `detail` names the status.
            let detail = match resp.json::<ErrorBody>().await {
                Ok(ErrorBody { detail: Some(serde_json::Value::String(s)) }) => s,
                Ok(ErrorBody { detail: Some(other) }) => other.to_string(),
                Ok(ErrorBody { detail: None }) => format!("HTTP {}", status.as_u16()),
                Err(_) => REQUEST_FAILED.to_string(),
            };
            error!("{endpoint} returned {status}: {detail}");
            return Err(AppError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                detail,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| AppError::transport(endpoint, e))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            error!("Failed to decode {endpoint} response: {e}");
            AppError::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            }
        })
    }
}

#[async_trait]
impl ChatTransport for ApiClient {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.request(Method::POST, "/api/v1/chat", Some(request)).await
    }
}

#[async_trait]
impl InsightsSource for ApiClient {
    async fn sessions(&self, limit: u32, offset: u32) -> Result<SessionsResponse, AppError> {
        self.request(
            Method::GET,
            &format!("/api/v1/sessions?limit={limit}&offset={offset}"),
            None::<&()>,
        )
        .await
    }

    async fn wellbeing_trend(&self, days: u32) -> Result<WellbeingTrend, AppError> {
        self.request(
            Method::GET,
            &format!("/api/v1/analytics/trend?days={days}"),
            None::<&()>,
        )
        .await
    }

    async fn action_plans(&self) -> Result<Vec<ActionPlan>, AppError> {
        self.request(Method::GET, "/api/v1/action-plans", None::<&()>)
            .await
    }
}
