use tracing::warn;

use super::sample_data::{sample_action_plans, sample_sessions, sample_trend};
use crate::api::client::{DEFAULT_SESSION_PAGE, DEFAULT_TREND_DAYS};
use crate::api::InsightsSource;
use crate::models::{ActionPlan, Session, TrendDirection, WellbeingTrend};

/// Where a loaded view's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Sample,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub data: T,
    pub source: DataSource,
}

impl<T> Loaded<T> {
    fn live(data: T) -> Self {
        Self { data, source: DataSource::Live }
    }

    fn sample(data: T) -> Self {
        Self { data, source: DataSource::Sample }
    }

    pub fn is_sample(&self) -> bool {
        self.source == DataSource::Sample
    }
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSummary {
    pub latest_score: Option<f64>,
    pub total_sessions: u32,
    pub total_messages: u32,
    pub direction: TrendDirection,
    pub recommendation: Option<String>,
}

impl TrendSummary {
    pub fn from_trend(trend: &WellbeingTrend) -> Self {
        Self {
            latest_score: trend
                .data_points
                .last()
                .and_then(|p| p.average_wellbeing_score),
            total_sessions: trend.data_points.iter().map(|p| p.session_count).sum(),
            total_messages: trend.data_points.iter().map(|p| p.total_messages).sum(),
            direction: trend.trend,
            recommendation: trend.recommendation.clone(),
        }
    }
}

/// Loaders for the read-only views. None of them fail: a missing or broken
/// backend answer is replaced by built-in sample data.
pub struct InsightsService<S> {
    source: S,
}

impl<S: InsightsSource> InsightsService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Session history; sample sessions when the request fails or returns none.
    pub async fn load_history(&self) -> Loaded<Vec<Session>> {
        match self.source.sessions(DEFAULT_SESSION_PAGE, 0).await {
            Ok(resp) if !resp.sessions.is_empty() => Loaded::live(resp.sessions),
            Ok(_) => {
                warn!("Backend returned no sessions; showing sample history");
                Loaded::sample(sample_sessions())
            }
            Err(e) => {
                warn!("Failed to load session history, showing sample data: {e}");
                Loaded::sample(sample_sessions())
            }
        }
    }

    pub async fn load_trend(&self, days: Option<u32>) -> Loaded<WellbeingTrend> {
        let days = days.unwrap_or(DEFAULT_TREND_DAYS);
        match self.source.wellbeing_trend(days).await {
            Ok(trend) => Loaded::live(trend),
            Err(e) => {
                warn!("Failed to load wellbeing trend, showing sample data: {e}");
                Loaded::sample(sample_trend())
            }
        }
    }

    pub async fn load_action_plans(&self) -> Loaded<Vec<ActionPlan>> {
        match self.source.action_plans().await {
            Ok(plans) if !plans.is_empty() => Loaded::live(plans),
            Ok(_) => {
                warn!("Backend returned no action plans; showing sample plans");
                Loaded::sample(sample_action_plans())
            }
            Err(e) => {
                warn!("Failed to load action plans, showing sample data: {e}");
                Loaded::sample(sample_action_plans())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::errors::AppError;
    use crate::models::{DataPoint, SessionsResponse};

    /// Answers each endpoint with a fixed result; `None` means "request failed".
    #[derive(Default)]
    struct MockSource {
        sessions: Option<Vec<Session>>,
        trend: Option<WellbeingTrend>,
        plans: Option<Vec<ActionPlan>>,
        trend_days: Mutex<Vec<u32>>,
    }

    fn unavailable(endpoint: &str) -> AppError {
        AppError::Status {
            endpoint: endpoint.to_string(),
            status: 503,
            detail: "HTTP 503".to_string(),
        }
    }

    #[async_trait]
    impl InsightsSource for MockSource {
        async fn sessions(&self, _limit: u32, _offset: u32) -> Result<SessionsResponse, AppError> {
            let sessions = self.sessions.clone().ok_or_else(|| unavailable("/api/v1/sessions"))?;
            Ok(SessionsResponse {
                total: sessions.len() as i64,
                sessions,
            })
        }

        async fn wellbeing_trend(&self, days: u32) -> Result<WellbeingTrend, AppError> {
            self.trend_days.lock().unwrap().push(days);
            self.trend.clone().ok_or_else(|| unavailable("/api/v1/analytics/trend"))
        }

        async fn action_plans(&self) -> Result<Vec<ActionPlan>, AppError> {
            self.plans.clone().ok_or_else(|| unavailable("/api/v1/action-plans"))
        }
    }

    #[tokio::test]
    async fn failed_history_falls_back_to_samples() {
        let service = InsightsService::new(MockSource::default());
        let history = service.load_history().await;
        assert!(history.is_sample());
        assert_eq!(history.data, sample_sessions());
    }

    #[tokio::test]
    async fn empty_history_falls_back_to_samples() {
        let service = InsightsService::new(MockSource {
            sessions: Some(Vec::new()),
            ..MockSource::default()
        });
        assert!(service.load_history().await.is_sample());
    }

    #[tokio::test]
    async fn live_history_is_kept() {
        let mut live = sample_sessions();
        live.truncate(1);
        live[0].session_summary = None;
        let service = InsightsService::new(MockSource {
            sessions: Some(live.clone()),
            ..MockSource::default()
        });
        let history = service.load_history().await;
        assert_eq!(history, Loaded { data: live, source: DataSource::Live });
    }

    #[tokio::test]
    async fn empty_trend_is_still_live() {
        let empty = WellbeingTrend {
            data_points: Vec::new(),
            trend: TrendDirection::Stable,
            recommendation: None,
        };
        let source = MockSource {
            trend: Some(empty.clone()),
            ..MockSource::default()
        };
        let service = InsightsService::new(source);

        let trend = service.load_trend(Some(7)).await;
        assert_eq!(trend.source, DataSource::Live);
        assert_eq!(trend.data, empty);
        assert_eq!(*service.source.trend_days.lock().unwrap(), vec![7]);
    }

    #[tokio::test]
    async fn failed_trend_and_plans_use_samples() {
        let service = InsightsService::new(MockSource::default());

        let trend = service.load_trend(None).await;
        assert!(trend.is_sample());
        assert_eq!(*service.source.trend_days.lock().unwrap(), vec![DEFAULT_TREND_DAYS]);

        let plans = service.load_action_plans().await;
        assert!(plans.is_sample());
        assert_eq!(plans.data.len(), 2);
    }

    #[test]
    fn summary_totals_the_sample_week() {
        let summary = TrendSummary::from_trend(&sample_trend());
        assert_eq!(summary.latest_score, Some(7.5));
        assert_eq!(summary.total_sessions, 13);
        assert_eq!(summary.total_messages, 83);
        assert_eq!(summary.direction, TrendDirection::Improving);
    }

    #[test]
    fn summary_keeps_unknown_latest_score() {
        let trend = WellbeingTrend {
            data_points: vec![DataPoint {
                date: "2026-01-20".to_string(),
                average_wellbeing_score: None,
                session_count: 0,
                total_messages: 0,
            }],
            trend: TrendDirection::Stable,
            recommendation: None,
        };
        let summary = TrendSummary::from_trend(&trend);
        assert_eq!(summary.latest_score, None);
        assert_eq!(summary.total_sessions, 0);
    }
}
