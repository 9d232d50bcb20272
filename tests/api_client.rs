//! End-to-end checks of `ApiClient` and `ChatController` against an
//! in-process mock of the Vault backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use vault_client::api::client::REQUEST_FAILED;
use vault_client::api::{ApiClient, ChatTransport, InsightsSource};
use vault_client::config::AppConfig;
use vault_client::errors::AppError;
use vault_client::models::{
    ChatRequest, ChatResponse, InterventionType, MessageRole, Session, SessionsResponse,
};
use vault_client::service::{
    ChatController, DataSource, InsightsService, SubmitOutcome, FALLBACK_REPLY,
};

// ── Mock backend ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct MockBackend {
    chat_requests: Arc<Mutex<Vec<ChatRequest>>>,
    session_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    fail_chat: Arc<AtomicBool>,
}

async fn chat_handler(
    State(backend): State<MockBackend>,
    Json(request): Json<ChatRequest>,
) -> Response {
    backend.chat_requests.lock().unwrap().push(request.clone());
    if backend.fail_chat.load(Ordering::SeqCst) {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "detail": "Model is warming up" })),
        )
            .into_response();
    }

    let panicking = request.message.contains("panic");
    Json(ChatResponse {
        session_id: request.session_id.unwrap_or(1),
        message: if panicking {
            "Let's slow down together.".to_string()
        } else {
            "Tell me more.".to_string()
        },
        wellbeing_score: Some(if panicking { 2.0 } else { 6.5 }),
        requires_intervention: panicking,
        intervention_type: panicking.then_some(InterventionType::Breathing),
    })
    .into_response()
}

fn session(id: i64) -> Session {
    Session {
        id,
        user_id: 9,
        started_at: "2026-02-01T08:00:00".to_string(),
        ended_at: None,
        wellbeing_score: None,
        session_summary: Some("Talked about sleep.".to_string()),
        action_plan: None,
    }
}

async fn list_sessions_handler(
    State(backend): State<MockBackend>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<SessionsResponse> {
    backend.session_queries.lock().unwrap().push(query);
    Json(SessionsResponse {
        sessions: vec![session(11)],
        total: 1,
    })
}

async fn get_session_handler(Path(id): Path<i64>) -> Response {
    if id != 11 {
        return (StatusCode::NOT_FOUND, "no such session").into_response();
    }
    Json(json!({
        "id": 11,
        "user_id": 9,
        "started_at": "2026-02-01T08:00:00",
        "ended_at": null,
        "wellbeing_score": 5.0,
        "session_summary": null,
        "action_plan": null,
        "messages": [
            { "id": 1, "session_id": 11, "role": "user", "content": "can't sleep", "timestamp": "2026-02-01T08:00:01" },
            { "id": 2, "session_id": 11, "role": "assistant", "content": "That sounds hard.", "timestamp": "2026-02-01T08:00:03" }
        ]
    }))
    .into_response()
}

async fn broken_trend_handler() -> &'static str {
    "<html>gateway timeout</html>"
}

async fn empty_plans_handler() -> Json<serde_json::Value> {
    Json(json!([]))
}

async fn create_session_handler() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::CREATED, Json(json!({ "id": 42 })))
}

async fn scores_handler(Query(query): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
    let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(0);
    let points: Vec<_> = (0..limit.min(2))
        .map(|i| json!({ "date": format!("2026-02-0{}", i + 1), "score": 5.0 + i as f64 }))
        .collect();
    Json(json!(points))
}

async fn end_session_handler() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::CONFLICT, Json(json!({ "message": "session already ended" })))
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

async fn spawn_backend(backend: MockBackend) -> ApiClient {
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/chat", post(chat_handler))
        .route(
            "/api/v1/sessions",
            get(list_sessions_handler).post(create_session_handler),
        )
        .route("/api/v1/analytics/scores", get(scores_handler))
        .route("/api/v1/sessions/{id}", get(get_session_handler))
        .route("/api/v1/sessions/{id}/end", post(end_session_handler))
        .route("/api/v1/analytics/trend", get(broken_trend_handler))
        .route("/api/v1/action-plans", get(empty_plans_handler))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = AppConfig {
        api_base_url: format!("http://{addr}"),
        ..AppConfig::default()
    };
    ApiClient::new(&config).unwrap()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn conversation_bootstraps_and_reuses_session_id() {
    let backend = MockBackend::default();
    let client = spawn_backend(backend.clone()).await;
    let controller = ChatController::new(client);

    controller
        .submit("I need to get something off my chest...")
        .await
        .unwrap();
    controller.submit("work has been a lot").await.unwrap();

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.session_id, Some(1));
    assert_eq!(snapshot.current_score, Some(6.5));
    assert_eq!(snapshot.intervention, None);
    let roles: Vec<MessageRole> = snapshot.messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![MessageRole::User, MessageRole::Assistant, MessageRole::User, MessageRole::Assistant]
    );
    assert_eq!(snapshot.messages[1].content, "Tell me more.");

    let requests = backend.chat_requests.lock().unwrap().clone();
    assert_eq!(requests[0].session_id, None);
    assert_eq!(requests[1].session_id, Some(1));
}

#[tokio::test]
async fn intervention_request_reaches_controller() {
    let client = spawn_backend(MockBackend::default()).await;
    let controller = ChatController::new(client);

    let outcome = controller.submit("I think I'm having a panic attack").await.unwrap();

    assert!(matches!(
        outcome,
        SubmitOutcome::Replied { intervention: Some(InterventionType::Breathing), .. }
    ));
    assert_eq!(controller.intervention(), Some(InterventionType::Breathing));
    assert_eq!(controller.current_score(), Some(2.0));
}

#[tokio::test]
async fn error_status_carries_backend_detail() {
    let backend = MockBackend::default();
    backend.fail_chat.store(true, Ordering::SeqCst);
    let client = spawn_backend(backend).await;

    let err = client
        .send_message(&ChatRequest {
            message: "hello".to_string(),
            session_id: None,
        })
        .await
        .unwrap_err();

    match err {
        AppError::Status { status, detail, .. } => {
            assert_eq!(status, 503);
            assert_eq!(detail, "Model is warming up");
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_send_shows_fallback_message() {
    let backend = MockBackend::default();
    backend.fail_chat.store(true, Ordering::SeqCst);
    let client = spawn_backend(backend).await;
    let controller = ChatController::new(client);

    let outcome = controller.submit("hello?").await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.messages.len(), 2);
    assert_eq!(snapshot.messages[1].content, FALLBACK_REPLY);
    assert_eq!(snapshot.session_id, None);
    assert!(!snapshot.is_loading);
}

#[tokio::test]
async fn plain_text_error_reports_request_failed() {
    let client = spawn_backend(MockBackend::default()).await;

    let err = client.session(404).await.unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    assert!(matches!(err, AppError::Status { ref detail, .. } if detail == REQUEST_FAILED));
}

#[tokio::test]
async fn json_error_without_detail_names_the_status() {
    let client = spawn_backend(MockBackend::default()).await;

    let err = client.end_session(11).await.unwrap_err();

    assert_eq!(err.status_code(), Some(409));
    assert!(matches!(err, AppError::Status { ref detail, .. } if detail == "HTTP 409"));
}

#[tokio::test]
async fn session_detail_decodes_messages() {
    let client = spawn_backend(MockBackend::default()).await;

    let detail = client.session(11).await.unwrap();

    assert_eq!(detail.session.id, 11);
    assert_eq!(detail.session.wellbeing_score, Some(5.0));
    assert_eq!(detail.messages.len(), 2);
    assert_eq!(detail.messages[1].role, MessageRole::Assistant);
}

#[tokio::test]
async fn insights_mix_live_and_sample_data() {
    let backend = MockBackend::default();
    let client = spawn_backend(backend.clone()).await;
    let insights = InsightsService::new(client.clone());

    let history = insights.load_history().await;
    assert_eq!(history.source, DataSource::Live);
    assert_eq!(history.data, vec![session(11)]);
    let query = backend.session_queries.lock().unwrap()[0].clone();
    assert_eq!(query.get("limit").map(String::as_str), Some("20"));
    assert_eq!(query.get("offset").map(String::as_str), Some("0"));

    // The trend route answers 200 with HTML, which must not break the view.
    let err = client.wellbeing_trend(30).await.unwrap_err();
    assert!(matches!(err, AppError::Decode { .. }));
    assert_eq!(insights.load_trend(None).await.source, DataSource::Sample);

    assert_eq!(insights.load_action_plans().await.source, DataSource::Sample);
}

#[tokio::test]
async fn health_reports_status() {
    let client = spawn_backend(MockBackend::default()).await;
    assert_eq!(client.health().await.unwrap().status, "healthy");
}

#[tokio::test]
async fn create_session_and_score_history() {
    let client = spawn_backend(MockBackend::default()).await;

    assert_eq!(client.create_session().await.unwrap().id, 42);

    let scores = client.score_history(30).await.unwrap();
    assert_eq!(scores.len(), 2);
    assert_eq!(scores[1].score, 6.0);
}
