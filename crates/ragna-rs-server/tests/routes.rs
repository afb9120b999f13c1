//! Router tests driven through `tower::ServiceExt::oneshot`.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use pretty_assertions::assert_eq;
use ragna_rs_config::{RagnaConfig, ServerConfig};
use ragna_rs_server::{AppState, build_router};
use ragna_rs_test_utils::{MockLLM, ScriptedDelegate, StubConnector};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn router_with(connector: StubConnector, delegate: ScriptedDelegate) -> Router {
    build_router(AppState::new(
        RagnaConfig::default(),
        Arc::new(connector),
        Arc::new(delegate),
    ))
}

fn coach_router(llm: MockLLM) -> Router {
    router_with(
        StubConnector::new(Arc::new(llm)),
        ScriptedDelegate::default(),
    )
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, String::from_utf8(bytes.to_vec()).expect("utf8"))
}

async fn send_json(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(router, request).await;
    (status, serde_json::from_str(&body).expect("json body"))
}

#[tokio::test]
async fn root_returns_welcome_message() {
    let router = coach_router(MockLLM::new("unused"));
    let request = Request::builder().uri("/").body(Body::empty()).expect("request");
    let (status, body) = send_json(router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Welcome to SearchChat API" }));
}

#[tokio::test]
async fn validate_key_reports_valid_credential() {
    let router = router_with(
        StubConnector::new(Arc::new(MockLLM::new("ok"))),
        ScriptedDelegate::default(),
    );
    let (status, body) = send_json(
        router,
        post_json("/api/validate-key", json!({ "api_key": "gsk_test" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "valid", "message": "API key is valid" })
    );
}

#[tokio::test]
async fn validate_key_rejects_bad_credential() {
    let router = router_with(StubConnector::rejecting(), ScriptedDelegate::default());
    let (status, body) = send_json(
        router,
        post_json("/api/validate-key", json!({ "api_key": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "detail": "Invalid API key" }));

    let router = router_with(
        StubConnector::new(Arc::new(MockLLM::failing("401 unauthorized"))),
        ScriptedDelegate::default(),
    );
    let (status, _) = send_json(
        router,
        post_json("/api/validate-key", json!({ "api_key": "expired" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn chat_returns_assistant_reply() {
    let delegate = ScriptedDelegate::answering("Attention is all you need.");
    let router = router_with(
        StubConnector::new(Arc::new(MockLLM::new("unused"))),
        delegate.clone(),
    );
    let (status, body) = send_json(
        router,
        post_json(
            "/api/chat",
            json!({
                "messages": [
                    { "role": "user", "content": "hi" },
                    { "role": "assistant", "content": "hello" },
                    { "role": "user", "content": "transformer paper?" }
                ],
                "api_key": "gsk_test"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "role": "assistant", "content": "Attention is all you need." })
    );
    assert_eq!(delegate.seen()[0].query(), "transformer paper?");
}

#[tokio::test]
async fn chat_with_empty_conversation_is_unprocessable() {
    let router = router_with(
        StubConnector::new(Arc::new(MockLLM::new("unused"))),
        ScriptedDelegate::answering("unused"),
    );
    let (status, body) = send_json(
        router,
        post_json("/api/chat", json!({ "messages": [], "api_key": "gsk_test" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().expect("detail").contains("at least one message"));
}

#[tokio::test]
async fn chat_delegate_failure_is_server_error() {
    let router = router_with(
        StubConnector::new(Arc::new(MockLLM::new("unused"))),
        ScriptedDelegate::default(),
    );
    let (status, body) = send_json(
        router,
        post_json(
            "/api/chat",
            json!({ "messages": [{ "role": "user", "content": "q" }], "api_key": "k" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().expect("detail").contains("delegate failed"));
}

#[tokio::test]
async fn chat_stream_emits_deltas_then_done() {
    let delegate = ScriptedDelegate::streaming(vec![
        Ok(json!({ "output": "first" })),
        Ok(json!({ "unknown": true })),
        Ok(json!({ "messages": [{ "content": "second" }] })),
    ]);
    let router = router_with(
        StubConnector::new(Arc::new(MockLLM::new("unused"))),
        delegate,
    );
    let (status, body) = send(
        router,
        post_json(
            "/api/chat/stream",
            json!({ "messages": [{ "role": "user", "content": "q" }], "api_key": "k" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let first = body.find(r#"data: {"content":"first"}"#).expect("first delta");
    let second = body.find(r#"data: {"content":"second"}"#).expect("second delta");
    let done = body.find("event: done").expect("done event");
    assert!(first < second && second < done);
    assert_eq!(body.matches("event: delta").count(), 2);
    assert!(!body.contains("event: error"));
}

#[tokio::test]
async fn chat_stream_interruption_emits_error_event() {
    let delegate = ScriptedDelegate::streaming(vec![
        Ok(json!({ "output": "partial" })),
        Err("connection reset".to_string()),
    ]);
    let router = router_with(
        StubConnector::new(Arc::new(MockLLM::new("unused"))),
        delegate,
    );
    let (status, body) = send(
        router,
        post_json(
            "/api/chat/stream",
            json!({ "messages": [{ "role": "user", "content": "q" }], "api_key": "k" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"data: {"content":"partial"}"#));
    assert!(body.contains("event: error"));
    assert!(body.contains("connection reset"));
    assert!(!body.contains("event: done"));
}

#[tokio::test]
async fn code_review_returns_review_field() {
    let llm = MockLLM::new("looks fine");
    let router = coach_router(llm.clone());
    let (status, body) = send_json(
        router,
        post_json(
            "/api/code-review",
            json!({
                "code": "def f(): pass",
                "language": "python",
                "problem_id": 1,
                "api_key": "k"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "review": "looks fine" }));
    assert_eq!(llm.calls(), 1);
    let messages = llm.last_messages();
    assert_eq!(
        messages[1].content,
        "Review this python code for LeetCode problem #1:\n\ndef f(): pass"
    );
}

#[tokio::test]
async fn coach_routes_wrap_answers_per_scenario() {
    let cases = [
        (
            "/api/leetchat",
            json!({ "messages": [{ "role": "user", "content": "hi" }], "api_key": "k" }),
            "content",
        ),
        (
            "/api/problem-hint",
            json!({ "problem": 42, "api_key": "k" }),
            "hints",
        ),
        (
            "/api/topic-problems",
            json!({ "topic": "dynamic_programming", "difficulty": "hard", "api_key": "k" }),
            "recommendations",
        ),
        (
            "/api/study-plan",
            json!({ "topics": ["arrays"], "duration_weeks": 2, "api_key": "k" }),
            "study_plan",
        ),
        (
            "/api/pattern-recognition",
            json!({ "code": "while lo < hi: pass", "language": "python", "api_key": "k" }),
            "pattern_analysis",
        ),
    ];
    for (uri, request, field) in cases {
        let router = coach_router(MockLLM::new("stub text"));
        let (status, body) = send_json(router, post_json(uri, request)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!({ field: "stub text" }), "{uri}");
    }
}

#[tokio::test]
async fn daily_challenge_reads_credential_from_query() {
    let llm = MockLLM::new("today's puzzle");
    let connector = StubConnector::new(Arc::new(llm));
    let router = router_with(connector.clone(), ScriptedDelegate::default());
    let request = Request::builder()
        .uri("/api/daily-challenge?api_key=gsk_query")
        .body(Body::empty())
        .expect("request");
    let (status, body) = send_json(router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "daily_challenge": "today's puzzle" }));
    assert_eq!(connector.connections.lock()[0].0, "gsk_query");
}

#[tokio::test]
async fn invalid_study_plan_is_unprocessable() {
    let llm = MockLLM::new("unused");
    let router = coach_router(llm.clone());
    let (status, _) = send_json(
        router,
        post_json(
            "/api/study-plan",
            json!({ "topics": ["arrays"], "duration_weeks": 0, "api_key": "k" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let router = coach_router(llm.clone());
    let (status, _) = send(
        router,
        post_json(
            "/api/topic-problems",
            json!({ "topic": "astrology", "api_key": "k" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn upstream_failure_is_server_error() {
    let router = router_with(
        StubConnector::new(Arc::new(MockLLM::failing("rate limited"))),
        ScriptedDelegate::default(),
    );
    let (status, body) = send_json(
        router,
        post_json("/api/problem-hint", json!({ "problem": "1", "api_key": "k" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().expect("detail").contains("rate limited"));
}

#[tokio::test]
async fn routes_follow_configured_prefix() {
    let config = RagnaConfig::builder()
        .server(ServerConfig {
            api_prefix: "/v1/".to_string(),
            ..ServerConfig::default()
        })
        .build();
    let router = build_router(AppState::new(
        config,
        Arc::new(StubConnector::new(Arc::new(MockLLM::new("hint")))),
        Arc::new(ScriptedDelegate::default()),
    ));
    let (status, body) = send_json(
        router.clone(),
        post_json("/v1/problem-hint", json!({ "problem": "7", "api_key": "k" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "hints": "hint" }));

    let (status, _) = send(
        router,
        post_json("/api/problem-hint", json!({ "problem": "7", "api_key": "k" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin_with_credentials() {
    let router = coach_router(MockLLM::new("unused"));
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/chat")
        .header(header::ORIGIN, "https://ragnagroq.onrender.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .expect("request");
    let response = router.oneshot(request).await.expect("response");
    let headers = response.headers();
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .expect("allow origin"),
        "https://ragnagroq.onrender.com"
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .expect("allow credentials"),
        "true"
    );
}
