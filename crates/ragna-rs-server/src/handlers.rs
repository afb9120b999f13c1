//! Route handlers.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::{Stream, StreamExt, stream};
use log::info;
use ragna_rs_core::{RagnaCoreError, ResponseStream};
use ragna_rs_protocol::{
    ApiKeyValidation, ChatReply, ChatRequest, CodeReviewRequest, Credential, CredentialQuery,
    ProblemRequest, ScenarioRequest, ScenarioResponse, StudyPlanRequest, TopicRequest,
    ValidationStatus,
};
use serde_json::{Value, json};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to SearchChat API" }))
}

pub async fn validate_key(
    State(state): State<AppState>,
    Json(body): Json<ApiKeyValidation>,
) -> Result<Json<ValidationStatus>, ApiError> {
    info!("validate key request (key_len={})", body.api_key.expose().len());
    let valid = state
        .search_assistant(body.api_key)
        .validate_credential()
        .await?;
    if !valid {
        return Err(RagnaCoreError::InvalidCredential("validation failed".to_string()).into());
    }
    Ok(Json(ValidationStatus::valid()))
}

pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    info!("chat request (messages={})", body.messages.len());
    let answer = state
        .search_assistant(body.api_key)
        .process_messages(&body.messages)
        .await?;
    Ok(Json(ChatReply::assistant(answer)))
}

pub async fn chat_stream(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    info!("chat stream request (messages={})", body.messages.len());
    let fragments = state
        .search_assistant(body.api_key)
        .stream_response(&body.messages)
        .await?;
    Ok(Sse::new(sse_events(fragments)).keep_alive(KeepAlive::default()))
}

/// One `delta` event per fragment, then `done`; an interruption ends the
/// stream with a single `error` event instead.
fn sse_events(fragments: ResponseStream) -> impl Stream<Item = Result<Event, axum::Error>> {
    stream::unfold(Some(fragments), |pending| async move {
        let mut fragments = pending?;
        let event = match fragments.next().await {
            Some(Ok(fragment)) => {
                let event = Event::default()
                    .event("delta")
                    .json_data(json!({ "content": fragment }));
                return Some((event, Some(fragments)));
            }
            Some(Err(err)) => Event::default()
                .event("error")
                .json_data(json!({ "detail": err.to_string() })),
            None => Ok(Event::default().event("done").data("[DONE]")),
        };
        Some((event, None))
    })
}

pub async fn leet_chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ScenarioResponse>, ApiError> {
    let (scenario, credential) = body.into_scenario();
    run_scenario(&state, scenario, credential).await
}

pub async fn problem_hint(
    State(state): State<AppState>,
    Json(body): Json<ProblemRequest>,
) -> Result<Json<ScenarioResponse>, ApiError> {
    let (scenario, credential) = body.into_scenario();
    run_scenario(&state, scenario, credential).await
}

pub async fn topic_problems(
    State(state): State<AppState>,
    Json(body): Json<TopicRequest>,
) -> Result<Json<ScenarioResponse>, ApiError> {
    let (scenario, credential) = body.into_scenario();
    run_scenario(&state, scenario, credential).await
}

pub async fn code_review(
    State(state): State<AppState>,
    Json(body): Json<CodeReviewRequest>,
) -> Result<Json<ScenarioResponse>, ApiError> {
    let (scenario, credential) = body.into_review();
    run_scenario(&state, scenario, credential).await
}

pub async fn study_plan(
    State(state): State<AppState>,
    Json(body): Json<StudyPlanRequest>,
) -> Result<Json<ScenarioResponse>, ApiError> {
    let (scenario, credential) = body.into_scenario();
    run_scenario(&state, scenario, credential).await
}

pub async fn pattern_recognition(
    State(state): State<AppState>,
    Json(body): Json<CodeReviewRequest>,
) -> Result<Json<ScenarioResponse>, ApiError> {
    let (scenario, credential) = body.into_pattern();
    run_scenario(&state, scenario, credential).await
}

pub async fn daily_challenge(
    State(state): State<AppState>,
    Query(query): Query<CredentialQuery>,
) -> Result<Json<ScenarioResponse>, ApiError> {
    run_scenario(&state, ScenarioRequest::DailyChallenge, query.api_key).await
}

async fn run_scenario(
    state: &AppState,
    scenario: ScenarioRequest,
    credential: Credential,
) -> Result<Json<ScenarioResponse>, ApiError> {
    info!("coach route (scenario={})", scenario.kind());
    let response = state.coach(credential).run(scenario).await?;
    Ok(Json(response))
}
