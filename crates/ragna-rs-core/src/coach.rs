//! Scenario-prompt dispatcher for coding practice.
//!
//! Every scenario issues exactly one completion. Problem hints, code reviews
//! and study plans prepend a fixed system instruction; the remaining
//! scenarios send a single user prompt. Only free chat sets a max-token
//! ceiling.

use crate::error::RagnaCoreError;
use crate::llm::{LlmConnector, ModelOptions, complete};
use crate::prompt::{self, SystemInstruction};
use chrono::{Local, NaiveDate};
use log::info;
use ragna_rs_config::CoachConfig;
use ragna_rs_protocol::{
    Credential, Difficulty, Message, ScenarioKind, ScenarioRequest, ScenarioResponse, Topic,
};
use std::sync::Arc;

/// Coding coach for a single request.
pub struct CodingCoach {
    credential: Credential,
    connector: Arc<dyn LlmConnector>,
    settings: CoachConfig,
}

impl CodingCoach {
    pub fn new(
        credential: Credential,
        connector: Arc<dyn LlmConnector>,
        settings: CoachConfig,
    ) -> Self {
        Self {
            credential,
            connector,
            settings,
        }
    }

    /// Dispatch any scenario and wrap the answer under its field name.
    pub async fn run(&self, request: ScenarioRequest) -> Result<ScenarioResponse, RagnaCoreError> {
        match request {
            ScenarioRequest::FreeChat { messages } => self.leet_chat(&messages).await,
            ScenarioRequest::ProblemHint { problem_id } => self.problem_hint(&problem_id).await,
            ScenarioRequest::TopicRecommendation { topic, difficulty } => {
                self.topic_problems(topic, difficulty).await
            }
            ScenarioRequest::CodeReview {
                language,
                code,
                problem_id,
            } => self.review_code(&language, &code, problem_id).await,
            ScenarioRequest::StudyPlan {
                topics,
                duration_weeks,
                difficulty,
            } => self.study_plan(&topics, duration_weeks, difficulty).await,
            ScenarioRequest::PatternIdentification { code } => self.identify_pattern(&code).await,
            ScenarioRequest::DailyChallenge => self.daily_challenge().await,
        }
    }

    /// Forward the caller's conversation unchanged.
    pub async fn leet_chat(&self, messages: &[Message]) -> Result<ScenarioResponse, RagnaCoreError> {
        if messages.is_empty() {
            return Err(RagnaCoreError::Validation(
                "conversation must contain at least one message".to_string(),
            ));
        }
        let options = self
            .base_options()
            .with_max_tokens(self.settings.chat_max_tokens);
        self.dispatch(ScenarioKind::FreeChat, options, messages)
            .await
    }

    pub async fn problem_hint(&self, problem_id: &str) -> Result<ScenarioResponse, RagnaCoreError> {
        self.instructed(
            ScenarioKind::ProblemHint,
            SystemInstruction::ProblemHint,
            prompt::problem_hint(problem_id),
        )
        .await
    }

    pub async fn topic_problems(
        &self,
        topic: Topic,
        difficulty: Option<Difficulty>,
    ) -> Result<ScenarioResponse, RagnaCoreError> {
        self.plain(
            ScenarioKind::TopicRecommendation,
            prompt::topic_recommendation(topic, difficulty),
        )
        .await
    }

    pub async fn review_code(
        &self,
        language: &str,
        code: &str,
        problem_id: Option<u32>,
    ) -> Result<ScenarioResponse, RagnaCoreError> {
        self.instructed(
            ScenarioKind::CodeReview,
            SystemInstruction::CodeReview,
            prompt::code_review(language, code, problem_id),
        )
        .await
    }

    pub async fn study_plan(
        &self,
        topics: &[Topic],
        duration_weeks: u32,
        difficulty: Option<Difficulty>,
    ) -> Result<ScenarioResponse, RagnaCoreError> {
        if topics.is_empty() {
            return Err(RagnaCoreError::Validation(
                "study plan needs at least one topic".to_string(),
            ));
        }
        if duration_weeks == 0 {
            return Err(RagnaCoreError::Validation(
                "duration_weeks must be at least 1".to_string(),
            ));
        }
        self.instructed(
            ScenarioKind::StudyPlan,
            SystemInstruction::StudyPlan,
            prompt::study_plan(topics, duration_weeks, difficulty),
        )
        .await
    }

    pub async fn identify_pattern(&self, code: &str) -> Result<ScenarioResponse, RagnaCoreError> {
        self.plain(
            ScenarioKind::PatternIdentification,
            prompt::pattern_identification(code),
        )
        .await
    }

    /// Challenge for today's local date.
    pub async fn daily_challenge(&self) -> Result<ScenarioResponse, RagnaCoreError> {
        self.daily_challenge_on(Local::now().date_naive()).await
    }

    pub async fn daily_challenge_on(
        &self,
        date: NaiveDate,
    ) -> Result<ScenarioResponse, RagnaCoreError> {
        self.plain(ScenarioKind::DailyChallenge, prompt::daily_challenge(date))
            .await
    }

    fn base_options(&self) -> ModelOptions {
        ModelOptions::new(self.settings.model.clone()).with_temperature(self.settings.temperature)
    }

    async fn instructed(
        &self,
        kind: ScenarioKind,
        instruction: SystemInstruction,
        user_prompt: String,
    ) -> Result<ScenarioResponse, RagnaCoreError> {
        let messages = [
            Message::system(instruction.text()),
            Message::user(user_prompt),
        ];
        self.dispatch(kind, self.base_options(), &messages).await
    }

    async fn plain(
        &self,
        kind: ScenarioKind,
        user_prompt: String,
    ) -> Result<ScenarioResponse, RagnaCoreError> {
        self.dispatch(kind, self.base_options(), &[Message::user(user_prompt)])
            .await
    }

    async fn dispatch(
        &self,
        kind: ScenarioKind,
        options: ModelOptions,
        messages: &[Message],
    ) -> Result<ScenarioResponse, RagnaCoreError> {
        info!(
            "coach request (scenario={}, messages={}, prompt_len={})",
            kind,
            messages.len(),
            messages.iter().map(|m| m.content.len()).sum::<usize>()
        );
        let llm = self.connector.connect(&self.credential, &options)?;
        let text = complete(llm.as_ref(), messages).await?;
        info!(
            "coach response (scenario={}, response_len={})",
            kind,
            text.len()
        );
        Ok(ScenarioResponse::for_kind(kind, text))
    }
}
