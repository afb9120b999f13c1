//! HTTP request and reply bodies.

use crate::{Credential, Difficulty, Message, Role, ScenarioRequest, Topic};
use serde::{Deserialize, Deserializer, Serialize};

/// Body of a credential validation request.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeyValidation {
    pub api_key: Credential,
}

/// Query string carrying only a credential.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialQuery {
    pub api_key: Credential,
}

/// Conversation plus credential, shared by search chat and free coaching chat.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub api_key: Credential,
}

/// Hint request for a single problem.
#[derive(Debug, Clone, Deserialize)]
pub struct ProblemRequest {
    #[serde(deserialize_with = "problem_id_from_text_or_number")]
    pub problem: String,
    pub api_key: Credential,
}

/// Topic recommendation request.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicRequest {
    pub topic: Topic,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    pub api_key: Credential,
}

/// Code submission, used by review and pattern identification.
#[derive(Debug, Clone, Deserialize)]
pub struct CodeReviewRequest {
    pub code: String,
    pub language: String,
    #[serde(default)]
    pub problem_id: Option<u32>,
    pub api_key: Credential,
}

/// Study plan request.
#[derive(Debug, Clone, Deserialize)]
pub struct StudyPlanRequest {
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    pub duration_weeks: u32,
    pub api_key: Credential,
}

/// Assistant reply for the search chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    pub role: Role,
    pub content: String,
}

impl ChatReply {
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Successful credential validation reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationStatus {
    pub status: String,
    pub message: String,
}

impl ValidationStatus {
    pub fn valid() -> Self {
        Self {
            status: "valid".to_string(),
            message: "API key is valid".to_string(),
        }
    }
}

impl ChatRequest {
    /// Split into a free-chat scenario and its credential.
    pub fn into_scenario(self) -> (ScenarioRequest, Credential) {
        (
            ScenarioRequest::FreeChat {
                messages: self.messages,
            },
            self.api_key,
        )
    }
}

impl ProblemRequest {
    pub fn into_scenario(self) -> (ScenarioRequest, Credential) {
        (
            ScenarioRequest::ProblemHint {
                problem_id: self.problem,
            },
            self.api_key,
        )
    }
}

impl TopicRequest {
    pub fn into_scenario(self) -> (ScenarioRequest, Credential) {
        (
            ScenarioRequest::TopicRecommendation {
                topic: self.topic,
                difficulty: self.difficulty,
            },
            self.api_key,
        )
    }
}

impl CodeReviewRequest {
    /// Split into a review scenario and its credential.
    pub fn into_review(self) -> (ScenarioRequest, Credential) {
        (
            ScenarioRequest::CodeReview {
                language: self.language,
                code: self.code,
                problem_id: self.problem_id,
            },
            self.api_key,
        )
    }

    /// Split into a pattern identification scenario; language and problem id are unused.
    pub fn into_pattern(self) -> (ScenarioRequest, Credential) {
        (
            ScenarioRequest::PatternIdentification { code: self.code },
            self.api_key,
        )
    }
}

impl StudyPlanRequest {
    pub fn into_scenario(self) -> (ScenarioRequest, Credential) {
        (
            ScenarioRequest::StudyPlan {
                topics: self.topics,
                duration_weeks: self.duration_weeks,
                difficulty: self.difficulty,
            },
            self.api_key,
        )
    }
}

fn problem_id_from_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ProblemId {
        Text(String),
        Number(u64),
    }

    Ok(match ProblemId::deserialize(deserializer)? {
        ProblemId::Text(text) => text,
        ProblemId::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{CodeReviewRequest, ProblemRequest, StudyPlanRequest};
    use crate::{Difficulty, ScenarioRequest, Topic};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn problem_accepts_text_or_number() {
        let text: ProblemRequest =
            serde_json::from_value(json!({ "problem": "42", "api_key": "k" })).expect("text");
        let number: ProblemRequest =
            serde_json::from_value(json!({ "problem": 42, "api_key": "k" })).expect("number");
        assert_eq!(text.problem, "42");
        assert_eq!(number.problem, "42");
    }

    #[test]
    fn study_plan_request_maps_to_scenario() {
        let request: StudyPlanRequest = serde_json::from_value(json!({
            "topics": ["arrays", "trees"],
            "duration_weeks": 4,
            "difficulty": "medium",
            "api_key": "k"
        }))
        .expect("request");
        let (scenario, credential) = request.into_scenario();
        assert_eq!(credential.expose(), "k");
        assert_eq!(
            scenario,
            ScenarioRequest::StudyPlan {
                topics: vec![Topic::Arrays, Topic::Trees],
                duration_weeks: 4,
                difficulty: Some(Difficulty::Medium),
            }
        );
    }

    #[test]
    fn code_request_splits_into_review_or_pattern() {
        let body = json!({ "code": "x = 1", "language": "python", "api_key": "k" });
        let request: CodeReviewRequest = serde_json::from_value(body).expect("request");
        let (pattern, _) = request.clone().into_pattern();
        assert_eq!(
            pattern,
            ScenarioRequest::PatternIdentification {
                code: "x = 1".to_string()
            }
        );
        let (review, _) = request.into_review();
        assert_eq!(
            review,
            ScenarioRequest::CodeReview {
                language: "python".to_string(),
                code: "x = 1".to_string(),
                problem_id: None,
            }
        );
    }
}
