//! Coding-practice scenario types.

use crate::Message;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Problem difficulty tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Practice topic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Arrays,
    Strings,
    LinkedList,
    Trees,
    DynamicProgramming,
    Graphs,
    Sorting,
    Searching,
    Math,
    Greedy,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Arrays => "arrays",
            Topic::Strings => "strings",
            Topic::LinkedList => "linked_list",
            Topic::Trees => "trees",
            Topic::DynamicProgramming => "dynamic_programming",
            Topic::Graphs => "graphs",
            Topic::Sorting => "sorting",
            Topic::Searching => "searching",
            Topic::Math => "math",
            Topic::Greedy => "greedy",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminant of a scenario, used for logging and instruction lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioKind {
    FreeChat,
    ProblemHint,
    TopicRecommendation,
    CodeReview,
    StudyPlan,
    PatternIdentification,
    DailyChallenge,
}

impl ScenarioKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::FreeChat => "free_chat",
            ScenarioKind::ProblemHint => "problem_hint",
            ScenarioKind::TopicRecommendation => "topic_recommendation",
            ScenarioKind::CodeReview => "code_review",
            ScenarioKind::StudyPlan => "study_plan",
            ScenarioKind::PatternIdentification => "pattern_identification",
            ScenarioKind::DailyChallenge => "daily_challenge",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single coaching request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioRequest {
    /// Open conversation forwarded to the model.
    FreeChat { messages: Vec<Message> },
    /// Progressive hints for one problem.
    ProblemHint { problem_id: String },
    /// Five recommended problems for a topic.
    TopicRecommendation {
        topic: Topic,
        difficulty: Option<Difficulty>,
    },
    /// Review of a code submission.
    CodeReview {
        language: String,
        code: String,
        problem_id: Option<u32>,
    },
    /// Multi-week study plan.
    StudyPlan {
        topics: Vec<Topic>,
        duration_weeks: u32,
        difficulty: Option<Difficulty>,
    },
    /// Algorithmic pattern analysis of a code snippet.
    PatternIdentification { code: String },
    /// Challenge generated for the current date.
    DailyChallenge,
}

impl ScenarioRequest {
    pub fn kind(&self) -> ScenarioKind {
        match self {
            ScenarioRequest::FreeChat { .. } => ScenarioKind::FreeChat,
            ScenarioRequest::ProblemHint { .. } => ScenarioKind::ProblemHint,
            ScenarioRequest::TopicRecommendation { .. } => ScenarioKind::TopicRecommendation,
            ScenarioRequest::CodeReview { .. } => ScenarioKind::CodeReview,
            ScenarioRequest::StudyPlan { .. } => ScenarioKind::StudyPlan,
            ScenarioRequest::PatternIdentification { .. } => ScenarioKind::PatternIdentification,
            ScenarioRequest::DailyChallenge => ScenarioKind::DailyChallenge,
        }
    }
}

/// Scenario result, serialized as a single-field object keyed per scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ScenarioResponse {
    Content { content: String },
    Hints { hints: String },
    Recommendations { recommendations: String },
    Review { review: String },
    StudyPlan { study_plan: String },
    PatternAnalysis { pattern_analysis: String },
    DailyChallenge { daily_challenge: String },
}

impl ScenarioResponse {
    /// Wrap model text under the field name for the given scenario.
    pub fn for_kind(kind: ScenarioKind, text: String) -> Self {
        match kind {
            ScenarioKind::FreeChat => ScenarioResponse::Content { content: text },
            ScenarioKind::ProblemHint => ScenarioResponse::Hints { hints: text },
            ScenarioKind::TopicRecommendation => ScenarioResponse::Recommendations {
                recommendations: text,
            },
            ScenarioKind::CodeReview => ScenarioResponse::Review { review: text },
            ScenarioKind::StudyPlan => ScenarioResponse::StudyPlan { study_plan: text },
            ScenarioKind::PatternIdentification => ScenarioResponse::PatternAnalysis {
                pattern_analysis: text,
            },
            ScenarioKind::DailyChallenge => ScenarioResponse::DailyChallenge {
                daily_challenge: text,
            },
        }
    }

    /// Name of the single result field.
    pub fn field(&self) -> &'static str {
        match self {
            ScenarioResponse::Content { .. } => "content",
            ScenarioResponse::Hints { .. } => "hints",
            ScenarioResponse::Recommendations { .. } => "recommendations",
            ScenarioResponse::Review { .. } => "review",
            ScenarioResponse::StudyPlan { .. } => "study_plan",
            ScenarioResponse::PatternAnalysis { .. } => "pattern_analysis",
            ScenarioResponse::DailyChallenge { .. } => "daily_challenge",
        }
    }

    /// Model text carried by the response.
    pub fn text(&self) -> &str {
        match self {
            ScenarioResponse::Content { content } => content,
            ScenarioResponse::Hints { hints } => hints,
            ScenarioResponse::Recommendations { recommendations } => recommendations,
            ScenarioResponse::Review { review } => review,
            ScenarioResponse::StudyPlan { study_plan } => study_plan,
            ScenarioResponse::PatternAnalysis { pattern_analysis } => pattern_analysis,
            ScenarioResponse::DailyChallenge { daily_challenge } => daily_challenge,
        }
    }
}
