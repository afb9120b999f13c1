//! Prompt templates for the search directive and coaching scenarios.

use chrono::NaiveDate;
use ragna_rs_protocol::{Difficulty, Topic};

/// Scenario categories that carry a fixed system instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemInstruction {
    CodeReview,
    StudyPlan,
    ProblemHint,
}

impl SystemInstruction {
    /// Return the instruction text.
    pub fn text(&self) -> &'static str {
        match self {
            SystemInstruction::CodeReview => {
                "You are a code review expert. Analyze the provided code for:\n\
                 1. Correctness and edge cases\n\
                 2. Time and space complexity\n\
                 3. Code style and best practices\n\
                 4. Potential optimizations\n\
                 5. Common pitfalls\n\
                 Provide specific suggestions for improvement."
            }
            SystemInstruction::StudyPlan => {
                "Create a structured study plan focusing on the specified topics and difficulty level. Include:\n\
                 1. Weekly goals and objectives\n\
                 2. Recommended problems to solve\n\
                 3. Key concepts to master\n\
                 4. Learning resources and references\n\
                 5. Practice exercises and assignments"
            }
            SystemInstruction::ProblemHint => {
                "Provide progressive hints for the LeetCode problem without revealing the complete solution. Include:\n\
                 1. Problem understanding\n\
                 2. Key observations\n\
                 3. Related patterns or algorithms\n\
                 4. Step-by-step guidance\n\
                 5. Edge cases to consider"
            }
        }
    }
}

/// Render the retrieval directive for a user query.
pub fn directive(query: &str) -> String {
    format!(
        "You are an AI assistant designed to search Arxiv, Wikipedia and search from web for papers and educational content. If the query is: '{query}', please attempt to find the most relevant information from these sources. If no relevant information is found, inform the user that it is outside your capabilities."
    )
}

pub fn problem_hint(problem_id: &str) -> String {
    format!(
        "Provide hints for LeetCode problem #{problem_id}. Start with understanding the problem, then provide progressive hints without revealing the complete solution."
    )
}

pub fn topic_recommendation(topic: Topic, difficulty: Option<Difficulty>) -> String {
    let level = difficulty
        .map(|difficulty| format!(" of {difficulty} difficulty"))
        .unwrap_or_default();
    format!(
        "Recommend 5 LeetCode problems{level} related to {topic}. For each problem, include:\n\
         1. Problem name and number\n\
         2. Brief description\n\
         3. Key concepts tested\n\
         4. Learning objectives"
    )
}

/// Problem id 0 is treated as no problem.
pub fn code_review(language: &str, code: &str, problem_id: Option<u32>) -> String {
    let problem = problem_id
        .filter(|id| *id != 0)
        .map(|id| format!(" for LeetCode problem #{id}"))
        .unwrap_or_default();
    format!("Review this {language} code{problem}:\n\n{code}")
}

pub fn study_plan(topics: &[Topic], duration_weeks: u32, difficulty: Option<Difficulty>) -> String {
    let topics = topics
        .iter()
        .map(Topic::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let level = difficulty
        .map(|difficulty| format!(" at {difficulty} difficulty"))
        .unwrap_or_default();
    format!("Create a {duration_weeks}-week study plan for mastering {topics}{level} in LeetCode.")
}

pub fn pattern_identification(code: &str) -> String {
    format!(
        "Analyze this code and identify the algorithmic patterns used:\n{code}\n\n\
         Explain:\n\
         1. Main algorithmic patterns\n\
         2. Similar LeetCode problems\n\
         3. When to use this pattern\n\
         4. Common variations"
    )
}

pub fn daily_challenge(date: NaiveDate) -> String {
    format!(
        "Create a coding challenge for {} that tests fundamental programming concepts. Include problem description, examples, constraints, and learning objectives.",
        date.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn directive_embeds_query() {
        let text = directive("What is a monad?");
        assert!(text.starts_with("You are an AI assistant designed to search Arxiv"));
        assert!(text.contains("If the query is: 'What is a monad?', please attempt"));
        assert!(text.ends_with("inform the user that it is outside your capabilities."));
    }

    #[test]
    fn topic_recommendation_with_difficulty() {
        assert_eq!(
            topic_recommendation(Topic::DynamicProgramming, Some(Difficulty::Hard)),
            "Recommend 5 LeetCode problems of hard difficulty related to dynamic_programming. For each problem, include:\n1. Problem name and number\n2. Brief description\n3. Key concepts tested\n4. Learning objectives"
        );
    }

    #[test]
    fn code_review_mentions_problem_only_when_present() {
        assert_eq!(
            code_review("rust", "fn main() {}", Some(1)),
            "Review this rust code for LeetCode problem #1:\n\nfn main() {}"
        );
        assert_eq!(
            code_review("go", "package main", Some(0)),
            "Review this go code:\n\npackage main"
        );
        assert_eq!(
            code_review("go", "package main", None),
            "Review this go code:\n\npackage main"
        );
    }

    #[test]
    fn study_plan_without_difficulty() {
        assert_eq!(
            study_plan(&[Topic::Graphs], 2, None),
            "Create a 2-week study plan for mastering graphs in LeetCode."
        );
    }

    #[test]
    fn pattern_and_challenge_templates() {
        assert_eq!(
            pattern_identification("x"),
            "Analyze this code and identify the algorithmic patterns used:\nx\n\nExplain:\n1. Main algorithmic patterns\n2. Similar LeetCode problems\n3. When to use this pattern\n4. Common variations"
        );
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("date");
        assert_eq!(
            daily_challenge(date),
            "Create a coding challenge for 2024-03-09 that tests fundamental programming concepts. Include problem description, examples, constraints, and learning objectives."
        );
    }

    #[test]
    fn system_instructions_cover_their_criteria() {
        assert!(SystemInstruction::CodeReview.text().contains("Time and space complexity"));
        assert!(SystemInstruction::StudyPlan.text().contains("Weekly goals"));
        assert!(SystemInstruction::ProblemHint.text().contains("Edge cases to consider"));
    }
}
