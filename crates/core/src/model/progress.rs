use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::RecordId;
use super::quiz::score_percentage;

/// Percentage at or above which a route counts as completed.
pub const COMPLETE_PERCENTAGE: u8 = 100;

/// Per-route visit and completion state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub route: String,
    pub completion_percentage: u8,
    pub last_visited: DateTime<Utc>,
    #[serde(default)]
    pub visits: u32,
}

impl ProgressRecord {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completion_percentage >= COMPLETE_PERCENTAGE
    }

    /// Next state after a visit: the percentage is overwritten and visits grow by one.
    #[must_use]
    pub fn visited(
        previous: Option<&ProgressRecord>,
        route: &str,
        percentage: u8,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            route: route.to_string(),
            completion_percentage: percentage.min(COMPLETE_PERCENTAGE),
            last_visited: at,
            visits: previous.map_or(0, |p| p.visits).saturating_add(1),
        }
    }
}

/// All progress records keyed by route. Concept read flags share the map.
pub type ProgressMap = BTreeMap<String, ProgressRecord>;

/// Key of the read flag for one concept of a theory page.
#[must_use]
pub fn concept_progress_key(route: &str, anchor: &str) -> String {
    format!("concept_{route}_{anchor}")
}

/// True for keys produced by [`concept_progress_key`].
#[must_use]
pub fn is_concept_key(key: &str) -> bool {
    key.starts_with("concept_")
}

/// One finished quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: RecordId,
    /// Quiz title.
    pub quiz: String,
    /// Rounded percentage.
    pub score: u8,
    pub correct_answers: usize,
    pub total_questions: usize,
    /// Whole minutes.
    pub time_spent: u32,
    pub date: DateTime<Utc>,
}

impl QuizResult {
    #[must_use]
    pub fn new(
        quiz: &str,
        correct_answers: usize,
        total_questions: usize,
        time_spent: u32,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RecordId::generate(),
            quiz: quiz.to_string(),
            score: score_percentage(correct_answers, total_questions),
            correct_answers,
            total_questions,
            time_spent,
            date,
        }
    }
}

/// Aggregates shown on the progress page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_routes: usize,
    pub completed_routes: usize,
    pub completion_percentage: u8,
    /// Minutes.
    pub total_study_time: u64,
    pub total_quizzes: usize,
    pub average_quiz_score: u8,
    pub study_streak: u32,
    pub last_activity: Option<DateTime<Utc>>,
}
