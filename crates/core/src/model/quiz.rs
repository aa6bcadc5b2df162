use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizFormatError {
    #[error("quiz JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("quiz has no questions")]
    NoQuestions,
    #[error("question {index} has no options")]
    NoOptions { index: usize },
    #[error("question {index} marks option {correct} correct but has {options} options")]
    CorrectOutOfRange {
        index: usize,
        correct: usize,
        options: usize,
    },
}

/// Difficulty levels used by quizzes and content front-matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Parse the lowercase key used in content files.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// A question set loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Parse and validate a quiz document.
    ///
    /// # Errors
    ///
    /// Returns `QuizFormatError` if the JSON is malformed, the quiz is empty,
    /// or a multiple-choice question points outside its options.
    pub fn from_json(raw: &str) -> Result<Self, QuizFormatError> {
        let quiz: Quiz = serde_json::from_str(raw)?;
        quiz.validate()?;
        Ok(quiz)
    }

    /// # Errors
    ///
    /// See [`Quiz::from_json`].
    pub fn validate(&self) -> Result<(), QuizFormatError> {
        if self.questions.is_empty() {
            return Err(QuizFormatError::NoQuestions);
        }
        for (index, question) in self.questions.iter().enumerate() {
            if let Question::Multiple {
                options, correct, ..
            } = question
            {
                if options.is_empty() {
                    return Err(QuizFormatError::NoOptions { index });
                }
                if *correct >= options.len() {
                    return Err(QuizFormatError::CorrectOutOfRange {
                        index,
                        correct: *correct,
                        options: options.len(),
                    });
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Rough duration hint shown before starting: 1.5 minutes per question.
    #[must_use]
    pub fn estimated_minutes(&self) -> usize {
        (self.questions.len() * 3).div_ceil(2)
    }
}

/// One of the two fixed question shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Question {
    #[serde(rename = "multiple")]
    Multiple {
        question: String,
        options: Vec<String>,
        correct: usize,
        #[serde(default)]
        explanation: Option<String>,
    },
    #[serde(rename = "true-false")]
    TrueFalse {
        question: String,
        correct: bool,
        #[serde(default)]
        explanation: Option<String>,
    },
}

impl Question {
    #[must_use]
    pub fn prompt(&self) -> &str {
        match self {
            Question::Multiple { question, .. } | Question::TrueFalse { question, .. } => question,
        }
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        match self {
            Question::Multiple { explanation, .. } | Question::TrueFalse { explanation, .. } => {
                explanation.as_deref()
            }
        }
    }

    #[must_use]
    pub fn canonical_answer(&self) -> Answer {
        match self {
            Question::Multiple { correct, .. } => Answer::Choice(*correct),
            Question::TrueFalse { correct, .. } => Answer::Bool(*correct),
        }
    }

    /// An answer of the wrong shape, or no answer, is incorrect.
    #[must_use]
    pub fn is_correct(&self, answer: Option<Answer>) -> bool {
        answer == Some(self.canonical_answer())
    }
}

/// A learner's recorded answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    Choice(usize),
    Bool(bool),
}

/// Count questions whose recorded answer matches the canonical answer.
///
/// Missing trailing answers count as unanswered.
#[must_use]
pub fn calculate_results(questions: &[Question], answers: &[Option<Answer>]) -> usize {
    questions
        .iter()
        .enumerate()
        .filter(|(i, q)| q.is_correct(answers.get(*i).copied().flatten()))
        .count()
}

/// Percentage of `correct` out of `total`, rounded half up. Zero for an empty quiz.
#[must_use]
pub fn score_percentage(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total);
    let pct = (correct * 200 + total) / (total * 2);
    u8::try_from(pct).unwrap_or(100)
}

/// Message bucket shown with a quiz result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreTier {
    Excellent,
    Great,
    Good,
    Fair,
    Beginner,
    NeedsReview,
}

impl ScoreTier {
    #[must_use]
    pub fn for_percentage(percentage: u8) -> Self {
        match percentage {
            90.. => Self::Excellent,
            80..=89 => Self::Great,
            70..=79 => Self::Good,
            60..=69 => Self::Fair,
            40..=59 => Self::Beginner,
            _ => Self::NeedsReview,
        }
    }

    /// Translation key of the tier message.
    #[must_use]
    pub fn message_key(self) -> &'static str {
        match self {
            Self::Excellent => "quiz.score.excellent",
            Self::Great => "quiz.score.great",
            Self::Good => "quiz.score.good",
            Self::Fair => "quiz.score.average",
            Self::Beginner => "quiz.score.poor",
            Self::NeedsReview => "quiz.score.veryPoor",
        }
    }
}

/// Coarse styling class of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreClass {
    Excellent,
    Good,
    Average,
    Poor,
}

impl ScoreClass {
    #[must_use]
    pub fn for_percentage(percentage: u8) -> Self {
        match percentage {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Average,
            _ => Self::Poor,
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Average => "average",
            Self::Poor => "poor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIZ: &str = r#"{
        "title": "Java Teszt",
        "description": "Alapok",
        "difficulty": "beginner",
        "questions": [
            { "type": "multiple", "question": "Q1", "options": ["a", "b"], "correct": 1 },
            { "type": "multiple", "question": "Q2", "options": ["a", "b", "c"], "correct": 0 },
            { "type": "multiple", "question": "Q3", "options": ["a", "b"], "correct": 0,
              "explanation": "because" },
            { "type": "true-false", "question": "Q4", "correct": true }
        ]
    }"#;

    #[test]
    fn parses_both_question_shapes() {
        let quiz = Quiz::from_json(QUIZ).unwrap();
        assert_eq!(quiz.len(), 4);
        assert_eq!(quiz.questions[2].explanation(), Some("because"));
        assert_eq!(quiz.questions[3].canonical_answer(), Answer::Bool(true));
        assert_eq!(quiz.estimated_minutes(), 6);
    }

    #[test]
    fn three_of_four_lands_in_good_tier() {
        let quiz = Quiz::from_json(QUIZ).unwrap();
        let answers = vec![
            Some(Answer::Choice(1)),
            Some(Answer::Choice(0)),
            Some(Answer::Choice(0)),
            Some(Answer::Bool(false)),
        ];
        let correct = calculate_results(&quiz.questions, &answers);
        assert_eq!(correct, 3);
        let pct = score_percentage(correct, quiz.len());
        assert_eq!(pct, 75);
        assert_eq!(ScoreTier::for_percentage(pct), ScoreTier::Good);
        assert_eq!(ScoreClass::for_percentage(pct), ScoreClass::Good);
    }

    #[test]
    fn unanswered_and_mismatched_answers_are_incorrect() {
        let quiz = Quiz::from_json(QUIZ).unwrap();
        let answers = vec![None, Some(Answer::Bool(true))];
        assert_eq!(calculate_results(&quiz.questions, &answers), 0);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(score_percentage(1, 3), 33);
        assert_eq!(score_percentage(2, 3), 67);
        assert_eq!(score_percentage(1, 8), 13);
        assert_eq!(score_percentage(0, 0), 0);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(ScoreTier::for_percentage(90), ScoreTier::Excellent);
        assert_eq!(ScoreTier::for_percentage(89), ScoreTier::Great);
        assert_eq!(ScoreTier::for_percentage(60), ScoreTier::Fair);
        assert_eq!(ScoreTier::for_percentage(40), ScoreTier::Beginner);
        assert_eq!(ScoreTier::for_percentage(39), ScoreTier::NeedsReview);
    }

    #[test]
    fn out_of_range_correct_index_is_rejected() {
        let raw = r#"{"title":"x","questions":[{"type":"multiple","question":"q","options":["a"],"correct":3}]}"#;
        assert!(matches!(
            Quiz::from_json(raw),
            Err(QuizFormatError::CorrectOutOfRange { index: 0, correct: 3, options: 1 })
        ));
    }

    #[test]
    fn empty_quiz_is_rejected() {
        let raw = r#"{"title":"x","questions":[]}"#;
        assert!(matches!(Quiz::from_json(raw), Err(QuizFormatError::NoQuestions)));
    }
}
