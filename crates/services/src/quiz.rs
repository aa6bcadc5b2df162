use std::sync::Arc;

use chrono::{DateTime, Utc};
use prep_core::Clock;
use prep_core::model::{
    Answer, Question, Quiz, QuizResult, ScoreClass, ScoreTier, calculate_results,
    score_percentage,
};
use prep_core::time::whole_minutes_between;
use storage::StorageManager;
use tracing::debug;

use crate::content::ContentSource;
use crate::error::QuizError;
use crate::i18n::I18n;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Result of moving forward in a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Advanced,
    /// Already on the last question; the caller should offer to finish.
    AtEnd,
}

/// In-progress walk through one quiz.
///
/// State is the current index, one answer slot per question, and the start
/// time. Unanswered slots stay `None` and score as incorrect.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    path: String,
    quiz: Quiz,
    current: usize,
    answers: Vec<Option<Answer>>,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    #[must_use]
    pub fn new(path: &str, quiz: Quiz, started_at: DateTime<Utc>) -> Self {
        let answers = vec![None; quiz.len()];
        Self {
            path: path.to_string(),
            quiz,
            current: 0,
            answers,
            started_at,
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quiz.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quiz.is_empty()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.questions.get(self.current)
    }

    /// Answer recorded for the current question.
    #[must_use]
    pub fn current_answer(&self) -> Option<Answer> {
        self.answers.get(self.current).copied().flatten()
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<Answer>] {
        &self.answers
    }

    /// Record an answer for the current question, replacing any earlier one.
    pub fn answer(&mut self, answer: Answer) {
        if let Some(slot) = self.answers.get_mut(self.current) {
            *slot = Some(answer);
        }
    }

    pub fn next(&mut self) -> Step {
        if self.current + 1 < self.quiz.len() {
            self.current += 1;
            Step::Advanced
        } else {
            Step::AtEnd
        }
    }

    /// Move back one question. Returns false on the first question.
    pub fn prev(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.quiz.len()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// Clear all answers and start over from the first question.
    pub fn restart(&mut self, at: DateTime<Utc>) {
        self.current = 0;
        self.answers.iter_mut().for_each(|slot| *slot = None);
        self.started_at = at;
    }
}

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

/// One question as shown on the results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    pub index: usize,
    pub question: Question,
    pub your_answer: Option<Answer>,
    pub correct_answer: Answer,
    pub is_correct: bool,
}

impl ReviewItem {
    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.question.explanation()
    }
}

/// Scored result of a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub title: String,
    pub correct: usize,
    pub total: usize,
    pub percentage: u8,
    pub tier: ScoreTier,
    pub class: ScoreClass,
    /// Whole minutes.
    pub time_spent: u32,
    pub review: Vec<ReviewItem>,
    pub result: QuizResult,
}

/// Score a session as of `finished_at`. Does not persist anything.
#[must_use]
pub fn score_session(session: &QuizSession, finished_at: DateTime<Utc>) -> QuizOutcome {
    let questions = &session.quiz.questions;
    let correct = calculate_results(questions, &session.answers);
    let total = questions.len();
    let percentage = score_percentage(correct, total);
    let time_spent = whole_minutes_between(session.started_at, finished_at);

    let review = questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let your_answer = session.answers.get(index).copied().flatten();
            ReviewItem {
                index,
                question: question.clone(),
                your_answer,
                correct_answer: question.canonical_answer(),
                is_correct: question.is_correct(your_answer),
            }
        })
        .collect();

    QuizOutcome {
        title: session.quiz.title.clone(),
        correct,
        total,
        percentage,
        tier: ScoreTier::for_percentage(percentage),
        class: ScoreClass::for_percentage(percentage),
        time_spent,
        review,
        result: QuizResult::new(&session.quiz.title, correct, total, time_spent, finished_at),
    }
}

/// Display text of an answer to `question`.
#[must_use]
pub fn describe_answer(question: &Question, answer: Option<Answer>, i18n: I18n) -> String {
    match (question, answer) {
        (_, None) => i18n.t("quiz.noAnswer").to_string(),
        (Question::Multiple { options, .. }, Some(Answer::Choice(i))) => {
            options.get(i).cloned().unwrap_or_else(|| format!("#{}", i + 1))
        }
        (_, Some(Answer::Bool(true))) => i18n.t("quiz.true").to_string(),
        (_, Some(Answer::Bool(false))) => i18n.t("quiz.false").to_string(),
        (_, Some(Answer::Choice(i))) => format!("#{}", i + 1),
    }
}

//
// ─── RUNNER ────────────────────────────────────────────────────────────────────
//

/// Loads quizzes and persists finished attempts.
#[derive(Clone)]
pub struct QuizRunner {
    clock: Clock,
    source: Arc<dyn ContentSource>,
    storage: StorageManager,
}

impl QuizRunner {
    #[must_use]
    pub fn new(clock: Clock, source: Arc<dyn ContentSource>, storage: StorageManager) -> Self {
        Self {
            clock,
            source,
            storage,
        }
    }

    /// Fetch and validate a quiz, returning a fresh session.
    ///
    /// `title` is used when the quiz JSON leaves its own title empty.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Fetch` if the file cannot be fetched and
    /// `QuizError::Format` if it is not a valid quiz.
    pub async fn start(&self, path: &str, title: &str) -> Result<QuizSession, QuizError> {
        let raw = self.source.fetch_text(path).await?;
        let mut quiz = Quiz::from_json(&raw)?;
        if quiz.title.trim().is_empty() {
            quiz.title = title.to_string();
        }
        debug!(path, questions = quiz.len(), "quiz started");
        Ok(QuizSession::new(path, quiz, self.clock.now()))
    }

    /// Score the session and append the attempt to the stored results.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the result cannot be persisted.
    pub async fn finish(&self, session: &QuizSession) -> Result<QuizOutcome, QuizError> {
        let outcome = score_session(session, self.clock.now());
        self.storage.save_quiz_result(outcome.result.clone()).await?;
        debug!(
            quiz = %outcome.title,
            percentage = outcome.percentage,
            "quiz finished"
        );
        Ok(outcome)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }
}
