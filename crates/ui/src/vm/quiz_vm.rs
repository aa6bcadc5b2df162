use prep_core::model::{Answer, Question, Quiz};
use services::{I18n, QuizOutcome, QuizSession, describe_answer};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: String,
    pub answer: Answer,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub number_label: String,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub is_last: bool,
    pub can_go_back: bool,
    /// Share of the quiz reached, counting the current question.
    pub progress_percent: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizIntroVm {
    pub title: String,
    pub description: String,
    pub difficulty: Option<String>,
    pub questions_label: String,
    pub estimate_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewLineVm {
    pub number: usize,
    pub prompt: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResultVm {
    pub title: String,
    pub percentage: u8,
    pub class: &'static str,
    pub message: String,
    pub correct_label: String,
    pub duration_label: String,
    pub items: Vec<ReviewLineVm>,
}

/// The question under the cursor, or `None` for an empty session.
#[must_use]
pub fn map_question(session: &QuizSession, i18n: I18n) -> Option<QuestionVm> {
    let question = session.current_question()?;
    let current = session.current_index() + 1;
    let total = session.len();
    let selected = session.current_answer();

    let choices: Vec<(String, Answer)> = match question {
        Question::Multiple { options, .. } => options
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), Answer::Choice(i)))
            .collect(),
        Question::TrueFalse { .. } => vec![
            (i18n.t("quiz.true").to_string(), Answer::Bool(true)),
            (i18n.t("quiz.false").to_string(), Answer::Bool(false)),
        ],
    };

    Some(QuestionVm {
        number_label: i18n.format(
            "quiz.questionOf",
            &[
                ("current", &current.to_string()),
                ("total", &total.to_string()),
            ],
        ),
        prompt: question.prompt().to_string(),
        options: choices
            .into_iter()
            .map(|(label, answer)| OptionVm {
                label,
                answer,
                selected: selected == Some(answer),
            })
            .collect(),
        is_last: session.is_last(),
        can_go_back: session.current_index() > 0,
        progress_percent: prep_core::model::score_percentage(current, total),
    })
}

#[must_use]
pub fn map_quiz_intro(quiz: &Quiz, i18n: I18n) -> QuizIntroVm {
    QuizIntroVm {
        title: quiz.title.clone(),
        description: quiz.description.clone(),
        difficulty: quiz.difficulty.as_deref().map(|key| {
            let key = format!("difficulty.{}", key.trim().to_ascii_lowercase());
            i18n.t(&key).to_string()
        }),
        questions_label: i18n.format("quiz.questions", &[("count", &quiz.len().to_string())]),
        estimate_label: i18n.format(
            "quiz.estimatedTime",
            &[("minutes", &quiz.estimated_minutes().to_string())],
        ),
    }
}

#[must_use]
pub fn map_outcome(outcome: &QuizOutcome, i18n: I18n) -> QuizResultVm {
    QuizResultVm {
        title: outcome.title.clone(),
        percentage: outcome.percentage,
        class: outcome.class.css_class(),
        message: i18n.t(outcome.tier.message_key()).to_string(),
        correct_label: format!("{}/{}", outcome.correct, outcome.total),
        duration_label: i18n.format(
            "quiz.results.minutes",
            &[("minutes", &outcome.time_spent.to_string())],
        ),
        items: outcome
            .review
            .iter()
            .map(|item| ReviewLineVm {
                number: item.index + 1,
                prompt: item.question.prompt().to_string(),
                your_answer: describe_answer(&item.question, item.your_answer, i18n),
                correct_answer: describe_answer(&item.question, Some(item.correct_answer), i18n),
                is_correct: item.is_correct,
                explanation: item.explanation().map(str::to_string),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::time::fixed_now;
    use services::{Language, Step};

    fn session() -> QuizSession {
        let quiz = Quiz::from_json(
            r#"{
                "title": "SQL Teszt",
                "difficulty": "Intermediate",
                "questions": [
                    { "type": "multiple", "question": "JOIN?", "options": ["inner", "outer"], "correct": 0, "explanation": "inner is default" },
                    { "type": "true-false", "question": "NULL = NULL?", "correct": false }
                ]
            }"#,
        )
        .unwrap();
        QuizSession::new("quizzes/sql.json", quiz, fixed_now())
    }

    #[test]
    fn question_marks_the_selected_option() {
        let i18n = I18n::new(Language::En);
        let mut session = session();
        session.answer(Answer::Choice(1));

        let vm = map_question(&session, i18n).unwrap();
        assert_eq!(vm.number_label, "Question 1 of 2");
        assert!(!vm.can_go_back);
        assert!(!vm.is_last);
        assert_eq!(vm.progress_percent, 50);
        let selected: Vec<&str> = vm
            .options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(selected, ["outer"]);

        assert_eq!(session.next(), Step::Advanced);
        let vm = map_question(&session, i18n).unwrap();
        assert_eq!(
            vm.options.iter().map(|o| o.answer).collect::<Vec<_>>(),
            [Answer::Bool(true), Answer::Bool(false)]
        );
        assert!(vm.is_last);
        assert!(vm.can_go_back);
    }

    #[test]
    fn intro_translates_difficulty_and_estimate() {
        let vm = map_quiz_intro(session().quiz(), I18n::new(Language::En));
        assert_eq!(vm.questions_label, "2 questions");
        assert_eq!(vm.estimate_label, "~3 min");
        assert_eq!(vm.difficulty.as_deref(), Some("Intermediate"));
    }

    #[test]
    fn outcome_lists_answers_in_words() {
        let i18n = I18n::new(Language::En);
        let mut session = session();
        session.answer(Answer::Choice(0));
        let outcome = services::score_session(&session, fixed_now());

        let vm = map_outcome(&outcome, i18n);
        assert_eq!(vm.correct_label, "1/2");
        assert_eq!(vm.percentage, 50);
        assert_eq!(vm.class, "average");
        assert_eq!(vm.items[0].your_answer, "inner");
        assert_eq!(vm.items[0].explanation.as_deref(), Some("inner is default"));
        assert_eq!(vm.items[1].your_answer, i18n.t("quiz.noAnswer"));
        assert_eq!(vm.items[1].correct_answer, i18n.t("quiz.false"));
        assert!(!vm.items[1].is_correct);
    }
}
