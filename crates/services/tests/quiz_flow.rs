use std::sync::Arc;

use chrono::Duration;
use prep_core::model::{Answer, ScoreClass, ScoreTier};
use prep_core::time::fixed_now;
use services::{Clock, QuizRunner, StaticSource, Step};
use storage::StorageManager;

const QUIZ: &str = r#"{
    "title": "Java Teszt",
    "description": "Alapok",
    "difficulty": "beginner",
    "questions": [
        { "type": "multiple", "question": "Melyik nem primitív?", "options": ["int", "String"], "correct": 1 },
        { "type": "multiple", "question": "JVM?", "options": ["Java Virtual Machine", "Mozilla"], "correct": 0 },
        { "type": "true-false", "question": "A String immutable.", "correct": true,
          "explanation": "Minden módosítás új példányt hoz létre." },
        { "type": "true-false", "question": "Az int lehet null.", "correct": false }
    ]
}"#;

fn runner(clock: Clock, storage: &StorageManager) -> QuizRunner {
    let source = StaticSource::new().with_file("data/quizzes/java.json", QUIZ);
    QuizRunner::new(clock, Arc::new(source), storage.clone())
}

#[tokio::test]
async fn three_of_four_scores_good_and_is_persisted() {
    let start = fixed_now();
    let storage = StorageManager::in_memory(Clock::fixed(start));
    let mut session = runner(Clock::fixed(start), &storage)
        .start("./data/quizzes/java.json", "Java & Spring Teszt")
        .await
        .unwrap();

    assert_eq!(session.quiz().estimated_minutes(), 6);
    for answer in [
        Answer::Choice(1),
        Answer::Choice(0),
        Answer::Bool(false),
        Answer::Bool(false),
    ] {
        session.answer(answer);
        session.next();
    }
    assert_eq!(session.answered_count(), 4);
    assert_eq!(session.next(), Step::AtEnd);

    let finisher = runner(Clock::fixed(start + Duration::seconds(200)), &storage);
    let outcome = finisher.finish(&session).await.unwrap();
    assert_eq!(outcome.correct, 3);
    assert_eq!(outcome.percentage, 75);
    assert_eq!(outcome.tier, ScoreTier::Good);
    assert_eq!(outcome.class, ScoreClass::Good);
    assert_eq!(outcome.time_spent, 3);
    assert!(!outcome.review[2].is_correct);
    assert_eq!(
        outcome.review[2].explanation(),
        Some("Minden módosítás új példányt hoz létre.")
    );

    let stored = storage.quiz_results(Some("Java Teszt")).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].score, 75);
    assert_eq!(stored[0].correct_answers, 3);
    assert_eq!(stored[0].total_questions, 4);
    assert_eq!(storage.quiz_average().await.unwrap(), 75);
}

#[tokio::test]
async fn restart_resets_answers_and_timer() {
    let storage = StorageManager::in_memory(Clock::fixed(fixed_now()));
    let runner = runner(Clock::fixed(fixed_now()), &storage);
    let mut session = runner.start("data/quizzes/java.json", "Java").await.unwrap();
    session.answer(Answer::Choice(1));
    session.next();
    session.restart(fixed_now() + Duration::minutes(5));

    assert_eq!(session.current_index(), 0);
    assert_eq!(session.current_answer(), None);
    assert_eq!(session.started_at(), fixed_now() + Duration::minutes(5));
}
