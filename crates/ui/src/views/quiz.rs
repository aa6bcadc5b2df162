use dioxus::prelude::*;
use services::{QuizSession, Step};
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::views::state::LoadingView;
use crate::views::{ViewError, ViewState};
use crate::vm::{QuestionVm, QuizResultVm, map_outcome, map_question, map_quiz_intro};

/// Runs one quiz session: intro, question walk, scoring and review.
#[component]
pub fn QuizContent(session: QuizSession) -> Element {
    let ctx = use_context::<AppContext>();
    let i18n = ctx.i18n();
    let mut session = use_signal(|| session);
    let mut outcome = use_signal(|| ViewState::<QuizResultVm>::Idle);

    let intro = map_quiz_intro(session.read().quiz(), i18n);
    let question = map_question(&session.read(), i18n);

    let on_finish = {
        let runner = ctx.quiz();
        move |_: MouseEvent| {
            if outcome.peek().is_loading() {
                return;
            }
            outcome.set(ViewState::Loading);
            let runner = runner.clone();
            let snapshot = session.peek().clone();
            spawn(async move {
                match runner.finish(&snapshot).await {
                    Ok(result) => outcome.set(ViewState::Ready(map_outcome(&result, i18n))),
                    Err(err) => {
                        warn!(quiz = %snapshot.quiz().title, error = %err, "quiz result not saved");
                        outcome.set(ViewState::Error(ViewError::Unknown));
                    }
                }
            });
        }
    };

    let on_retry = {
        let clock = ctx.quiz().clock();
        move |()| {
            session.write().restart(clock.now());
            outcome.set(ViewState::Idle);
        }
    };

    let error_text = match &*outcome.read() {
        ViewState::Error(err) => Some(err.message(i18n)),
        _ => None,
    };
    let body = match outcome() {
        ViewState::Ready(result) => rsx! {
            QuizResults { result, on_retry }
        },
        ViewState::Loading => rsx! {
            LoadingView {}
        },
        ViewState::Idle | ViewState::Error(_) => match question {
            Some(question) => rsx! {
                if let Some(text) = error_text {
                    p { class: "error", role: "alert", "{text}" }
                }
                QuestionCard {
                    question,
                    on_answer: move |answer| session.write().answer(answer),
                    on_prev: move |()| {
                        session.write().prev();
                    },
                    on_next: move |()| {
                        if session.write().next() == Step::AtEnd {
                            debug!("next pressed on the last question");
                        }
                    },
                    on_finish,
                }
            },
            None => rsx! {},
        },
    };

    let questions_label = intro.questions_label.clone();
    rsx! {
        article { class: "quiz-page",
            header { class: "quiz-header",
                h1 { "{intro.title}" }
                if !intro.description.is_empty() {
                    p { class: "quiz-description", "{intro.description}" }
                }
                div { class: "page-meta",
                    if let Some(difficulty) = intro.difficulty.clone() {
                        span { class: "badge", "{difficulty}" }
                    }
                    span { class: "badge", "📝 {questions_label}" }
                    span { class: "badge", "⏱️ {intro.estimate_label}" }
                }
            }
            {body}
        }
    }
}

#[component]
fn QuestionCard(
    question: QuestionVm,
    on_answer: EventHandler<prep_core::model::Answer>,
    on_prev: EventHandler<()>,
    on_next: EventHandler<()>,
    on_finish: EventHandler<MouseEvent>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let prev_label = ctx.t("quiz.previous");
    let next_label = ctx.t("quiz.next");
    let finish_label = ctx.t("quiz.finish");

    rsx! {
        section { class: "quiz-question",
            div { class: "quiz-progress",
                span { "{question.number_label}" }
                div { class: "progress-bar",
                    div { class: "progress-fill", style: "width: {question.progress_percent}%" }
                }
            }
            h2 { "{question.prompt}" }
            ul { class: "quiz-options",
                for option in question.options.iter().cloned() {
                    li {
                        button {
                            class: if option.selected { "option selected" } else { "option" },
                            onclick: move |_| on_answer.call(option.answer),
                            "{option.label}"
                        }
                    }
                }
            }
            div { class: "quiz-controls",
                button {
                    class: "btn",
                    disabled: !question.can_go_back,
                    onclick: move |_| on_prev.call(()),
                    "{prev_label}"
                }
                if question.is_last {
                    button {
                        class: "btn primary",
                        onclick: move |evt| on_finish.call(evt),
                        "{finish_label}"
                    }
                } else {
                    button {
                        class: "btn primary",
                        onclick: move |_| on_next.call(()),
                        "{next_label}"
                    }
                }
            }
        }
    }
}

#[component]
fn QuizResults(result: QuizResultVm, on_retry: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let title = ctx.t("quiz.results.title");
    let correct = ctx.t("quiz.results.correct");
    let duration = ctx.t("quiz.results.duration");
    let detailed = ctx.t("quiz.results.detailed");
    let your_answer = ctx.t("quiz.results.yourAnswer");
    let correct_answer = ctx.t("quiz.results.correctAnswer");
    let explanation = ctx.t("quiz.results.explanation");
    let retry = ctx.t("quiz.results.retry");

    rsx! {
        section { class: "quiz-results",
            h2 { "{title}" }
            div { class: "score-circle {result.class}", "{result.percentage}%" }
            p { class: "score-message", "{result.message}" }
            dl { class: "score-details",
                dt { "{correct}" }
                dd { "{result.correct_label}" }
                dt { "{duration}" }
                dd { "{result.duration_label}" }
            }
            h3 { "{detailed}" }
            ol { class: "review",
                for item in result.items.iter() {
                    li { class: if item.is_correct { "review-item correct" } else { "review-item incorrect" },
                        p { class: "review-prompt",
                            strong { "{item.number}. " }
                            "{item.prompt}"
                        }
                        p { "{your_answer} {item.your_answer}" }
                        if !item.is_correct {
                            p { "{correct_answer} {item.correct_answer}" }
                        }
                        if let Some(text) = item.explanation.as_ref() {
                            p { class: "explanation",
                                em { "{explanation} " }
                                "{text}"
                            }
                        }
                    }
                }
            }
            button { class: "btn primary", onclick: move |_| on_retry.call(()), "{retry}" }
        }
    }
}
