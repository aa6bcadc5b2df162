use dioxus::prelude::*;
use services::ProgressView;

use crate::context::AppContext;
use crate::vm::{StatCardVm, format_datetime, map_statistics};

#[component]
pub fn StatCards(cards: Vec<StatCardVm>) -> Element {
    rsx! {
        div { class: "stat-cards",
            for card in cards {
                div { class: "stat-card",
                    div { class: "stat-value", "{card.value}" }
                    div { class: "stat-label", "{card.label}" }
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct QuizRow {
    quiz: String,
    score: u8,
    detail: String,
    date: String,
}

/// Learner statistics and the latest quiz attempts.
#[component]
pub fn ProgressContent(view: ProgressView) -> Element {
    let ctx = use_context::<AppContext>();
    let i18n = ctx.i18n();
    let title = ctx.t("progress.title");
    let recent = ctx.t("progress.recentQuizzes");
    let cards = map_statistics(&view.statistics, i18n);
    let rows: Vec<QuizRow> = view
        .recent_quizzes
        .iter()
        .map(|result| QuizRow {
            quiz: result.quiz.clone(),
            score: result.score,
            detail: format!("{}/{}", result.correct_answers, result.total_questions),
            date: format_datetime(result.date),
        })
        .collect();

    rsx! {
        article { class: "progress-page",
            h1 { "{title}" }
            StatCards { cards }
            if !rows.is_empty() {
                section { class: "recent-quizzes",
                    h2 { "{recent}" }
                    table {
                        tbody {
                            for row in rows {
                                tr {
                                    td { "{row.quiz}" }
                                    td { class: "score", "{row.score}%" }
                                    td { "{row.detail}" }
                                    td { class: "muted", "{row.date}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
