use dioxus::prelude::*;
use services::{ModuleStatus, RoadmapView};

use crate::context::AppContext;
use crate::location::HashLink;
use crate::views::progress::StatCards;
use crate::vm::map_roadmap_stats;

#[component]
pub fn RoadmapContent(view: RoadmapView) -> Element {
    let ctx = use_context::<AppContext>();
    let title = ctx.t("roadmap.title");
    let intro = ctx.t("roadmap.intro");
    let stats_title = ctx.t("roadmap.stats");
    let cards = map_roadmap_stats(&view, ctx.i18n());

    rsx! {
        article { class: "roadmap-page",
            h1 { "{title}" }
            p { "{intro}" }
            ol { class: "roadmap-modules",
                for (index, status) in view.modules.into_iter().enumerate() {
                    ModuleCard { number: index + 1, status }
                }
            }
            section { class: "roadmap-stats",
                h2 { "{stats_title}" }
                StatCards { cards }
            }
        }
    }
}

#[component]
fn ModuleCard(number: usize, status: ModuleStatus) -> Element {
    let ctx = use_context::<AppContext>();
    let start = ctx.t("roadmap.start");
    let quiz = ctx.t("roadmap.quiz");
    let hours = ctx.i18n().format(
        "roadmap.hours",
        &[("hours", &status.module.estimated_hours.to_string())],
    );
    let module = status.module;

    rsx! {
        li { class: if status.completed { "roadmap-module completed" } else { "roadmap-module" },
            div { class: "module-number", if status.completed { "✓" } else { "{number}" } }
            div { class: "module-body",
                h3 { "{module.title}" }
                p { "{module.description}" }
                div { class: "module-meta",
                    span { class: "badge", "{hours}" }
                    span { class: "badge", "{status.progress}%" }
                }
                div { class: "progress-bar",
                    div { class: "progress-fill", style: "width: {status.progress}%" }
                }
                div { class: "module-actions",
                    HashLink { to: module.route.clone(), class: "btn primary".to_string(), "{start}" }
                    if let Some(quiz_route) = module.quiz_route.clone() {
                        HashLink { to: quiz_route, class: "btn".to_string(), "{quiz}" }
                    }
                }
            }
        }
    }
}
