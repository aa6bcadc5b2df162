use dioxus::prelude::*;
use services::content::PageHeader;

use crate::context::AppContext;

/// Title block of a content page: difficulty, duration, goals and playground links.
#[component]
pub fn PageHeaderView(header: PageHeader) -> Element {
    let ctx = use_context::<AppContext>();
    let goals_label = ctx.t("content.learningGoals");
    let starter_label = ctx.t("content.quickStart");
    let minutes = header.estimated_minutes.map(|minutes| {
        ctx.i18n()
            .format("content.minutes", &[("minutes", &minutes.to_string())])
    });

    rsx! {
        header { class: "page-header",
            h1 { "{header.title}" }
            div { class: "page-meta",
                if let Some(badge) = header.difficulty.clone() {
                    span { class: "badge difficulty-{badge.key}", "{badge.label}" }
                }
                if let Some(minutes) = minutes {
                    span { class: "badge duration", "⏱️ {minutes}" }
                }
            }
            if !header.goals.is_empty() {
                section { class: "learning-goals",
                    h3 { "{goals_label}" }
                    ul {
                        for goal in header.goals.iter() {
                            li { "{goal}" }
                        }
                    }
                }
            }
            if !header.starter.is_empty() {
                section { class: "quick-start",
                    h3 { "{starter_label}" }
                    for link in header.starter.iter().cloned() {
                        button {
                            class: "btn starter-{link.provider}",
                            title: "{link.url}",
                            onclick: {
                                let ctx = ctx.clone();
                                let url = link.url.clone();
                                move |_| ctx.open_external(&url)
                            },
                            "{link.label}"
                        }
                    }
                }
            }
        }
    }
}
