use dioxus::prelude::*;
use services::{HitKind, SearchResults};

use crate::context::AppContext;
use crate::location::HashLink;

#[component]
pub fn SearchContent(view: SearchResults) -> Element {
    let ctx = use_context::<AppContext>();
    let title = ctx.t("search.title");
    let empty = ctx.t("search.empty");
    let prompt = ctx.t("search.prompt");
    let query_label = ctx
        .i18n()
        .format("search.query", &[("query", view.query.as_str())]);
    let has_query = !view.query.trim().is_empty();

    rsx! {
        article { class: "search-page",
            h1 { "{title}" }
            if !has_query {
                p { class: "muted", "{prompt}" }
            } else {
                p { class: "search-query", "{query_label}" }
                if view.hits.is_empty() {
                    p { class: "muted", "{empty}" }
                } else {
                    ul { class: "search-results",
                        for hit in view.hits.into_iter() {
                            li { class: if hit.kind == HitKind::Concept { "search-hit concept" } else { "search-hit page" },
                                HashLink { to: hit.link.clone(), class: "search-title".to_string(), "{hit.title}" }
                                if hit.kind == HitKind::Concept {
                                    span { class: "search-page-title", " · {hit.page_title}" }
                                }
                                if let Some(snippet) = hit.snippet {
                                    p { class: "search-snippet", "{snippet}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
