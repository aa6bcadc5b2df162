use dioxus::prelude::*;
use prep_core::route::deep_link;
use services::FavoritesView;

use crate::context::AppContext;
use crate::location::HashLink;
use crate::vm::format_date;

#[derive(Clone, Debug, PartialEq, Eq)]
struct FavoriteRow {
    key: String,
    link: String,
    title: String,
    note: String,
}

/// Saved pages and favorite concepts.
#[component]
pub fn FavoritesContent(view: FavoritesView) -> Element {
    let ctx = use_context::<AppContext>();
    let title = ctx.t("favorites.title");
    let pages_label = ctx.t("favorites.pages");
    let concepts_label = ctx.t("favorites.concepts");

    let pages: Vec<FavoriteRow> = view
        .bookmarks
        .iter()
        .map(|b| FavoriteRow {
            key: b.id.to_string(),
            link: b.route.clone(),
            title: b.title.clone(),
            note: format_date(b.added_at),
        })
        .collect();
    let concepts: Vec<FavoriteRow> = view
        .concepts
        .iter()
        .map(|f| FavoriteRow {
            key: f.id.clone(),
            link: deep_link(&format!("#/theory/{}", f.topic), &f.anchor),
            title: f.title.clone(),
            note: f.topic.clone(),
        })
        .collect();

    rsx! {
        article { class: "favorites-page",
            h1 { "{title}" }
            FavoriteList { heading: pages_label, rows: pages }
            FavoriteList { heading: concepts_label, rows: concepts }
        }
    }
}

#[component]
fn FavoriteList(heading: &'static str, rows: Vec<FavoriteRow>) -> Element {
    let ctx = use_context::<AppContext>();
    let empty = ctx.t("favorites.empty");

    rsx! {
        section { class: "favorite-section",
            h2 { "{heading}" }
            if rows.is_empty() {
                p { class: "muted", "{empty}" }
            } else {
                ul { class: "favorite-list",
                    for row in rows {
                        li { key: "{row.key}",
                            HashLink { to: row.link, "{row.title}" }
                            span { class: "muted", " {row.note}" }
                        }
                    }
                }
            }
        }
    }
}
