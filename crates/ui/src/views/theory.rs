use std::collections::BTreeSet;

use dioxus::prelude::*;
use prep_core::route::deep_link;
use services::TheoryView;
use services::content::ConceptArticle;
use tracing::warn;

use crate::context::AppContext;
use crate::location::HashLink;
use crate::views::header::PageHeaderView;
use crate::views::page::BookmarkButton;

/// A theory page: table of contents, concept articles with read and
/// favorite toggles, and a read counter.
#[component]
pub fn TheoryContent(view: TheoryView) -> Element {
    let ctx = use_context::<AppContext>();
    let i18n = ctx.i18n();
    let TheoryView {
        topic,
        page,
        read,
        favorites,
        bookmarked,
    } = view;

    let read = use_signal(|| read);
    let favorites = use_signal(|| favorites);

    let total = page.concepts.len();
    let read_count = page
        .concepts
        .iter()
        .filter(|c| read.read().contains(&c.concept.anchor))
        .count();
    let progress_label = i18n.format(
        "theory.progress",
        &[
            ("read", &read_count.to_string()),
            ("total", &total.to_string()),
        ],
    );
    let concepts_label = ctx.t("theory.concepts");

    let articles: Vec<(Option<String>, ConceptArticle, Option<String>)> = page
        .concepts
        .iter()
        .enumerate()
        .map(|(i, article)| {
            let prev = i
                .checked_sub(1)
                .and_then(|p| page.concepts.get(p))
                .map(|c| c.deep_link.clone());
            let next = page.concepts.get(i + 1).map(|c| c.deep_link.clone());
            (prev, article.clone(), next)
        })
        .collect();

    rsx! {
        article { class: "theory-page",
            div { class: "page-actions",
                BookmarkButton { route: page.route.clone(), title: page.title.clone(), bookmarked }
            }
            PageHeaderView { header: page.header.clone() }
            if let Some(summary) = page.summary.clone() {
                p { class: "summary", "{summary}" }
            }
            div { class: "markdown-body intro", dangerous_inner_html: "{page.intro_html}" }

            if total > 0 {
                nav { class: "concept-toc",
                    h2 { "{concepts_label}" }
                    p { class: "concept-progress", "{progress_label}" }
                    progress { max: "{total}", value: "{read_count}" }
                    ol {
                        for entry in page.toc.iter().cloned() {
                            li {
                                class: if read.read().contains(&entry.anchor) { "read" } else { "" },
                                HashLink { to: deep_link(&page.route, &entry.anchor), "{entry.title}" }
                            }
                        }
                    }
                }
            }

            for (prev, article, next) in articles {
                ConceptCard {
                    key: "{article.concept.anchor}",
                    route: page.route.clone(),
                    topic: topic.clone(),
                    is_read: read.read().contains(&article.concept.anchor),
                    is_favorite: favorites.read().contains(&article.concept.anchor),
                    article,
                    prev,
                    next,
                    read,
                    favorites,
                }
            }

            if !page.trailing_html.is_empty() {
                div { class: "markdown-body trailing", dangerous_inner_html: "{page.trailing_html}" }
            }
        }
    }
}

#[component]
fn ConceptCard(
    route: String,
    topic: String,
    article: ConceptArticle,
    is_read: bool,
    is_favorite: bool,
    prev: Option<String>,
    next: Option<String>,
    read: Signal<BTreeSet<String>>,
    favorites: Signal<BTreeSet<String>>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let anchor = article.concept.anchor.clone();
    let title = article.concept.title.clone();

    let read_label = if is_read {
        ctx.t("theory.read")
    } else {
        ctx.t("theory.markRead")
    };
    let favorite_label = if is_favorite {
        ctx.t("theory.unfavorite")
    } else {
        ctx.t("theory.favorite")
    };
    let prev_label = ctx.t("theory.previous");
    let next_label = ctx.t("theory.next");

    let on_read = {
        let storage = ctx.storage();
        let route = route.clone();
        let anchor = anchor.clone();
        move |_| {
            let storage = storage.clone();
            let route = route.clone();
            let anchor = anchor.clone();
            let mut read = read;
            spawn(async move {
                let now_read = !is_read;
                match storage.set_concept_read(&route, &anchor, now_read).await {
                    Ok(()) => {
                        if now_read {
                            read.write().insert(anchor);
                        } else {
                            read.write().remove(&anchor);
                        }
                    }
                    Err(err) => warn!(%route, %anchor, error = %err, "concept read flag failed"),
                }
            });
        }
    };

    let on_favorite = {
        let storage = ctx.storage();
        let anchor = anchor.clone();
        move |_| {
            let storage = storage.clone();
            let topic = topic.clone();
            let anchor = anchor.clone();
            let title = title.clone();
            let mut favorites = favorites;
            spawn(async move {
                match storage.toggle_concept_favorite(&topic, &anchor, &title).await {
                    Ok(true) => {
                        favorites.write().insert(anchor);
                    }
                    Ok(false) => {
                        favorites.write().remove(&anchor);
                    }
                    Err(err) => warn!(%topic, %anchor, error = %err, "concept favorite failed"),
                }
            });
        }
    };

    rsx! {
        section {
            id: "{anchor}",
            class: if is_read { "concept read" } else { "concept" },
            header { class: "concept-header",
                h3 {
                    HashLink { to: article.deep_link.clone(), class: "concept-link".to_string(), "{article.concept.title}" }
                }
                div { class: "concept-actions",
                    button {
                        class: if is_read { "btn read active" } else { "btn read" },
                        onclick: on_read,
                        "{read_label}"
                    }
                    button {
                        class: if is_favorite { "btn favorite active" } else { "btn favorite" },
                        onclick: on_favorite,
                        "{favorite_label}"
                    }
                }
            }
            div { class: "markdown-body", dangerous_inner_html: "{article.html}" }
            footer { class: "concept-nav",
                if let Some(prev) = prev {
                    HashLink { to: prev, class: "prev".to_string(), "{prev_label}" }
                }
                if let Some(next) = next {
                    HashLink { to: next, class: "next".to_string(), "{next_label}" }
                }
            }
        }
    }
}
