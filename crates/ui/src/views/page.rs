use dioxus::prelude::*;
use services::PageView;
use tracing::warn;

use crate::context::AppContext;
use crate::views::header::PageHeaderView;

/// Button that flips the bookmark on `route`.
#[component]
pub fn BookmarkButton(route: String, title: String, bookmarked: bool) -> Element {
    let ctx = use_context::<AppContext>();
    let mut marked = use_signal(|| bookmarked);
    let label = if marked() {
        ctx.t("content.unbookmark")
    } else {
        ctx.t("content.bookmark")
    };

    let on_toggle = move |_| {
        let storage = ctx.storage();
        let route = route.clone();
        let title = title.clone();
        spawn(async move {
            match storage.toggle_bookmark(&route, &title, "").await {
                Ok(now) => marked.set(now),
                Err(err) => warn!(%route, error = %err, "bookmark toggle failed"),
            }
        });
    };

    rsx! {
        button {
            class: if marked() { "btn bookmark active" } else { "btn bookmark" },
            onclick: on_toggle,
            "{label}"
        }
    }
}

/// An exercise or checklist page.
#[component]
pub fn PageContent(view: PageView) -> Element {
    let PageView {
        route,
        page,
        bookmarked,
    } = view;

    rsx! {
        article { class: "content-page",
            div { class: "page-actions",
                BookmarkButton { route, title: page.title.clone(), bookmarked }
            }
            PageHeaderView { header: page.header }
            div { class: "markdown-body", dangerous_inner_html: "{page.html}" }
        }
    }
}
