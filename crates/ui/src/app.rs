use dioxus::prelude::*;
use services::router::SITE_TITLE;
use services::{Navigation, search_link};
use tracing::debug;

use crate::context::AppContext;
use crate::location::{BridgeEvent, HashLink, HashLocation, use_location};
use crate::scripts::{HASH_BRIDGE, push_hash_script, scroll_script};
use crate::views::{ContentView, ErrorView, LoadingView, ViewState};
use crate::vm::map_nav_sections;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let location = use_context_provider(|| HashLocation::new(ctx.start_route()));
    let mut current = use_signal(|| ViewState::<Navigation>::Loading);

    // hashchange and resize events from the webview
    use_future(move || async move {
        let mut bridge = document::eval(HASH_BRIDGE);
        while let Ok(event) = bridge.recv::<BridgeEvent>().await {
            location.apply(event);
        }
    });

    let router = ctx.router();
    use_effect(move || {
        let hash = location.hash();
        let reloads = location.reloads();
        let width = location.viewport_width();
        let router = router.clone();
        spawn(async move {
            let navigation = router.navigate(&hash, width).await;
            if !router.is_latest(navigation.seq) {
                debug!(seq = navigation.seq, "dropping superseded navigation");
                return;
            }
            if navigation.close_drawer {
                location.close_drawer();
            }
            if !hash.trim().is_empty() {
                let _ = document::eval(&push_hash_script(&hash));
            }
            debug!(%hash, reloads, "view ready");
            current.set(ViewState::Ready(navigation));
        });
    });

    // runs after the new view is in the DOM
    use_effect(move || {
        if let ViewState::Ready(navigation) = &*current.read() {
            let _ = document::eval(&scroll_script(navigation.anchor.as_deref()));
        }
    });

    let (title, active_route) = match &*current.read() {
        ViewState::Ready(navigation) => (
            navigation.document_title.clone(),
            navigation.active_route.clone(),
        ),
        _ => (SITE_TITLE.to_string(), String::new()),
    };
    let sections = map_nav_sections(ctx.router().catalog(), &active_route, ctx.i18n());
    let home = ctx.router().home().to_string();
    let toggle_label = ctx.t("nav.toggle");

    let body = match current() {
        ViewState::Ready(navigation) => rsx! {
            ContentView { key: "{navigation.seq}", view: navigation.view }
        },
        ViewState::Error(err) => {
            let message = err.message(ctx.i18n()).to_string();
            rsx! { ErrorView { message } }
        }
        ViewState::Loading | ViewState::Idle => rsx! { LoadingView {} },
    };

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "{title}" }

        div { class: if location.drawer_open() { "app-root drawer-open" } else { "app-root" },
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                aside { class: "sidebar",
                    div { class: "brand",
                        HashLink { to: home, "{SITE_TITLE}" }
                    }
                    SearchBox {}
                    nav { class: "site-nav",
                        for section in sections {
                            div { class: "nav-section",
                                h4 { "{section.label}" }
                                ul {
                                    for link in section.links {
                                        li {
                                            HashLink {
                                                to: link.route,
                                                class: if link.active { "nav-link active".to_string() } else { "nav-link".to_string() },
                                                "{link.label}"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                div { class: "main",
                    header { class: "topbar",
                        button {
                            class: "drawer-toggle",
                            aria_label: "{toggle_label}",
                            onclick: move |_| location.toggle_drawer(),
                            "☰"
                        }
                    }
                    main { class: "content", {body} }
                }
            }
        }
    }
}

/// Search box; submitting opens `#/search?q=...`.
#[component]
fn SearchBox() -> Element {
    let ctx = use_context::<AppContext>();
    let location = use_location();
    let mut query = use_signal(String::new);
    let placeholder = ctx.t("search.placeholder");

    rsx! {
        form {
            class: "search-box",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                let text = query.peek().trim().to_string();
                if !text.is_empty() {
                    location.go(&search_link(&text));
                }
            },
            input {
                r#type: "search",
                placeholder: "{placeholder}",
                value: "{query}",
                oninput: move |evt: FormEvent| query.set(evt.value()),
            }
        }
    }
}
