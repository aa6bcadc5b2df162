use dioxus::prelude::*;

use crate::context::AppContext;
use crate::location::{HashLink, use_location};

#[component]
pub fn NotFoundView(route: String) -> Element {
    let ctx = use_context::<AppContext>();
    let title = ctx.t("error.notfound.title");
    let body = ctx.t("error.notfound");
    let home = ctx.t("error.home");

    rsx! {
        div { class: "status-panel not-found",
            h1 { "{title}" }
            p { "{body}" }
            code { "{route}" }
            p {
                HashLink { to: ctx.router().home().to_string(), class: "btn primary".to_string(), "{home}" }
            }
        }
    }
}

#[component]
pub fn ErrorView(message: String) -> Element {
    let ctx = use_context::<AppContext>();
    let title = ctx.t("error.title");
    let home = ctx.t("error.home");

    rsx! {
        div { class: "status-panel error", role: "alert",
            h1 { "{title}" }
            p { "{message}" }
            p {
                HashLink { to: ctx.router().home().to_string(), class: "btn".to_string(), "{home}" }
            }
        }
    }
}

/// Shown when a page's file cannot be fetched. Retry loads the same hash again.
#[component]
pub fn ContentUnavailableView(title: String, path: String, detail: String) -> Element {
    let ctx = use_context::<AppContext>();
    let location = use_location();
    let heading = ctx.t("content.unavailable.title");
    let body = ctx
        .i18n()
        .format("content.unavailable.body", &[("title", title.as_str())]);
    let details = ctx.t("content.unavailable.details");
    let reload = ctx.t("content.reload");

    rsx! {
        div { class: "status-panel unavailable",
            h1 { "{heading}" }
            p { "{body}" }
            details {
                summary { "{details}" }
                p { code { "{path}" } }
                pre { "{detail}" }
            }
            button { class: "btn primary", onclick: move |_| location.reload(), "{reload}" }
        }
    }
}
