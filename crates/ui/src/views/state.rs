use dioxus::prelude::*;
use services::I18n;

use crate::context::AppContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self, i18n: I18n) -> &'static str {
        match self {
            Self::Unknown => i18n.t("error.generic"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

impl<T> ViewState<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Small spinner text shared by loading states.
#[component]
pub fn LoadingView() -> Element {
    let ctx = use_context::<AppContext>();
    let label = ctx.t("loading");
    rsx! {
        div { class: "loading", role: "status", "{label}" }
    }
}
