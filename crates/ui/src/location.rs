//! Hash location held in signals.
//!
//! The webview reports `hashchange` events and its width through a small
//! script bridge; in-app links write the signal directly.

use dioxus::prelude::*;
use serde::Deserialize;

/// Width assumed until the webview reports one.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;

#[derive(Clone, Copy, PartialEq)]
pub struct HashLocation {
    hash: Signal<String>,
    reloads: Signal<u64>,
    viewport_width: Signal<u32>,
    drawer_open: Signal<bool>,
}

impl HashLocation {
    /// Create the location signals in the current scope.
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self {
            hash: Signal::new(initial.to_string()),
            reloads: Signal::new(0),
            viewport_width: Signal::new(DEFAULT_VIEWPORT_WIDTH),
            drawer_open: Signal::new(false),
        }
    }

    /// Current hash; subscribes the caller.
    #[must_use]
    pub fn hash(&self) -> String {
        (self.hash)()
    }

    #[must_use]
    pub fn reloads(&self) -> u64 {
        (self.reloads)()
    }

    /// Last reported width, read without subscribing.
    #[must_use]
    pub fn viewport_width(&self) -> u32 {
        *self.viewport_width.peek()
    }

    #[must_use]
    pub fn drawer_open(&self) -> bool {
        (self.drawer_open)()
    }

    /// Navigate to `to`. Setting the current hash again is a no-op.
    pub fn go(mut self, to: &str) {
        if *self.hash.peek() != to {
            self.hash.set(to.to_string());
        }
    }

    /// Load the current hash again.
    pub fn reload(mut self) {
        self.reloads += 1;
    }

    pub fn toggle_drawer(mut self) {
        let open = *self.drawer_open.peek();
        self.drawer_open.set(!open);
    }

    pub fn close_drawer(mut self) {
        if *self.drawer_open.peek() {
            self.drawer_open.set(false);
        }
    }

    /// Apply one message from the webview bridge.
    pub fn apply(mut self, event: BridgeEvent) {
        if let Some(width) = event.width {
            self.viewport_width.set(width);
        }
        if let Some(hash) = event.hash.filter(|h| !h.trim().is_empty()) {
            self.go(&hash);
        }
    }
}

/// Message posted by [`crate::scripts::HASH_BRIDGE`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BridgeEvent {
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
}

/// Location provided by the app shell.
#[must_use]
pub fn use_location() -> HashLocation {
    use_context::<HashLocation>()
}

/// An in-app link to a hash route.
#[component]
pub fn HashLink(to: String, class: Option<String>, children: Element) -> Element {
    let location = use_location();
    let target = to.clone();
    rsx! {
        a {
            class: class.unwrap_or_default(),
            href: "{to}",
            onclick: move |evt: MouseEvent| {
                evt.prevent_default();
                location.go(&target);
            },
            {children}
        }
    }
}
