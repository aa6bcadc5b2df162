use std::sync::Arc;

mod desktop;

/// Opens external URLs (starter playgrounds) outside the app window.
pub trait UiLinkOpener: Send + Sync {
    fn open_url(&self, url: &str);
}

pub type LinkOpenerRef = Arc<dyn UiLinkOpener>;

pub use desktop::DesktopLinkOpener;

/// Only `http(s)` links leave the app.
#[must_use]
pub fn is_external_url(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("https://") || url.starts_with("http://")
}
