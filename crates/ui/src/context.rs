use std::sync::Arc;

use services::{AppServices, I18n, QuizRunner, Router};
use storage::StorageManager;

use crate::platform::{DesktopLinkOpener, LinkOpenerRef};

pub trait UiApp: Send + Sync {
    fn router(&self) -> Router;
    fn storage(&self) -> StorageManager;
    fn quiz(&self) -> QuizRunner;
    fn i18n(&self) -> I18n;

    /// Hash opened on launch; the catalog home when `None`.
    fn start_route(&self) -> Option<String> {
        None
    }

    fn link_opener(&self) -> LinkOpenerRef {
        Arc::new(DesktopLinkOpener)
    }
}

impl UiApp for AppServices {
    fn router(&self) -> Router {
        AppServices::router(self)
    }

    fn storage(&self) -> StorageManager {
        AppServices::storage(self)
    }

    fn quiz(&self) -> QuizRunner {
        AppServices::quiz(self)
    }

    fn i18n(&self) -> I18n {
        AppServices::i18n(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    router: Router,
    storage: StorageManager,
    quiz: QuizRunner,
    i18n: I18n,
    start_route: String,
    links: LinkOpenerRef,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let router = app.router();
        let start_route = app
            .start_route()
            .filter(|route| !route.trim().is_empty())
            .unwrap_or_else(|| router.home().to_string());

        Self {
            storage: app.storage(),
            quiz: app.quiz(),
            i18n: app.i18n(),
            links: app.link_opener(),
            start_route,
            router,
        }
    }

    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    #[must_use]
    pub fn storage(&self) -> StorageManager {
        self.storage.clone()
    }

    #[must_use]
    pub fn quiz(&self) -> QuizRunner {
        self.quiz.clone()
    }

    #[must_use]
    pub fn i18n(&self) -> I18n {
        self.i18n
    }

    #[must_use]
    pub fn start_route(&self) -> &str {
        &self.start_route
    }

    /// Translate `key` in the active language.
    #[must_use]
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        self.i18n.t(key)
    }

    pub fn open_external(&self, url: &str) {
        self.links.open_url(url);
    }
}

// Provided by the composition root in `crates/app`.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
