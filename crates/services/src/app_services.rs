use std::sync::Arc;

use storage::repository::{KeyValueStore, Storage};
use storage::StorageManager;
use tracing::{debug, info, warn};

use crate::Clock;
use crate::catalog::{CATALOG_FILE, Catalog};
use crate::content::{ContentRenderer, ContentSource, DirSource, HttpSource, LocalizedSource};
use crate::error::{AppServicesError, CatalogError, FetchError};
use crate::i18n::I18n;
use crate::quiz::QuizRunner;
use crate::router::Router;

/// Assembles app-facing services over one content source and one store.
#[derive(Clone)]
pub struct AppServices {
    i18n: I18n,
    source: Arc<dyn ContentSource>,
    storage: StorageManager,
    renderer: ContentRenderer,
    quiz: QuizRunner,
    router: Router,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// `content_root` is a directory or an `http(s)://` base URL. `locale`
    /// is consulted when no language is saved in the settings.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the content root is unusable, storage
    /// initialization fails, or the catalog is invalid.
    pub async fn new_sqlite(
        content_root: &str,
        db_url: &str,
        clock: Clock,
        locale: Option<&str>,
    ) -> Result<Self, AppServicesError> {
        let source = content_source(content_root)?;
        let storage = Storage::sqlite(db_url).await?;
        Self::assemble(source, storage.store, clock, locale).await
    }

    /// Build services over an in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the catalog is invalid.
    pub async fn in_memory(
        source: Arc<dyn ContentSource>,
        clock: Clock,
        locale: Option<&str>,
    ) -> Result<Self, AppServicesError> {
        Self::assemble(source, Storage::in_memory().store, clock, locale).await
    }

    /// Content documents are fetched in the resolved language, falling back
    /// to the base document when no translation exists. The catalog is
    /// always read from the content root itself.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if seeding storage fails or the catalog is invalid.
    pub async fn assemble(
        source: Arc<dyn ContentSource>,
        store: Arc<dyn KeyValueStore>,
        clock: Clock,
        locale: Option<&str>,
    ) -> Result<Self, AppServicesError> {
        let storage = StorageManager::new(store, clock);
        storage.init().await?;

        let settings = storage.settings().await?;
        let i18n = I18n::resolve(settings.language.as_deref(), locale);
        let catalog = load_catalog(source.as_ref()).await?;
        info!(
            content = %source.describe(),
            language = %i18n.language(),
            routes = catalog.entries.len(),
            "services ready"
        );

        let localized: Arc<dyn ContentSource> =
            Arc::new(LocalizedSource::new(Arc::clone(&source), i18n.language()));
        let renderer = ContentRenderer::new(Arc::clone(&localized), i18n);
        let quiz = QuizRunner::new(clock, localized, storage.clone());
        let router = Router::new(catalog, renderer.clone(), quiz.clone(), storage.clone(), i18n)?;

        Ok(Self {
            i18n,
            source,
            storage,
            renderer,
            quiz,
            router,
        })
    }

    #[must_use]
    pub fn i18n(&self) -> I18n {
        self.i18n
    }

    #[must_use]
    pub fn source(&self) -> Arc<dyn ContentSource> {
        Arc::clone(&self.source)
    }

    #[must_use]
    pub fn storage(&self) -> StorageManager {
        self.storage.clone()
    }

    #[must_use]
    pub fn renderer(&self) -> ContentRenderer {
        self.renderer.clone()
    }

    #[must_use]
    pub fn quiz(&self) -> QuizRunner {
        self.quiz.clone()
    }

    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Pick a content source for `root`: an HTTP base URL or a directory.
///
/// # Errors
///
/// Returns `AppServicesError::ContentUrl` for an unparsable URL.
pub fn content_source(root: &str) -> Result<Arc<dyn ContentSource>, AppServicesError> {
    if root.starts_with("http://") || root.starts_with("https://") {
        return Ok(Arc::new(HttpSource::new(root)?));
    }
    Ok(Arc::new(DirSource::new(root)))
}

/// Load `catalog.json` from the content root, or the built-in catalog when absent.
///
/// Fetch failures other than a missing file are logged and also fall back.
///
/// # Errors
///
/// Returns `CatalogError::Format` when the file exists but is malformed.
pub async fn load_catalog(source: &dyn ContentSource) -> Result<Catalog, CatalogError> {
    match source.fetch_text(CATALOG_FILE).await {
        Ok(raw) => {
            debug!("using catalog from content root");
            Catalog::from_json(&raw)
        }
        Err(FetchError::NotFound(_)) => Ok(Catalog::default()),
        Err(err) => {
            warn!(error = %err, "catalog unavailable, using built-in routes");
            Ok(Catalog::default())
        }
    }
}
