//! Hash router: turns a location hash into a fully loaded [`View`].
//!
//! Dispatch is an exact match of the base route against the [`RouteTable`].
//! Handler failures never escape `navigate`; they become `ContentUnavailable`
//! or `Error` views. Every call gets a fresh sequence number so callers can
//! discard the result of a navigation that was overtaken by a newer one.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use prep_core::model::{Bookmark, ConceptFavorite, QuizResult, Statistics};
use prep_core::route::RouteHash;
use storage::StorageManager;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::catalog::{Catalog, RouteAction, RouteEntry, RouteTable};
use crate::content::{ContentRenderer, ContentSource, RenderedPage, TheoryPage};
use crate::error::{CatalogError, RouterError};
use crate::i18n::I18n;
use crate::quiz::{QuizRunner, QuizSession};
use crate::roadmap::{RoadmapView, load_roadmap};
use crate::search::{SearchHit, SearchIndex};

pub const SITE_TITLE: &str = "Software Developer Prep";
/// Viewports at most this wide close the navigation drawer after navigating.
pub const DRAWER_BREAKPOINT: u32 = 1024;
const RECENT_QUIZZES: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub route: String,
    pub page: RenderedPage,
    pub bookmarked: bool,
}

/// A theory page with the learner's per-concept state.
#[derive(Debug, Clone, PartialEq)]
pub struct TheoryView {
    pub topic: String,
    pub page: TheoryPage,
    pub read: BTreeSet<String>,
    pub favorites: BTreeSet<String>,
    pub bookmarked: bool,
}

impl TheoryView {
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.page
            .concepts
            .iter()
            .filter(|c| self.read.contains(&c.concept.anchor))
            .count()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.page.concepts.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub query: String,
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesView {
    pub bookmarks: Vec<Bookmark>,
    pub concepts: Vec<ConceptFavorite>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub statistics: Statistics,
    /// Newest first.
    pub recent_quizzes: Vec<QuizResult>,
}

/// What the main content area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Page(PageView),
    Theory(TheoryView),
    Quiz(QuizSession),
    Roadmap(RoadmapView),
    Search(SearchResults),
    Favorites(FavoritesView),
    Progress(ProgressView),
    NotFound {
        route: String,
    },
    /// Content could not be fetched; the UI offers a reload.
    ContentUnavailable {
        title: String,
        path: String,
        detail: String,
    },
    Error {
        message: String,
    },
}

/// Outcome of one `navigate` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub seq: u64,
    pub view: View,
    pub document_title: String,
    /// Base route, for highlighting the active navigation link.
    pub active_route: String,
    pub anchor: Option<String>,
    pub close_drawer: bool,
}

#[must_use]
pub fn document_title(route_title: Option<&str>) -> String {
    match route_title {
        Some(title) => format!("{title} - {SITE_TITLE}"),
        None => SITE_TITLE.to_string(),
    }
}

#[derive(Clone)]
pub struct Router {
    catalog: Arc<Catalog>,
    table: Arc<RouteTable>,
    source: Arc<dyn ContentSource>,
    renderer: ContentRenderer,
    quiz: QuizRunner,
    storage: StorageManager,
    i18n: I18n,
    search_index: Arc<Mutex<Option<Arc<SearchIndex>>>>,
    current_route: Arc<RwLock<Option<String>>>,
    seq: Arc<AtomicU64>,
}

impl Router {
    /// # Errors
    ///
    /// Returns `CatalogError` if the catalog cannot be turned into a route table.
    pub fn new(
        catalog: Catalog,
        renderer: ContentRenderer,
        quiz: QuizRunner,
        storage: StorageManager,
        i18n: I18n,
    ) -> Result<Self, CatalogError> {
        let table = catalog.route_table()?;
        Ok(Self {
            catalog: Arc::new(catalog),
            table: Arc::new(table),
            source: renderer.source(),
            renderer,
            quiz,
            storage,
            i18n,
            search_index: Arc::new(Mutex::new(None)),
            current_route: Arc::new(RwLock::new(None)),
            seq: Arc::new(AtomicU64::new(0)),
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    #[must_use]
    pub fn home(&self) -> &str {
        &self.catalog.home
    }

    /// Base route of the most recent navigation.
    pub async fn current_route(&self) -> Option<String> {
        self.current_route.read().await.clone()
    }

    /// Whether `seq` belongs to the newest navigation started so far.
    #[must_use]
    pub fn is_latest(&self, seq: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == seq
    }

    /// Resolve `hash` and load its view.
    ///
    /// An empty hash resolves to the catalog's home route.
    pub async fn navigate(&self, hash: &str, viewport_width: u32) -> Navigation {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let mut parsed = RouteHash::parse(hash);
        if parsed.is_root() {
            parsed = parsed.with_base(&self.catalog.home);
        }
        let base = parsed.base().to_string();
        *self.current_route.write().await = Some(base.clone());
        debug!(seq, route = %base, anchor = ?parsed.anchor(), "navigating");

        let (view, title) = match self.table.get(&base) {
            Some(entry) => {
                let view = match self.dispatch(&base, entry, &parsed).await {
                    Ok(view) => view,
                    Err(err) => self.failure_view(&base, entry, &err),
                };
                (view, Some(entry.title.as_str()))
            }
            None => {
                debug!(route = %base, "no route matched");
                (View::NotFound { route: base.clone() }, None)
            }
        };

        Navigation {
            seq,
            view,
            document_title: document_title(title),
            active_route: base,
            anchor: parsed.anchor().map(str::to_string),
            close_drawer: viewport_width <= DRAWER_BREAKPOINT,
        }
    }

    async fn dispatch(
        &self,
        base: &str,
        entry: &RouteEntry,
        hash: &RouteHash,
    ) -> Result<View, RouterError> {
        let view = match &entry.action {
            RouteAction::Markdown { path } => {
                let page = self.renderer.render(path, &entry.title).await?;
                self.record_visit(base, &page.title).await;
                View::Page(PageView {
                    route: base.to_string(),
                    bookmarked: self.storage.is_bookmarked(base).await?,
                    page,
                })
            }
            RouteAction::Theory { path, topic } => {
                let page = self
                    .renderer
                    .render_theory(path, &entry.title, topic, base)
                    .await?;
                self.record_visit(base, &page.title).await;
                View::Theory(self.theory_view(base, topic, page).await?)
            }
            RouteAction::Quiz { path } => {
                self.end_study_session().await;
                View::Quiz(self.quiz.start(path, &entry.title).await?)
            }
            RouteAction::Roadmap => View::Roadmap(load_roadmap(&self.source, &self.storage).await?),
            RouteAction::Search => {
                let query = hash.query_param("q").unwrap_or_default();
                let index = self.search_index().await;
                View::Search(SearchResults {
                    hits: index.search(&query),
                    query,
                })
            }
            RouteAction::Favorites => View::Favorites(FavoritesView {
                bookmarks: self.storage.bookmarks().await?,
                concepts: self.storage.concept_favorites().await?,
            }),
            RouteAction::Progress => {
                let mut recent_quizzes = self.storage.quiz_results(None).await?;
                recent_quizzes.reverse();
                recent_quizzes.truncate(RECENT_QUIZZES);
                View::Progress(ProgressView {
                    statistics: self.storage.statistics().await?,
                    recent_quizzes,
                })
            }
        };
        Ok(view)
    }

    /// The cached search index, built on first use.
    ///
    /// An incomplete index is served but not kept, so the next search
    /// retries the pages that failed.
    async fn search_index(&self) -> Arc<SearchIndex> {
        let mut cached = self.search_index.lock().await;
        if let Some(index) = cached.as_ref() {
            return Arc::clone(index);
        }
        let index = Arc::new(SearchIndex::build(&self.catalog, &self.renderer).await);
        if index.is_complete() {
            *cached = Some(Arc::clone(&index));
        }
        index
    }

    async fn theory_view(
        &self,
        base: &str,
        topic: &str,
        page: TheoryPage,
    ) -> Result<TheoryView, RouterError> {
        let read = self
            .storage
            .read_concepts(base, page.concepts.iter().map(|c| c.concept.anchor.as_str()))
            .await?;
        let favorites = self
            .storage
            .concept_favorites()
            .await?
            .into_iter()
            .filter(|f| f.topic == topic)
            .map(|f| f.anchor)
            .collect();
        Ok(TheoryView {
            topic: topic.to_string(),
            bookmarked: self.storage.is_bookmarked(base).await?,
            page,
            read,
            favorites,
        })
    }

    /// Mark the page visited and move the open study session to it.
    ///
    /// Failures are logged; the page is shown regardless.
    async fn record_visit(&self, route: &str, title: &str) {
        if let Err(err) = self.storage.save_progress(route, 100).await {
            warn!(route, error = %err, "could not record progress");
        }
        self.end_study_session().await;
        if let Err(err) = self.storage.start_study_session(route, title).await {
            warn!(route, error = %err, "could not start study session");
        }
    }

    async fn end_study_session(&self) {
        if let Err(err) = self.storage.end_study_session().await {
            warn!(error = %err, "could not close study session");
        }
    }

    fn failure_view(&self, base: &str, entry: &RouteEntry, err: &RouterError) -> View {
        if let Some(fetch) = err.fetch_error() {
            warn!(route = base, error = %fetch, "content unavailable");
            return View::ContentUnavailable {
                title: entry.title.clone(),
                path: action_path(&entry.action).unwrap_or_default().to_string(),
                detail: fetch.to_string(),
            };
        }
        warn!(route = base, error = %err, "route handler failed");
        View::Error {
            message: self.i18n.t("error.generic").to_string(),
        }
    }
}

fn action_path(action: &RouteAction) -> Option<&str> {
    match action {
        RouteAction::Markdown { path }
        | RouteAction::Theory { path, .. }
        | RouteAction::Quiz { path } => Some(path),
        RouteAction::Roadmap => Some(crate::catalog::ROADMAP_FILE),
        RouteAction::Search | RouteAction::Favorites | RouteAction::Progress => None,
    }
}
