//! Shared error types for the services crate.

use thiserror::Error;

use prep_core::model::QuizFormatError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by content sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("content not found: {0}")]
    NotFound(String),
    #[error("request for {path} failed with status {status}")]
    HttpStatus {
        path: String,
        status: reqwest::StatusCode,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("path escapes the content root: {0}")]
    InvalidPath(String),
}

/// Errors emitted by `ContentRenderer`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizRunner`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Format(#[from] QuizFormatError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while loading the roadmap.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RoadmapError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("roadmap JSON is malformed: {0}")]
    Format(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while building or loading the route catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog JSON is malformed: {0}")]
    Format(#[from] serde_json::Error),
    #[error(transparent)]
    Route(#[from] prep_core::route::RouteError),
    #[error("route registered twice: {0}")]
    Duplicate(String),
    #[error("route {0} needs a content path")]
    MissingPath(String),
    #[error("route shape is not supported: {0}")]
    Unsupported(String),
    #[error("home route is not in the catalog: {0}")]
    UnknownHome(String),
}

/// Errors a route handler can raise. The router turns them into views.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RouterError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Roadmap(#[from] RoadmapError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl RouterError {
    /// The fetch failure behind this error, if any.
    #[must_use]
    pub fn fetch_error(&self) -> Option<&FetchError> {
        match self {
            RouterError::Render(RenderError::Fetch(err))
            | RouterError::Quiz(QuizError::Fetch(err))
            | RouterError::Roadmap(RoadmapError::Fetch(err)) => Some(err),
            _ => None,
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("invalid content root URL: {0}")]
    ContentUrl(#[from] url::ParseError),
}
