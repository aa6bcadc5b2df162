#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog;
pub mod content;
pub mod error;
pub mod i18n;
pub mod quiz;
pub mod roadmap;
pub mod router;
pub mod search;

pub use prep_core::Clock;

pub use app_services::{AppServices, content_source, load_catalog};
pub use catalog::{Catalog, CatalogEntry, RouteAction, RouteEntry, RouteTable, Section};
pub use content::{
    ContentRenderer, ContentSource, DirSource, HttpSource, LocalizedSource, StaticSource,
};
pub use error::{
    AppServicesError, CatalogError, FetchError, QuizError, RenderError, RoadmapError, RouterError,
};
pub use i18n::{I18n, Language};
pub use quiz::{
    QuizOutcome, QuizRunner, QuizSession, ReviewItem, Step, describe_answer, score_session,
};
pub use roadmap::{ModuleStatus, RoadmapModule, RoadmapView};
pub use router::{
    FavoritesView, Navigation, PageView, ProgressView, Router, SearchResults, TheoryView, View,
};
pub use search::{HitKind, SearchHit, SearchIndex, search_link};
