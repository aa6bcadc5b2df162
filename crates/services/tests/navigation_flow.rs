use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use prep_core::time::{fixed_clock, fixed_now};
use services::{AppServices, Clock, ContentSource, FetchError, StaticSource, View};

const JAVA: &str = "---
title: Java Alapok
difficulty: beginner
---
# Java Alapok

## Fogalmak

### Generics
Típusbiztos gyűjtemények.

### Streams
Funkcionális feldolgozás.
";

const INTERVIEW: &str = "# Interjú\n\n- [ ] Mesélj magadról\n";

const ROADMAP: &str = r##"{"modules":[
    {"title":"Java","description":"OOP","estimatedHours":10,"route":"#/theory/java","quizRoute":"#/quiz/java"}
]}"##;

const QUIZ_HU: &str = r#"{"title":"Java Teszt","questions":[{"type":"true-false","question":"Igaz?","correct":true}]}"#;
const QUIZ_EN: &str = r#"{"title":"Java Quiz","questions":[{"type":"true-false","question":"True?","correct":true}]}"#;

const HU_LOCALE: &str = "hu_HU.UTF-8";

fn source() -> Arc<dyn ContentSource> {
    Arc::new(
        StaticSource::new()
            .with_file("theory/java.md", JAVA)
            .with_file("checklists/interview.md", INTERVIEW)
            .with_file("data/roadmap.json", ROADMAP)
            .with_file("data/quizzes/sql.json", "{ not json"),
    )
}

async fn services() -> AppServices {
    AppServices::in_memory(source(), fixed_clock(), Some(HU_LOCALE))
        .await
        .unwrap()
}

#[tokio::test]
async fn english_locale_loads_translated_quiz() {
    let source = StaticSource::new()
        .with_file("data/quizzes/java.json", QUIZ_HU)
        .with_file("data/en/quizzes/java.json", QUIZ_EN);
    let services = AppServices::in_memory(Arc::new(source), fixed_clock(), Some("en_US.UTF-8"))
        .await
        .unwrap();
    let nav = services.router().navigate("#/quiz/java", 1440).await;
    let View::Quiz(session) = nav.view else {
        panic!("expected a quiz, got {:?}", nav.view);
    };
    assert_eq!(session.quiz().title, "Java Quiz");
}

#[tokio::test]
async fn deep_link_dispatches_on_base_route_and_keeps_anchor() {
    let services = services().await;
    let router = services.router();

    let nav = router.navigate("#/theory/java#generics", 1440).await;
    assert_eq!(nav.active_route, "#/theory/java");
    assert_eq!(nav.anchor.as_deref(), Some("generics"));
    assert_eq!(nav.document_title, "Java Alapok - Software Developer Prep");
    assert!(!nav.close_drawer);

    let View::Theory(theory) = nav.view else {
        panic!("expected a theory view");
    };
    assert_eq!(theory.total(), 2);
    assert_eq!(theory.page.position("generics"), Some(0));
    assert_eq!(theory.page.concepts[0].deep_link, "#/theory/java#generics");
    assert_eq!(router.current_route().await.as_deref(), Some("#/theory/java"));
}

#[tokio::test]
async fn successful_render_records_progress_and_study_session() {
    let services = services().await;
    let storage = services.storage();

    services.router().navigate("#/checklists/interview", 800).await;
    assert_eq!(storage.progress("#/checklists/interview").await.unwrap(), 100);
    let current = storage.current_study_session().await.unwrap().unwrap();
    assert_eq!(current.route, "#/checklists/interview");

    services.router().navigate("#/theory/java", 800).await;
    assert_eq!(storage.study_sessions().await.unwrap().len(), 1);
}

#[tokio::test]
async fn empty_hash_opens_the_home_route() {
    let services = services().await;
    let nav = services.router().navigate("", 1440).await;
    assert_eq!(nav.active_route, "#/theory/java");
    assert!(matches!(nav.view, View::Theory(_)));
}

#[tokio::test]
async fn unknown_route_is_not_found_without_error() {
    let services = services().await;
    let nav = services.router().navigate("#/not-a-real-route", 600).await;
    assert!(matches!(nav.view, View::NotFound { ref route } if route == "#/not-a-real-route"));
    assert_eq!(nav.document_title, "Software Developer Prep");
    assert!(nav.close_drawer);
    assert!(services.storage().progress_map().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_content_shows_unavailable_panel() {
    let services = services().await;
    let nav = services.router().navigate("#/theory/sql", 1440).await;
    match nav.view {
        View::ContentUnavailable { title, path, .. } => {
            assert_eq!(title, "SQL & Adatbázis");
            assert_eq!(path, "theory/sql.md");
        }
        other => panic!("expected unavailable panel, got {other:?}"),
    }
    assert_eq!(services.storage().progress("#/theory/sql").await.unwrap(), 0);
}

#[tokio::test]
async fn malformed_quiz_renders_generic_error() {
    let services = services().await;
    let nav = services.router().navigate("#/quiz/sql", 1440).await;
    assert!(matches!(
        nav.view,
        View::Error { ref message } if message == "Hiba történt az oldal betöltése során."
    ));
}

#[tokio::test]
async fn navigation_sequence_identifies_latest_call() {
    let services = services().await;
    let router = services.router();
    let first = router.navigate("#/roadmap", 1440).await;
    let second = router.navigate("#/favorites", 1440).await;
    assert!(second.seq > first.seq);
    assert!(!router.is_latest(first.seq));
    assert!(router.is_latest(second.seq));
}

#[tokio::test]
async fn roadmap_reflects_completed_modules() {
    let services = services().await;
    services.storage().mark_as_completed("#/theory/java").await.unwrap();
    let nav = services.router().navigate("#/roadmap", 1440).await;
    let View::Roadmap(roadmap) = nav.view else {
        panic!("expected roadmap");
    };
    assert!(roadmap.modules[0].completed);
    assert_eq!(roadmap.completed_count, 1);
}

#[tokio::test]
async fn search_finds_concepts_across_theory_pages() {
    let services = services().await;
    let nav = services.router().navigate("#/search?q=stream", 1440).await;
    let View::Search(results) = nav.view else {
        panic!("expected search results");
    };
    assert_eq!(results.query, "stream");
    assert_eq!(results.hits[0].link, "#/theory/java#streams");
}

/// Serves `inner`, except that the first read of the java theory page fails.
struct FlakyJava {
    inner: StaticSource,
    failed: AtomicBool,
}

#[async_trait]
impl ContentSource for FlakyJava {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        if path.ends_with("theory/java.md") && !self.failed.swap(true, Ordering::SeqCst) {
            return Err(FetchError::Io {
                path: path.to_string(),
                source: std::io::Error::other("connection reset"),
            });
        }
        self.inner.fetch_text(path).await
    }

    fn describe(&self) -> String {
        "flaky java".to_string()
    }
}

#[tokio::test]
async fn search_retries_pages_that_failed_to_index() {
    let source = FlakyJava {
        inner: StaticSource::new().with_file("theory/java.md", JAVA),
        failed: AtomicBool::new(false),
    };
    let services = AppServices::in_memory(Arc::new(source), fixed_clock(), Some(HU_LOCALE))
        .await
        .unwrap();
    let router = services.router();

    let View::Search(first) = router.navigate("#/search?q=stream", 1440).await.view else {
        panic!("expected search results");
    };
    assert!(first.hits.is_empty());

    let View::Search(second) = router.navigate("#/search?q=stream", 1440).await.view else {
        panic!("expected search results");
    };
    assert_eq!(second.hits[0].link, "#/theory/java#streams");
}

#[tokio::test]
async fn theory_view_reports_read_and_favorite_concepts() {
    let services = services().await;
    let storage = services.storage();
    storage
        .set_concept_read("#/theory/java", "streams", true)
        .await
        .unwrap();
    storage
        .toggle_concept_favorite("java", "generics", "Generics")
        .await
        .unwrap();

    let nav = services.router().navigate("#/theory/java", 1440).await;
    let View::Theory(theory) = nav.view else {
        panic!("expected theory view");
    };
    assert_eq!(theory.read_count(), 1);
    assert!(theory.favorites.contains("generics"));
}

#[tokio::test]
async fn statistics_count_visited_pages() {
    let services = AppServices::in_memory(source(), Clock::fixed(fixed_now()), Some(HU_LOCALE))
        .await
        .unwrap();
    services.router().navigate("#/theory/java", 1440).await;
    let stats = services.storage().statistics().await.unwrap();
    assert_eq!(stats.completed_routes, 1);
    assert_eq!(stats.last_activity, Some(fixed_now()));
}
