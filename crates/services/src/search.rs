//! Case-insensitive search over page titles and theory concepts.

use prep_core::route::deep_link;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::content::ContentRenderer;
use crate::error::{FetchError, RenderError};

/// Queries shorter than this return no hits.
pub const MIN_QUERY_LEN: usize = 2;
const MAX_HITS: usize = 50;
const SNIPPET_RADIUS: usize = 60;

/// Route of the search page for `query`.
#[must_use]
pub fn search_link(query: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(query.trim().as_bytes()).collect();
    format!("#/search?q={encoded}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Page,
    Concept,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub kind: HitKind,
    pub title: String,
    /// Route to open, with a concept anchor for concept hits.
    pub link: String,
    /// Title of the page the hit belongs to.
    pub page_title: String,
    pub snippet: Option<String>,
}

#[derive(Debug, Clone)]
struct Item {
    kind: HitKind,
    title: String,
    link: String,
    page_title: String,
    text: String,
    title_lower: String,
    text_lower: String,
}

impl Item {
    fn new(kind: HitKind, title: &str, link: String, page_title: &str, text: String) -> Self {
        Self {
            kind,
            title_lower: title.to_lowercase(),
            text_lower: text.to_lowercase(),
            title: title.to_string(),
            link,
            page_title: page_title.to_string(),
            text,
        }
    }
}

/// Searchable snapshot of the catalog and its theory pages.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    items: Vec<Item>,
    complete: bool,
}

impl SearchIndex {
    /// Index every catalog title and every concept of every theory page.
    ///
    /// Theory pages that cannot be fetched are skipped. A missing page is
    /// final; any other failure leaves the index incomplete.
    pub async fn build(catalog: &Catalog, renderer: &ContentRenderer) -> Self {
        let mut complete = true;
        let mut items: Vec<Item> = catalog
            .entries
            .iter()
            .map(|entry| {
                Item::new(
                    HitKind::Page,
                    &entry.title,
                    entry.route.clone(),
                    &entry.title,
                    String::new(),
                )
            })
            .collect();

        for (entry, topic, path) in catalog.theory_pages() {
            match renderer.concept_texts(path, &topic).await {
                Ok(texts) => items.extend(texts.into_iter().map(|t| {
                    Item::new(
                        HitKind::Concept,
                        &t.concept.title,
                        deep_link(&entry.route, &t.concept.anchor),
                        &entry.title,
                        t.text,
                    )
                })),
                Err(RenderError::Fetch(FetchError::NotFound(_))) => {
                    debug!(path, "theory page missing, not indexed");
                }
                Err(err) => {
                    warn!(path, error = %err, "skipping page in search index");
                    complete = false;
                }
            }
        }

        debug!(items = items.len(), complete, "search index built");
        Self { items, complete }
    }

    /// Whether every existing theory page made it into the index.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Title matches first, then body matches, each in index order.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let needle = query.trim().to_lowercase();
        if needle.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }

        let title_hits = self
            .items
            .iter()
            .filter(|item| item.title_lower.contains(&needle));
        let body_hits = self.items.iter().filter(|item| {
            !item.title_lower.contains(&needle) && item.text_lower.contains(&needle)
        });

        title_hits
            .chain(body_hits)
            .take(MAX_HITS)
            .map(|item| SearchHit {
                kind: item.kind,
                title: item.title.clone(),
                link: item.link.clone(),
                page_title: item.page_title.clone(),
                snippet: snippet(&item.text, &item.text_lower, &needle),
            })
            .collect()
    }
}

fn snippet(text: &str, lower: &str, needle: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    // Lowercasing can change byte lengths; fall back to the start of the text.
    let at = if lower.len() == text.len() {
        lower.find(needle).unwrap_or(0)
    } else {
        0
    };
    let start = floor_boundary(text, at.saturating_sub(SNIPPET_RADIUS));
    let end = floor_boundary(text, (at + needle.len() + SNIPPET_RADIUS).min(text.len()));

    let mut out = String::new();
    if start > 0 {
        out.push('…');
    }
    out.push_str(text[start..end].trim());
    if end < text.len() {
        out.push('…');
    }
    Some(out.replace('\n', " "))
}

fn floor_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::content::{ContentSource, StaticSource};
    use crate::i18n::I18n;

    const JAVA: &str = "# Java\n\n## Fogalmak\n\n### Garbage Collector\nA JVM felszabadítja a memóriát.\n\n### Generics\nTípusparaméterek.\n";

    fn catalog() -> Catalog {
        Catalog {
            home: "#/theory/java".into(),
            entries: vec![
                CatalogEntry {
                    route: "#/theory/java".into(),
                    title: "Java Alapok".into(),
                    label: None,
                    path: Some("theory/java.md".into()),
                },
                CatalogEntry {
                    route: "#/theory/sql".into(),
                    title: "SQL & Adatbázis".into(),
                    label: None,
                    path: Some("theory/sql.md".into()),
                },
            ],
        }
    }

    async fn index() -> SearchIndex {
        let source = StaticSource::new().with_file("theory/java.md", JAVA);
        let renderer = ContentRenderer::new(Arc::new(source), I18n::default());
        SearchIndex::build(&catalog(), &renderer).await
    }

    /// Fails the first read with an I/O error, then serves `inner`.
    struct FlakySource {
        inner: StaticSource,
        failed: AtomicBool,
    }

    #[async_trait]
    impl ContentSource for FlakySource {
        async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
            if !self.failed.swap(true, Ordering::SeqCst) {
                return Err(FetchError::Io {
                    path: path.to_string(),
                    source: std::io::Error::other("connection reset"),
                });
            }
            self.inner.fetch_text(path).await
        }

        fn describe(&self) -> String {
            "flaky".to_string()
        }
    }

    #[tokio::test]
    async fn transient_failures_leave_the_index_incomplete() {
        let source = FlakySource {
            inner: StaticSource::new().with_file("theory/java.md", JAVA),
            failed: AtomicBool::new(false),
        };
        let renderer = ContentRenderer::new(Arc::new(source), I18n::default());

        let first = SearchIndex::build(&catalog(), &renderer).await;
        assert!(!first.is_complete());
        assert!(first.search("generics").is_empty());

        let second = SearchIndex::build(&catalog(), &renderer).await;
        assert!(second.is_complete());
        assert_eq!(second.search("generics").len(), 1);
    }

    #[tokio::test]
    async fn concepts_link_to_their_anchor() {
        let index = index().await;
        let hits = index.search("GENERICS");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, HitKind::Concept);
        assert_eq!(hits[0].link, "#/theory/java#generics");
        assert_eq!(hits[0].page_title, "Java Alapok");
    }

    #[tokio::test]
    async fn title_hits_rank_before_body_hits() {
        let index = index().await;
        let hits = index.search("jvm");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Garbage Collector");
        assert!(hits[0].snippet.as_deref().unwrap().contains("JVM"));

        let hits = index.search("java");
        assert_eq!(hits[0].kind, HitKind::Page);
    }

    #[test]
    fn search_link_round_trips_through_route_parsing() {
        let link = search_link(" spring boot ");
        let parsed = prep_core::route::RouteHash::parse(&link);
        assert_eq!(parsed.base(), "#/search");
        assert_eq!(parsed.query_param("q").as_deref(), Some("spring boot"));
    }

    #[tokio::test]
    async fn unreachable_pages_are_skipped_and_short_queries_ignored() {
        let index = index().await;
        // two page titles plus two concepts of the java page
        assert_eq!(index.len(), 4);
        assert!(index.is_complete());
        assert!(index.search("a").is_empty());
        assert!(index.search("   ").is_empty());
    }
}
