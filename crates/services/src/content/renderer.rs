use std::sync::Arc;

use prep_core::model::{
    Concept, ConceptDocument, Difficulty, FrontMatter, extract_concepts, split_front_matter,
};
use prep_core::route::deep_link;
use tracing::debug;

use super::markdown::{markdown_to_html, markdown_to_text};
use super::source::ContentSource;
use crate::error::RenderError;
use crate::i18n::I18n;

/// Difficulty badge shown in a page header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyBadge {
    /// Raw front-matter value, used as a CSS modifier.
    pub key: String,
    pub label: String,
}

/// External playground link from the `starter` front-matter map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarterLink {
    pub provider: String,
    pub label: String,
    pub url: String,
}

/// Display metadata derived from front-matter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageHeader {
    pub title: String,
    pub difficulty: Option<DifficultyBadge>,
    pub estimated_minutes: Option<u32>,
    pub goals: Vec<String>,
    pub starter: Vec<StarterLink>,
}

impl PageHeader {
    fn build(title: &str, fm: &FrontMatter, i18n: I18n) -> Self {
        let difficulty = fm.difficulty.as_ref().map(|raw| DifficultyBadge {
            key: raw.clone(),
            label: Difficulty::from_key(raw).map_or_else(
                || raw.clone(),
                |d| i18n.t(difficulty_key(d)).to_string(),
            ),
        });

        let starter = fm
            .starter
            .iter()
            .filter(|(_, url)| !url.trim().is_empty())
            .map(|(provider, url)| StarterLink {
                provider: provider.clone(),
                label: starter_label(provider),
                url: url.clone(),
            })
            .collect();

        Self {
            title: fm.title.clone().unwrap_or_else(|| title.to_string()),
            difficulty,
            estimated_minutes: fm.estimated_minutes,
            goals: fm.goals.clone(),
            starter,
        }
    }
}

fn difficulty_key(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Beginner => "difficulty.beginner",
        Difficulty::Intermediate => "difficulty.intermediate",
        Difficulty::Advanced => "difficulty.advanced",
    }
}

fn starter_label(provider: &str) -> String {
    match provider {
        "stackblitz" => "⚡ StackBlitz".to_string(),
        "codesandbox" => "📦 CodeSandbox".to_string(),
        "dbfiddle" => "🗄️ DB Fiddle".to_string(),
        other => other.to_string(),
    }
}

/// A plain markdown page (exercise, checklist).
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub title: String,
    pub front_matter: FrontMatter,
    pub header: PageHeader,
    pub html: String,
}

/// One concept rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptArticle {
    pub concept: Concept,
    pub html: String,
    /// `#/theory/<topic>#<anchor>`.
    pub deep_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub anchor: String,
    pub title: String,
}

/// A theory page partitioned into concepts.
#[derive(Debug, Clone, PartialEq)]
pub struct TheoryPage {
    pub title: String,
    pub route: String,
    pub summary: Option<String>,
    pub header: PageHeader,
    pub intro_html: String,
    pub concepts: Vec<ConceptArticle>,
    pub toc: Vec<TocEntry>,
    pub trailing_html: String,
}

impl TheoryPage {
    #[must_use]
    pub fn position(&self, anchor: &str) -> Option<usize> {
        self.concepts
            .iter()
            .position(|c| c.concept.anchor == anchor)
    }
}

/// Searchable text of one concept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptText {
    pub concept: Concept,
    pub text: String,
}

/// Fetches markdown and turns it into display-ready pages.
#[derive(Clone)]
pub struct ContentRenderer {
    source: Arc<dyn ContentSource>,
    i18n: I18n,
}

impl ContentRenderer {
    #[must_use]
    pub fn new(source: Arc<dyn ContentSource>, i18n: I18n) -> Self {
        Self { source, i18n }
    }

    #[must_use]
    pub fn source(&self) -> Arc<dyn ContentSource> {
        Arc::clone(&self.source)
    }

    /// Render a whole markdown document.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Fetch` if the document cannot be fetched.
    pub async fn render(&self, path: &str, title: &str) -> Result<RenderedPage, RenderError> {
        let markdown = self.source.fetch_text(path).await?;
        let (front_matter, body) = split_front_matter(&markdown);
        debug!(path, front_matter = !front_matter.is_empty(), "rendering page");

        let header = PageHeader::build(title, &front_matter, self.i18n);
        Ok(RenderedPage {
            title: header.title.clone(),
            html: markdown_to_html(body),
            header,
            front_matter,
        })
    }

    /// Render a theory document as individually addressable concepts.
    ///
    /// `route` is the page's base route, used to build concept deep links.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Fetch` if the document cannot be fetched.
    pub async fn render_theory(
        &self,
        path: &str,
        title: &str,
        topic: &str,
        route: &str,
    ) -> Result<TheoryPage, RenderError> {
        let markdown = self.source.fetch_text(path).await?;
        let (front_matter, body) = split_front_matter(&markdown);
        let doc = extract_concepts(body, topic);
        debug!(path, concepts = doc.concepts.len(), "rendering theory page");

        let display_title = doc
            .main_title
            .clone()
            .or_else(|| front_matter.title.clone())
            .unwrap_or_else(|| title.to_string());
        let mut header = PageHeader::build(title, &front_matter, self.i18n);
        header.title.clone_from(&display_title);

        let ConceptDocument {
            intro,
            concepts,
            trailing,
            ..
        } = doc;

        let toc = concepts
            .iter()
            .map(|c| TocEntry {
                anchor: c.anchor.clone(),
                title: c.title.clone(),
            })
            .collect();
        let concepts = concepts
            .into_iter()
            .map(|concept| ConceptArticle {
                html: markdown_to_html(&concept.content),
                deep_link: deep_link(route, &concept.anchor),
                concept,
            })
            .collect();

        Ok(TheoryPage {
            title: display_title,
            route: route.to_string(),
            summary: front_matter.summary.clone(),
            header,
            intro_html: markdown_to_html(&intro),
            concepts,
            toc,
            trailing_html: markdown_to_html(&trailing),
        })
    }

    /// Concepts of a theory document as plain text, for search.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Fetch` if the document cannot be fetched.
    pub async fn concept_texts(
        &self,
        path: &str,
        topic: &str,
    ) -> Result<Vec<ConceptText>, RenderError> {
        let markdown = self.source.fetch_text(path).await?;
        let (_, body) = split_front_matter(&markdown);
        Ok(extract_concepts(body, topic)
            .concepts
            .into_iter()
            .map(|concept| ConceptText {
                text: markdown_to_text(&concept.content),
                concept,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::source::StaticSource;
    use crate::error::FetchError;
    use crate::i18n::Language;

    const JAVA: &str = "---
title: Java Alapok
difficulty: beginner
estimatedMinutes: 45
goals: [OOP, Collections]
summary: JVM és típusok
starter:
  stackblitz: https://stackblitz.com/x
---
# Java

Bevezető.

## Fogalmak

### JVM
A **virtuális** gép.

### JVM
Második.
";

    fn renderer() -> ContentRenderer {
        let source = StaticSource::new().with_file("theory/java.md", JAVA);
        ContentRenderer::new(Arc::new(source), I18n::new(Language::Hu))
    }

    #[tokio::test]
    async fn page_header_comes_from_front_matter() {
        let page = renderer().render("./theory/java.md", "Fallback").await.unwrap();
        assert_eq!(page.title, "Java Alapok");
        let badge = page.header.difficulty.unwrap();
        assert_eq!(badge.key, "beginner");
        assert_eq!(badge.label, "Kezdő");
        assert_eq!(page.header.estimated_minutes, Some(45));
        assert_eq!(page.header.goals, vec!["OOP", "Collections"]);
        assert_eq!(page.header.starter[0].label, "⚡ StackBlitz");
        assert!(page.html.contains("<h1>Java</h1>"));
        assert!(!page.html.contains("estimatedMinutes"));
    }

    #[tokio::test]
    async fn theory_page_splits_concepts_with_deep_links() {
        let page = renderer()
            .render_theory("theory/java.md", "Java", "java", "#/theory/java")
            .await
            .unwrap();
        assert_eq!(page.title, "Java");
        assert_eq!(page.summary.as_deref(), Some("JVM és típusok"));
        assert_eq!(page.concepts.len(), 2);
        assert_eq!(page.concepts[1].concept.anchor, "jvm-2");
        assert_eq!(page.concepts[1].deep_link, "#/theory/java#jvm-2");
        assert!(page.concepts[0].html.contains("<strong>virtuális</strong>"));
        assert_eq!(page.toc[0].title, "JVM");
        assert!(page.intro_html.contains("Bevezető."));
        assert_eq!(page.position("jvm-2"), Some(1));
    }

    #[tokio::test]
    async fn theory_title_prefers_heading_then_front_matter_then_catalog() {
        let source = StaticSource::new()
            .with_file("theory/a.md", "---\ntitle: Front\n---\n# Heading\n")
            .with_file("theory/b.md", "---\ntitle: Front\n---\nNo heading.\n")
            .with_file("theory/c.md", "No heading.\n");
        let renderer = ContentRenderer::new(Arc::new(source), I18n::new(Language::Hu));

        for (path, expected) in [
            ("theory/a.md", "Heading"),
            ("theory/b.md", "Front"),
            ("theory/c.md", "Catalog"),
        ] {
            let page = renderer
                .render_theory(path, "Catalog", "x", "#/theory/x")
                .await
                .unwrap();
            assert_eq!(page.title, expected, "for {path}");
        }
    }

    #[tokio::test]
    async fn missing_document_is_a_fetch_error() {
        let err = renderer().render("theory/sql.md", "SQL").await.unwrap_err();
        assert!(matches!(err, RenderError::Fetch(FetchError::NotFound(_))));
    }

    #[tokio::test]
    async fn concept_texts_are_plain() {
        let texts = renderer().concept_texts("theory/java.md", "java").await.unwrap();
        assert_eq!(texts[0].text, "A virtuális gép.");
    }
}
