//! Markdown content: sources, conversion and page assembly.

pub mod markdown;
pub mod renderer;
pub mod source;

pub use markdown::{markdown_to_html, markdown_to_text, sanitize_html};
pub use renderer::{
    ConceptArticle, ConceptText, ContentRenderer, DifficultyBadge, PageHeader, RenderedPage,
    StarterLink, TheoryPage, TocEntry,
};
pub use source::{ContentSource, DirSource, HttpSource, LocalizedSource, StaticSource};
