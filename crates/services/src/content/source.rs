use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::FetchError;
use crate::i18n::Language;

/// Where markdown, quiz and roadmap files are read from.
///
/// Paths are relative to the content root (`theory/java.md`); a leading
/// `./` or `/` is ignored.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch a text document.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the document is missing or cannot be read.
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;

    /// Human-readable location of the root, for logs.
    fn describe(&self) -> String;
}

/// Normalize a content path and reject anything that could leave the root.
///
/// # Errors
///
/// Returns `FetchError::InvalidPath` for empty paths, parent segments (plain
/// or percent-encoded), backslashes, and anything carrying a scheme.
pub fn normalize_path(path: &str) -> Result<String, FetchError> {
    let trimmed = path.trim();
    let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
    let trimmed = trimmed.trim_start_matches('/');
    if trimmed.is_empty()
        || trimmed.contains(':')
        || trimmed.contains('\\')
        || trimmed.split('/').any(is_parent_segment)
    {
        return Err(FetchError::InvalidPath(path.to_string()));
    }
    Ok(trimmed.to_string())
}

fn is_parent_segment(segment: &str) -> bool {
    segment.to_ascii_lowercase().replace("%2e", ".") == ".."
}

/// Content in a directory on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ContentSource for DirSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let relative = normalize_path(path)?;
        let full = self.root.join(&relative);
        debug!(path = %full.display(), "reading content file");
        tokio::fs::read_to_string(&full).await.map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                FetchError::NotFound(relative)
            } else {
                FetchError::Io {
                    path: relative,
                    source,
                }
            }
        })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Content served over HTTP(S) below a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    /// # Errors
    ///
    /// Returns `url::ParseError` if `base` is not an absolute URL.
    pub fn new(base: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            client: Client::new(),
            base,
        })
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let relative = normalize_path(path)?;
        let url = self
            .base
            .join(&relative)
            .map_err(|_| FetchError::InvalidPath(relative.clone()))?;
        debug!(%url, "fetching content");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(relative));
        }
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                path: relative,
                status,
            });
        }
        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

/// Serves the translated copy of each document for one language.
///
/// A document without a translation falls back to the base document.
#[derive(Clone)]
pub struct LocalizedSource {
    inner: Arc<dyn ContentSource>,
    language: Language,
}

impl LocalizedSource {
    #[must_use]
    pub fn new(inner: Arc<dyn ContentSource>, language: Language) -> Self {
        Self { inner, language }
    }
}

#[async_trait]
impl ContentSource for LocalizedSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let localized = self.language.localized_path(path);
        if localized == path {
            return self.inner.fetch_text(path).await;
        }
        match self.inner.fetch_text(&localized).await {
            Err(FetchError::NotFound(_)) => {
                debug!(path, language = %self.language, "no translation, using base document");
                self.inner.fetch_text(path).await
            }
            other => other,
        }
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.inner.describe(), self.language)
    }
}

/// Fixed in-memory documents, used by tests and the bundled fallback.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    files: HashMap<String, String>,
}

impl StaticSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: &str, contents: impl Into<String>) -> Self {
        let key = normalize_path(path).unwrap_or_else(|_| path.to_string());
        self.files.insert(key, contents.into());
        self
    }
}

#[async_trait]
impl ContentSource for StaticSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let relative = normalize_path(path)?;
        self.files
            .get(&relative)
            .cloned()
            .ok_or(FetchError::NotFound(relative))
    }

    fn describe(&self) -> String {
        format!("{} static files", self.files.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_normalized() {
        assert_eq!(normalize_path("./theory/java.md").unwrap(), "theory/java.md");
        assert_eq!(normalize_path("/data/roadmap.json").unwrap(), "data/roadmap.json");
        assert!(matches!(
            normalize_path("../secrets.txt"),
            Err(FetchError::InvalidPath(_))
        ));
        assert!(normalize_path("  ").is_err());
    }

    #[test]
    fn paths_cannot_escape_the_root() {
        for path in [
            "theory/../../etc/passwd",
            "theory/%2e%2e/secret.md",
            "%2E%2E/secret.md",
            "theory/.%2e/secret.md",
            "https://evil.example/x.md",
            "file:///etc/passwd",
            "theory\\..\\secret.md",
        ] {
            assert!(
                matches!(normalize_path(path), Err(FetchError::InvalidPath(_))),
                "accepted {path}"
            );
        }
        assert_eq!(normalize_path("theory/..hidden.md").unwrap(), "theory/..hidden.md");
    }

    #[test]
    fn http_source_stays_below_its_base() {
        let base = Url::parse("https://example.com/docs/").unwrap();
        let relative = normalize_path("./theory/java.md").unwrap();
        assert_eq!(
            base.join(&relative).unwrap().as_str(),
            "https://example.com/docs/theory/java.md"
        );
        let relative = normalize_path("//evil.example/x.md").unwrap();
        assert_eq!(
            base.join(&relative).unwrap().as_str(),
            "https://example.com/docs/evil.example/x.md"
        );
    }

    #[tokio::test]
    async fn static_source_serves_registered_files() {
        let source = StaticSource::new().with_file("./theory/java.md", "# Java");
        assert_eq!(source.fetch_text("theory/java.md").await.unwrap(), "# Java");
        assert!(matches!(
            source.fetch_text("theory/sql.md").await,
            Err(FetchError::NotFound(path)) if path == "theory/sql.md"
        ));
    }

    #[tokio::test]
    async fn dir_source_reports_missing_files_as_not_found() {
        let source = DirSource::new(std::env::temp_dir().join("prep-missing-content-root"));
        assert!(matches!(
            source.fetch_text("theory/java.md").await,
            Err(FetchError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn localized_source_prefers_translations() {
        let base = StaticSource::new()
            .with_file("theory/java.md", "# Java Alapok")
            .with_file("theory/en/java.md", "# Java Basics")
            .with_file("data/roadmap.json", "{}");
        let en = LocalizedSource::new(Arc::new(base.clone()), Language::En);
        assert_eq!(en.fetch_text("./theory/java.md").await.unwrap(), "# Java Basics");
        assert_eq!(en.fetch_text("data/roadmap.json").await.unwrap(), "{}");
        assert!(matches!(
            en.fetch_text("theory/sql.md").await,
            Err(FetchError::NotFound(path)) if path == "theory/sql.md"
        ));

        let hu = LocalizedSource::new(Arc::new(base), Language::Hu);
        assert_eq!(hu.fetch_text("theory/java.md").await.unwrap(), "# Java Alapok");
    }

    #[test]
    fn http_base_gets_trailing_slash() {
        let source = HttpSource::new("https://example.com/docs").unwrap();
        assert_eq!(source.describe(), "https://example.com/docs/");
    }
}
