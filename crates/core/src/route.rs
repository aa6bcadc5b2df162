//! Hash-fragment routes.
//!
//! A raw hash such as `#/theory/java#generics` carries three parts: the base
//! route used for dispatch (`#/theory/java`), an optional deep-link anchor
//! (`generics`) and an optional query string (`#/search?q=jvm`).

use std::fmt;

use thiserror::Error;

/// Base route rendered when the hash is empty.
pub const ROOT_ROUTE: &str = "#/";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RouteError {
    #[error("route must start with \"#/\": {0}")]
    MissingPrefix(String),
    #[error("route must not carry an anchor or query: {0}")]
    NotABaseRoute(String),
}

/// A validated base route key, e.g. `#/quiz/sql`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteKey(String);

impl RouteKey {
    /// Validate a base route used as a route-table key.
    ///
    /// # Errors
    ///
    /// Returns `RouteError` if the key does not start with `#/` or still
    /// carries an anchor or query suffix.
    pub fn new(raw: impl Into<String>) -> Result<Self, RouteError> {
        let raw = raw.into();
        if !raw.starts_with("#/") {
            return Err(RouteError::MissingPrefix(raw));
        }
        if raw[1..].contains(['#', '?']) {
            return Err(RouteError::NotABaseRoute(raw));
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A parsed hash fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteHash {
    base: String,
    anchor: Option<String>,
    query: Option<String>,
}

impl RouteHash {
    /// Split a raw hash into base route, anchor and query.
    ///
    /// Never fails: anything that is not a recognizable route still yields a
    /// base string, which simply will not match a route-table entry.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let without_hash = trimmed.strip_prefix('#').unwrap_or(trimmed);

        let (path_part, anchor) = match without_hash.split_once('#') {
            Some((path, anchor)) => (path, non_empty(anchor)),
            None => (without_hash, None),
        };
        let (path, query) = match path_part.split_once('?') {
            Some((path, query)) => (path, non_empty(query)),
            None => (path_part, None),
        };

        let mut path = path.trim().to_string();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        while path.len() > 1 && path.ends_with('/') {
            path.pop();
        }

        Self {
            base: format!("#{path}"),
            anchor,
            query,
        }
    }

    /// The base route used for dispatch.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Deep-link anchor following a second `#`.
    #[must_use]
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// True for `""`, `"#"` and `"#/"`.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.base == ROOT_ROUTE
    }

    /// Look up a decoded query parameter (`?q=hello%20world`).
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Replace the base route, keeping anchor and query.
    #[must_use]
    pub fn with_base(mut self, base: &str) -> Self {
        base.clone_into(&mut self.base);
        self
    }

    /// Classify the base route by its path shape.
    #[must_use]
    pub fn kind(&self) -> RouteKind {
        RouteKind::classify(&self.base)
    }
}

impl fmt::Display for RouteHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(anchor) = &self.anchor {
            write!(f, "#{anchor}")?;
        }
        Ok(())
    }
}

/// Build a deep link to a concept inside a theory page.
#[must_use]
pub fn deep_link(base: &str, anchor: &str) -> String {
    format!("{base}#{anchor}")
}

/// Shape of a base route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    Theory { topic: String },
    Exercises { topic: String, id: Option<String> },
    Quiz { topic: String },
    Checklist { id: String },
    Roadmap,
    Search,
    Favorites,
    Progress,
    Root,
    Other,
}

impl RouteKind {
    #[must_use]
    pub fn classify(base: &str) -> Self {
        let path = base.strip_prefix('#').unwrap_or(base);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::Root,
            ["theory", topic] => Self::Theory {
                topic: (*topic).to_string(),
            },
            ["exercises", topic] => Self::Exercises {
                topic: (*topic).to_string(),
                id: None,
            },
            ["exercises", topic, id] => Self::Exercises {
                topic: (*topic).to_string(),
                id: Some((*id).to_string()),
            },
            ["quiz", topic] => Self::Quiz {
                topic: (*topic).to_string(),
            },
            ["checklists", id] => Self::Checklist {
                id: (*id).to_string(),
            },
            ["roadmap"] => Self::Roadmap,
            ["search"] => Self::Search,
            ["favorites"] => Self::Favorites,
            ["progress"] => Self::Progress,
            _ => Self::Other,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_link_is_split_from_base_route() {
        let hash = RouteHash::parse("#/theory/java#generics");
        assert_eq!(hash.base(), "#/theory/java");
        assert_eq!(hash.anchor(), Some("generics"));
        assert_eq!(hash.to_string(), "#/theory/java#generics");
    }

    #[test]
    fn empty_and_bare_hashes_are_root() {
        for raw in ["", "#", "#/", "  #/  "] {
            assert!(RouteHash::parse(raw).is_root(), "{raw:?} should be root");
        }
    }

    #[test]
    fn trailing_slash_is_dropped() {
        assert_eq!(RouteHash::parse("#/roadmap/").base(), "#/roadmap");
    }

    #[test]
    fn query_parameters_are_decoded() {
        let hash = RouteHash::parse("#/search?q=spring%20boot");
        assert_eq!(hash.base(), "#/search");
        assert_eq!(hash.query_param("q").as_deref(), Some("spring boot"));
        assert_eq!(hash.query_param("missing"), None);
    }

    #[test]
    fn route_kinds_follow_path_shape() {
        assert_eq!(
            RouteKind::classify("#/exercises/sql/02-joins"),
            RouteKind::Exercises {
                topic: "sql".into(),
                id: Some("02-joins".into())
            }
        );
        assert_eq!(RouteKind::classify("#/favorites"), RouteKind::Favorites);
        assert_eq!(RouteKind::classify("#/not-a-real-route"), RouteKind::Other);
    }

    #[test]
    fn route_keys_reject_suffixes() {
        assert!(RouteKey::new("#/quiz/sql").is_ok());
        assert!(matches!(
            RouteKey::new("/quiz/sql"),
            Err(RouteError::MissingPrefix(_))
        ));
        assert!(matches!(
            RouteKey::new("#/theory/java#x"),
            Err(RouteError::NotABaseRoute(_))
        ));
    }
}
