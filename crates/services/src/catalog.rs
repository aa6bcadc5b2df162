//! Route catalog: which pages exist, where their content lives and what they
//! are called.
//!
//! The built-in catalog mirrors the bundled documentation tree. A
//! `catalog.json` file at the content root replaces it wholesale:
//!
//! ```json
//! {
//!   "home": "#/theory/java",
//!   "entries": [
//!     { "route": "#/theory/java", "title": "Java Alapok", "path": "theory/java.md" },
//!     { "route": "#/quiz/java", "title": "Java Teszt", "label": "Java & Spring Teszt",
//!       "path": "data/quizzes/java.json" }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use prep_core::route::{RouteKey, RouteKind};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

pub const CATALOG_FILE: &str = "catalog.json";
pub const ROADMAP_FILE: &str = "data/roadmap.json";
pub const DEFAULT_HOME: &str = "#/theory/java";

/// One routable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub route: String,
    /// Page title, also used for the document title.
    pub title: String,
    /// Navigation label when it differs from the page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Content path relative to the content root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl CatalogEntry {
    fn new(route: &str, title: &str, path: Option<&str>) -> Self {
        Self {
            route: route.to_string(),
            title: title.to_string(),
            label: None,
            path: path.map(str::to_string),
        }
    }

    fn labelled(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    #[must_use]
    pub fn nav_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.title)
    }

    #[must_use]
    pub fn kind(&self) -> RouteKind {
        RouteKind::classify(&self.route)
    }
}

/// What the router does when an entry matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction {
    Markdown { path: String },
    Theory { path: String, topic: String },
    Quiz { path: String },
    Roadmap,
    Search,
    Favorites,
    Progress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub title: String,
    pub action: RouteAction,
}

/// Exact-match lookup from base route to entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    entries: BTreeMap<RouteKey, RouteEntry>,
}

impl RouteTable {
    #[must_use]
    pub fn get(&self, base: &str) -> Option<&RouteEntry> {
        let key = RouteKey::new(base).ok()?;
        self.entries.get(&key)
    }

    #[must_use]
    pub fn contains(&self, base: &str) -> bool {
        self.get(base).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RouteKey, &RouteEntry)> {
        self.entries.iter()
    }
}

/// Navigation section an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Theory,
    Exercises,
    Quiz,
    Checklists,
    Tools,
}

impl Section {
    #[must_use]
    pub fn of(kind: &RouteKind) -> Self {
        match kind {
            RouteKind::Theory { .. } => Self::Theory,
            RouteKind::Exercises { .. } => Self::Exercises,
            RouteKind::Quiz { .. } => Self::Quiz,
            RouteKind::Checklist { .. } => Self::Checklists,
            _ => Self::Tools,
        }
    }

    /// Translation key of the section heading.
    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Theory => "nav.theory",
            Self::Exercises => "nav.exercises",
            Self::Quiz => "nav.quiz",
            Self::Checklists => "nav.checklists",
            Self::Tools => "nav.tools",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_home")]
    pub home: String,
    pub entries: Vec<CatalogEntry>,
}

fn default_home() -> String {
    DEFAULT_HOME.to_string()
}

impl Default for Catalog {
    fn default() -> Self {
        let e = CatalogEntry::new;
        let entries = vec![
            e("#/theory/java", "Java Alapok", Some("theory/java.md")),
            e("#/theory/spring", "Spring Framework", Some("theory/spring.md")),
            e("#/theory/testing", "Tesztelés", Some("theory/testing.md")),
            e("#/theory/sql", "SQL & Adatbázis", Some("theory/sql.md")),
            e("#/theory/web", "Web Development", Some("theory/web.md")),
            e("#/theory/arch", "Architektúra", Some("theory/arch.md")),
            e("#/theory/git", "Git & Verziókezelés", Some("theory/git.md")),
            e("#/theory/softskills", "Soft Skills", Some("theory/softskills.md")),
            e(
                "#/exercises/java",
                "Java Gyakorlatok",
                Some("exercises/java/01-oop-basics.md"),
            ),
            e(
                "#/exercises/sql",
                "SQL Gyakorlatok",
                Some("exercises/sql/01-joins.md"),
            ),
            e(
                "#/exercises/web",
                "Web Gyakorlatok",
                Some("exercises/web/01-es6-basics.md"),
            ),
            e(
                "#/exercises/arch",
                "Architektúra Gyakorlatok",
                Some("exercises/arch/01-rest-vs-grpc.md"),
            ),
            e("#/quiz/java", "Java Teszt", Some("data/quizzes/java.json"))
                .labelled("Java & Spring Teszt"),
            e("#/quiz/sql", "SQL Teszt", Some("data/quizzes/sql.json")),
            e("#/quiz/web", "Web Teszt", Some("data/quizzes/web.json"))
                .labelled("Web Development Teszt"),
            e("#/quiz/arch", "Architektúra Teszt", Some("data/quizzes/arch.json")),
            e(
                "#/checklists/interview",
                "Interjú Kérdések",
                Some("checklists/interview.md"),
            ),
            e(
                "#/checklists/project-setup",
                "Projekt Setup",
                Some("checklists/project-setup.md"),
            ),
            e(
                "#/checklists/db-cheatsheet",
                "SQL Cheatsheet",
                Some("checklists/db-cheatsheet.md"),
            ),
            e("#/roadmap", "Tanulási Roadmap", None),
            e("#/search", "Keresés", None),
            e("#/favorites", "Kedvencek", None),
            e("#/progress", "Haladás", None),
        ];
        Self {
            home: default_home(),
            entries,
        }
    }
}

impl Catalog {
    /// Parse a `catalog.json` document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Format` for malformed JSON.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(raw)?)
    }

    #[must_use]
    pub fn entry(&self, route: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.route == route)
    }

    /// Theory entries with their topic and content path.
    pub fn theory_pages(&self) -> impl Iterator<Item = (&CatalogEntry, String, &str)> {
        self.entries.iter().filter_map(|entry| match entry.kind() {
            RouteKind::Theory { topic } => entry.path.as_deref().map(|path| (entry, topic, path)),
            _ => None,
        })
    }

    /// Entries grouped by navigation section, in catalog order.
    #[must_use]
    pub fn sections(&self) -> Vec<(Section, Vec<&CatalogEntry>)> {
        let mut grouped: BTreeMap<Section, Vec<&CatalogEntry>> = BTreeMap::new();
        for entry in &self.entries {
            grouped.entry(Section::of(&entry.kind())).or_default().push(entry);
        }
        grouped.into_iter().collect()
    }

    /// Build the dispatch table.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` when a route is malformed, registered twice,
    /// has an unsupported shape, or lacks the content path its kind needs.
    pub fn route_table(&self) -> Result<RouteTable, CatalogError> {
        let mut table = RouteTable::default();
        for entry in &self.entries {
            let key = RouteKey::new(entry.route.as_str())?;
            let action = action_for(entry)?;
            let routed = RouteEntry {
                title: entry.title.clone(),
                action,
            };
            if table.entries.insert(key, routed).is_some() {
                return Err(CatalogError::Duplicate(entry.route.clone()));
            }
        }
        if !table.contains(&self.home) {
            return Err(CatalogError::UnknownHome(self.home.clone()));
        }
        Ok(table)
    }
}

fn action_for(entry: &CatalogEntry) -> Result<RouteAction, CatalogError> {
    let path = || {
        entry
            .path
            .clone()
            .ok_or_else(|| CatalogError::MissingPath(entry.route.clone()))
    };
    let action = match entry.kind() {
        RouteKind::Theory { topic } => RouteAction::Theory {
            path: path()?,
            topic,
        },
        RouteKind::Exercises { .. } | RouteKind::Checklist { .. } => {
            RouteAction::Markdown { path: path()? }
        }
        RouteKind::Quiz { .. } => RouteAction::Quiz { path: path()? },
        RouteKind::Roadmap => RouteAction::Roadmap,
        RouteKind::Search => RouteAction::Search,
        RouteKind::Favorites => RouteAction::Favorites,
        RouteKind::Progress => RouteAction::Progress,
        RouteKind::Root | RouteKind::Other => {
            return Err(CatalogError::Unsupported(entry.route.clone()));
        }
    };
    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_builds_a_table() {
        let table = Catalog::default().route_table().unwrap();
        assert_eq!(table.len(), 23);
        assert_eq!(
            table.get("#/theory/java").unwrap().action,
            RouteAction::Theory {
                path: "theory/java.md".into(),
                topic: "java".into()
            }
        );
        assert_eq!(table.get("#/quiz/java").unwrap().title, "Java Teszt");
        assert!(table.get("#/theory/java#generics").is_none());
    }

    #[test]
    fn exercise_ids_are_registered_explicitly() {
        let raw = r##"{"entries":[
            {"route":"#/theory/java","title":"Java","path":"theory/java.md"},
            {"route":"#/exercises/sql/02-subqueries","title":"Subqueries",
             "path":"exercises/sql/02-subqueries.md"}
        ]}"##;
        let catalog = Catalog::from_json(raw).unwrap();
        assert_eq!(catalog.home, DEFAULT_HOME);
        let table = catalog.route_table().unwrap();
        assert!(matches!(
            table.get("#/exercises/sql/02-subqueries").unwrap().action,
            RouteAction::Markdown { .. }
        ));
    }

    #[test]
    fn content_routes_need_a_path() {
        let raw = r##"{"home":"#/roadmap","entries":[
            {"route":"#/roadmap","title":"Roadmap"},
            {"route":"#/quiz/sql","title":"SQL"}
        ]}"##;
        let err = Catalog::from_json(raw).unwrap().route_table().unwrap_err();
        assert!(matches!(err, CatalogError::MissingPath(route) if route == "#/quiz/sql"));
    }

    #[test]
    fn duplicates_and_unknown_home_are_rejected() {
        let mut catalog = Catalog::default();
        catalog.entries.push(catalog.entries[0].clone());
        assert!(matches!(
            catalog.route_table(),
            Err(CatalogError::Duplicate(_))
        ));

        let catalog = Catalog {
            home: "#/nowhere".into(),
            ..Catalog::default()
        };
        assert!(matches!(
            catalog.route_table(),
            Err(CatalogError::UnknownHome(_))
        ));
    }

    #[test]
    fn sections_keep_catalog_order() {
        let catalog = Catalog::default();
        let sections = catalog.sections();
        assert_eq!(sections[0].0, Section::Theory);
        assert_eq!(sections[0].1[0].route, "#/theory/java");
        let quiz = sections.iter().find(|(s, _)| *s == Section::Quiz).unwrap();
        assert_eq!(quiz.1[0].nav_label(), "Java & Spring Teszt");
    }
}
