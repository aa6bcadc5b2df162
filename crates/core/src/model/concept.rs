use serde::{Deserialize, Serialize};

use crate::slug::{AnchorSet, slugify, split_explicit_anchor};

/// Level-2 headings that open the concept section (compared case-insensitively).
pub const CONCEPT_SECTION_HEADINGS: [&str; 2] = ["concepts", "fogalmak"];

/// A named subsection of a theory document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub id: String,
    pub title: String,
    pub anchor: String,
    pub topic: String,
    /// Markdown below the heading, up to the next concept boundary.
    pub content: String,
}

/// Composite identifier used for favorites: `<topic>#<anchor>`.
#[must_use]
pub fn concept_id(topic: &str, anchor: &str) -> String {
    format!("{topic}#{anchor}")
}

/// A theory document partitioned into concepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConceptDocument {
    /// Text of the first `# ` heading.
    pub main_title: Option<String>,
    /// Markdown before the first concept (main title excluded).
    pub intro: String,
    pub concepts: Vec<Concept>,
    /// Markdown after the concept section closed (scoped mode only).
    pub trailing: String,
}

impl ConceptDocument {
    #[must_use]
    pub fn find(&self, anchor: &str) -> Option<&Concept> {
        self.concepts.iter().find(|c| c.anchor == anchor)
    }

    #[must_use]
    pub fn position(&self, anchor: &str) -> Option<usize> {
        self.concepts.iter().position(|c| c.anchor == anchor)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Before,
    Inside,
    After,
}

/// Split a markdown body into concepts.
///
/// If the body has a `## Concepts` (or `## Fogalmak`) heading, concepts are
/// the `###` headings after it, up to the next `##` heading. Otherwise every
/// `###` heading starts a concept. Headings inside fenced code are ignored.
#[must_use]
pub fn extract_concepts(body: &str, topic: &str) -> ConceptDocument {
    let scoped = has_concept_section(body);
    let mut doc = ConceptDocument::default();
    let mut anchors = AnchorSet::new();
    let mut current: Option<Concept> = None;
    let mut section = if scoped { Section::Before } else { Section::Inside };
    let mut fence = FenceTracker::default();

    for line in body.lines() {
        let in_code = fence.observe(line);

        if !in_code {
            if doc.main_title.is_none() {
                if let Some(title) = line.strip_prefix("# ") {
                    doc.main_title = Some(title.trim().to_string());
                    continue;
                }
            }

            if scoped {
                if let Some(heading) = line.strip_prefix("## ") {
                    if section == Section::Before && is_concept_heading(heading) {
                        section = Section::Inside;
                        continue;
                    }
                    if section == Section::Inside {
                        section = Section::After;
                        if let Some(done) = current.take() {
                            doc.concepts.push(done);
                        }
                    }
                }
            }

            if section == Section::Inside {
                if let Some(heading) = line.strip_prefix("### ") {
                    if let Some(done) = current.take() {
                        doc.concepts.push(done);
                    }
                    current = Some(start_concept(heading, topic, &mut anchors));
                    continue;
                }
            }
        }

        let target = match (&mut current, section) {
            (Some(concept), Section::Inside) => &mut concept.content,
            (_, Section::After) => &mut doc.trailing,
            _ => &mut doc.intro,
        };
        target.push_str(line);
        target.push('\n');
    }

    if let Some(done) = current {
        doc.concepts.push(done);
    }
    doc
}

fn start_concept(heading: &str, topic: &str, anchors: &mut AnchorSet) -> Concept {
    let (title, explicit) = split_explicit_anchor(heading.trim());
    let wanted = explicit.map_or_else(|| slugify(title), str::to_string);
    let anchor = anchors.claim(&wanted);
    Concept {
        id: concept_id(topic, &anchor),
        title: title.to_string(),
        anchor,
        topic: topic.to_string(),
        content: String::new(),
    }
}

fn has_concept_section(body: &str) -> bool {
    let mut fence = FenceTracker::default();
    body.lines().any(|line| {
        !fence.observe(line)
            && line
                .strip_prefix("## ")
                .is_some_and(is_concept_heading)
    })
}

fn is_concept_heading(heading: &str) -> bool {
    let (text, _) = split_explicit_anchor(heading);
    let text = text
        .trim()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    CONCEPT_SECTION_HEADINGS.contains(&text.as_str())
}

/// Tracks ``` / ~~~ fenced blocks line by line.
#[derive(Default)]
struct FenceTracker {
    open: Option<char>,
}

impl FenceTracker {
    /// Returns true if `line` belongs to a code block (fence lines included).
    fn observe(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let marker = if trimmed.starts_with("```") {
            Some('`')
        } else if trimmed.starts_with("~~~") {
            Some('~')
        } else {
            None
        };

        match (self.open, marker) {
            (None, Some(m)) => {
                self.open = Some(m);
                true
            }
            (Some(open), Some(m)) if open == m => {
                self.open = None;
                true
            }
            (Some(_), _) => true,
            (None, None) => false,
        }
    }
}
