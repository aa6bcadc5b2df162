//! Anchor generation for concept headings.

use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Anchor used when a heading slugifies to nothing (e.g. only punctuation).
pub const FALLBACK_ANCHOR: &str = "concept";

/// Turn heading text into a URL-fragment slug.
///
/// Lowercases, strips diacritics (`Öröklődés` -> `oroklodes`), drops every
/// character that is not an ASCII letter, digit or whitespace, and joins
/// whitespace runs with a single `-`.
#[must_use]
pub fn slugify(text: &str) -> String {
    let folded: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    let mut slug = String::with_capacity(folded.len());
    let mut pending_dash = false;
    for ch in folded.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else if ch.is_whitespace() {
            pending_dash = true;
        }
    }
    slug
}

/// Split a trailing `{#explicit-anchor}` suffix off a heading.
///
/// Returns the display title and the explicit anchor, if any.
#[must_use]
pub fn split_explicit_anchor(heading: &str) -> (&str, Option<&str>) {
    let trimmed = heading.trim_end();
    if let Some(open) = trimmed.rfind("{#") {
        if trimmed.ends_with('}') {
            let anchor = trimmed[open + 2..trimmed.len() - 1].trim();
            if !anchor.is_empty() && !anchor.contains(char::is_whitespace) {
                return (trimmed[..open].trim_end(), Some(anchor));
            }
        }
    }
    (trimmed, None)
}

/// Hands out unique anchors within one document.
///
/// The first claim of `x` yields `x`; later claims yield `x-2`, `x-3`, ...
#[derive(Debug, Default)]
pub struct AnchorSet {
    used: HashSet<String>,
}

impl AnchorSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, wanted: &str) -> String {
        let base = if wanted.is_empty() {
            FALLBACK_ANCHOR
        } else {
            wanted
        };
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 2_usize;
        loop {
            let candidate = format!("{base}-{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
