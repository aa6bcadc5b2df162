//! `---`-delimited metadata blocks at the top of markdown documents.
//!
//! This is deliberately not YAML: one `key: value` per line, optional
//! surrounding quotes, `[a, b]` lists, numbers, and a single level of
//! indented `child: value` lines under an empty key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A coerced front-matter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
}

impl FrontValue {
    /// Render scalar values as display text. Lists join with `, `.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            FrontValue::Number(n) => format_number(*n),
            FrontValue::Text(text) => text.clone(),
            FrontValue::List(items) => items.join(", "),
            FrontValue::Map(map) => map
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Known metadata of a content page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    pub title: Option<String>,
    pub difficulty: Option<String>,
    pub estimated_minutes: Option<u32>,
    pub goals: Vec<String>,
    pub summary: Option<String>,
    /// External playground links keyed by provider (`stackblitz`, `dbfiddle`, ...).
    pub starter: BTreeMap<String, String>,
    /// Keys without a dedicated field.
    pub extra: BTreeMap<String, FrontValue>,
}

impl FrontMatter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Parse the text between the `---` delimiters.
    #[must_use]
    pub fn parse(block: &str) -> Self {
        let mut fm = Self::default();
        for (key, value) in parse_entries(block) {
            fm.apply(key, value);
        }
        fm
    }

    fn apply(&mut self, key: String, value: FrontValue) {
        match key.as_str() {
            "title" => self.title = text_value(&value),
            "difficulty" => self.difficulty = text_value(&value),
            "summary" => self.summary = text_value(&value),
            "estimatedMinutes" => self.estimated_minutes = minutes_value(&value),
            "goals" => {
                self.goals = match value {
                    FrontValue::List(items) => items,
                    other => text_value(&other).into_iter().collect(),
                }
            }
            "starter" => match value {
                FrontValue::Map(map) => self.starter = map,
                other => {
                    self.extra.insert(key, other);
                }
            },
            _ => {
                self.extra.insert(key, value);
            }
        }
    }
}

/// Split a markdown document into its front-matter and body.
///
/// Without an opening `---` line followed later by a closing `---` line the
/// whole input is the body and the front-matter is empty.
#[must_use]
pub fn split_front_matter(markdown: &str) -> (FrontMatter, &str) {
    let mut lines = markdown.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return (FrontMatter::default(), markdown);
    };
    if first.trim_end() != "---" {
        return (FrontMatter::default(), markdown);
    }

    let block_start = first.len();
    let mut offset = block_start;
    for line in lines {
        if line.trim_end() == "---" {
            let block = &markdown[block_start..offset];
            let body = &markdown[offset + line.len()..];
            return (FrontMatter::parse(block), body);
        }
        offset += line.len();
    }

    (FrontMatter::default(), markdown)
}

fn parse_entries(block: &str) -> Vec<(String, FrontValue)> {
    let mut entries: Vec<(String, FrontValue)> = Vec::new();
    // Key whose value was empty: following indented lines become its map.
    let mut open_map: Option<(String, BTreeMap<String, String>)> = None;

    for raw in block.lines() {
        let indented = raw.starts_with([' ', '\t']);
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_string();
        let value = value.trim();

        if indented {
            if let Some((_, map)) = open_map.as_mut() {
                map.insert(key, strip_quotes(value).to_string());
                continue;
            }
        }

        if let Some((parent, map)) = open_map.take() {
            entries.push(close_map(parent, map));
        }

        if value.is_empty() {
            open_map = Some((key, BTreeMap::new()));
        } else {
            entries.push((key, coerce(value)));
        }
    }

    if let Some((parent, map)) = open_map {
        entries.push(close_map(parent, map));
    }
    entries
}

/// An empty-valued key without indented children is an empty string.
fn close_map(key: String, map: BTreeMap<String, String>) -> (String, FrontValue) {
    if map.is_empty() {
        (key, FrontValue::Text(String::new()))
    } else {
        (key, FrontValue::Map(map))
    }
}

fn coerce(raw: &str) -> FrontValue {
    let value = strip_quotes(raw);

    if value.starts_with('[') && value.ends_with(']') && value.len() >= 2 {
        let items = value[1..value.len() - 1]
            .split(',')
            .map(|item| item.trim().replace(['"', '\''], ""))
            .filter(|item| !item.is_empty())
            .collect();
        return FrontValue::List(items);
    }

    if let Ok(number) = value.parse::<f64>() {
        if number.is_finite() {
            return FrontValue::Number(number);
        }
    }

    FrontValue::Text(value.to_string())
}

fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn text_value(value: &FrontValue) -> Option<String> {
    let text = value.to_text();
    (!text.trim().is_empty()).then_some(text)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn minutes_value(value: &FrontValue) -> Option<u32> {
    match value {
        FrontValue::Number(n) if *n >= 0.0 && *n <= f64::from(u32::MAX) => Some(n.round() as u32),
        FrontValue::Text(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        #[allow(clippy::cast_possible_truncation)]
        let whole = n as i64;
        whole.to_string()
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"---
title: "Java Alapok"
difficulty: beginner
estimatedMinutes: 45
goals: ["OOP", 'Collections', Streams]
# a comment
summary: JVM, típusok, kollekciók
starter:
  stackblitz: https://stackblitz.com/x
  dbfiddle: "https://dbfiddle.uk/y"
version: 2
---
# Java

Body text.
"#;

    #[test]
    fn known_keys_are_coerced() {
        let (fm, body) = split_front_matter(DOC);
        assert_eq!(fm.title.as_deref(), Some("Java Alapok"));
        assert_eq!(fm.difficulty.as_deref(), Some("beginner"));
        assert_eq!(fm.estimated_minutes, Some(45));
        assert_eq!(fm.goals, vec!["OOP", "Collections", "Streams"]);
        assert_eq!(fm.summary.as_deref(), Some("JVM, típusok, kollekciók"));
        assert_eq!(
            fm.starter.get("stackblitz").map(String::as_str),
            Some("https://stackblitz.com/x")
        );
        assert_eq!(
            fm.starter.get("dbfiddle").map(String::as_str),
            Some("https://dbfiddle.uk/y")
        );
        assert_eq!(fm.extra.get("version"), Some(&FrontValue::Number(2.0)));
        assert_eq!(body, "# Java\n\nBody text.\n");
    }

    #[test]
    fn missing_closing_delimiter_means_no_front_matter() {
        let input = "---\ntitle: x\n# Body\n";
        let (fm, body) = split_front_matter(input);
        assert!(fm.is_empty());
        assert_eq!(body, input);
    }

    #[test]
    fn documents_without_front_matter_pass_through() {
        let (fm, body) = split_front_matter("# Title\n---\nnot metadata\n");
        assert!(fm.is_empty());
        assert!(body.starts_with("# Title"));
    }

    #[test]
    fn crlf_delimiters_are_accepted() {
        let (fm, body) = split_front_matter("---\r\ntitle: SQL\r\n---\r\nBody\r\n");
        assert_eq!(fm.title.as_deref(), Some("SQL"));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn quoted_numbers_still_become_numbers() {
        let fm = FrontMatter::parse("estimatedMinutes: \"30\"\nlevel: '3.5'");
        assert_eq!(fm.estimated_minutes, Some(30));
        assert_eq!(fm.extra.get("level"), Some(&FrontValue::Number(3.5)));
    }

    #[test]
    fn empty_values_are_kept_as_empty_text() {
        let fm = FrontMatter::parse("author:\ntitle:\ntags:\nlevel: 2");
        assert_eq!(fm.extra.get("author"), Some(&FrontValue::Text(String::new())));
        assert_eq!(fm.extra.get("tags"), Some(&FrontValue::Text(String::new())));
        assert_eq!(fm.extra.get("level"), Some(&FrontValue::Number(2.0)));
        assert_eq!(fm.title, None);
    }

    #[test]
    fn lines_without_colon_are_ignored() {
        let fm = FrontMatter::parse("just text\ntitle: Kept");
        assert_eq!(fm.title.as_deref(), Some("Kept"));
        assert!(fm.extra.is_empty());
    }
}
