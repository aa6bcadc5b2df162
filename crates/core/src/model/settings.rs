use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Learner preferences. Saved values merge over the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: String,
    /// Interface language the learner picked; unset until they choose one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub notifications: bool,
    /// Keys without a dedicated field are kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "auto".to_string(),
            language: None,
            notifications: true,
            extra: Map::new(),
        }
    }
}

impl Settings {
    /// Look up one setting by its JSON key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "theme" => Some(Value::String(self.theme.clone())),
            "language" => self.language.clone().map(Value::String),
            "notifications" => Some(Value::Bool(self.notifications)),
            _ => self.extra.get(key).cloned(),
        }
    }

    /// Set one setting by its JSON key.
    ///
    /// A value of the wrong type for a known key is stored in `extra` rather
    /// than dropped, so nothing the caller saved is lost.
    pub fn set(&mut self, key: &str, value: Value) {
        match (key, value) {
            ("theme", Value::String(theme)) => self.theme = theme,
            ("language", Value::String(language)) => self.language = Some(language),
            ("language", Value::Null) => self.language = None,
            ("notifications", Value::Bool(on)) => self.notifications = on,
            (key, value) => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }
}
