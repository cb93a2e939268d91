//! Editor configuration.
//!
//! Every field has a default matching the article page markup, so an empty
//! JSON object (or no config at all) gives a working editor.

use serde::{Deserialize, Serialize};

use crate::sanitize::{AllowList, Sanitizer, StripMode};
use crate::status::StatusLabels;

/// Prompt text shown while the editor is empty.
pub const DEFAULT_PLACEHOLDER: &str = "Commencez à écrire votre article ici...";

/// Shortest accepted article, in characters of trimmed text.
pub const DEFAULT_MIN_CONTENT_CHARS: usize = 10;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub placeholder: String,
    pub min_content_chars: usize,
    pub allowed_tags: AllowList,
    pub strip_mode: StripMode,
    pub labels: StatusLabels,
    pub ids: ElementIds,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            min_content_chars: DEFAULT_MIN_CONTENT_CHARS,
            allowed_tags: AllowList::default(),
            strip_mode: StripMode::default(),
            labels: StatusLabels::default(),
            ids: ElementIds::default(),
        }
    }
}

impl EditorConfig {
    /// Load a config, filling unspecified fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn sanitizer(&self) -> Sanitizer {
        Sanitizer::new(self.allowed_tags.clone()).with_strip_mode(self.strip_mode)
    }
}

/// DOM ids of the elements the editor page wires together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub editor: String,
    pub word_count: String,
    pub last_modified: String,
    /// Hidden input receiving the sanitized markup.
    pub content: String,
    pub category: String,
    pub article_form: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            editor: "editor".into(),
            word_count: "word-count".into(),
            last_modified: "last-modified".into(),
            content: "content".into(),
            category: "category".into(),
            article_form: "article-form".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_partial_overrides() {
        let config = EditorConfig::from_json(
            r#"{
                "placeholder": "Write here",
                "min_content_chars": 3,
                "allowed_tags": ["p", "h2"],
                "strip_mode": "flatten",
                "ids": { "editor": "body-editor" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.placeholder, "Write here");
        assert_eq!(config.min_content_chars, 3);
        assert!(config.allowed_tags.contains("h2"));
        assert!(!config.allowed_tags.contains("img"));
        assert_eq!(config.strip_mode, StripMode::Flatten);
        assert_eq!(config.ids.editor, "body-editor");
        assert_eq!(config.ids.content, "content");
        assert_eq!(config.labels, StatusLabels::default());
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(EditorConfig::from_json(r#"{"min_content_chars": "ten"}"#).is_err());
    }

    #[test]
    fn test_sanitizer_follows_config() {
        let config = EditorConfig {
            strip_mode: StripMode::Flatten,
            ..Default::default()
        };
        assert_eq!(config.sanitizer().sanitize("<div><p>a</p></div>"), "a");
    }
}
