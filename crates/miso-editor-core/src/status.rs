//! Status line: word/character counts and last-modified time.

use std::fmt::Write;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::text_helpers::{count_non_whitespace, count_words};

const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// Counts derived from the editable region at one point in time.
///
/// Recomputed on every content change, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub word_count: usize,
    pub char_count: usize,
    /// Local wall-clock time of the measurement.
    pub timestamp: NaiveTime,
    /// The region only held the placeholder prompt.
    pub placeholder: bool,
}

impl StatusSnapshot {
    /// Measure a text projection.
    pub fn measure(text: &str, timestamp: NaiveTime) -> Self {
        Self {
            word_count: count_words(text),
            char_count: count_non_whitespace(text),
            timestamp,
            placeholder: false,
        }
    }

    /// Zero counts for a region showing the placeholder.
    pub fn placeholder(timestamp: NaiveTime) -> Self {
        Self {
            word_count: 0,
            char_count: 0,
            timestamp,
            placeholder: true,
        }
    }
}

/// Display strings for the status line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusLabels {
    pub word: String,
    pub words: String,
    pub character: String,
    pub characters: String,
    pub last_modified: String,
    /// chrono format string for the timestamp.
    pub time_format: String,
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self {
            word: "mot".into(),
            words: "mots".into(),
            character: "caractère".into(),
            characters: "caractères".into(),
            last_modified: "Dernière modification : ".into(),
            time_format: DEFAULT_TIME_FORMAT.into(),
        }
    }
}

impl StatusLabels {
    /// `"3 mots, 12 caractères"`. The plural form is used above one.
    pub fn word_count_line(&self, snapshot: &StatusSnapshot) -> String {
        let word = if snapshot.word_count > 1 {
            &self.words
        } else {
            &self.word
        };
        let character = if snapshot.char_count > 1 {
            &self.characters
        } else {
            &self.character
        };
        format!(
            "{} {}, {} {}",
            snapshot.word_count, word, snapshot.char_count, character
        )
    }

    /// `"Dernière modification : 14:03:59"`, or `None` while the placeholder
    /// is showing (the previous line stays).
    pub fn last_modified_line(&self, snapshot: &StatusSnapshot) -> Option<String> {
        if snapshot.placeholder {
            return None;
        }
        let mut line = self.last_modified.clone();
        let prefix_len = line.len();
        // An invalid format string errors here instead of panicking in format!().
        if write!(line, "{}", snapshot.timestamp.format(&self.time_format)).is_err() {
            tracing::warn!(format = %self.time_format, "invalid time format, using default");
            line.truncate(prefix_len);
            let _ = write!(line, "{}", snapshot.timestamp.format(DEFAULT_TIME_FORMAT));
        }
        Some(line)
    }
}
