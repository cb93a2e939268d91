//! miso-editor-core: article editor logic without DOM dependencies.
//!
//! This crate provides:
//! - `EditorStatusTracker` - status line, placeholder handling and the submit gate
//! - `Sanitizer` / `AllowList` - allow-list markup cleaning
//! - `markup` - a small lenient HTML fragment parser and serializer
//! - `EditableRegion` / `ArticleForm` traits the platform layer implements
//! - `EditorCommand` - toolbar commands

pub mod actions;
pub mod config;
pub mod markup;
pub mod platform;
pub mod sanitize;
pub mod status;
pub mod submit;
pub mod text_helpers;
pub mod tracker;
pub mod types;

pub use actions::{BlockTag, EditorCommand, LINK_PROMPT_DEFAULT};
pub use config::{DEFAULT_MIN_CONTENT_CHARS, DEFAULT_PLACEHOLDER, EditorConfig, ElementIds};
pub use markup::{MAX_DEPTH, decode_entities, parse_fragment, write_fragment};
pub use platform::{ArticleForm, EditableRegion, PlatformError, StaticForm};
pub use sanitize::{AllowList, DEFAULT_ALLOWED_TAGS, SanitizeReport, Sanitizer, StripMode, sanitize};
pub use smol_str::SmolStr;
pub use status::{StatusLabels, StatusSnapshot};
pub use submit::{SubmitError, SubmitOutcome};
pub use tracker::EditorStatusTracker;
pub use types::{Attribute, Element, Fragment, Node};
