//! Platform abstraction traits for the editor page.
//!
//! These traits define the interface between the tracker and wherever the
//! content actually lives (browser DOM, a file on disk, a test fixture). The
//! same tracker logic then works in all of them.

use crate::types::Fragment;

/// Error type for platform operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError(pub String);

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PlatformError {}

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// The content-editable region the user types the article into.
///
/// The browser implementation wraps the editor element, reading `innerText`
/// and `innerHTML`. [`Fragment`] implements it for tests and the CLI.
pub trait EditableRegion {
    /// Plain-text projection of the content.
    fn text(&self) -> String;

    /// Serialized markup of the content.
    fn html(&self) -> String;

    /// Replace the whole content with plain text.
    fn set_text(&mut self, text: &str);
}

impl EditableRegion for Fragment {
    fn text(&self) -> String {
        Fragment::text(self)
    }

    fn html(&self) -> String {
        self.to_html()
    }

    fn set_text(&mut self, text: &str) {
        *self = Fragment::from_text(text);
    }
}

impl<R: EditableRegion + ?Sized> EditableRegion for &mut R {
    fn text(&self) -> String {
        (**self).text()
    }

    fn html(&self) -> String {
        (**self).html()
    }

    fn set_text(&mut self, text: &str) {
        (**self).set_text(text)
    }
}

/// The article form around the editor.
pub trait ArticleForm {
    /// Selected category, if any.
    fn category(&self) -> Option<String>;

    /// Write the submission markup into the hidden content field.
    fn set_content(&mut self, html: &str) -> Result<(), PlatformError>;
}

/// In-memory form, for tests and the CLI.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticForm {
    pub category: Option<String>,
    pub content: Option<String>,
}

impl StaticForm {
    pub fn with_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            content: None,
        }
    }
}

impl ArticleForm for StaticForm {
    fn category(&self) -> Option<String> {
        self.category.clone()
    }

    fn set_content(&mut self, html: &str) -> Result<(), PlatformError> {
        self.content = Some(html.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_fragment;

    #[test]
    fn test_fragment_region() {
        let mut region = parse_fragment("<p>Hello</p><p>world</p>");
        assert_eq!(EditableRegion::text(&region), "Hello\nworld");
        assert_eq!(region.html(), "<p>Hello</p><p>world</p>");

        region.set_text("fresh");
        assert_eq!(region.html(), "fresh");

        region.set_text("");
        assert!(region.is_empty());
    }

    #[test]
    fn test_static_form() {
        let mut form = StaticForm::with_category("tech");
        assert_eq!(form.category().as_deref(), Some("tech"));
        form.set_content("<p>x</p>").unwrap();
        assert_eq!(form.content.as_deref(), Some("<p>x</p>"));
    }
}
