//! Toolbar commands.
//!
//! Platform-agnostic definitions of what the editor toolbar can do. The
//! browser layer maps each command onto `document.execCommand`, other
//! platforms can map them onto their own rich-text APIs.

use smol_str::SmolStr;

use crate::text_helpers::is_safe_url;

/// Default text offered by the link prompt.
pub const LINK_PROMPT_DEFAULT: &str = "https://";

/// Block formats offered by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockTag {
    Paragraph,
    Heading2,
    Heading3,
    Quote,
}

impl BlockTag {
    pub fn tag_name(self) -> &'static str {
        match self {
            Self::Paragraph => "p",
            Self::Heading2 => "h2",
            Self::Heading3 => "h3",
            Self::Quote => "blockquote",
        }
    }

    /// Parse `p`, `<p>`, `H2`, ...
    pub fn parse(s: &str) -> Option<Self> {
        let name = s.trim().trim_start_matches('<').trim_end_matches('>');
        match name.to_ascii_lowercase().as_str() {
            "p" => Some(Self::Paragraph),
            "h2" => Some(Self::Heading2),
            "h3" => Some(Self::Heading3),
            "blockquote" => Some(Self::Quote),
            _ => None,
        }
    }
}

/// A toolbar command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    // === Inline formatting ===
    Bold,
    Italic,
    Underline,
    StrikeThrough,
    RemoveFormat,

    // === Blocks ===
    InsertOrderedList,
    InsertUnorderedList,
    FormatBlock(BlockTag),

    // === Embeds ===
    /// Wrap the selection in a link to the URL.
    CreateLink(SmolStr),
    /// Insert an image from a URL or `data:image/` URL.
    InsertImage(String),

    // === History ===
    Undo,
    Redo,
}

impl EditorCommand {
    /// Parse an `execCommand`-style name and optional argument.
    ///
    /// Names are matched case-insensitively. Commands that need an argument
    /// return `None` without a usable one.
    pub fn from_name(name: &str, arg: Option<&str>) -> Option<Self> {
        let cmd = match name.to_ascii_lowercase().as_str() {
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "underline" => Self::Underline,
            "strikethrough" => Self::StrikeThrough,
            "removeformat" => Self::RemoveFormat,
            "insertorderedlist" => Self::InsertOrderedList,
            "insertunorderedlist" => Self::InsertUnorderedList,
            "formatblock" => Self::FormatBlock(BlockTag::parse(arg?)?),
            "createlink" => return Self::link_from_input(arg?),
            "insertimage" => return Self::image_from_input(arg?),
            "undo" => Self::Undo,
            "redo" => Self::Redo,
            _ => return None,
        };
        Some(cmd)
    }

    /// Build a link command from the link prompt's result.
    ///
    /// Blank input, the untouched prompt default and script URLs are refused.
    pub fn link_from_input(input: &str) -> Option<Self> {
        let url = input.trim();
        if url.is_empty() || url == LINK_PROMPT_DEFAULT {
            return None;
        }
        if !is_safe_url(url, false) {
            tracing::warn!(url, "refusing unsafe link url");
            return None;
        }
        Some(Self::CreateLink(SmolStr::new(url)))
    }

    /// Build an image command from a URL or a file read as a data URL.
    pub fn image_from_input(input: &str) -> Option<Self> {
        let src = input.trim();
        if src.is_empty() || src == LINK_PROMPT_DEFAULT {
            return None;
        }
        if !is_safe_url(src, true) {
            tracing::warn!("refusing unsafe image source");
            return None;
        }
        Some(Self::InsertImage(src.to_string()))
    }

    /// The `execCommand` command identifier.
    pub fn command_name(&self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::StrikeThrough => "strikeThrough",
            Self::RemoveFormat => "removeFormat",
            Self::InsertOrderedList => "insertOrderedList",
            Self::InsertUnorderedList => "insertUnorderedList",
            Self::FormatBlock(_) => "formatBlock",
            Self::CreateLink(_) => "createLink",
            Self::InsertImage(_) => "insertImage",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }

    /// The `execCommand` value argument, for commands that take one.
    pub fn value(&self) -> Option<String> {
        match self {
            Self::FormatBlock(block) => Some(format!("<{}>", block.tag_name())),
            Self::CreateLink(url) => Some(url.to_string()),
            Self::InsertImage(src) => Some(src.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_simple() {
        assert_eq!(EditorCommand::from_name("bold", None), Some(EditorCommand::Bold));
        assert_eq!(
            EditorCommand::from_name("insertUnorderedList", None),
            Some(EditorCommand::InsertUnorderedList)
        );
        assert_eq!(EditorCommand::from_name("selectAll", None), None);
    }

    #[test]
    fn test_from_name_needs_argument() {
        assert_eq!(EditorCommand::from_name("createLink", None), None);
        assert_eq!(
            EditorCommand::from_name("formatBlock", Some("<H2>")),
            Some(EditorCommand::FormatBlock(BlockTag::Heading2))
        );
        assert_eq!(EditorCommand::from_name("formatBlock", Some("table")), None);
    }

    #[test]
    fn test_link_from_input() {
        assert_eq!(
            EditorCommand::link_from_input("  https://example.org/a  "),
            Some(EditorCommand::CreateLink("https://example.org/a".into()))
        );
        assert_eq!(EditorCommand::link_from_input(""), None);
        assert_eq!(EditorCommand::link_from_input("https://"), None);
        assert_eq!(EditorCommand::link_from_input("javascript:alert(1)"), None);
        assert_eq!(
            EditorCommand::link_from_input("data:image/png;base64,AA"),
            None
        );
    }

    #[test]
    fn test_image_from_input() {
        assert!(matches!(
            EditorCommand::image_from_input("data:image/png;base64,AAAA"),
            Some(EditorCommand::InsertImage(_))
        ));
        assert_eq!(EditorCommand::image_from_input("data:text/html,x"), None);
        assert_eq!(EditorCommand::image_from_input(" "), None);
    }

    #[test]
    fn test_exec_command_pairs() {
        let link = EditorCommand::CreateLink("/a".into());
        assert_eq!(link.command_name(), "createLink");
        assert_eq!(link.value().as_deref(), Some("/a"));

        let block = EditorCommand::FormatBlock(BlockTag::Quote);
        assert_eq!(block.value().as_deref(), Some("<blockquote>"));

        assert_eq!(EditorCommand::Italic.value(), None);
    }
}
