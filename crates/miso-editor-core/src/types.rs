//! Document fragment model: the editable region as an explicit node tree.
//!
//! These types are platform-agnostic. The browser layer reads `innerHTML` into
//! a [`Fragment`], the CLI reads a file into one, and tests build them by hand.

use smol_str::SmolStr;

/// Elements that never take children.
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose content is taken verbatim as text.
pub const RAW_TEXT_TAGS: &[&str] = &["script", "style", "textarea", "title", "xmp"];

/// Elements that start a new line in the text projection.
pub const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre",
    "section", "article", "header", "footer", "table", "tr",
];

pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

pub fn is_raw_text_tag(tag: &str) -> bool {
    RAW_TEXT_TAGS.contains(&tag)
}

pub fn is_block_tag(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

/// A single attribute. Values are stored decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: SmolStr,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An element node with a lowercase tag name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub tag: SmolStr,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<SmolStr>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        self.attrs.push(Attribute::new(name, value));
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Look up an attribute value by (lowercase) name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn is_void(&self) -> bool {
        is_void_tag(&self.tag)
    }
}

/// A node in the fragment tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Decoded text.
    Text(String),
    /// Comment body, without the `<!--`/`-->` delimiters.
    Comment(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Concatenated descendant text, like the DOM's `textContent`.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text_content(&mut out);
        out
    }

    fn collect_text_content(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text_content(out);
                }
            }
            Node::Comment(_) => {}
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(s.to_string())
    }
}

/// The editable region's content: an ordered list of top-level nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fragment {
    pub nodes: Vec<Node>,
}

impl Fragment {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// A fragment holding a single text node (or nothing, for empty text).
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            Self::default()
        } else {
            Self {
                nodes: vec![Node::text(text)],
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Concatenated descendant text, like the DOM's `textContent`.
    pub fn text_content(&self) -> String {
        self.nodes.iter().map(Node::text_content).collect()
    }

    /// Plain-text projection, approximating the DOM's `innerText`.
    ///
    /// Block boundaries and `<br>` become a single `\n`. A boundary never
    /// produces a leading or trailing line break on its own.
    pub fn text(&self) -> String {
        let mut proj = TextProjection::default();
        for node in &self.nodes {
            proj.visit(node);
        }
        proj.out
    }
}

#[derive(Default)]
struct TextProjection {
    out: String,
    pending_break: bool,
}

impl TextProjection {
    fn visit(&mut self, node: &Node) {
        match node {
            Node::Text(t) => self.push_text(t),
            Node::Comment(_) => {}
            Node::Element(el) if el.tag == "br" => {
                // An explicit break is content, it is kept even at the edges.
                self.flush_break();
                self.out.push('\n');
            }
            Node::Element(el) => {
                let block = is_block_tag(&el.tag);
                if block {
                    self.request_break();
                }
                for child in &el.children {
                    self.visit(child);
                }
                if block {
                    self.request_break();
                }
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.flush_break();
        self.out.push_str(text);
    }

    fn request_break(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.pending_break = true;
        }
    }

    fn flush_break(&mut self) {
        if self.pending_break {
            self.out.push('\n');
            self.pending_break = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_concatenates() {
        let frag = Fragment::new(vec![
            Element::new("p").with_child("ok").into(),
            Element::new("script").with_child("bad").into(),
        ]);
        assert_eq!(frag.text_content(), "okbad");
    }

    #[test]
    fn test_text_projection_breaks_between_blocks() {
        let frag = Fragment::new(vec![
            Element::new("p").with_child("one").into(),
            Element::new("p").with_child("two").into(),
        ]);
        assert_eq!(frag.text(), "one\ntwo");
    }

    #[test]
    fn test_text_projection_inline_has_no_breaks() {
        let frag = Fragment::new(vec![
            Node::text("Hello "),
            Element::new("strong").with_child("world").into(),
        ]);
        assert_eq!(frag.text(), "Hello world");
    }

    #[test]
    fn test_text_projection_br() {
        let frag = Fragment::new(vec![
            Node::text("a"),
            Element::new("br").into(),
            Node::text("b"),
        ]);
        assert_eq!(frag.text(), "a\nb");
    }

    #[test]
    fn test_text_projection_ignores_comments() {
        let frag = Fragment::new(vec![Node::Comment(" note ".into()), Node::text("x")]);
        assert_eq!(frag.text(), "x");
    }

    #[test]
    fn test_from_text_empty() {
        assert!(Fragment::from_text("").is_empty());
        assert_eq!(Fragment::from_text("hi").text(), "hi");
    }
}
