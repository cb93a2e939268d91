//! Forgiving fragment parser for editor markup.
//!
//! This is not an HTML5 tree builder. It handles what a contenteditable region
//! and the toolbar produce (and what a hostile paste might contain) with a
//! simple open-element stack:
//! - a close tag closes the nearest open element with the same name
//! - stray close tags are ignored
//! - everything still open at end of input is closed
//! - at most [`MAX_DEPTH`] elements are open at once; deeper start tags are
//!   dropped and their content joins the deepest open element
//!
//! All delimiters are ASCII, so byte offsets found by scanning are always
//! char boundaries.

use smol_str::SmolStr;

use super::entities::decode_entities;
use crate::types::{Attribute, Element, Fragment, Node, is_raw_text_tag, is_void_tag};

/// Open-element limit. Every tree walk recurses once per level, so parsed
/// fragments never nest deeper than this (Blink uses the same cap).
pub const MAX_DEPTH: usize = 512;

/// Parse a markup string into a [`Fragment`].
pub fn parse_fragment(input: &str) -> Fragment {
    FragmentParser::new(input).run()
}

struct FragmentParser<'a> {
    src: &'a str,
    pos: usize,
    stack: Vec<Element>,
    root: Vec<Node>,
    /// Start tags dropped past [`MAX_DEPTH`], innermost last.
    dropped: Vec<SmolStr>,
}

/// A start tag read from the source.
struct StartTag {
    name: SmolStr,
    attrs: Vec<Attribute>,
    self_closing: bool,
}

impl<'a> FragmentParser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            stack: Vec::new(),
            root: Vec::new(),
            dropped: Vec::new(),
        }
    }

    fn run(mut self) -> Fragment {
        let src = self.src;
        while self.pos < src.len() {
            let rest = &src[self.pos..];
            match rest.find('<') {
                None => {
                    self.push_text(&decode_entities(rest));
                    self.pos = src.len();
                }
                Some(0) => self.markup(),
                Some(lt) => {
                    self.push_text(&decode_entities(&rest[..lt]));
                    self.pos += lt;
                }
            }
        }

        while !self.stack.is_empty() {
            self.close_top();
        }

        Fragment::new(self.root)
    }

    /// Handle the construct starting with `<` at the current position.
    fn markup(&mut self) {
        let src = self.src;
        let rest = &src[self.pos..];
        let bytes = rest.as_bytes();

        if let Some(body) = rest.strip_prefix("<!--") {
            match body.find("-->") {
                Some(end) => {
                    self.append(Node::Comment(body[..end].to_string()));
                    self.pos += 4 + end + 3;
                }
                None => {
                    self.append(Node::Comment(body.to_string()));
                    self.pos = self.src.len();
                }
            }
            return;
        }

        if let Some(body) = rest.strip_prefix("<![CDATA[") {
            match body.find("]]>") {
                Some(end) => {
                    self.push_text(&body[..end]);
                    self.pos += 9 + end + 3;
                }
                None => {
                    self.push_text(body);
                    self.pos = self.src.len();
                }
            }
            return;
        }

        if rest.starts_with("<!") || rest.starts_with("<?") {
            match rest.find('>') {
                // Doctype and processing instructions carry nothing we keep.
                Some(end) => self.pos += end + 1,
                None => self.literal_lt(),
            }
            return;
        }

        if rest.starts_with("</") && bytes.get(2).is_some_and(u8::is_ascii_alphabetic) {
            match rest.find('>') {
                Some(end) => {
                    let name = read_name(&rest[2..end]);
                    self.pos += end + 1;
                    self.close_tag(&name);
                }
                None => self.literal_lt(),
            }
            return;
        }

        if bytes.get(1).is_some_and(u8::is_ascii_alphabetic) {
            match parse_start_tag(rest) {
                Some((tag, consumed)) => {
                    self.pos += consumed;
                    self.open_tag(tag);
                }
                None => self.literal_lt(),
            }
            return;
        }

        self.literal_lt();
    }

    fn literal_lt(&mut self) {
        self.push_text("<");
        self.pos += 1;
    }

    fn open_tag(&mut self, tag: StartTag) {
        let mut el = Element::new(tag.name);
        el.attrs = tag.attrs;

        if is_void_tag(&el.tag) || tag.self_closing {
            self.append(Node::Element(el));
            return;
        }

        if is_raw_text_tag(&el.tag) {
            let src = self.src;
            let rest = &src[self.pos..];
            let (content_end, consumed) = find_raw_text_end(rest, &el.tag);
            let raw = &rest[..content_end];
            // Only script/style/xmp are truly raw, the others still decode references.
            let text = if matches!(el.tag.as_str(), "textarea" | "title") {
                decode_entities(raw).into_owned()
            } else {
                raw.to_string()
            };
            if !text.is_empty() {
                el.children.push(Node::Text(text));
            }
            self.pos += consumed;
            self.append(Node::Element(el));
            return;
        }

        if self.stack.len() >= MAX_DEPTH {
            if self.dropped.is_empty() {
                tracing::debug!(tag = %el.tag, "markup too deep, dropping start tags");
            }
            self.dropped.push(el.tag);
            return;
        }

        self.stack.push(el);
    }

    fn close_tag(&mut self, name: &str) {
        // Dropped tags are deeper than anything open, so they pair first.
        if let Some(idx) = self.dropped.iter().rposition(|tag| tag == name) {
            self.dropped.truncate(idx);
            return;
        }
        let Some(idx) = self.stack.iter().rposition(|el| el.tag == name) else {
            tracing::trace!(tag = name, "ignoring stray close tag");
            return;
        };
        while self.stack.len() > idx {
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        if let Some(el) = self.stack.pop() {
            self.append(Node::Element(el));
        }
    }

    fn children_mut(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(el) => &mut el.children,
            None => &mut self.root,
        }
    }

    fn append(&mut self, node: Node) {
        self.children_mut().push(node);
    }

    /// Append text, merging with a preceding text node.
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let children = self.children_mut();
        if let Some(Node::Text(prev)) = children.last_mut() {
            prev.push_str(text);
        } else {
            children.push(Node::Text(text.to_string()));
        }
    }
}

fn is_name_end(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'/' || b == b'>' || b == b'='
}

/// Read a lowercase tag name from the start of `s`.
fn read_name(s: &str) -> SmolStr {
    let end = s.bytes().position(is_name_end).unwrap_or(s.len());
    SmolStr::new(s[..end].to_ascii_lowercase())
}

/// Parse a start tag at the beginning of `src` (which starts with `<`).
///
/// Returns the tag and the number of bytes consumed, or `None` if the tag is
/// never terminated.
fn parse_start_tag(src: &str) -> Option<(StartTag, usize)> {
    let bytes = src.as_bytes();
    let name = read_name(&src[1..]);
    let mut i = 1 + name.len();
    let mut attrs: Vec<Attribute> = Vec::new();

    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        match bytes.get(i)? {
            b'>' => {
                return Some((
                    StartTag {
                        name,
                        attrs,
                        self_closing: false,
                    },
                    i + 1,
                ));
            }
            b'/' if bytes.get(i + 1) == Some(&b'>') => {
                return Some((
                    StartTag {
                        name,
                        attrs,
                        self_closing: true,
                    },
                    i + 2,
                ));
            }
            b'/' | b'=' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let name_start = i;
        while i < bytes.len() && !is_name_end(bytes[i]) {
            i += 1;
        }
        let attr_name = src[name_start..i].to_ascii_lowercase();

        let mut j = i;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }

        let mut value = String::new();
        if bytes.get(j) == Some(&b'=') {
            j += 1;
            while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            match bytes.get(j)? {
                quote @ (b'"' | b'\'') => {
                    let close = src[j + 1..].find(*quote as char)?;
                    value = decode_entities(&src[j + 1..j + 1 + close]).into_owned();
                    j += close + 2;
                }
                _ => {
                    let start = j;
                    while j < bytes.len() && !bytes[j].is_ascii_whitespace() && bytes[j] != b'>' {
                        j += 1;
                    }
                    value = decode_entities(&src[start..j]).into_owned();
                }
            }
            i = j;
        }

        if !attrs.iter().any(|a| a.name == attr_name) {
            attrs.push(Attribute::new(attr_name, value));
        }
    }
}

/// Find the end of a raw-text element's content.
///
/// Returns `(content_len, consumed)`: the content length and the number of
/// bytes up to and including the close tag. Without a close tag the content
/// runs to the end of input.
fn find_raw_text_end(rest: &str, tag: &str) -> (usize, usize) {
    let bytes = rest.as_bytes();
    let mut from = 0;

    while let Some(found) = rest[from..].find("</") {
        let start = from + found;
        let name_start = start + 2;
        let name_end = name_start + tag.len();
        let name_matches = rest
            .get(name_start..name_end)
            .is_some_and(|n| n.eq_ignore_ascii_case(tag));
        let terminated = bytes.get(name_end).is_none_or(|b| is_name_end(*b));

        if name_matches && terminated {
            let close = rest[name_end..]
                .find('>')
                .map_or(rest.len(), |gt| name_end + gt + 1);
            return (start, close);
        }
        from = start + 2;
    }

    (rest.len(), rest.len())
}
