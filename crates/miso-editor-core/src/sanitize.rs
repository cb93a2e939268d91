//! Allow-list sanitizer for editor markup.
//!
//! The editable region is serialized, parsed into a [`Fragment`], cleaned and
//! serialized again before it goes into the hidden form field. After cleaning:
//! - no element outside the allow list remains
//! - no text is lost
//! - only the attribute policy's attributes survive, with safe URLs
//!
//! Running the sanitizer on its own output is a no-op.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::markup::parse_fragment;
use crate::text_helpers::is_safe_url;
use crate::types::{Attribute, Element, Fragment, Node, is_raw_text_tag, is_void_tag};

/// Tags kept by default: paragraph, line break, bold, italic, lists, link, image.
pub const DEFAULT_ALLOWED_TAGS: &[&str] = &["p", "br", "strong", "em", "ul", "ol", "li", "a", "img"];

/// The set of tag names that survive sanitization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SmolStr>", into = "Vec<SmolStr>")]
pub struct AllowList {
    tags: BTreeSet<SmolStr>,
}

impl AllowList {
    /// Build an allow list. Names are lowercased.
    ///
    /// Raw-text elements (`script`, `style`, ...) are never admitted: their
    /// content does not survive a serialize/parse round trip as text.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for tag in tags {
            let tag = tag.as_ref().trim().to_ascii_lowercase();
            if tag.is_empty() {
                continue;
            }
            if is_raw_text_tag(&tag) {
                tracing::warn!(tag = %tag, "raw-text element cannot be allow-listed, ignoring");
                continue;
            }
            set.insert(SmolStr::new(tag));
        }
        Self { tags: set }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(SmolStr::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_TAGS)
    }
}

impl From<Vec<SmolStr>> for AllowList {
    fn from(tags: Vec<SmolStr>) -> Self {
        Self::new(tags)
    }
}

impl From<AllowList> for Vec<SmolStr> {
    fn from(list: AllowList) -> Self {
        list.tags.into_iter().collect()
    }
}

/// What happens to an element that is not on the allow list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StripMode {
    /// Drop the element but keep its children, cleaning them in the same pass.
    /// Allowed descendants survive.
    #[default]
    Unwrap,
    /// Replace the element with one text node holding its `textContent`.
    /// Allowed descendants are flattened away too.
    Flatten,
}

/// Counts of what a sanitizer pass removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    pub removed_elements: usize,
    pub removed_attributes: usize,
    pub removed_comments: usize,
}

impl SanitizeReport {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Attributes kept on an allowed element.
fn allowed_attributes(tag: &str) -> &'static [&'static str] {
    match tag {
        "a" => &["href", "title"],
        "img" => &["src", "alt", "title", "width", "height"],
        _ => &[],
    }
}

/// Allow-list sanitizer.
#[derive(Clone, Debug, Default)]
pub struct Sanitizer {
    allow_list: AllowList,
    strip_mode: StripMode,
}

impl Sanitizer {
    pub fn new(allow_list: AllowList) -> Self {
        Self {
            allow_list,
            strip_mode: StripMode::default(),
        }
    }

    pub fn with_strip_mode(mut self, strip_mode: StripMode) -> Self {
        self.strip_mode = strip_mode;
        self
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    pub fn strip_mode(&self) -> StripMode {
        self.strip_mode
    }

    /// Parse, clean and re-serialize a markup string.
    pub fn sanitize(&self, markup: &str) -> String {
        let (fragment, report) = self.clean(parse_fragment(markup));
        if !report.is_clean() {
            tracing::debug!(
                removed_elements = report.removed_elements,
                removed_attributes = report.removed_attributes,
                removed_comments = report.removed_comments,
                "sanitized editor markup"
            );
        }
        fragment.to_html()
    }

    /// Clean an already-parsed fragment.
    pub fn clean(&self, fragment: Fragment) -> (Fragment, SanitizeReport) {
        let mut report = SanitizeReport::default();
        let mut out = Vec::with_capacity(fragment.nodes.len());
        self.clean_nodes(fragment.nodes, &mut out, &mut report);
        (Fragment::new(out), report)
    }

    fn clean_nodes(&self, nodes: Vec<Node>, out: &mut Vec<Node>, report: &mut SanitizeReport) {
        for node in nodes {
            match node {
                Node::Text(text) => push_text(out, text),
                Node::Comment(_) => report.removed_comments += 1,
                Node::Element(el) if self.allow_list.contains(&el.tag) => {
                    self.clean_allowed(el, out, report)
                }
                Node::Element(el) => {
                    report.removed_elements += 1;
                    tracing::trace!(tag = %el.tag, mode = ?self.strip_mode, "stripping element");
                    match self.strip_mode {
                        StripMode::Unwrap => self.clean_nodes(el.children, out, report),
                        StripMode::Flatten => {
                            push_text(out, Node::Element(el).text_content());
                        }
                    }
                }
            }
        }
    }

    fn clean_allowed(&self, el: Element, out: &mut Vec<Node>, report: &mut SanitizeReport) {
        let Element {
            tag,
            attrs,
            children,
        } = el;
        let attrs = filter_attributes(&tag, attrs, report);

        if is_void_tag(&tag) {
            out.push(Node::Element(Element {
                tag,
                attrs,
                children: Vec::new(),
            }));
            // A void element cannot hold children in markup, so any it was
            // built with move after it.
            self.clean_nodes(children, out, report);
            return;
        }

        let mut kept = Vec::with_capacity(children.len());
        self.clean_nodes(children, &mut kept, report);
        out.push(Node::Element(Element {
            tag,
            attrs,
            children: kept,
        }));
    }
}

fn filter_attributes(
    tag: &str,
    attrs: Vec<Attribute>,
    report: &mut SanitizeReport,
) -> Vec<Attribute> {
    let allowed = allowed_attributes(tag);
    let before = attrs.len();

    let kept: Vec<Attribute> = attrs
        .into_iter()
        .filter(|attr| allowed.contains(&attr.name.as_str()))
        .filter(|attr| match attr.name.as_str() {
            "href" | "src" => {
                let safe = is_safe_url(&attr.value, tag == "img");
                if !safe {
                    tracing::warn!(tag, attr = %attr.name, "dropping unsafe url");
                }
                safe
            }
            _ => true,
        })
        .collect();

    report.removed_attributes += before - kept.len();
    kept
}

/// Append text, merging with a preceding text node.
fn push_text(out: &mut Vec<Node>, text: String) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(prev)) = out.last_mut() {
        prev.push_str(&text);
    } else {
        out.push(Node::Text(text));
    }
}

/// Sanitize markup against an allow list, unwrapping disallowed elements.
pub fn sanitize(markup: &str, allow_list: &AllowList) -> String {
    Sanitizer::new(allow_list.clone()).sanitize(markup)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(markup: &str) -> String {
        sanitize(markup, &AllowList::default())
    }

    fn flatten(markup: &str) -> String {
        Sanitizer::default()
            .with_strip_mode(StripMode::Flatten)
            .sanitize(markup)
    }

    #[test]
    fn test_div_and_script_removed_text_kept() {
        insta::assert_snapshot!(
            clean("<div><p>ok</p><script>bad</script></div>"),
            @"<p>ok</p>bad"
        );
    }

    #[test]
    fn test_flatten_mode_drops_nested_structure() {
        insta::assert_snapshot!(
            flatten("<div><p>ok</p><script>bad</script></div>"),
            @"okbad"
        );
    }

    #[test]
    fn test_nested_disallowed_inside_allowed() {
        insta::assert_snapshot!(
            clean("<p>a <span style='color:red'>b <font>c</font></span> d</p>"),
            @"<p>a b c d</p>"
        );
    }

    #[test]
    fn test_allowed_tags_survive() {
        let input = r#"<p><strong>b</strong> <em>i</em><br></p><ul><li>x</li></ul><ol><li>y</li></ol>"#;
        assert_eq!(clean(input), input);
    }

    #[test]
    fn test_attribute_policy() {
        insta::assert_snapshot!(
            clean(r#"<p class="x" onclick="evil()">t</p><a href="/a" target="_blank" title="T">l</a>"#),
            @r#"<p>t</p><a href="/a" title="T">l</a>"#
        );
    }

    #[test]
    fn test_unsafe_urls_dropped() {
        insta::assert_snapshot!(
            clean(r#"<a href="javascript:alert(1)">x</a><img src="data:text/html,hi" alt="a">"#),
            @r#"<a>x</a><img alt="a">"#
        );
    }

    #[test]
    fn test_image_data_url_kept() {
        let input = r#"<img src="data:image/png;base64,AAAA">"#;
        assert_eq!(clean(input), input);
    }

    #[test]
    fn test_comments_dropped() {
        assert_eq!(clean("a<!-- hidden -->b"), "ab");
    }

    #[test]
    fn test_markup_in_script_survives_as_text() {
        insta::assert_snapshot!(
            clean("<script>x = '<b>';</script>"),
            @"x = '&lt;b&gt;';"
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "<div><p>ok</p><script>bad</script></div>",
            "<P CLASS=a>x<b>y</b><!-- c --><img src=javascript:1 alt=q>",
            "<script>x = '<b>&amp;';</script><style>p{}</style>",
            "a < b &amp; c > d",
            "<ul><li>one<li>two</ul><textarea>&lt;i&gt;</textarea>",
            "<a href=' java\tscript:x'>l</a><p/>",
        ];
        for input in inputs {
            let once = clean(input);
            assert_eq!(clean(&once), once, "input: {input}");
            let once = flatten(input);
            assert_eq!(flatten(&once), once, "flatten input: {input}");
        }
    }

    #[test]
    fn test_text_never_lost() {
        let input = "<section><h2>Title</h2><p>Body <u>under</u></p><table><tr><td>cell</td></tr></table></section>";
        let frag = parse_fragment(&clean(input));
        assert_eq!(frag.text_content(), "TitleBody undercell");
    }

    #[test]
    fn test_void_element_children_are_hoisted() {
        let frag = Fragment::new(vec![Element::new("br").with_child("lost?").into()]);
        let (cleaned, _) = Sanitizer::default().clean(frag);
        assert_eq!(cleaned.to_html(), "<br>lost?");
    }

    #[test]
    fn test_report_counts() {
        let (_, report) = Sanitizer::default().clean(parse_fragment(
            r#"<div onclick="x"><p id="a">t</p></div><!-- c -->"#,
        ));
        assert_eq!(
            report,
            SanitizeReport {
                removed_elements: 1,
                removed_attributes: 1,
                removed_comments: 1,
            }
        );
    }

    #[test]
    fn test_allow_list_rejects_raw_text_tags() {
        let list = AllowList::new(["P", "script", " em "]);
        assert!(list.contains("p"));
        assert!(list.contains("em"));
        assert!(!list.contains("script"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_allow_list_serde() {
        let list: AllowList = serde_json::from_str(r#"["p","BR"]"#).unwrap();
        assert!(list.contains("br"));
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["br","p"]"#);
    }
}
