//! Serialize a [`Fragment`] back to markup.
//!
//! Output is canonical: every non-void element gets an explicit close tag and
//! attribute values are always double-quoted. Re-parsing the output yields an
//! equivalent tree, which the sanitizer relies on for idempotence.

use markdown_weaver_escape::{FmtWriter, StrWrite, escape_html, escape_html_body_text};

use crate::types::{Element, Fragment, Node};

/// Write a whole fragment.
pub fn write_fragment<W: StrWrite>(mut writer: W, fragment: &Fragment) -> Result<(), W::Error> {
    for node in &fragment.nodes {
        write_node(&mut writer, node)?;
    }
    Ok(())
}

/// Write a single node and its descendants.
pub fn write_node<W: StrWrite>(writer: &mut W, node: &Node) -> Result<(), W::Error> {
    match node {
        Node::Text(text) => escape_html_body_text(&mut *writer, text),
        Node::Comment(body) => {
            writer.write_str("<!--")?;
            writer.write_str(body)?;
            writer.write_str("-->")
        }
        Node::Element(el) => write_element(writer, el),
    }
}

fn write_element<W: StrWrite>(writer: &mut W, el: &Element) -> Result<(), W::Error> {
    writer.write_str("<")?;
    writer.write_str(&el.tag)?;
    for attr in &el.attrs {
        writer.write_str(" ")?;
        writer.write_str(&attr.name)?;
        writer.write_str("=\"")?;
        escape_html(&mut *writer, &attr.value)?;
        writer.write_str("\"")?;
    }
    writer.write_str(">")?;

    if el.is_void() {
        return Ok(());
    }

    for child in &el.children {
        write_node(writer, child)?;
    }

    writer.write_str("</")?;
    writer.write_str(&el.tag)?;
    writer.write_str(">")
}

impl Fragment {
    /// Serialize to a markup string.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        // fmt::Write into a String never fails.
        let _ = write_fragment(FmtWriter(&mut out), self);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_fragment;
    use crate::types::Element;

    #[test]
    fn test_escapes_text_and_attributes() {
        let frag = Fragment::new(vec![
            Element::new("a")
                .with_attr("href", "/q?a=1&b=\"2\"")
                .with_child("<tag> & more")
                .into(),
        ]);
        insta::assert_snapshot!(
            frag.to_html(),
            @r#"<a href="/q?a=1&amp;b=&quot;2&quot;">&lt;tag&gt; &amp; more</a>"#
        );
    }

    #[test]
    fn test_void_elements_have_no_close_tag() {
        let frag = parse_fragment("a<br/>b<img src='x.png'>");
        insta::assert_snapshot!(frag.to_html(), @r#"a<br>b<img src="x.png">"#);
    }

    #[test]
    fn test_implicit_close_tags_written() {
        let frag = parse_fragment("<p><em>open");
        insta::assert_snapshot!(frag.to_html(), @"<p><em>open</em></p>");
    }

    #[test]
    fn test_comment_round_trip() {
        let frag = parse_fragment("x<!-- keep -->y");
        assert_eq!(frag.to_html(), "x<!-- keep -->y");
    }

    #[test]
    fn test_reparse_is_stable() {
        let once = parse_fragment("<P class=a>1 &lt; 2<BR>tail").to_html();
        let twice = parse_fragment(&once).to_html();
        assert_eq!(once, twice);
    }
}
