//! FictionBook inline markup.

use quick_xml::escape::escape;

use crate::error::{Error, Result};
use crate::export::InlineRenderer;
use crate::model::{Mark, Node};
use crate::util::image_id;

/// Order in which a text leaf's marks are turned into nested wrappers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkNesting {
    /// First mark is the outermost wrapper, so `<b>a<i>b</i></b>` renders
    /// `b` as `<strong><emphasis>b</emphasis></strong>`.
    #[default]
    Source,
    /// First mark is the innermost wrapper (`<emphasis><strong>b</strong></emphasis>`).
    /// Matches the output of earlier FB2 exports of the same sources.
    Reversed,
}

/// Renders inline nodes as FictionBook paragraph content.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fb2InlineRenderer {
    nesting: MarkNesting,
}

impl Fb2InlineRenderer {
    pub fn new(nesting: MarkNesting) -> Self {
        Self { nesting }
    }

    pub fn nesting(&self) -> MarkNesting {
        self.nesting
    }

    fn render_text(&self, text: &str, marks: &[Mark], out: &mut String) -> Result<()> {
        let mut wrapped = escape(text).into_owned();
        let mut wrap = |mark: &Mark| -> Result<()> {
            let (open, close) = wrapper(mark)?;
            wrapped = format!("{open}{wrapped}{close}");
            Ok(())
        };
        match self.nesting {
            MarkNesting::Source => marks.iter().rev().try_for_each(&mut wrap)?,
            MarkNesting::Reversed => marks.iter().try_for_each(&mut wrap)?,
        }
        out.push_str(&wrapped);
        Ok(())
    }
}

impl InlineRenderer for Fb2InlineRenderer {
    fn render_inline(&self, nodes: &[Node]) -> Result<String> {
        let mut out = String::new();
        for node in nodes {
            match node {
                Node::Text { text, marks } => self.render_text(text, marks, &mut out)?,
                Node::HardBreak => out.push_str("<empty-line/>"),
                Node::Image { .. } => out.push_str(&image_marker(&image_id(node.image_src()?))),
                Node::Document { .. }
                | Node::Paragraph { .. }
                | Node::Heading { .. }
                | Node::BulletList { .. }
                | Node::OrderedList { .. }
                | Node::ListItem { .. }
                | Node::Blockquote { .. }
                | Node::CodeBlock { .. }
                | Node::HorizontalRule => {
                    return Err(Error::UnexpectedNode {
                        kind: node.kind(),
                        context: "inline content",
                    });
                }
            }
        }
        Ok(out)
    }
}

/// Paragraph content referencing an embedded binary.
pub(crate) fn image_marker(id: &str) -> String {
    format!("<image l:href=\"#{}\"/>", escape(id))
}

fn wrapper(mark: &Mark) -> Result<(String, &'static str)> {
    let pair = match mark {
        Mark::Bold => ("<strong>".to_string(), "</strong>"),
        Mark::Italic => ("<emphasis>".to_string(), "</emphasis>"),
        Mark::Underline => ("<span class=\"underline\">".to_string(), "</span>"),
        Mark::Strike => ("<span class=\"strike\">".to_string(), "</span>"),
        Mark::Code => ("<code>".to_string(), "</code>"),
        Mark::Link { .. } => (format!("<a l:href=\"{}\">", escape(mark.href()?)), "</a>"),
    };
    Ok(pair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinkAttrs;

    fn render(nodes: &[Node]) -> String {
        Fb2InlineRenderer::default().render_inline(nodes).unwrap()
    }

    #[test]
    fn test_plain_text_is_escaped() {
        assert_eq!(render(&[Node::text("a < b & c")]), "a &lt; b &amp; c");
    }

    #[test]
    fn test_concatenates_without_separator() {
        assert_eq!(
            render(&[
                Node::text("Hello "),
                Node::marked_text("world", vec![Mark::Bold]),
                Node::HardBreak,
                Node::text("!"),
            ]),
            "Hello <strong>world</strong><empty-line/>!"
        );
    }

    #[test]
    fn test_each_mark_wrapper() {
        let cases = [
            (Mark::Bold, "<strong>x</strong>"),
            (Mark::Italic, "<emphasis>x</emphasis>"),
            (Mark::Underline, "<span class=\"underline\">x</span>"),
            (Mark::Strike, "<span class=\"strike\">x</span>"),
            (Mark::Code, "<code>x</code>"),
            (Mark::link("https://a.example/?q=1&r=2"), "<a l:href=\"https://a.example/?q=1&amp;r=2\">x</a>"),
        ];
        for (mark, expected) in cases {
            assert_eq!(render(&[Node::marked_text("x", vec![mark])]), expected);
        }
    }

    #[test]
    fn test_mark_nesting() {
        let node = Node::marked_text("b", vec![Mark::Bold, Mark::Italic]);
        assert_eq!(
            Fb2InlineRenderer::new(MarkNesting::Source)
                .render_inline(std::slice::from_ref(&node))
                .unwrap(),
            "<strong><emphasis>b</emphasis></strong>"
        );
        assert_eq!(
            Fb2InlineRenderer::new(MarkNesting::Reversed)
                .render_inline(&[node])
                .unwrap(),
            "<emphasis><strong>b</strong></emphasis>"
        );
    }

    #[test]
    fn test_image_marker() {
        assert_eq!(
            render(&[Node::image("/cache/images/pic01.jpg")]),
            "<image l:href=\"#pic01\"/>"
        );
    }

    #[test]
    fn test_missing_attributes() {
        let bare_link = Node::marked_text(
            "x",
            vec![Mark::Link {
                attrs: LinkAttrs::default(),
            }],
        );
        let renderer = Fb2InlineRenderer::default();
        assert!(matches!(
            renderer.render_inline(&[bare_link]),
            Err(Error::MissingAttribute { attr: "href", .. })
        ));
        let bare_image = Node::Image {
            attrs: Default::default(),
        };
        assert!(matches!(
            renderer.render_inline(&[bare_image]),
            Err(Error::MissingAttribute { attr: "src", .. })
        ));
    }

    #[test]
    fn test_block_node_rejected() {
        let err = Fb2InlineRenderer::default()
            .render_inline(&[Node::paragraph(vec![])])
            .unwrap_err();
        assert!(matches!(err, Error::UnexpectedNode { .. }));
    }
}
