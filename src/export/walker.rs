//! Block walker: drives a [`Builder`] from a document tree.

use log::trace;

use crate::error::{Error, Result};
use crate::model::Node;

use super::{Builder, InlineRenderer};

const RULE: &str = "***";

/// Walks the block structure of a document and emits builder calls.
///
/// Every text block becomes one paragraph. List items become paragraphs
/// prefixed with tabs (one per nesting level) and a `* ` or `N. ` marker.
/// Images inside a text run split it and are embedded in between.
pub struct BlockWalker<'a, R: ?Sized, B: ?Sized> {
    renderer: &'a R,
    builder: &'a mut B,
}

impl<'a, R, B> BlockWalker<'a, R, B>
where
    R: InlineRenderer + ?Sized,
    B: Builder + ?Sized,
{
    pub fn new(renderer: &'a R, builder: &'a mut B) -> Self {
        Self { renderer, builder }
    }

    /// Walk `node` and everything below it.
    pub fn walk(&mut self, node: &Node) -> Result<()> {
        self.walk_block(node, 0)
    }

    fn walk_block(&mut self, node: &Node, depth: usize) -> Result<()> {
        match node {
            Node::Document { content }
            | Node::Blockquote { content }
            | Node::ListItem { content } => {
                for child in content {
                    self.walk_block(child, depth)?;
                }
                Ok(())
            }
            Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::CodeBlock { content } => self.push_run(content, depth, None),
            Node::BulletList { content } => {
                for item in content {
                    self.list_item(item, "* ", depth)?;
                }
                Ok(())
            }
            Node::OrderedList { content } => {
                for (i, item) in content.iter().enumerate() {
                    self.list_item(item, &format!("{}. ", i + 1), depth)?;
                }
                Ok(())
            }
            Node::HorizontalRule => self
                .builder
                .push_paragraph(format!("{}{RULE}", indent(depth))),
            Node::Image { .. } => self.builder.push_image(node.image_src()?),
            Node::Text { .. } | Node::HardBreak => Err(Error::UnexpectedNode {
                kind: node.kind(),
                context: "block position",
            }),
        }
    }

    fn list_item(&mut self, item: &Node, marker: &str, depth: usize) -> Result<()> {
        let Node::ListItem { content } = item else {
            return self.walk_block(item, depth);
        };
        trace!("list item {marker:?} at depth {depth}");

        let rest = match content.split_first() {
            Some((first, rest)) if first.is_text_block() => {
                self.push_run(first.content(), depth + 1, Some(marker))?;
                rest
            }
            _ => {
                self.push_line(depth + 1, Some(marker), &[])?;
                content.as_slice()
            }
        };
        for child in rest {
            self.walk_block(child, depth + 1)?;
        }
        Ok(())
    }

    /// Push an inline run as paragraphs, embedding any images it contains.
    fn push_run(&mut self, content: &[Node], depth: usize, mut marker: Option<&str>) -> Result<()> {
        let mut start = 0;
        let mut split = false;
        for (i, node) in content.iter().enumerate() {
            if let Node::Image { .. } = node {
                if i > start || marker.is_some() {
                    self.push_line(depth, marker.take(), &content[start..i])?;
                }
                self.builder.push_image(node.image_src()?)?;
                split = true;
                start = i + 1;
            }
        }
        if start < content.len() || !split {
            self.push_line(depth, marker, &content[start..])?;
        }
        Ok(())
    }

    fn push_line(&mut self, depth: usize, marker: Option<&str>, run: &[Node]) -> Result<()> {
        let body = self.renderer.render_inline(run)?;
        self.builder.push_paragraph(format!(
            "{}{}{body}",
            indent(depth),
            marker.unwrap_or_default()
        ))
    }
}

fn indent(depth: usize) -> String {
    "\t".repeat(depth)
}
