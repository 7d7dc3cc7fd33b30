//! HTML to document tree parser.
//!
//! The parser switches between two modes while walking the DOM:
//!
//! - **Block mode** (body, lists, list items, blockquotes): block elements
//!   become block nodes; any inline content found between them is collected
//!   and wrapped in a synthetic paragraph.
//! - **Inline mode** (inside paragraphs, headings, `pre`): formatting elements
//!   push a mark onto a stack scoped to their subtree, and every non-blank
//!   text run becomes a text leaf carrying a copy of that stack.

use std::fs;
use std::io::Read;
use std::path::Path;

use log::{debug, trace};

use crate::dom::{DomData, DomNodeId, HtmlDom, parse_dom};
use crate::error::{Error, Result};
use crate::model::{ImageAttrs, LinkAttrs, Mark, MarkKind, Node};
use crate::util::decode_html;

use super::tags::{BlockTag, InlineTag, TagRole};

/// Parser options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Parse the children of a lone `<div>` wrapping the whole body instead
    /// of failing on it.
    pub unwrap_container: bool,
}

impl ParseOptions {
    pub fn with_unwrap_container(mut self, unwrap: bool) -> Self {
        self.unwrap_container = unwrap;
        self
    }
}

/// Parse an HTML document or fragment into a `Document` node.
pub fn parse_html(html: &str) -> Result<Node> {
    parse_html_with(html, ParseOptions::default())
}

/// Parse HTML text with explicit options.
pub fn parse_html_with(html: &str, options: ParseOptions) -> Result<Node> {
    let dom = parse_dom(html);
    HtmlParser::new(&dom, options).parse()
}

/// Parse raw HTML bytes, detecting their encoding.
pub fn parse_html_bytes(bytes: &[u8], options: ParseOptions) -> Result<Node> {
    let html = decode_html(bytes)?;
    parse_html_with(&html, options)
}

/// Parse HTML read from a stream.
pub fn parse_html_reader<R: Read>(mut reader: R, options: ParseOptions) -> Result<Node> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_html_bytes(&bytes, options)
}

/// Parse an HTML file.
pub fn parse_html_file(path: impl AsRef<Path>, options: ParseOptions) -> Result<Node> {
    let bytes = fs::read(path)?;
    parse_html_bytes(&bytes, options)
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

struct HtmlParser<'a> {
    dom: &'a HtmlDom,
    options: ParseOptions,
}

impl<'a> HtmlParser<'a> {
    fn new(dom: &'a HtmlDom, options: ParseOptions) -> Self {
        Self { dom, options }
    }

    fn parse(&self) -> Result<Node> {
        let body = self
            .dom
            .find_by_tag("body")
            .unwrap_or_else(|| self.dom.document());
        let root = if self.options.unwrap_container {
            self.lone_container(body).unwrap_or(body)
        } else {
            body
        };

        let content = self.block_children(root)?;
        debug!("parsed HTML into {} blocks", content.len());
        Ok(Node::document(content))
    }

    /// The only `<div>` child of `parent`, if everything else is blank text.
    fn lone_container(&self, parent: DomNodeId) -> Option<DomNodeId> {
        let mut container = None;
        for child in self.dom.children(parent) {
            match &self.dom.get(child)?.data {
                DomData::Element { name, .. } if &*name.local == "div" && container.is_none() => {
                    container = Some(child);
                }
                DomData::Element { .. } => return None,
                DomData::Text(text) if !is_blank(text) => return None,
                _ => {}
            }
        }
        container
    }

    /// Parse children in block mode, wrapping stray inline runs in paragraphs.
    fn block_children(&self, parent: DomNodeId) -> Result<Vec<Node>> {
        let mut blocks = Vec::new();
        let mut pending = Vec::new();

        for child in self.dom.children(parent) {
            let Some(node) = self.dom.get(child) else {
                continue;
            };
            match &node.data {
                DomData::Text(text) => {
                    if !is_blank(text) {
                        pending.push(Node::text(text.as_str()));
                    }
                }
                DomData::Element { name, .. } => match TagRole::of(&name.local) {
                    Some(TagRole::Block(tag)) => {
                        flush_run(&mut blocks, &mut pending);
                        blocks.push(self.block(child, tag)?);
                    }
                    Some(TagRole::Inline(_)) => self.inline(child, &[], &mut pending)?,
                    None => return Err(Error::UnknownBlockTag(name.local.to_string())),
                },
                DomData::Document | DomData::Comment(_) | DomData::Doctype(_) => {}
            }
        }
        flush_run(&mut blocks, &mut pending);
        Ok(blocks)
    }

    fn block(&self, id: DomNodeId, tag: BlockTag) -> Result<Node> {
        trace!("block {tag:?}");
        let node = match tag {
            BlockTag::Paragraph => Node::paragraph(self.inline_children(id)?),
            BlockTag::Heading(level) => Node::heading(level, self.inline_children(id)?),
            BlockTag::BulletList => Node::bullet_list(self.block_children(id)?),
            BlockTag::OrderedList => Node::ordered_list(self.block_children(id)?),
            BlockTag::ListItem => Node::list_item(self.block_children(id)?),
            BlockTag::Blockquote => Node::blockquote(self.block_children(id)?),
            BlockTag::Pre => {
                let mut content = Vec::new();
                if let Some(first) = self.dom.children(id).next() {
                    self.inline(first, &[], &mut content)?;
                }
                Node::code_block(content)
            }
            BlockTag::Rule => Node::HorizontalRule,
        };
        Ok(node)
    }

    fn inline_children(&self, parent: DomNodeId) -> Result<Vec<Node>> {
        let mut leaves = Vec::new();
        for child in self.dom.children(parent) {
            self.inline(child, &[], &mut leaves)?;
        }
        Ok(leaves)
    }

    /// Parse one node in inline mode, appending its leaves to `out`.
    fn inline(&self, id: DomNodeId, marks: &[Mark], out: &mut Vec<Node>) -> Result<()> {
        let Some(node) = self.dom.get(id) else {
            return Ok(());
        };
        let name = match &node.data {
            DomData::Text(text) => {
                if !is_blank(text) {
                    out.push(Node::marked_text(text.as_str(), marks.to_vec()));
                }
                return Ok(());
            }
            DomData::Element { name, .. } => &name.local,
            DomData::Document | DomData::Comment(_) | DomData::Doctype(_) => return Ok(()),
        };

        match TagRole::of(name) {
            Some(TagRole::Inline(InlineTag::Break)) => out.push(Node::HardBreak),
            Some(TagRole::Inline(InlineTag::Image)) => out.push(Node::Image {
                attrs: ImageAttrs {
                    src: self.dom.attr(id, "src").map(str::to_string),
                    ..Default::default()
                },
            }),
            Some(TagRole::Inline(InlineTag::Mark(kind))) => {
                let mut stack = marks.to_vec();
                if !stack.iter().any(|m| m.kind() == kind) {
                    stack.push(self.mark(id, kind));
                }
                for child in self.dom.children(id) {
                    self.inline(child, &stack, out)?;
                }
            }
            Some(TagRole::Block(_)) | None => {
                return Err(Error::UnknownInlineTag(name.to_string()));
            }
        }
        Ok(())
    }

    fn mark(&self, id: DomNodeId, kind: MarkKind) -> Mark {
        match kind {
            MarkKind::Bold => Mark::Bold,
            MarkKind::Italic => Mark::Italic,
            MarkKind::Underline => Mark::Underline,
            MarkKind::Strike => Mark::Strike,
            MarkKind::Code => Mark::Code,
            MarkKind::Link => Mark::Link {
                attrs: LinkAttrs {
                    href: self.dom.attr(id, "href").map(str::to_string),
                    ..Default::default()
                },
            },
        }
    }
}

fn flush_run(blocks: &mut Vec<Node>, pending: &mut Vec<Node>) {
    if !pending.is_empty() {
        blocks.push(Node::paragraph(std::mem::take(pending)));
    }
}
