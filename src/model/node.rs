//! Document tree node types and groups.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AttrOwner, Error, Result};

use super::mark::Mark;

/// Structural group of a node kind.
///
/// Block nodes structure a document; inline nodes are the leaves inside a
/// block. Every kind belongs to exactly one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeGroup {
    Block,
    Inline,
}

/// Kind of a [`Node`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading,
    BulletList,
    OrderedList,
    ListItem,
    Blockquote,
    CodeBlock,
    HorizontalRule,
    Text,
    HardBreak,
    Image,
}

impl NodeKind {
    /// All node kinds, block kinds first.
    pub const ALL: [NodeKind; 12] = [
        NodeKind::Document,
        NodeKind::Paragraph,
        NodeKind::Heading,
        NodeKind::BulletList,
        NodeKind::OrderedList,
        NodeKind::ListItem,
        NodeKind::Blockquote,
        NodeKind::CodeBlock,
        NodeKind::HorizontalRule,
        NodeKind::Text,
        NodeKind::HardBreak,
        NodeKind::Image,
    ];

    /// Group this kind belongs to.
    pub fn group(self) -> NodeGroup {
        match self {
            NodeKind::Document
            | NodeKind::Paragraph
            | NodeKind::Heading
            | NodeKind::BulletList
            | NodeKind::OrderedList
            | NodeKind::ListItem
            | NodeKind::Blockquote
            | NodeKind::CodeBlock
            | NodeKind::HorizontalRule => NodeGroup::Block,
            NodeKind::Text | NodeKind::HardBreak | NodeKind::Image => NodeGroup::Inline,
        }
    }

    pub fn is_block(self) -> bool {
        self.group() == NodeGroup::Block
    }

    pub fn is_inline(self) -> bool {
        self.group() == NodeGroup::Inline
    }

    /// Name used in structured payloads (`"paragraph"`, `"bulletList"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Document => "doc",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::BulletList => "bulletList",
            NodeKind::OrderedList => "orderedList",
            NodeKind::ListItem => "listItem",
            NodeKind::Blockquote => "blockquote",
            NodeKind::CodeBlock => "codeBlock",
            NodeKind::HorizontalRule => "horizontalRule",
            NodeKind::Text => "text",
            NodeKind::HardBreak => "hardBreak",
            NodeKind::Image => "image",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heading attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    /// Heading level, 1-6.
    #[serde(default = "default_level")]
    pub level: u8,
    /// Unrecognized attributes from a structured source.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_level() -> u8 {
    1
}

impl HeadingAttrs {
    pub fn new(level: u8) -> Self {
        Self {
            level,
            extra: Map::new(),
        }
    }
}

impl Default for HeadingAttrs {
    fn default() -> Self {
        Self::new(default_level())
    }
}

/// Image attributes.
///
/// `src` starts out as a remote locator and is replaced by a local resource
/// reference by [`Node::localize_images`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Unrecognized attributes, e.g. a multi-candidate `images` set.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ImageAttrs {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            extra: Map::new(),
        }
    }

    /// The image source, or a missing-attribute error.
    pub fn src(&self) -> Result<&str> {
        self.src.as_deref().ok_or(Error::MissingAttribute {
            kind: AttrOwner::Node(NodeKind::Image),
            attr: "src",
        })
    }

    /// Where the image should be fetched from.
    ///
    /// Falls back to the first entry of an `images` candidate set
    /// (`{"images": [{"image": "..."}]}`) when there is no `src`.
    pub fn locator(&self) -> Option<&str> {
        if let Some(src) = self.src.as_deref() {
            return Some(src);
        }
        self.extra
            .get("images")?
            .as_array()?
            .first()?
            .get("image")?
            .as_str()
    }
}

/// A node of the document tree.
///
/// Variants carry exactly the data their kind allows, so the structural
/// shape of text leaves, headings and images is checked by the type system.
/// The serde representation mirrors the structured payload format:
/// `{"type": "...", "attrs": {...}, "content": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    #[serde(rename = "doc")]
    Document {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    Paragraph {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    Heading {
        #[serde(default)]
        attrs: HeadingAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    BulletList {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    OrderedList {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    ListItem {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    Blockquote {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    CodeBlock {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    HorizontalRule,
    Text {
        #[serde(default, skip_serializing_if = "String::is_empty")]
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
    HardBreak,
    Image {
        #[serde(default)]
        attrs: ImageAttrs,
    },
}

impl Node {
    pub fn document(content: Vec<Node>) -> Self {
        Node::Document { content }
    }

    pub fn paragraph(content: Vec<Node>) -> Self {
        Node::Paragraph { content }
    }

    pub fn heading(level: u8, content: Vec<Node>) -> Self {
        Node::Heading {
            attrs: HeadingAttrs::new(level),
            content,
        }
    }

    pub fn bullet_list(items: Vec<Node>) -> Self {
        Node::BulletList { content: items }
    }

    pub fn ordered_list(items: Vec<Node>) -> Self {
        Node::OrderedList { content: items }
    }

    pub fn list_item(content: Vec<Node>) -> Self {
        Node::ListItem { content }
    }

    pub fn blockquote(content: Vec<Node>) -> Self {
        Node::Blockquote { content }
    }

    pub fn code_block(content: Vec<Node>) -> Self {
        Node::CodeBlock { content }
    }

    /// Plain text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// Text leaf carrying marks in stack order.
    pub fn marked_text(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Node::Text {
            text: text.into(),
            marks,
        }
    }

    pub fn image(src: impl Into<String>) -> Self {
        Node::Image {
            attrs: ImageAttrs::new(src),
        }
    }

    /// Kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Document { .. } => NodeKind::Document,
            Node::Paragraph { .. } => NodeKind::Paragraph,
            Node::Heading { .. } => NodeKind::Heading,
            Node::BulletList { .. } => NodeKind::BulletList,
            Node::OrderedList { .. } => NodeKind::OrderedList,
            Node::ListItem { .. } => NodeKind::ListItem,
            Node::Blockquote { .. } => NodeKind::Blockquote,
            Node::CodeBlock { .. } => NodeKind::CodeBlock,
            Node::HorizontalRule => NodeKind::HorizontalRule,
            Node::Text { .. } => NodeKind::Text,
            Node::HardBreak => NodeKind::HardBreak,
            Node::Image { .. } => NodeKind::Image,
        }
    }

    pub fn group(&self) -> NodeGroup {
        self.kind().group()
    }

    pub fn is_block(&self) -> bool {
        self.kind().is_block()
    }

    pub fn is_inline(&self) -> bool {
        self.kind().is_inline()
    }

    /// Child nodes. Leaves have none.
    pub fn content(&self) -> &[Node] {
        match self {
            Node::Document { content }
            | Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::BulletList { content }
            | Node::OrderedList { content }
            | Node::ListItem { content }
            | Node::Blockquote { content }
            | Node::CodeBlock { content } => content,
            Node::HorizontalRule | Node::Text { .. } | Node::HardBreak | Node::Image { .. } => &[],
        }
    }

    /// Mutable child list, `None` for leaves.
    pub(crate) fn content_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Document { content }
            | Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::BulletList { content }
            | Node::OrderedList { content }
            | Node::ListItem { content }
            | Node::Blockquote { content }
            | Node::CodeBlock { content } => Some(content),
            Node::HorizontalRule | Node::Text { .. } | Node::HardBreak | Node::Image { .. } => None,
        }
    }

    /// Whether this block holds an inline run (paragraph, heading, code block).
    pub fn is_text_block(&self) -> bool {
        matches!(
            self,
            Node::Paragraph { .. } | Node::Heading { .. } | Node::CodeBlock { .. }
        )
    }

    /// Source of an image node.
    pub fn image_src(&self) -> Result<&str> {
        match self {
            Node::Image { attrs } => attrs.src(),
            other => Err(Error::UnexpectedNode {
                kind: other.kind(),
                context: "image lookup",
            }),
        }
    }

    /// Concatenated text of every text leaf below this node.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text { text, .. } => out.push_str(text),
            other => {
                for child in other.content() {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Verify the structural invariants of the tree rooted here.
    ///
    /// Block images are accepted wherever a block is, since structured
    /// payloads put images straight under the document.
    pub fn check_structure(&self) -> Result<()> {
        for child in self.content() {
            let allowed = match self {
                Node::Document { .. } | Node::ListItem { .. } | Node::Blockquote { .. } => {
                    child.is_block() || matches!(child, Node::Image { .. })
                }
                Node::Paragraph { .. } | Node::Heading { .. } | Node::CodeBlock { .. } => {
                    child.is_inline()
                }
                Node::BulletList { .. } | Node::OrderedList { .. } => {
                    matches!(child, Node::ListItem { .. })
                }
                Node::HorizontalRule | Node::Text { .. } | Node::HardBreak | Node::Image { .. } => {
                    false
                }
            };
            if !allowed || matches!(child, Node::Document { .. }) {
                return Err(Error::InvalidStructure {
                    parent: self.kind(),
                    child: child.kind(),
                });
            }
            child.check_structure()?;
        }

        if let Node::Heading { attrs, .. } = self
            && !(1..=6).contains(&attrs.level)
        {
            return Err(Error::InvalidHeadingLevel(attrs.level));
        }

        if let Node::Text { marks, .. } = self {
            for (i, mark) in marks.iter().enumerate() {
                if marks[..i].iter().any(|m| m.kind() == mark.kind()) {
                    return Err(Error::InvalidStructure {
                        parent: NodeKind::Text,
                        child: NodeKind::Text,
                    });
                }
            }
        }
        Ok(())
    }
}
