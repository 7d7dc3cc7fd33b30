//! Error types for ranobe operations.

use thiserror::Error;

use crate::model::{MarkKind, NodeKind};

/// Errors that can occur while parsing, decoding, or exporting a document.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("undefined block tag <{0}>")]
    UnknownBlockTag(String),

    #[error("undefined inline tag <{0}>")]
    UnknownInlineTag(String),

    #[error("malformed HTML: {0}")]
    MalformedHtml(String),

    #[error("invalid document payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{parent} cannot contain {child}")]
    InvalidStructure { parent: NodeKind, child: NodeKind },

    #[error("heading level {0} is outside 1-6")]
    InvalidHeadingLevel(u8),

    #[error("{kind} has no {attr} attribute")]
    MissingAttribute { kind: AttrOwner, attr: &'static str },

    #[error("unexpected {kind} node in {context}")]
    UnexpectedNode {
        kind: NodeKind,
        context: &'static str,
    },

    #[error("no open chapter")]
    NoOpenChapter,

    #[error("cannot resolve image {locator}: {reason}")]
    ImageResolution { locator: String, reason: String },
}

/// The node or mark an attribute lookup was made on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOwner {
    Node(NodeKind),
    Mark(MarkKind),
}

impl std::fmt::Display for AttrOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttrOwner::Node(kind) => write!(f, "{kind} node"),
            AttrOwner::Mark(kind) => write!(f, "{kind} mark"),
        }
    }
}

impl Error {
    /// Tag name carried by a structural parse failure, if any.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Error::UnknownBlockTag(tag) | Error::UnknownInlineTag(tag) => Some(tag),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
