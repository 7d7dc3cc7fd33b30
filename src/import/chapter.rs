//! Chapter content ingestion.
//!
//! A chapter body arrives either as an HTML string or as an already
//! structured document payload. Both end up as a checked `Document` tree.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Node, NodeKind};

use super::html::{ParseOptions, parse_html_with};

/// Body of one chapter as delivered by a content source.
///
/// In JSON a string is HTML and an object is a structured document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChapterContent {
    Html(String),
    Structured(Node),
}

impl<'de> Deserialize<'de> for ChapterContent {
    // Decoded by hand so a bad node or mark kind is reported by name.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(html) => Ok(ChapterContent::Html(html)),
            other => Node::deserialize(other)
                .map(ChapterContent::Structured)
                .map_err(D::Error::custom),
        }
    }
}

impl ChapterContent {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_reader(BufReader::new(File::open(path)?))
    }

    /// Convert to a `Document` tree.
    ///
    /// HTML is parsed with the wrapping `<div>` unwrapped. Structured
    /// documents must have a `Document` root and satisfy the tree invariants.
    pub fn into_document(self) -> Result<Node> {
        match self {
            ChapterContent::Html(html) => {
                debug!("chapter content is HTML ({} bytes)", html.len());
                parse_html_with(&html, ParseOptions::default().with_unwrap_container(true))
            }
            ChapterContent::Structured(node) => {
                debug!("chapter content is a structured {} node", node.kind());
                if node.kind() != NodeKind::Document {
                    return Err(Error::UnexpectedNode {
                        kind: node.kind(),
                        context: "chapter root",
                    });
                }
                node.check_structure()?;
                Ok(node)
            }
        }
    }
}
