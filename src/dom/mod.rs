//! HTML DOM stage.
//!
//! html5ever tokenizes and tree-builds the markup into an arena DOM, with
//! the same error recovery a browser applies (missing `<html>`/`<body>` are
//! synthesized, unclosed elements closed). The HTML parser in
//! [`crate::import`] then walks this DOM.

mod arena;
mod tree_sink;

pub use arena::{Attribute, Children, DomData, DomNode, DomNodeId, HtmlDom};
pub use tree_sink::{DomSink, NodeHandle};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

/// Parse an HTML document or fragment into an arena DOM.
pub fn parse_dom(html: &str) -> HtmlDom {
    parse_document(DomSink::new(), ParseOpts::default())
        .one(html)
        .into_dom()
}
