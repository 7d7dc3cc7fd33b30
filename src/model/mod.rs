//! Document tree model.
//!
//! A document is a tree of [`Node`]s. Every node kind belongs to one of two
//! groups ([`NodeGroup`]): block nodes structure the document (paragraphs,
//! headings, lists, ...), inline nodes are the leaves inside a block (text,
//! line breaks, images). Text leaves carry an ordered list of [`Mark`]s.
//!
//! Trees are produced once per chapter by the HTML parser
//! ([`crate::import::parse_html`]) or decoded from a structured JSON payload
//! ([`Node::from_json_str`]), optionally passed through
//! [`Node::localize_images`], and then consumed by an exporter.
//!
//! # Example
//!
//! ```
//! use ranobe::model::{Mark, Node, NodeKind};
//!
//! let doc = Node::document(vec![Node::paragraph(vec![
//!     Node::text("Hello "),
//!     Node::marked_text("world", vec![Mark::Bold]),
//! ])]);
//!
//! assert_eq!(doc.kind(), NodeKind::Document);
//! assert!(doc.check_structure().is_ok());
//! ```

mod codec;
mod localize;
mod mark;
mod node;

pub use localize::ImageResolver;
pub use mark::{LinkAttrs, Mark, MarkKind};
pub use node::{HeadingAttrs, ImageAttrs, Node, NodeGroup, NodeKind};
