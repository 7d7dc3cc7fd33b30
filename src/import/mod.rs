//! Importers turning chapter sources into document trees.
//!
//! - [`parse_html`] and friends parse HTML text, bytes, streams or files.
//! - [`ChapterContent`] accepts either HTML or a structured payload.

mod chapter;
mod html;
mod tags;

pub use chapter::ChapterContent;
pub use html::{
    ParseOptions, parse_html, parse_html_bytes, parse_html_file, parse_html_reader, parse_html_with,
};
pub use tags::{BlockTag, InlineTag, TagRole};
