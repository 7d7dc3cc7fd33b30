//! Export module for rendering document trees into e-book formats.
//!
//! # Architecture
//!
//! Rendering is split in two:
//! - A [`Builder`] accumulates title, author, chapters, paragraphs and
//!   images for one output file and serializes it in [`Builder::build`].
//! - The [`BlockWalker`] walks a document's block structure, renders each
//!   inline run through an [`InlineRenderer`] and drives the builder.
//!
//! A format backend provides both halves; FictionBook 2 is the only one.
//!
//! # Example
//!
//! ```no_run
//! use ranobe::{Book, Metadata};
//! use ranobe::export::Fb2Exporter;
//! use ranobe::import::parse_html;
//!
//! let mut book = Book::new().with_metadata(Metadata::new("Title").with_author("Jane Doe"));
//! book.add_chapter("Chapter 1", parse_html("<p>Hello <b>world</b></p>")?);
//! Fb2Exporter::new().export(&book, "book.fb2".as_ref())?;
//! # Ok::<(), ranobe::Error>(())
//! ```

use std::path::Path;

use crate::error::Result;
use crate::model::Node;

mod fb2;
mod walker;

pub use fb2::{
    Author, Binary, Fb2Builder, Fb2Config, Fb2Exporter, Fb2InlineRenderer, FictionBook, MarkNesting,
    Section, TitleInfo,
};
pub use walker::BlockWalker;

/// Output accumulation contract a format backend implements.
///
/// One builder produces one file: [`build`](Builder::build) consumes it.
pub trait Builder {
    fn set_title(&mut self, title: &str);

    fn set_author(&mut self, author: &str);

    /// Open a new chapter; following paragraphs and images go into it.
    fn push_chapter(&mut self, title: &str);

    /// Append rendered inline markup as one paragraph of the open chapter.
    ///
    /// Fails with [`Error::NoOpenChapter`](crate::Error::NoOpenChapter) if no
    /// chapter was opened.
    fn push_paragraph(&mut self, paragraph: String) -> Result<()>;

    /// Embed the image at a local `path` into the open chapter.
    fn push_image(&mut self, path: &str) -> Result<()>;

    /// Finalize and write the document to `dest`.
    fn build(self, dest: &Path) -> Result<()>
    where
        Self: Sized;
}

/// Renders a run of inline nodes into the markup of one paragraph.
pub trait InlineRenderer {
    fn render_inline(&self, nodes: &[Node]) -> Result<String>;
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Fb2,
}

impl Format {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "fb2" => Some(Format::Fb2),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Format::Fb2 => "fb2",
        }
    }
}
