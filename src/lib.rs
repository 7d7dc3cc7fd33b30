//! # ranobe
//!
//! Converts rich-text chapters into e-books.
//!
//! ## Pipeline
//!
//! - **Import**: HTML (or an already structured JSON payload) is parsed into
//!   a format-agnostic document tree ([`model::Node`]).
//! - **Localize**: remote image sources are swapped for local files through
//!   an [`model::ImageResolver`].
//! - **Export**: the tree is walked block by block and rendered into
//!   FictionBook 2 markup by [`export::Fb2Exporter`].
//!
//! ## Quick Start
//!
//! ```
//! use ranobe::import::parse_html;
//! use ranobe::model::{Mark, Node};
//!
//! let doc = parse_html("<h1>Title</h1><p>Hello <b>world</b></p>").unwrap();
//! assert_eq!(
//!     doc.content()[1],
//!     Node::paragraph(vec![
//!         Node::text("Hello "),
//!         Node::marked_text("world", vec![Mark::Bold]),
//!     ])
//! );
//! ```
//!
//! ## Writing a Book
//!
//! ```no_run
//! use ranobe::{Book, Metadata};
//! use ranobe::export::Fb2Exporter;
//! use ranobe::import::ChapterContent;
//!
//! let mut book = Book::new().with_metadata(Metadata::new("My Novel").with_author("Jane Doe"));
//! let content = ChapterContent::from_json_str(r#""<div><p>Once upon a time</p></div>""#)?;
//! book.add_chapter("Chapter 1", content.into_document()?);
//! Fb2Exporter::new().export(&book, "my-novel.fb2".as_ref())?;
//! # Ok::<(), ranobe::Error>(())
//! ```

pub mod book;
pub mod dom;
pub mod error;
pub mod export;
pub mod import;
pub mod model;
pub mod util;

pub use book::{Book, Chapter, Metadata};
pub use error::{Error, Result};
pub use export::Format;
pub use model::{Mark, MarkKind, Node, NodeKind};
