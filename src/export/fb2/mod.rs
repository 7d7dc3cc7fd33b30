//! FictionBook 2 backend.

mod builder;
mod document;
mod inline;

pub use builder::Fb2Builder;
pub use document::{Author, Binary, FictionBook, Section, TitleInfo};
pub use inline::{Fb2InlineRenderer, MarkNesting};

use std::io::Write;
use std::path::Path;

use log::info;

use crate::book::Book;
use crate::error::Result;
use crate::export::{BlockWalker, Builder};
use crate::util::truncate_to_date;

/// Configuration for FB2 export.
#[derive(Debug, Clone, Default)]
pub struct Fb2Config {
    /// How stacked marks nest in the output.
    pub nesting: MarkNesting,
    /// `<genre>` code, e.g. `sf_fantasy`.
    pub genre: Option<String>,
    /// Overrides the book's language.
    pub language: Option<String>,
}

/// FictionBook 2 exporter.
///
/// # Example
///
/// ```no_run
/// use ranobe::Book;
/// use ranobe::export::{Fb2Config, Fb2Exporter, MarkNesting};
///
/// let book = Book::new();
/// let config = Fb2Config {
///     nesting: MarkNesting::Reversed,
///     ..Default::default()
/// };
/// Fb2Exporter::new().with_config(config).export(&book, "out.fb2".as_ref())?;
/// # Ok::<(), ranobe::Error>(())
/// ```
pub struct Fb2Exporter {
    config: Fb2Config,
}

impl Fb2Exporter {
    /// Create a new exporter with default configuration.
    pub fn new() -> Self {
        Self {
            config: Fb2Config::default(),
        }
    }

    /// Configure the exporter with custom settings.
    pub fn with_config(mut self, config: Fb2Config) -> Self {
        self.config = config;
        self
    }

    /// Export `book` to a file at `dest`.
    pub fn export(&self, book: &Book, dest: &Path) -> Result<()> {
        self.assemble(book)?.build(dest)
    }

    /// Export `book` to any writer.
    pub fn export_to_writer<W: Write + ?Sized>(&self, book: &Book, writer: &mut W) -> Result<()> {
        self.assemble(book)?.write_to(writer)
    }

    fn assemble(&self, book: &Book) -> Result<Fb2Builder> {
        let meta = &book.metadata;
        let mut builder = Fb2Builder::new();

        builder.set_title(&meta.title);
        if let Some(author) = meta.authors.first() {
            builder.set_author(author);
        }
        if let Some(genre) = &self.config.genre {
            builder.set_genre(genre.as_str());
        }
        match &meta.date {
            Some(date) => builder.set_date(truncate_to_date(date)),
            None => builder.set_date(today()),
        }
        match &self.config.language {
            Some(lang) => builder.set_lang(lang.as_str()),
            None if !meta.language.is_empty() => builder.set_lang(meta.language.as_str()),
            None => {}
        }

        let renderer = Fb2InlineRenderer::new(self.config.nesting);
        for chapter in &book.chapters {
            builder.push_chapter(&chapter.title);
            BlockWalker::new(&renderer, &mut builder).walk(&chapter.document)?;
        }
        info!("assembled {:?}: {} chapters", meta.title, book.chapters.len());
        Ok(builder)
    }
}

/// Local date as `YYYY-MM-DD`.
fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

impl Default for Fb2Exporter {
    fn default() -> Self {
        Self::new()
    }
}
