//! Book assembly: metadata plus chapters ready for export.

use log::debug;

use crate::error::Result;
use crate::model::{ImageResolver, Node};

/// A book ready for export: metadata plus chapters in reading order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Book {
    pub metadata: Metadata,
    pub chapters: Vec<Chapter>,
}

/// Book metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub title: String,
    pub authors: Vec<String>,
    pub language: String,
    pub date: Option<String>,
}

/// One chapter: a title and its document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    pub title: String,
    pub document: Node,
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Append a chapter
    pub fn add_chapter(&mut self, title: impl Into<String>, document: Node) {
        self.chapters.push(Chapter::new(title, document));
    }

    /// Rewrite the image sources of every chapter through `resolver`.
    ///
    /// Image indices restart at zero for each chapter. Returns the total
    /// number of rewritten images.
    pub fn localize_images<R: ImageResolver + ?Sized>(&mut self, resolver: &mut R) -> Result<usize> {
        let mut total = 0;
        for chapter in &mut self.chapters {
            let count = chapter.document.localize_images(resolver)?;
            debug!("chapter {:?}: {count} images localized", chapter.title);
            total += count;
        }
        Ok(total)
    }
}

impl Metadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

impl Chapter {
    pub fn new(title: impl Into<String>, document: Node) -> Self {
        Self {
            title: title.into(),
            document,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_builder() {
        let meta = Metadata::new("Title")
            .with_author("A B")
            .with_language("ru")
            .with_date("2024-01-02");
        assert_eq!(meta.title, "Title");
        assert_eq!(meta.authors, vec!["A B"]);
        assert_eq!(meta.language, "ru");
        assert_eq!(meta.date.as_deref(), Some("2024-01-02"));
    }

    #[test]
    fn test_add_chapter_keeps_order() {
        let mut book = Book::new().with_metadata(Metadata::new("T"));
        book.add_chapter("one", Node::document(vec![]));
        book.add_chapter("two", Node::document(vec![]));
        let titles: Vec<_> = book.chapters.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "two"]);
        assert_eq!(book.metadata.title, "T");
    }

    #[test]
    fn test_localize_all_chapters() {
        let mut book = Book::new();
        book.add_chapter("1", Node::document(vec![Node::image("a.jpg")]));
        book.add_chapter("2", Node::document(vec![Node::image("b.jpg"), Node::image("c.jpg")]));

        let mut calls = Vec::new();
        let total = book
            .localize_images(&mut |index: usize, locator: &str| -> Result<String> {
                calls.push(index);
                Ok(format!("local/{locator}"))
            })
            .unwrap();

        assert_eq!(total, 3);
        assert_eq!(calls, vec![0, 0, 1]);
        assert_eq!(
            book.chapters[1].document.content()[1].image_src().unwrap(),
            "local/c.jpg"
        );
    }
}
