//! FictionBook implementation of the [`Builder`] contract.

use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::{debug, info};

use crate::error::{Error, Result};
use crate::export::Builder;
use crate::util::{image_content_type, image_id};

use super::document::{Author, Binary, FictionBook, Section};
use super::inline::image_marker;

/// Accumulates one FictionBook document.
#[derive(Debug, Default)]
pub struct Fb2Builder {
    book: FictionBook,
    /// Binary id assigned to each embedded file path.
    embedded: HashMap<String, String>,
    ids: HashSet<String>,
}

impl Fb2Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_genre(&mut self, genre: impl Into<String>) {
        self.book.title_info.genre = Some(genre.into());
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.book.title_info.date = Some(date.into());
    }

    pub fn set_lang(&mut self, lang: impl Into<String>) {
        self.book.title_info.lang = Some(lang.into());
    }

    /// The document built so far.
    pub fn document(&self) -> &FictionBook {
        &self.book
    }

    /// Serialize the document to any writer.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        self.book.write_to(writer)?;
        Ok(())
    }

    /// Binary id for a newly embedded file: its stem, suffixed `_1`, `_2`,
    /// ... when another file already took that stem.
    fn unique_id(&self, path: &str) -> String {
        let base = image_id(path);
        let mut id = base.clone();
        let mut n = 1;
        while self.ids.contains(&id) {
            id = format!("{base}_{n}");
            n += 1;
        }
        id
    }

    fn open_section(&mut self) -> Result<&mut Section> {
        self.book.sections.last_mut().ok_or(Error::NoOpenChapter)
    }
}

impl Builder for Fb2Builder {
    fn set_title(&mut self, title: &str) {
        self.book.title_info.book_title = title.to_string();
    }

    fn set_author(&mut self, author: &str) {
        self.book.title_info.author = Author::from_full_name(author);
    }

    fn push_chapter(&mut self, title: &str) {
        debug!("section {title:?}");
        self.book.sections.push(Section {
            title: title.to_string(),
            paragraphs: Vec::new(),
        });
    }

    fn push_paragraph(&mut self, paragraph: String) -> Result<()> {
        self.open_section()?.paragraphs.push(paragraph);
        Ok(())
    }

    fn push_image(&mut self, path: &str) -> Result<()> {
        self.open_section()?;

        let id = match self.embedded.get(path) {
            Some(id) => id.clone(),
            None => {
                let bytes = fs::read(path)?;
                let id = self.unique_id(path);
                debug!("embedding {path} as #{id} ({} bytes)", bytes.len());
                self.book.binaries.push(Binary {
                    id: id.clone(),
                    content_type: image_content_type(path),
                    data: STANDARD.encode(&bytes),
                });
                self.ids.insert(id.clone());
                self.embedded.insert(path.to_string(), id.clone());
                id
            }
        };

        self.open_section()?.paragraphs.push(image_marker(&id));
        Ok(())
    }

    fn build(self, dest: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(dest)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        info!(
            "wrote {} ({} sections, {} images)",
            dest.display(),
            self.book.sections.len(),
            self.book.binaries.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_before_chapter() {
        let mut builder = Fb2Builder::new();
        assert!(matches!(
            builder.push_paragraph("x".into()),
            Err(Error::NoOpenChapter)
        ));
        assert!(matches!(
            builder.push_image("/nonexistent.png"),
            Err(Error::NoOpenChapter)
        ));
    }

    #[test]
    fn test_paragraphs_go_to_last_chapter() {
        let mut builder = Fb2Builder::new();
        builder.push_chapter("1");
        builder.push_paragraph("a".into()).unwrap();
        builder.push_chapter("2");
        builder.push_paragraph("b".into()).unwrap();

        let sections = &builder.document().sections;
        assert_eq!(sections[0].paragraphs, vec!["a"]);
        assert_eq!(sections[1].paragraphs, vec!["b"]);
    }

    #[test]
    fn test_image_embedded_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pic.PNG");
        fs::write(&path, [1u8, 2, 3]).unwrap();
        let path = path.to_str().unwrap();

        let mut builder = Fb2Builder::new();
        builder.push_chapter("c");
        builder.push_image(path).unwrap();
        builder.push_image(path).unwrap();

        let doc = builder.document();
        assert_eq!(doc.binaries.len(), 1);
        assert_eq!(doc.binaries[0].id, "pic");
        assert_eq!(doc.binaries[0].content_type, "image/png");
        assert_eq!(doc.binaries[0].data, "AQID");
        assert_eq!(
            doc.sections[0].paragraphs,
            vec!["<image l:href=\"#pic\"/>", "<image l:href=\"#pic\"/>"]
        );
    }

    #[test]
    fn test_same_stem_different_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("ch1").join("image0.png");
        let second = dir.path().join("ch2").join("image0.png");
        for (path, byte) in [(&first, 1u8), (&second, 2u8)] {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, [byte; 3]).unwrap();
        }

        let mut builder = Fb2Builder::new();
        builder.push_chapter("1");
        builder.push_image(first.to_str().unwrap()).unwrap();
        builder.push_chapter("2");
        builder.push_image(second.to_str().unwrap()).unwrap();
        builder.push_image(first.to_str().unwrap()).unwrap();

        let doc = builder.document();
        let binaries: Vec<_> = doc
            .binaries
            .iter()
            .map(|b| (b.id.as_str(), b.data.as_str()))
            .collect();
        assert_eq!(binaries, vec![("image0", "AQEB"), ("image0_1", "AgIC")]);
        assert_eq!(doc.sections[0].paragraphs, vec!["<image l:href=\"#image0\"/>"]);
        assert_eq!(
            doc.sections[1].paragraphs,
            vec![
                "<image l:href=\"#image0_1\"/>",
                "<image l:href=\"#image0\"/>"
            ]
        );
    }

    #[test]
    fn test_missing_image_file() {
        let mut builder = Fb2Builder::new();
        builder.push_chapter("c");
        assert!(matches!(
            builder.push_image("/definitely/not/here.jpg"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_build_to_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing-dir").join("out.fb2");
        assert!(matches!(Fb2Builder::new().build(&dest), Err(Error::Io(_))));
    }
}
