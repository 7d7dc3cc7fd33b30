//! In-memory FictionBook document and its XML serialization.

use std::io::{self, Write};

use quick_xml::escape::escape;

const FB2_NS: &str = "http://www.gribuser.ru/xml/fictionbook/2.0";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// A FictionBook 2 document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FictionBook {
    pub title_info: TitleInfo,
    pub sections: Vec<Section>,
    pub binaries: Vec<Binary>,
}

/// `<title-info>` fields, in schema order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleInfo {
    pub genre: Option<String>,
    pub author: Author,
    pub book_title: String,
    pub date: Option<String>,
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    /// Split a display name: the last word is the last name, the rest the
    /// first name.
    pub fn from_full_name(name: &str) -> Self {
        let mut words: Vec<&str> = name.split_whitespace().collect();
        let last_name = words.pop().unwrap_or_default().to_string();
        Self {
            first_name: words.join(" "),
            last_name,
        }
    }
}

/// A `<section>`: one chapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    pub title: String,
    /// Paragraph contents as inline FB2 markup.
    pub paragraphs: Vec<String>,
}

/// An embedded `<binary>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub id: String,
    pub content_type: &'static str,
    /// Base64 encoded content.
    pub data: String,
}

impl FictionBook {
    /// Serialize to XML.
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!(
            "<FictionBook xmlns=\"{FB2_NS}\" xmlns:l=\"{XLINK_NS}\">\n"
        ));

        self.write_description(&mut xml);

        xml.push_str("  <body>\n");
        for section in &self.sections {
            xml.push_str("    <section>\n");
            xml.push_str("      <title>\n");
            xml.push_str(&format!("        <p>{}</p>\n", escape(&section.title)));
            xml.push_str("      </title>\n");
            for paragraph in &section.paragraphs {
                xml.push_str(&format!("      <p>{paragraph}</p>\n"));
            }
            xml.push_str("    </section>\n");
        }
        xml.push_str("  </body>\n");

        for binary in &self.binaries {
            xml.push_str(&format!(
                "  <binary id=\"{}\" content-type=\"{}\">{}</binary>\n",
                escape(&binary.id),
                binary.content_type,
                binary.data
            ));
        }

        xml.push_str("</FictionBook>\n");
        xml
    }

    fn write_description(&self, xml: &mut String) {
        let info = &self.title_info;

        xml.push_str("  <description>\n");
        xml.push_str("    <title-info>\n");
        if let Some(genre) = &info.genre {
            xml.push_str(&format!("      <genre>{}</genre>\n", escape(genre)));
        }
        xml.push_str("      <author>\n");
        xml.push_str(&format!(
            "        <first-name>{}</first-name>\n",
            escape(&info.author.first_name)
        ));
        xml.push_str(&format!(
            "        <last-name>{}</last-name>\n",
            escape(&info.author.last_name)
        ));
        xml.push_str("      </author>\n");
        xml.push_str(&format!(
            "      <book-title>{}</book-title>\n",
            escape(&info.book_title)
        ));
        if let Some(date) = &info.date {
            xml.push_str(&format!("      <date>{}</date>\n", escape(date)));
        }
        if let Some(lang) = &info.lang {
            xml.push_str(&format!("      <lang>{}</lang>\n", escape(lang)));
        }
        xml.push_str("    </title-info>\n");
        xml.push_str("  </description>\n");
    }

    /// Serialize to any writer.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.to_xml().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_split() {
        assert_eq!(
            Author::from_full_name("Ivan Petrovich Sidorov"),
            Author {
                first_name: "Ivan Petrovich".into(),
                last_name: "Sidorov".into()
            }
        );
        assert_eq!(
            Author::from_full_name("Mononym"),
            Author {
                first_name: String::new(),
                last_name: "Mononym".into()
            }
        );
        assert_eq!(Author::from_full_name("   "), Author::default());
    }

    #[test]
    fn test_layout() {
        let book = FictionBook {
            title_info: TitleInfo {
                author: Author::from_full_name("Jane Doe"),
                book_title: "T & T".into(),
                ..Default::default()
            },
            sections: vec![Section {
                title: "One".into(),
                paragraphs: vec!["<strong>hi</strong>".into()],
            }],
            binaries: vec![Binary {
                id: "a".into(),
                content_type: "image/png",
                data: "AAEC".into(),
            }],
        };

        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<FictionBook xmlns=\"http://www.gribuser.ru/xml/fictionbook/2.0\" xmlns:l=\"http://www.w3.org/1999/xlink\">
  <description>
    <title-info>
      <author>
        <first-name>Jane</first-name>
        <last-name>Doe</last-name>
      </author>
      <book-title>T &amp; T</book-title>
    </title-info>
  </description>
  <body>
    <section>
      <title>
        <p>One</p>
      </title>
      <p><strong>hi</strong></p>
    </section>
  </body>
  <binary id=\"a\" content-type=\"image/png\">AAEC</binary>
</FictionBook>
";
        assert_eq!(book.to_xml(), expected);
    }

    #[test]
    fn test_optional_title_info_order() {
        let book = FictionBook {
            title_info: TitleInfo {
                genre: Some("sf".into()),
                book_title: "B".into(),
                date: Some("2024".into()),
                lang: Some("ru".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let xml = book.to_xml();
        let pos = |needle: &str| xml.find(needle).unwrap();
        assert!(pos("<genre>sf</genre>") < pos("<author>"));
        assert!(pos("<book-title>") < pos("<date>2024</date>"));
        assert!(pos("<date>") < pos("<lang>ru</lang>"));
    }
}
