//! Structured payload (JSON) encoding and decoding of document trees.
//!
//! The payload mirrors the tree field for field:
//!
//! ```json
//! {
//!   "type": "doc",
//!   "content": [
//!     {"type": "heading", "attrs": {"level": 1}, "content": [{"type": "text", "text": "Title"}]},
//!     {"type": "paragraph", "content": [
//!       {"type": "text", "text": "bold", "marks": [{"type": "bold"}]}
//!     ]}
//!   ]
//! }
//! ```
//!
//! Unknown node or mark `type` strings are rejected with [`Error::Decode`].

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{Error, Result};

use super::Node;

impl Node {
    /// Decode a tree from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Node> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a tree from a JSON stream.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Node> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Decode a tree from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Node> {
        let file = File::open(path)?;
        Node::from_json_reader(BufReader::new(file))
    }

    /// Encode as pretty-printed JSON (two-space indent).
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Encode as pretty-printed JSON into a writer.
    pub fn to_json_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Encode as pretty-printed JSON into a file, replacing it.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_json_writer(&mut writer)?;
        writer.write_all(b"\n")?;
        writer.flush().map_err(Error::Io)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::model::{Mark, MarkKind, NodeKind};

    #[test]
    fn test_decode_document() {
        let json = r#"{
            "type": "doc",
            "content": [
                {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Title"}]},
                {"type": "paragraph", "content": [
                    {"type": "text", "text": "plain "},
                    {"type": "text", "text": "link", "marks": [{"type": "link", "attrs": {"href": "https://example.com"}}]},
                    {"type": "hardBreak"}
                ]},
                {"type": "horizontalRule"},
                {"type": "image", "attrs": {"src": "a.png"}}
            ]
        }"#;

        let doc = Node::from_json_str(json).unwrap();
        assert_eq!(doc.kind(), NodeKind::Document);
        let content = doc.content();
        assert_eq!(content.len(), 4);
        assert_eq!(content[0], Node::heading(2, vec![Node::text("Title")]));
        assert_eq!(
            content[1].content()[1],
            Node::marked_text("link", vec![Mark::link("https://example.com")])
        );
        assert_eq!(content[1].content()[2], Node::HardBreak);
        assert_eq!(content[2], Node::HorizontalRule);
        assert_eq!(content[3].image_src().unwrap(), "a.png");
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let json = r#"{"type": "paragraph", "attrs": {"textAlign": null}, "content": []}"#;
        assert_eq!(Node::from_json_str(json).unwrap(), Node::paragraph(vec![]));
    }

    #[test]
    fn test_decode_unknown_node_kind() {
        let err = Node::from_json_str(r#"{"type": "table"}"#).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert!(err.to_string().contains("table"));
    }

    #[test]
    fn test_decode_unknown_mark_kind() {
        let json = r#"{"type": "text", "text": "x", "marks": [{"type": "superscript"}]}"#;
        let err = Node::from_json_str(json).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert!(err.to_string().contains("superscript"));
    }

    #[test]
    fn test_encode_omits_empty_fields() {
        let json = serde_json::to_value(Node::paragraph(vec![Node::text("x")])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "paragraph",
                "content": [{"type": "text", "text": "x"}]
            })
        );
        let json = serde_json::to_value(Node::heading(3, vec![])).unwrap();
        assert_eq!(json, serde_json::json!({"type": "heading", "attrs": {"level": 3}}));
    }

    #[test]
    fn test_extra_attrs_survive_round_trip() {
        let json = r#"{"type": "image", "attrs": {"images": [{"image": "x1", "width": 800}]}}"#;
        let node = Node::from_json_str(json).unwrap();
        let back = Node::from_json_str(&node.to_json_string().unwrap()).unwrap();
        assert_eq!(node, back);
        match back {
            Node::Image { attrs } => assert_eq!(attrs.locator(), Some("x1")),
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chapter.json");
        let doc = Node::document(vec![Node::paragraph(vec![Node::text("saved")])]);
        doc.to_json_file(&path).unwrap();
        assert_eq!(Node::from_json_file(&path).unwrap(), doc);
    }

    fn arb_mark() -> BoxedStrategy<Mark> {
        prop_oneof![
            Just(Mark::Bold),
            Just(Mark::Italic),
            Just(Mark::Underline),
            Just(Mark::Strike),
            Just(Mark::Code),
            "[a-z]{1,8}".prop_map(|h| Mark::link(format!("https://{h}.example"))),
        ]
        .boxed()
    }

    fn arb_inline() -> BoxedStrategy<Node> {
        prop_oneof![
            (
                "[a-zA-Z <&>]{0,12}",
                prop::collection::vec(arb_mark(), 0..4)
            )
                .prop_map(|(text, marks)| {
                    let mut seen: Vec<MarkKind> = Vec::new();
                    let marks = marks
                        .into_iter()
                        .filter(|m| {
                            let fresh = !seen.contains(&m.kind());
                            seen.push(m.kind());
                            fresh
                        })
                        .collect();
                    Node::marked_text(text, marks)
                }),
            Just(Node::HardBreak),
            "[a-z]{1,6}\\.(png|jpg)".prop_map(Node::image),
        ]
        .boxed()
    }

    fn arb_block() -> impl Strategy<Value = Node> {
        let inline = prop::collection::vec(arb_inline(), 0..5);
        let leaf = prop_oneof![
            inline.clone().prop_map(Node::paragraph),
            (1u8..=6, inline.clone()).prop_map(|(level, c)| Node::heading(level, c)),
            inline.prop_map(Node::code_block),
            Just(Node::HorizontalRule),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..3).prop_map(Node::blockquote),
                prop::collection::vec(
                    prop::collection::vec(inner.clone(), 0..3).prop_map(Node::list_item),
                    0..3
                )
                .prop_map(Node::bullet_list),
                prop::collection::vec(
                    prop::collection::vec(inner, 0..3).prop_map(Node::list_item),
                    0..3
                )
                .prop_map(Node::ordered_list),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_json_round_trip(blocks in prop::collection::vec(arb_block(), 0..5)) {
            let doc = Node::document(blocks);
            prop_assert!(doc.check_structure().is_ok());
            let json = doc.to_json_string().unwrap();
            prop_assert_eq!(Node::from_json_str(&json).unwrap(), doc);
        }
    }
}
