//! HTML tag vocabulary recognised by the parser.

use crate::model::MarkKind;

/// Block-level element the parser turns into a block node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    Paragraph,
    Heading(u8),
    BulletList,
    OrderedList,
    ListItem,
    Blockquote,
    Pre,
    Rule,
}

/// Inline element the parser turns into a leaf or a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineTag {
    Break,
    Image,
    Mark(MarkKind),
}

/// Role of an HTML tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRole {
    Block(BlockTag),
    Inline(InlineTag),
}

impl TagRole {
    /// Classify a lowercase local tag name. Unknown tags return `None`.
    pub fn of(tag: &str) -> Option<TagRole> {
        use BlockTag::*;
        use InlineTag::*;

        let role = match tag {
            "p" => TagRole::Block(Paragraph),
            "h1" => TagRole::Block(Heading(1)),
            "h2" => TagRole::Block(Heading(2)),
            "h3" => TagRole::Block(Heading(3)),
            "h4" => TagRole::Block(Heading(4)),
            "h5" => TagRole::Block(Heading(5)),
            "h6" => TagRole::Block(Heading(6)),
            "ul" => TagRole::Block(BulletList),
            "ol" => TagRole::Block(OrderedList),
            "li" => TagRole::Block(ListItem),
            "blockquote" => TagRole::Block(Blockquote),
            "pre" => TagRole::Block(Pre),
            "hr" => TagRole::Block(Rule),

            "br" => TagRole::Inline(Break),
            "img" => TagRole::Inline(Image),
            "b" | "strong" => TagRole::Inline(Mark(MarkKind::Bold)),
            "i" | "em" => TagRole::Inline(Mark(MarkKind::Italic)),
            "u" | "ins" => TagRole::Inline(Mark(MarkKind::Underline)),
            "s" | "del" | "strike" => TagRole::Inline(Mark(MarkKind::Strike)),
            "code" => TagRole::Inline(Mark(MarkKind::Code)),
            "a" => TagRole::Inline(Mark(MarkKind::Link)),
            _ => return None,
        };
        Some(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings() {
        for level in 1..=6u8 {
            assert_eq!(
                TagRole::of(&format!("h{level}")),
                Some(TagRole::Block(BlockTag::Heading(level)))
            );
        }
        assert_eq!(TagRole::of("h7"), None);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(TagRole::of("strong"), TagRole::of("b"));
        assert_eq!(TagRole::of("em"), TagRole::of("i"));
        assert_eq!(TagRole::of("del"), TagRole::of("s"));
        assert_eq!(TagRole::of("strike"), TagRole::of("s"));
        assert_eq!(TagRole::of("ins"), TagRole::of("u"));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(TagRole::of("table"), None);
        assert_eq!(TagRole::of("div"), None);
        assert_eq!(TagRole::of("span"), None);
    }
}
