//! Image source rewriting.
//!
//! The only mutation a tree sees after parsing: every image's remote locator
//! is replaced with a local resource reference supplied by the caller.

use log::debug;

use crate::error::{AttrOwner, Error, Result};

use super::{Node, NodeKind};

/// Resolves a remote image locator to a local resource reference.
///
/// `index` counts images from zero in document order. Closures of the shape
/// `FnMut(usize, &str) -> Result<String>` implement this trait.
pub trait ImageResolver {
    fn resolve(&mut self, index: usize, locator: &str) -> Result<String>;
}

impl<F> ImageResolver for F
where
    F: FnMut(usize, &str) -> Result<String>,
{
    fn resolve(&mut self, index: usize, locator: &str) -> Result<String> {
        self(index, locator)
    }
}

impl Node {
    /// Rewrite every image source in place through `resolver`.
    ///
    /// Images are visited depth-first in document order. The tree shape and
    /// node kinds are left untouched. Returns the number of rewritten images.
    pub fn localize_images<R: ImageResolver + ?Sized>(&mut self, resolver: &mut R) -> Result<usize> {
        let mut index = 0;
        self.localize_with(resolver, &mut index)?;
        Ok(index)
    }

    fn localize_with<R: ImageResolver + ?Sized>(
        &mut self,
        resolver: &mut R,
        index: &mut usize,
    ) -> Result<()> {
        if let Node::Image { attrs } = self {
            let locator = attrs.locator().ok_or(Error::MissingAttribute {
                kind: AttrOwner::Node(NodeKind::Image),
                attr: "src",
            })?;
            let local = resolver.resolve(*index, locator)?;
            debug!("image {index}: {locator} -> {local}");
            attrs.src = Some(local);
            *index += 1;
            return Ok(());
        }

        if let Some(content) = self.content_mut() {
            for child in content {
                child.localize_with(resolver, index)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageAttrs;

    fn sample() -> Node {
        Node::document(vec![
            Node::image("https://cdn.example/a.jpg"),
            Node::paragraph(vec![
                Node::text("before"),
                Node::image("https://cdn.example/b.png"),
            ]),
            Node::bullet_list(vec![Node::list_item(vec![Node::paragraph(vec![
                Node::image("https://cdn.example/c.gif"),
            ])])]),
        ])
    }

    #[test]
    fn test_rewrites_in_document_order() {
        let mut doc = sample();
        let mut seen = Vec::new();
        let count = doc
            .localize_images(&mut |index: usize, locator: &str| -> Result<String> {
                seen.push((index, locator.to_string()));
                Ok(format!("/cache/image{index}"))
            })
            .unwrap();

        assert_eq!(count, 3);
        assert_eq!(
            seen,
            vec![
                (0, "https://cdn.example/a.jpg".to_string()),
                (1, "https://cdn.example/b.png".to_string()),
                (2, "https://cdn.example/c.gif".to_string()),
            ]
        );
        assert_eq!(doc.content()[0].image_src().unwrap(), "/cache/image0");
        assert_eq!(
            doc.content()[1].content()[1].image_src().unwrap(),
            "/cache/image1"
        );
    }

    #[test]
    fn test_shape_is_preserved() {
        let mut doc = sample();
        doc.localize_images(&mut |_: usize, _: &str| -> Result<String> { Ok("local".to_string()) })
            .unwrap();

        let kinds = |n: &Node| n.content().iter().map(Node::kind).collect::<Vec<_>>();
        assert_eq!(kinds(&doc), kinds(&sample()));
        assert_eq!(kinds(&doc.content()[1]), kinds(&sample().content()[1]));
    }

    #[test]
    fn test_uses_candidate_locator() {
        let mut attrs = ImageAttrs::default();
        attrs
            .extra
            .insert("images".to_string(), serde_json::json!([{ "image": "cand" }]));
        let mut doc = Node::document(vec![Node::Image { attrs }]);

        doc.localize_images(&mut |_: usize, locator: &str| -> Result<String> {
                Ok(format!("{locator}.jpg"))
            })
            .unwrap();
        assert_eq!(doc.content()[0].image_src().unwrap(), "cand.jpg");
    }

    #[test]
    fn test_resolver_failure_aborts() {
        let mut doc = sample();
        let err = doc
            .localize_images(&mut |index: usize, locator: &str| -> Result<String> {
                if index == 1 {
                    Err(Error::ImageResolution {
                        locator: locator.to_string(),
                        reason: "not found".to_string(),
                    })
                } else {
                    Ok("ok".to_string())
                }
            })
            .unwrap_err();
        assert!(matches!(err, Error::ImageResolution { .. }));
    }

    #[test]
    fn test_missing_locator() {
        let mut doc = Node::document(vec![Node::Image {
            attrs: ImageAttrs::default(),
        }]);
        let err = doc
            .localize_images(&mut |_: usize, _: &str| -> Result<String> { Ok(String::new()) })
            .unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { attr: "src", .. }));
    }
}
