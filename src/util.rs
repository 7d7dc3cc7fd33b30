//! Small helpers shared by the importer and the FB2 backend.

use std::borrow::Cow;

use encoding_rs::Encoding;
use percent_encoding::percent_decode_str;

use crate::error::{Error, Result};

// ============================================================================
// Encoding Detection
// ============================================================================

/// Decode HTML bytes to a string.
///
/// The encoding is picked in this order: byte order mark, `<meta charset>`
/// hint from the first kilobyte, then UTF-8. A hint naming an encoding that
/// is not ASCII compatible (UTF-16) is ignored, as browsers do. Bytes that are not valid in the
/// picked encoding are reported as [`Error::MalformedHtml`] instead of being
/// replaced silently.
///
/// # Examples
///
/// ```
/// use ranobe::util::decode_html;
///
/// assert_eq!(decode_html("<p>Привет</p>".as_bytes()).unwrap(), "<p>Привет</p>");
/// assert!(decode_html(b"<p>\xff\xfe\xfd</p>").is_err());
/// ```
pub fn decode_html(bytes: &[u8]) -> Result<Cow<'_, str>> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| {
            extract_meta_charset(bytes)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
                .filter(|encoding| encoding.is_ascii_compatible())
        })
        .unwrap_or(encoding_rs::UTF_8);

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(Error::MalformedHtml(format!(
            "input is not valid {}",
            used.name()
        )));
    }
    Ok(text)
}

/// Extract the charset label from a `<meta charset="...">` or
/// `<meta http-equiv="Content-Type" content="...; charset=...">` tag.
///
/// Only the first 1024 bytes are checked.
pub fn extract_meta_charset(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(1024)];
    let pos = prefix
        .windows(8)
        .position(|w| w.eq_ignore_ascii_case(b"charset="))?;
    let rest = &prefix[pos + 8..];
    let rest = match rest.first() {
        Some(b'"') | Some(b'\'') => &rest[1..],
        _ => rest,
    };
    let end = rest
        .iter()
        .position(|&b| matches!(b, b'"' | b'\'' | b';' | b'>' | b'/') || b.is_ascii_whitespace())
        .unwrap_or(rest.len());

    std::str::from_utf8(&rest[..end])
        .ok()
        .filter(|label| !label.is_empty())
}

// ============================================================================
// Image Resources
// ============================================================================

/// Attachment id for an image source: the file base name without its
/// extension.
///
/// Works on both local paths and URLs; query strings and fragments are
/// ignored and percent escapes are decoded.
///
/// ```
/// use ranobe::util::image_id;
///
/// assert_eq!(image_id("/cache/images/cover.png"), "cover");
/// assert_eq!(image_id("https://cdn.example/a/b%20c.jpg?w=800"), "b c");
/// assert_eq!(image_id("image0"), "image0");
/// ```
pub fn image_id(src: &str) -> String {
    let path = src.split(['?', '#']).next().unwrap_or(src);
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    };
    percent_decode_str(stem).decode_utf8_lossy().into_owned()
}

/// Content type recorded for an embedded image.
///
/// FictionBook readers only reliably handle PNG and JPEG, so everything
/// that is not a `.png` file is declared as JPEG.
pub fn image_content_type(path: &str) -> &'static str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    if path.to_ascii_lowercase().ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    }
}

// ============================================================================
// Date Utilities
// ============================================================================

/// Truncate an ISO date/timestamp to just the date portion (YYYY-MM-DD).
pub fn truncate_to_date(s: &str) -> &str {
    match s.find('T') {
        Some(t_pos) => &s[..t_pos],
        None => s,
    }
}

// ============================================================================
// Tests
// ============================================================================
