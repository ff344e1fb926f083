//! Character encoding detection for configuration documents.
//!
//! The encoding is taken from a byte order mark when present, otherwise from
//! the first bytes of the document (UTF-16 without BOM) or the `encoding`
//! pseudo-attribute of the XML declaration. Without any of those the document
//! is UTF-8.

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use std::borrow::Cow;

/// Decode document bytes into text.
///
/// # Errors
/// Returns the reason when the declared encoding is unknown or the bytes are
/// not valid in the detected encoding.
pub(crate) fn decode_document(bytes: &[u8]) -> Result<Cow<'_, str>, String> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (detect_encoding(bytes)?, bytes),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| format!("content is not valid {}", encoding.name()))
}

fn detect_encoding(bytes: &[u8]) -> Result<&'static Encoding, String> {
    match bytes {
        [0x00, b'<', 0x00, b'?', ..] => return Ok(UTF_16BE),
        [b'<', 0x00, b'?', 0x00, ..] => return Ok(UTF_16LE),
        _ => {}
    }

    let Some(label) = declared_encoding(bytes) else {
        return Ok(UTF_8);
    };

    let encoding = Encoding::for_label_no_replacement(label).ok_or_else(|| {
        format!("unsupported encoding '{}'", String::from_utf8_lossy(label))
    })?;

    // A UTF-16 declaration in a document whose bytes are ASCII-compatible
    // can't be honored.
    if encoding.is_ascii_compatible() {
        Ok(encoding)
    } else {
        Err(format!(
            "document declares {} but is not encoded that way",
            encoding.name()
        ))
    }
}

/// Value of the `encoding` pseudo-attribute in a leading `<?xml ...?>` declaration.
fn declared_encoding(bytes: &[u8]) -> Option<&[u8]> {
    let decl = bytes.strip_prefix(b"<?xml")?;
    let end = decl.windows(2).position(|w| w == b"?>")?;
    let decl = &decl[..end];

    let start = decl.windows(8).position(|w| w == b"encoding")? + 8;
    let rest = decl[start..].trim_ascii_start().strip_prefix(b"=")?.trim_ascii_start();

    let (&quote, value) = rest.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let len = value.iter().position(|&b| b == quote)?;
    Some(&value[..len])
}
