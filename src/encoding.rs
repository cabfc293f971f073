//! Character encoding detection for saved or fetched pages.
//!
//! Order of precedence: byte-order mark, `<meta charset>` /
//! `http-equiv` declaration in the first kilobyte, then UTF-8.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// `charset=` inside any `<meta>` tag, covering both declaration styles.
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([A-Za-z0-9_\-:.]+)"#).expect("valid regex")
});

const SNIFF_LEN: usize = 1024;

/// Encoding declared by the page, UTF-8 if none is recognizable.
#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(SNIFF_LEN)]);
    META_CHARSET
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode page bytes to UTF-8, replacing malformed sequences.
#[must_use]
pub fn decode_page(bytes: &[u8]) -> String {
    let encoding = detect_encoding(bytes);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}
