//! URL Utility Functions
//!
//! Topic identifiers, title slugs and page addresses derived from a thread
//! URL such as `https://www.ninisite.com/discussion/topic/123/some-title`.

use std::borrow::Cow;

use url::Url;

use crate::error::{Error, Result};
use crate::patterns::PAGE_PARAM;
use crate::render::RenderFormat;

/// Placeholder used where a topic id is shown but the URL has none.
pub const UNKNOWN_TOPIC: &str = "unknown";

fn path_segments(url: &str) -> Vec<String> {
    match Url::parse(url.trim()) {
        Ok(parsed) => parsed
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).map(str::to_string).collect())
            .unwrap_or_default(),
        // Relative or schemeless input: fall back to splitting the path by hand.
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|seg| !seg.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

fn is_topic_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Numeric topic id: the first all-digit path segment.
///
/// # Errors
///
/// Returns [`Error::MalformedUrl`] when no path segment is numeric.
pub fn topic_id(url: &str) -> Result<String> {
    path_segments(url)
        .into_iter()
        .find(|seg| is_topic_segment(seg))
        .ok_or_else(|| Error::MalformedUrl(url.to_string()))
}

/// Topic id, or [`UNKNOWN_TOPIC`].
#[must_use]
pub fn topic_id_or_unknown(url: &str) -> String {
    topic_id(url).unwrap_or_else(|_| UNKNOWN_TOPIC.to_string())
}

/// Human-readable title from the path segment after the topic id.
///
/// Percent-escapes are decoded and `-` becomes a space.
#[must_use]
pub fn slug_title(url: &str) -> Option<String> {
    let segments = path_segments(url);
    let idx = segments.iter().position(|seg| is_topic_segment(seg))?;
    let slug = segments.get(idx + 1)?;
    let decoded = urlencoding::decode(slug).unwrap_or(Cow::Borrowed(slug.as_str()));
    let title = decoded.replace('-', " ").trim().to_string();
    (!title.is_empty()).then_some(title)
}

/// Address of page `n` of the thread at `base`. Page 1 is `base` itself.
#[must_use]
pub fn page_url(base: &str, n: usize) -> String {
    if n <= 1 {
        return base.to_string();
    }
    if PAGE_PARAM.is_match(base) {
        return PAGE_PARAM.replace(base, format!("page={n}")).into_owned();
    }
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}page={n}")
}

/// Output filename for a thread: `ninisite_topic_{id}.{ext}`.
///
/// # Errors
///
/// Returns [`Error::MalformedUrl`] when the URL has no topic id.
pub fn default_filename(url: &str, format: RenderFormat) -> Result<String> {
    let id = topic_id(url)?;
    Ok(format!("ninisite_topic_{id}.{}", format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.ninisite.com/discussion/topic/123456/%D8%B3%D9%84%D8%A7%D9%85-%D8%AF%D9%88%D8%B3%D8%AA%D8%A7%D9%86";

    #[test]
    fn test_topic_id() {
        assert_eq!(topic_id(URL).ok().as_deref(), Some("123456"));
        assert_eq!(topic_id("/discussion/topic/42").ok().as_deref(), Some("42"));
        assert!(matches!(topic_id("https://www.ninisite.com/discussion"), Err(Error::MalformedUrl(_))));
        assert_eq!(topic_id_or_unknown("not a url"), "unknown");
    }

    #[test]
    fn test_slug_title() {
        assert_eq!(slug_title(URL).as_deref(), Some("سلام دوستان"));
        assert_eq!(slug_title("https://www.ninisite.com/discussion/topic/123456"), None);
    }

    #[test]
    fn test_page_url() {
        let base = "https://www.ninisite.com/discussion/topic/1/t";
        assert_eq!(page_url(base, 1), base);
        assert_eq!(page_url(base, 3), format!("{base}?page=3"));
        assert_eq!(page_url(&format!("{base}?sort=asc"), 2), format!("{base}?sort=asc&page=2"));
        assert_eq!(page_url(&format!("{base}?page=2"), 5), format!("{base}?page=5"));
    }

    #[test]
    fn test_default_filename() {
        assert_eq!(
            default_filename(URL, RenderFormat::Org).ok().as_deref(),
            Some("ninisite_topic_123456.org")
        );
        assert_eq!(
            default_filename(URL, RenderFormat::Markdown).ok().as_deref(),
            Some("ninisite_topic_123456.md")
        );
        assert!(default_filename("https://example.com/", RenderFormat::Json).is_err());
    }
}
