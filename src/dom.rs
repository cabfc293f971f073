//! DOM Operations Adapter
//!
//! Thin helpers over `dom_query` used by the field rules: attribute and class
//! lookups that return owned values, first-match queries, and text
//! extraction that keeps paragraph breaks.

use std::sync::LazyLock;

use regex::Regex;

// Re-export core types for external use
pub use dom_query::{Document, Selection};
pub use tendril::StrTendril;

/// Closing block tags and `<br>`, after which a line break is inserted.
#[allow(clippy::expect_used)]
static BLOCK_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(?:p|div|li|blockquote|h[1-6]|tr)\s*>").expect("valid regex")
});

/// Parse an HTML document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attributes ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Attribute value, trimmed, `None` when blank.
#[must_use]
pub fn non_empty_attribute(sel: &Selection, name: &str) -> Option<String> {
    get_attribute(sel, name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// True when the class list contains `class` as a whole token.
#[must_use]
pub fn has_class(sel: &Selection, class: &str) -> bool {
    sel.attr("class")
        .is_some_and(|c| c.split_whitespace().any(|token| token == class))
}

/// True when the class attribute contains `needle`, ignoring ASCII case.
#[must_use]
pub fn class_contains(sel: &Selection, needle: &str) -> bool {
    sel.attr("class")
        .is_some_and(|c| c.to_ascii_lowercase().contains(&needle.to_ascii_lowercase()))
}

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

// === Querying ===

/// First descendant matching `selector`, if any.
#[must_use]
pub fn first_match<'a>(sel: &Selection<'a>, selector: &str) -> Option<Selection<'a>> {
    let found = sel.select_single(selector);
    found.exists().then_some(found)
}

/// Each element of a multi-node selection, in document order.
#[must_use]
pub fn each<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    sel.nodes().iter().map(|node| Selection::from(*node)).collect()
}

// === Text Content ===

/// Get all text content of node and descendants
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Text content, trimmed, `None` when blank.
#[must_use]
pub fn non_empty_text(sel: &Selection) -> Option<String> {
    let text = sel.text();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Text content with a line break after every block element and `<br>`.
#[must_use]
pub fn block_text(sel: &Selection) -> String {
    let html = sel.inner_html();
    let marked = BLOCK_BREAK.replace_all(&html, "$0\n");
    let fragment = Document::from(&*marked);
    fragment.select("body").text().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_helpers() {
        let doc = parse(r#"<div id="x" class="post-message Main" data-id=" 7 " title=" "></div>"#);
        let div = doc.select("div");
        assert_eq!(get_attribute(&div, "id").as_deref(), Some("x"));
        assert_eq!(non_empty_attribute(&div, "data-id").as_deref(), Some("7"));
        assert!(non_empty_attribute(&div, "title").is_none());
        assert!(get_attribute(&div, "missing").is_none());
    }

    #[test]
    fn test_class_matching() {
        let doc = parse(r#"<div class="topic-post forum-native-ad"></div><p class="Post-Content-Box"></p>"#);
        let div = doc.select("div");
        assert!(has_class(&div, "forum-native-ad"));
        assert!(!has_class(&div, "forum-native"));
        assert!(class_contains(&doc.select("p"), "post-content"));
    }

    #[test]
    fn test_tag_name() {
        let doc = parse("<article><span>x</span></article>");
        assert_eq!(tag_name(&doc.select("span")).as_deref(), Some("span"));
    }

    #[test]
    fn test_first_match_and_each() {
        let doc = parse(r#"<div><p>one</p><p>two</p></div>"#);
        let root = doc.select("div");
        let first = first_match(&root, "p");
        assert_eq!(first.as_ref().and_then(non_empty_text).as_deref(), Some("one"));
        assert!(first_match(&root, "table").is_none());
        assert_eq!(each(&doc.select("p")).len(), 2);
    }

    #[test]
    fn test_non_empty_text() {
        let doc = parse("<p>  </p><span> hi </span>");
        assert!(non_empty_text(&doc.select("p")).is_none());
        assert_eq!(non_empty_text(&doc.select("span")).as_deref(), Some("hi"));
    }

    #[test]
    fn test_block_text_keeps_breaks() {
        let doc = parse(r#"<div class="m"><p>اول</p><p>دوم<br>سوم</p></div>"#);
        let text = block_text(&doc.select("div.m"));
        let lines: Vec<_> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, vec!["اول", "دوم", "سوم"]);
    }
}
