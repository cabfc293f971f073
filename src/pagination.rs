//! Pagination discovery on thread pages.
//!
//! Used by page sources to know how many pages to expect and where the next
//! one lives. Nothing here performs I/O.

use url::Url;

use crate::dom::{self, Document};
use crate::normalize::fold_digits;
use crate::patterns::{PAGE_COUNT_TEXT, PAGE_PARAM};

const PAGINATION_SELECTOR: &str = "ul.pagination";
const NEXT_LINK_SELECTOR: &str = r#"ul.pagination a[title="Next page"]"#;

/// `N` from a `page=N` query parameter.
#[must_use]
pub fn page_param(href: &str) -> Option<usize> {
    PAGE_PARAM.captures(href)?.get(1)?.as_str().parse().ok()
}

fn digit_text(text: &str) -> Option<usize> {
    let text = text.trim();
    if text.is_empty() || !text.chars().all(char::is_numeric) {
        return None;
    }
    fold_digits(text).parse().ok()
}

/// Highest page number advertised by the page, at least 1.
///
/// Looks at the pagination list first (link targets and numeric link
/// labels), then any `page=N` link, then an `N صفحه` mention in the text.
#[must_use]
pub fn detect_total_pages(doc: &Document) -> usize {
    let pagination = doc.select(PAGINATION_SELECTOR);
    if pagination.exists() {
        return dom::each(&pagination.select("a"))
            .iter()
            .flat_map(|link| {
                let from_href = dom::get_attribute(link, "href").and_then(|h| page_param(&h));
                let from_text = digit_text(&dom::text_content(link));
                [from_href, from_text]
            })
            .flatten()
            .fold(1, usize::max);
    }

    let from_links = dom::each(&doc.select("a[href]"))
        .iter()
        .filter_map(|link| dom::get_attribute(link, "href").and_then(|h| page_param(&h)))
        .max();
    if let Some(max_page) = from_links {
        return max_page.max(1);
    }

    let body = dom::text_content(&doc.select("body"));
    PAGE_COUNT_TEXT
        .captures(&body)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .and_then(|m| m.as_str().parse().ok())
        .map_or(1, |n: usize| n.max(1))
}

/// Absolute URL of the "Next page" link, resolved against `base`.
#[must_use]
pub fn next_page_url(doc: &Document, base: &Url) -> Option<Url> {
    let link = dom::each(&doc.select(NEXT_LINK_SELECTOR)).into_iter().next()?;
    let href = dom::non_empty_attribute(&link, "href")?;
    if href == "#" {
        return None;
    }
    base.join(&href).ok()
}
