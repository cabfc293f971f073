//! Thread Metadata Extraction
//!
//! Reads page-1 metadata: title, topic starter, publish date, view counter
//! and the breadcrumb trail. Every field is optional; a bare page yields an
//! all-`None` record and the title falls back to the URL slug.

use crate::dom::{self, Document};
use crate::normalize::fold_digits;
use crate::patterns::DIGITS;
use crate::url_utils;

const TITLE_SELECTOR: &str = "h1.topic-title";
const TOPIC_SELECTOR: &str = "article#topic";
const BREADCRUMB_ITEMS: &str = r#"ol[itemtype="http://schema.org/BreadcrumbList"] li[itemprop="itemListElement"]"#;

/// Metadata found on the first page of a thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub published: Option<String>,
    pub views: Option<u64>,
    /// Breadcrumb names without the leading forum root.
    pub categories: Vec<String>,
}

/// Topic title, preferring the link text inside the heading.
#[must_use]
pub fn extract_title(doc: &Document) -> Option<String> {
    let heading = dom::each(&doc.select(TITLE_SELECTOR)).into_iter().next()?;
    dom::first_match(&heading, "a")
        .and_then(|link| dom::non_empty_text(&link))
        .or_else(|| dom::non_empty_text(&heading))
}

/// Author, publish date and views from the topic article.
#[must_use]
pub fn extract_topic_header(doc: &Document) -> (Option<String>, Option<String>, Option<u64>) {
    let Some(topic) = dom::each(&doc.select(TOPIC_SELECTOR)).into_iter().next() else {
        return (None, None, None);
    };

    let author = dom::first_match(&topic, r#"span[itemprop="name"]"#)
        .and_then(|sel| dom::non_empty_text(&sel));
    let published = dom::first_match(&topic, r#"meta[itemprop="datepublished"]"#)
        .and_then(|sel| dom::non_empty_attribute(&sel, "content"));
    let views = dom::first_match(&topic, r#"meta[itemprop="userInteractionCount"]"#)
        .and_then(|sel| dom::non_empty_attribute(&sel, "content"))
        .and_then(|raw| {
            let raw = fold_digits(&raw).replace(',', "");
            DIGITS.find(&raw).and_then(|m| m.as_str().parse().ok())
        });

    (author, published, views)
}

/// Breadcrumb category names, skipping the first (site root) entry.
#[must_use]
pub fn extract_categories(doc: &Document) -> Vec<String> {
    dom::each(&doc.select(BREADCRUMB_ITEMS))
        .iter()
        .filter_map(|item| {
            dom::first_match(item, r#"span[itemprop="name"]"#).and_then(|sel| dom::non_empty_text(&sel))
        })
        .skip(1)
        .collect()
}

/// All page-1 metadata. `url` supplies the title when the page has none.
#[must_use]
pub fn extract_thread_metadata(doc: &Document, url: Option<&str>) -> ThreadMetadata {
    let (author, published, views) = extract_topic_header(doc);
    ThreadMetadata {
        title: extract_title(doc).or_else(|| url.and_then(url_utils::slug_title)),
        author,
        published,
        views,
        categories: extract_categories(doc),
    }
}
