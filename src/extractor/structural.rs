//! Structural extraction from the forum's `article` markup.
//!
//! The topic starter is `article#topic` (page 1 only); replies are
//! `article` elements with a `post-N` id. Native ad slots reuse the reply
//! markup and are skipped by class.

use dom_query::Selection;

use crate::dom::{self, Document};
use crate::extractor::fields;
use crate::extractor::{first_field, Candidate, Provenance, AD_CLASS};
use crate::normalize::{fold_digits, CleanMode, ContentNormalizer};
use crate::patterns::POST_ID;
use crate::result::Post;

const TOPIC_SELECTOR: &str = "article#topic";

/// True when the page uses the topic/post article markup.
#[must_use]
pub fn has_post_markup(doc: &Document) -> bool {
    doc.select(TOPIC_SELECTOR).exists() || !reply_units(doc).is_empty()
}

fn is_reply_unit(article: &Selection) -> bool {
    dom::get_attribute(article, "id").is_some_and(|id| POST_ID.is_match(&id))
        && !dom::has_class(article, AD_CLASS)
}

/// Reply articles in document order, ads excluded.
#[must_use]
pub fn reply_units<'a>(doc: &'a Document) -> Vec<Selection<'a>> {
    dom::each(&doc.select("article[id]"))
        .into_iter()
        .filter(is_reply_unit)
        .collect()
}

fn clean_block(raw: Option<String>) -> Option<String> {
    let cleaned = ContentNormalizer::new(CleanMode::Lines).clean(&raw?);
    (!cleaned.is_empty()).then_some(cleaned)
}

fn trimmed(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Build a post from one article. Missing fields stay empty.
///
/// Returns `None` unless the post has content or is the topic starter.
#[must_use]
pub fn extract_post(unit: &Selection, is_main_topic: bool) -> Option<Post> {
    let post = Post {
        id: first_field(unit, fields::POST_ID),
        author: trimmed(first_field(unit, fields::AUTHOR)).unwrap_or_default(),
        author_profile: first_field(unit, fields::AUTHOR_PROFILE),
        author_join_date: trimmed(first_field(unit, fields::JOIN_DATE)),
        author_post_count: trimmed(first_field(unit, fields::POST_COUNT)),
        timestamp: trimmed(first_field(unit, fields::TIMESTAMP)),
        content: clean_block(first_field(unit, fields::MESSAGE)).unwrap_or_default(),
        quoted_content: clean_block(first_field(unit, fields::QUOTE)),
        reply_to_id: first_field(unit, fields::REPLY_TO),
        like_count: first_field(unit, fields::LIKES)
            .and_then(|raw| fold_digits(raw.trim()).parse().ok()),
        signature: clean_block(first_field(unit, fields::SIGNATURE)),
        page: 1,
        is_main_topic,
    };
    post.is_extractable().then_some(post)
}

/// Candidates on one page: the topic starter first (page 1 only), then
/// replies in document order.
#[must_use]
pub fn extract_page(doc: &Document, is_first_page: bool) -> Vec<Candidate> {
    let mut posts = Vec::new();

    if is_first_page {
        let topic = doc.select(TOPIC_SELECTOR);
        if let Some(post) = dom::each(&topic).first().and_then(|unit| extract_post(unit, true)) {
            posts.push(post);
        }
    }

    posts.extend(reply_units(doc).iter().filter_map(|unit| extract_post(unit, false)));

    posts
        .into_iter()
        .map(|post| Candidate { post, provenance: Provenance::Container })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <article id="topic">
          <span itemprop="name">استارتر</span>
          <div class="post-message"><p>سوال اصلی تاپیک</p></div>
        </article>
        <article id="post-1">
          <span itemprop="name">Sara</span>
          <div class="post-message"><p>جواب اول</p><p>ادامه جواب</p></div>
          <a class="like-count"><span>۳</span></a>
        </article>
        <article id="post-2" class="topic-post forum-native-ad">
          <div class="post-message">تبلیغ</div>
        </article>
        <article id="post-3"><span itemprop="name">خالی</span></article>
        <article id="comment-4"><div class="post-message">other</div></article>"#;

    #[test]
    fn page_one_starts_with_topic() {
        let doc = dom::parse(PAGE);
        let out = extract_page(&doc, true);
        let ids: Vec<_> = out.iter().map(|c| c.post.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("topic"), Some("post-1")]);
        assert!(out[0].post.is_main_topic);
        assert!(!out[1].post.is_main_topic);
        assert!(out.iter().all(|c| c.provenance == Provenance::Container));
    }

    #[test]
    fn later_pages_skip_topic_article() {
        let doc = dom::parse(PAGE);
        let out = extract_page(&doc, false);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].post.id.as_deref(), Some("post-1"));
    }

    #[test]
    fn reply_fields() {
        let doc = dom::parse(PAGE);
        let out = extract_page(&doc, false);
        let post = &out[0].post;
        assert_eq!(post.author, "Sara");
        assert_eq!(post.content, "جواب اول\nادامه جواب");
        assert_eq!(post.like_count, Some(3));
    }

    #[test]
    fn topic_without_content_is_kept() {
        let doc = dom::parse(r#"<article id="topic"><span itemprop="name">x</span></article>"#);
        let out = extract_page(&doc, true);
        assert_eq!(out.len(), 1);
        assert!(out[0].post.content.is_empty());
    }

    #[test]
    fn detects_post_markup() {
        assert!(has_post_markup(&dom::parse(PAGE)));
        assert!(has_post_markup(&dom::parse(r#"<article id="post-9"></article>"#)));
        assert!(!has_post_markup(&dom::parse("<div>plain</div>")));
    }
}
