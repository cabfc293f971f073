//! Field Rules
//!
//! Ordered lookup rules for each post field. Structural rules target the
//! forum's schema.org markup; scan rules target the looser markup seen by
//! the heuristic strategy. Every rule returns the raw value
//! or `None`; cleaning happens in the caller.

use dom_query::Selection;

use crate::dom;
use crate::extractor::FieldRule;
use crate::patterns::TIMESTAMP_TEXT;

// ============================================================
// STRUCTURAL RULES
// ============================================================

pub static POST_ID: &[FieldRule] = &[element_id];

pub static AUTHOR: &[FieldRule] = &[itemprop_name];

pub static AUTHOR_PROFILE: &[FieldRule] = &[itemprop_url];

pub static JOIN_DATE: &[FieldRule] = &[reg_date];

pub static POST_COUNT: &[FieldRule] = &[post_count];

/// `datepublished` is how the forum spells it; the other two are the
/// schema.org and HTML5 forms.
pub static TIMESTAMP: &[FieldRule] = &[meta_datepublished, meta_date_published, time_datetime];

pub static MESSAGE: &[FieldRule] = &[post_message];

pub static QUOTE: &[FieldRule] = &[reply_message];

pub static REPLY_TO: &[FieldRule] = &[reply_message_id];

pub static LIKES: &[FieldRule] = &[like_count];

pub static SIGNATURE: &[FieldRule] = &[signature];

fn select_text(unit: &Selection, selector: &str) -> Option<String> {
    dom::first_match(unit, selector).and_then(|sel| dom::non_empty_text(&sel))
}

fn select_block_text(unit: &Selection, selector: &str) -> Option<String> {
    let sel = dom::first_match(unit, selector)?;
    let text = dom::block_text(&sel);
    (!text.trim().is_empty()).then_some(text)
}

fn select_attribute(unit: &Selection, selector: &str, name: &str) -> Option<String> {
    dom::first_match(unit, selector).and_then(|sel| dom::non_empty_attribute(&sel, name))
}

#[must_use]
pub fn element_id(unit: &Selection) -> Option<String> {
    dom::non_empty_attribute(unit, "id")
}

#[must_use]
pub fn itemprop_name(unit: &Selection) -> Option<String> {
    select_text(unit, r#"span[itemprop="name"]"#)
}

#[must_use]
pub fn itemprop_url(unit: &Selection) -> Option<String> {
    select_attribute(unit, r#"a[itemprop="url"]"#, "href")
}

#[must_use]
pub fn reg_date(unit: &Selection) -> Option<String> {
    select_text(unit, "div.reg-date")
}

#[must_use]
pub fn post_count(unit: &Selection) -> Option<String> {
    select_text(unit, "div.post-count")
}

#[must_use]
pub fn meta_datepublished(unit: &Selection) -> Option<String> {
    select_attribute(unit, r#"meta[itemprop="datepublished"]"#, "content")
}

#[must_use]
pub fn meta_date_published(unit: &Selection) -> Option<String> {
    select_attribute(unit, r#"meta[itemprop="datePublished"]"#, "content")
}

#[must_use]
pub fn time_datetime(unit: &Selection) -> Option<String> {
    select_attribute(unit, "time[datetime]", "datetime")
}

/// Message body with paragraph breaks preserved.
#[must_use]
pub fn post_message(unit: &Selection) -> Option<String> {
    select_block_text(unit, "div.post-message")
}

const REPLY_MESSAGE: &str = "div.topic-post__quotation div.reply-message";

#[must_use]
pub fn reply_message(unit: &Selection) -> Option<String> {
    select_block_text(unit, REPLY_MESSAGE)
}

#[must_use]
pub fn reply_message_id(unit: &Selection) -> Option<String> {
    select_attribute(unit, REPLY_MESSAGE, "data-id")
}

#[must_use]
pub fn like_count(unit: &Selection) -> Option<String> {
    select_text(unit, "a.like-count span")
}

#[must_use]
pub fn signature(unit: &Selection) -> Option<String> {
    select_block_text(unit, "div.topic-post__signature")
}

// ============================================================
// SCAN RULES
// ============================================================

pub static SCAN_USERNAME: &[FieldRule] = &[username_link, user_profile_link];

pub static SCAN_CONTENT: &[FieldRule] = &[post_content_container];

pub static SCAN_TIMESTAMP: &[FieldRule] = &[timestamp_span, timestamp_in_text];

#[must_use]
pub fn username_link(unit: &Selection) -> Option<String> {
    select_text(unit, "a.username")
}

#[must_use]
pub fn user_profile_link(unit: &Selection) -> Option<String> {
    select_text(unit, r#"a[href*="/user/"]"#)
}

/// First paragraph of a `div` whose class mentions `post-content`, or the
/// whole container when it has no paragraph.
#[must_use]
pub fn post_content_container(unit: &Selection) -> Option<String> {
    let container = dom::each(&unit.select("div[class]"))
        .into_iter()
        .find(|div| dom::class_contains(div, "post-content"))?;
    dom::first_match(&container, "p")
        .and_then(|p| dom::non_empty_text(&p))
        .or_else(|| dom::non_empty_text(&container))
}

#[must_use]
pub fn timestamp_span(unit: &Selection) -> Option<String> {
    select_text(unit, "span.timestamp")
}

#[must_use]
pub fn timestamp_in_text(unit: &Selection) -> Option<String> {
    let text = dom::text_content(unit);
    TIMESTAMP_TEXT.find(&text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::first_field;

    const ARTICLE: &str = r#"
        <article id="post-77">
          <span itemprop="name">  مریم  </span>
          <a itemprop="url" href="/user/55"></a>
          <div class="reg-date">عضویت: 1401/06/16</div>
          <div class="post-count">تعداد پست: 674</div>
          <meta itemprop="datepublished" content="7/4/2023 8:02:48 AM">
          <div class="topic-post__quotation">
            <div class="reply-message" data-id="post-70">متن نقل قول</div>
          </div>
          <div class="post-message"><p>سطر اول</p><p>سطر دوم</p></div>
          <a class="like-count"><span>۱۲</span></a>
          <div class="topic-post__signature">امضا</div>
        </article>"#;

    #[test]
    fn structural_rules_read_schema_markup() {
        let doc = dom::parse(ARTICLE);
        let unit = doc.select("article");
        assert_eq!(first_field(&unit, POST_ID).as_deref(), Some("post-77"));
        assert_eq!(first_field(&unit, AUTHOR).as_deref(), Some("مریم"));
        assert_eq!(first_field(&unit, AUTHOR_PROFILE).as_deref(), Some("/user/55"));
        assert_eq!(first_field(&unit, JOIN_DATE).as_deref(), Some("عضویت: 1401/06/16"));
        assert_eq!(first_field(&unit, POST_COUNT).as_deref(), Some("تعداد پست: 674"));
        assert_eq!(first_field(&unit, TIMESTAMP).as_deref(), Some("7/4/2023 8:02:48 AM"));
        assert_eq!(first_field(&unit, REPLY_TO).as_deref(), Some("post-70"));
        assert_eq!(first_field(&unit, LIKES).as_deref(), Some("۱۲"));
        assert!(first_field(&unit, QUOTE).is_some_and(|q| q.contains("متن نقل قول")));
        assert!(first_field(&unit, SIGNATURE).is_some_and(|s| s.contains("امضا")));
        let message = first_field(&unit, MESSAGE).unwrap_or_default();
        assert!(message.contains("سطر اول") && message.contains("سطر دوم"));
    }

    #[test]
    fn timestamp_falls_back_to_time_element() {
        let doc = dom::parse(r#"<article><time datetime="2023-07-04T08:02">x</time></article>"#);
        let unit = doc.select("article");
        assert_eq!(first_field(&unit, TIMESTAMP).as_deref(), Some("2023-07-04T08:02"));
    }

    #[test]
    fn scan_rules() {
        let doc = dom::parse(
            r#"<div id="u">
                 <a href="/user/9">کاربر</a>
                 <div class="Post-Content"><p>پاراگراف اول</p><p>دوم</p></div>
                 <small>1402/04/13 | 11:32</small>
               </div>"#,
        );
        let unit = doc.select("div#u");
        assert_eq!(first_field(&unit, SCAN_USERNAME).as_deref(), Some("کاربر"));
        assert_eq!(first_field(&unit, SCAN_CONTENT).as_deref(), Some("پاراگراف اول"));
        assert_eq!(first_field(&unit, SCAN_TIMESTAMP).as_deref(), Some("1402/04/13 | 11:32"));
    }

    #[test]
    fn missing_fields_are_none() {
        let doc = dom::parse("<article><p>nothing here</p></article>");
        let unit = doc.select("article");
        for rules in [AUTHOR, TIMESTAMP, MESSAGE, LIKES, SIGNATURE, SCAN_CONTENT] {
            assert!(first_field(&unit, rules).is_none());
        }
    }
}
