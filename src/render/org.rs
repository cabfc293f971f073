//! Org-mode rendering.
//!
//! Layout: a `#+TITLE` line, one top-level heading carrying the thread's
//! property drawer, then one heading per post. With pagination on, posts sit
//! under `** [[url][Nth Page]]` headings.

use std::collections::BTreeMap;

use crate::bidi;
use crate::date;
use crate::render::{push_line, push_text_lines};
use crate::result::{strip_post_prefix, Post, Thread};
use crate::url_utils;

/// `1st`, `2nd`, `3rd`, then `Nth`.
#[must_use]
pub fn page_ordinal(page: usize) -> String {
    match page {
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        n => format!("{n}th"),
    }
}

fn property(out: &mut String, name: &str, value: impl std::fmt::Display) {
    push_line(out, &format!(":{name}: {value}"));
}

fn thread_header(out: &mut String, thread: &Thread) {
    let title = thread.title_or_default();
    push_line(out, &format!("#+TITLE: {title}"));
    push_line(out, "");

    push_line(out, &format!("* {title}"));
    push_line(out, ":PROPERTIES:");
    property(out, "TOPIC_ID", thread.topic_id_or_unknown());
    property(out, "ORIGINAL_URL", &thread.source_url);
    property(out, "SCRAPE_DATE", date::normalize_local(&thread.scraped_at));
    property(out, "TOTAL_PAGES", thread.total_pages());
    property(out, "UNIQUE_AUTHORS", thread.unique_author_count());
    if let Some(author) = thread.author.as_deref().filter(|a| !a.is_empty()) {
        property(out, "AUTHOR", author);
    }
    if let Some(published) = thread.published.as_deref().filter(|p| !p.is_empty()) {
        property(out, "DATE", published);
    }
    if let Some(views) = thread.views.filter(|v| *v > 0) {
        property(out, "VIEWS", views);
    }
    if !thread.categories.is_empty() {
        property(out, "CATEGORIES", thread.categories.join(" > "));
    }
    property(out, "TOTAL_POSTS", thread.total_posts());
    push_line(out, ":END:");
    push_line(out, "");
}

/// `@likes/N name (join, count posts) [jalali:...]`, without the stars.
#[must_use]
pub fn post_heading(post: &Post) -> String {
    let mut parts = Vec::with_capacity(4);
    if let Some(likes) = post.like_count.filter(|n| *n > 0) {
        parts.push(format!("@likes/{likes}"));
    }
    parts.push(bidi::wrap(post.display_author()));
    if let (Some(joined), Some(count)) = (post.join_date(), post.post_count()) {
        parts.push(format!("({joined}, {count} posts)"));
    }
    let stamp = date::normalize(post.timestamp.as_deref().unwrap_or_default());
    parts.push(format!("[{stamp}]"));
    parts.join(" ")
}

fn post_block(out: &mut String, post: &Post, level: usize) {
    push_line(out, &format!("{} {}", "*".repeat(level), post_heading(post)));

    push_line(out, ":PROPERTIES:");
    if let Some(id) = post.anchor_id() {
        property(out, "CUSTOM_ID", id);
    }
    if !post.author.is_empty() {
        property(out, "AUTHOR", &post.author);
    }
    if let Some(ts) = &post.timestamp {
        property(out, "DATE", ts);
    }
    if let Some(joined) = &post.author_join_date {
        property(out, "AUTHOR_JOIN_DATE", joined);
    }
    if let Some(count) = &post.author_post_count {
        property(out, "AUTHOR_POST_COUNT", count);
    }
    if let Some(likes) = post.like_count {
        property(out, "LIKES", likes);
    }
    property(out, "PAGE", post.page);
    if let Some(reply_to) = &post.reply_to_id {
        property(out, "REPLY_TO_ID", reply_to);
    }
    push_line(out, ":END:");

    if let Some(reply_to) = &post.reply_to_id {
        push_line(out, &format!("- [[#{}][In Reply To]]", strip_post_prefix(reply_to)));
        push_line(out, "");
    }

    if let Some(quote) = post.quoted_content.as_deref().filter(|q| !q.trim().is_empty()) {
        push_line(out, "#+begin_quote");
        push_text_lines(out, quote);
        push_line(out, "#+end_quote");
        push_line(out, "");
    }

    if !post.content.is_empty() {
        push_text_lines(out, &post.content);
        push_line(out, "");
    }

    if let Some(signature) = post.signature.as_deref().filter(|s| !s.trim().is_empty()) {
        push_line(out, &format!("{} Signature:", "*".repeat(level + 1)));
        push_text_lines(out, signature);
        push_line(out, "");
    }
}

/// Render the whole thread.
#[must_use]
pub fn render(thread: &Thread, paginate: bool) -> String {
    let mut out = String::new();
    thread_header(&mut out, thread);

    if paginate {
        let mut by_page: BTreeMap<usize, Vec<&Post>> = BTreeMap::new();
        for post in &thread.posts {
            by_page.entry(post.page).or_default().push(post);
        }
        for (page, posts) in by_page {
            let url = url_utils::page_url(&thread.source_url, page);
            push_line(&mut out, &format!("** [[{url}][{} Page]]", page_ordinal(page)));
            for post in posts {
                post_block(&mut out, post, 3);
            }
        }
    } else {
        for post in &thread.posts {
            post_block(&mut out, post, 2);
        }
    }

    out
}
