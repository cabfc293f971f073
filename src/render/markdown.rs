//! Markdown rendering.
//!
//! A title, a metadata bullet list, then one `## Post #i` section per post.
//! Post text is escaped so forum punctuation is not read as Markdown.

use crate::bidi;
use crate::date;
use crate::render::push_line;
use crate::result::{Post, Thread};

/// Characters that have special meaning in Markdown and need escaping.
const MARKDOWN_SPECIAL_CHARS: &[char] = &['\\', '*', '_', '[', ']', '<', '>', '#', '`'];

/// Escape Markdown special characters in text content.
///
/// # Examples
///
/// ```
/// use rs_ninisite::render::markdown::escape_markdown;
///
/// assert_eq!(escape_markdown("*not italic*"), r"\*not italic\*");
/// assert_eq!(escape_markdown("user_name"), r"user\_name");
/// ```
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 4);
    for ch in text.chars() {
        if MARKDOWN_SPECIAL_CHARS.contains(&ch) {
            result.push('\\');
        }
        result.push(ch);
    }
    result
}

fn push_paragraphs(out: &mut String, text: &str, prefix: &str) {
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        push_line(out, &format!("{prefix}{}", escape_markdown(line)));
        if prefix.is_empty() {
            push_line(out, "");
        }
    }
}

fn metadata_list(out: &mut String, thread: &Thread) {
    push_line(out, &format!("- **Topic ID:** {}", thread.topic_id_or_unknown()));
    push_line(out, &format!("- **URL:** <{}>", thread.source_url));
    if let Some(author) = thread.author.as_deref().filter(|a| !a.is_empty()) {
        push_line(out, &format!("- **Author:** {}", bidi::wrap(author)));
    }
    if let Some(published) = thread.published.as_deref() {
        push_line(out, &format!("- **Published:** {}", date::normalize(published)));
    }
    if let Some(views) = thread.views {
        push_line(out, &format!("- **Views:** {views}"));
    }
    if !thread.categories.is_empty() {
        push_line(out, &format!("- **Categories:** {}", thread.categories.join(" > ")));
    }
    push_line(out, &format!("- **Pages:** {}", thread.total_pages()));
    push_line(out, &format!("- **Posts:** {}", thread.total_posts()));
    push_line(out, &format!("- **Unique authors:** {}", thread.unique_author_count()));
    push_line(out, &format!("- **Scraped:** {}", date::normalize_local(&thread.scraped_at)));
    push_line(out, "");
}

fn post_section(out: &mut String, index: usize, post: &Post) {
    let label = if post.is_main_topic { " (topic)" } else { "" };
    push_line(out, &format!("## Post #{index}{label}"));
    push_line(out, "");
    push_line(out, &format!("**User:** {}", escape_markdown(&bidi::wrap(post.display_author()))));
    if let Some(ts) = post.timestamp.as_deref() {
        push_line(out, "");
        push_line(out, &format!("**Timestamp:** {}", date::normalize(ts)));
    }
    if let Some(likes) = post.like_count.filter(|n| *n > 0) {
        push_line(out, "");
        push_line(out, &format!("**Likes:** {likes}"));
    }
    push_line(out, "");

    if let Some(quote) = post.quoted_content.as_deref() {
        push_paragraphs(out, quote, "> ");
        push_line(out, "");
    }
    push_paragraphs(out, &post.content, "");

    if let Some(signature) = post.signature.as_deref() {
        push_line(out, "---");
        push_line(out, "");
        push_paragraphs(out, signature, "");
    }
}

/// Render the whole thread.
#[must_use]
pub fn render(thread: &Thread) -> String {
    let mut out = String::new();
    push_line(&mut out, &format!("# {}", thread.title_or_default()));
    push_line(&mut out, "");
    metadata_list(&mut out, thread);
    for (i, post) in thread.posts.iter().enumerate() {
        post_section(&mut out, i + 1, post);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn thread() -> Thread {
        Thread {
            title: None,
            topic_id: None,
            source_url: "https://www.ninisite.com/discussion".into(),
            categories: vec![],
            author: None,
            published: None,
            views: None,
            scraped_at: NaiveDateTime::default(),
            posts: vec![
                Post { content: "سوال *مهم*".into(), page: 1, is_main_topic: true, ..Post::default() },
                Post {
                    author: "Ali_R".into(),
                    timestamp: Some("1402/04/13 | 11:32".into()),
                    quoted_content: Some("سوال".into()),
                    content: "جواب".into(),
                    page: 1,
                    ..Post::default()
                },
            ],
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_markdown("a [b] <c>"), r"a \[b\] \<c\>");
        assert_eq!(escape_markdown("سلام"), "سلام");
    }

    #[test]
    fn test_escape_persian_with_symbols() {
        assert_eq!(escape_markdown("#سوال `کد` مهم"), r"\#سوال \`کد\` مهم");
        assert_eq!(escape_markdown("نام_کاربر <سلام>"), r"نام\_کاربر \<سلام\>");
    }

    #[test]
    fn test_hash_in_post_is_not_a_heading() {
        let mut t = thread();
        t.posts[1].content = "# تیتر نیست\n`کد` در متن".into();
        let md = render(&t);
        assert!(md.contains("\n\\# تیتر نیست\n\n\\`کد\\` در متن\n"));
        assert!(!md.contains("\n# تیتر"));
    }

    #[test]
    fn test_layout() {
        let md = render(&thread());
        assert!(md.starts_with("# Ninisite Post\n\n- **Topic ID:** unknown\n"));
        assert!(md.contains("## Post #1 (topic)\n\n**User:** Unknown\n"));
        assert!(md.contains(r"سوال \*مهم\*"));
        assert!(md.contains("## Post #2\n\n**User:** Ali\\_R\n"));
        assert!(md.contains("**Timestamp:** jalali:1402/04/13 | 11:32\n"));
        assert!(md.contains("> سوال\n\nجواب\n"));
    }
}
