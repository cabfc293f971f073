//! Result types for thread extraction.
//!
//! A [`Thread`] is the format-neutral output of the assembler: page-1
//! metadata plus the ordered, de-duplicated [`Post`] list. Renderers consume
//! it; it can always be serialized on its own.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::normalize::fold_digits;
use crate::patterns::{DIGITS, SLASH_DATE};

/// One forum message: the main topic or a reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Markup identifier such as `post-123`, unique within a thread.
    pub id: Option<String>,

    /// Display name. Empty when the page did not show one.
    pub author: String,

    /// Link to the author's profile.
    pub author_profile: Option<String>,

    /// Raw join-date label, e.g. `عضویت: 1401/06/16`.
    pub author_join_date: Option<String>,

    /// Raw post-count label, e.g. `تعداد پست: 674`.
    pub author_post_count: Option<String>,

    /// Source-locale timestamp, unparsed.
    pub timestamp: Option<String>,

    /// Normalized body text.
    pub content: String,

    /// Text of the post being replied to.
    pub quoted_content: Option<String>,

    /// Identifier of the post being replied to.
    pub reply_to_id: Option<String>,

    /// Number of likes.
    pub like_count: Option<u32>,

    /// Trailing signature block.
    pub signature: Option<String>,

    /// 1-based page the post came from.
    pub page: usize,

    /// True only for the thread-starting post.
    pub is_main_topic: bool,
}

impl Post {
    /// Name shown for posts without an author.
    pub const UNKNOWN_AUTHOR: &'static str = "Unknown";

    /// Author name, or `"Unknown"` when empty.
    #[must_use]
    pub fn display_author(&self) -> &str {
        if self.author.is_empty() {
            Self::UNKNOWN_AUTHOR
        } else {
            &self.author
        }
    }

    /// A post is worth keeping if it has content or starts the thread.
    #[must_use]
    pub fn is_extractable(&self) -> bool {
        !self.content.is_empty() || self.is_main_topic
    }

    /// `YYYY/MM/DD` part of the join-date label.
    #[must_use]
    pub fn join_date(&self) -> Option<String> {
        let raw = self.author_join_date.as_deref()?;
        SLASH_DATE.find(raw).map(|m| fold_digits(m.as_str()).into_owned())
    }

    /// Numeric part of the post-count label.
    #[must_use]
    pub fn post_count(&self) -> Option<u32> {
        let raw = self.author_post_count.as_deref()?;
        DIGITS.find(raw).and_then(|m| fold_digits(m.as_str()).parse().ok())
    }

    /// Identifier without the `post-` prefix, suitable for anchors.
    #[must_use]
    pub fn anchor_id(&self) -> Option<&str> {
        self.id.as_deref().map(strip_post_prefix)
    }
}

/// Drop a leading `post-` from a markup identifier.
#[must_use]
pub fn strip_post_prefix(id: &str) -> &str {
    id.strip_prefix("post-").unwrap_or(id)
}

/// An assembled discussion thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    /// Topic title.
    pub title: Option<String>,

    /// Numeric topic identifier from the URL.
    pub topic_id: Option<String>,

    /// URL the thread was fetched from.
    pub source_url: String,

    /// Breadcrumb categories, outermost first, without the forum root.
    pub categories: Vec<String>,

    /// Topic starter as shown in the topic header.
    pub author: Option<String>,

    /// Raw publish date of the topic.
    pub published: Option<String>,

    /// View counter.
    pub views: Option<u64>,

    /// Local time the thread was assembled.
    pub scraped_at: NaiveDateTime,

    /// Posts in page order, then document order. The main topic is first.
    pub posts: Vec<Post>,
}

impl Thread {
    /// Title used when the page did not provide one.
    pub const DEFAULT_TITLE: &'static str = "Ninisite Post";

    /// Highest page number any post came from (1 for an empty thread).
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.posts.iter().map(|p| p.page).max().unwrap_or(1)
    }

    /// Number of distinct display authors.
    #[must_use]
    pub fn unique_author_count(&self) -> usize {
        self.posts
            .iter()
            .map(Post::display_author)
            .collect::<HashSet<_>>()
            .len()
    }

    #[must_use]
    pub fn total_posts(&self) -> usize {
        self.posts.len()
    }

    #[must_use]
    pub fn main_topic(&self) -> Option<&Post> {
        self.posts.first().filter(|p| p.is_main_topic)
    }

    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or(Self::DEFAULT_TITLE)
    }

    /// Topic id, or `"unknown"` when the URL had none.
    #[must_use]
    pub fn topic_id_or_unknown(&self) -> &str {
        self.topic_id.as_deref().unwrap_or(crate::url_utils::UNKNOWN_TOPIC)
    }
}
