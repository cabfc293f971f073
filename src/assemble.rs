//! Thread assembly.
//!
//! Runs extraction, validation and de-duplication over an ordered sequence
//! of pages and returns the finished [`Thread`].

use chrono::{Local, NaiveDateTime};
use tracing::{debug, trace};

use crate::dedup;
use crate::error::{Error, Result};
use crate::extractor::{self, Candidate};
use crate::metadata::{self, ThreadMetadata};
use crate::options::Options;
use crate::page::Page;
use crate::result::{Post, Thread};
use crate::url_utils;
use crate::validate::{self, Strictness};

/// Assemble with default options, stamped with the current local time.
///
/// # Errors
///
/// Returns [`Error::NoPagesFetched`] when `pages` is empty.
///
/// # Example
///
/// ```rust
/// use rs_ninisite::{assemble, Page};
///
/// let html = r#"<h1 class="topic-title">سلام</h1>
/// <article id="topic"><div class="post-message">سوال اصلی</div></article>"#;
/// let thread = assemble(vec![Page::parse(html)], "https://www.ninisite.com/discussion/topic/1/x")?;
/// assert_eq!(thread.title.as_deref(), Some("سلام"));
/// assert!(thread.posts[0].is_main_topic);
/// # Ok::<(), rs_ninisite::Error>(())
/// ```
pub fn assemble<I>(pages: I, base_url: &str) -> Result<Thread>
where
    I: IntoIterator<Item = Page>,
{
    assemble_with_options(pages, base_url, &Options::default())
}

/// Assemble with custom options, stamped with the current local time.
///
/// # Errors
///
/// Returns [`Error::NoPagesFetched`] when `pages` is empty.
pub fn assemble_with_options<I>(pages: I, base_url: &str, opts: &Options) -> Result<Thread>
where
    I: IntoIterator<Item = Page>,
{
    assemble_at(pages, base_url, opts, Local::now().naive_local())
}

/// Assemble with an explicit scrape time.
///
/// # Errors
///
/// Returns [`Error::NoPagesFetched`] when `pages` is empty.
pub fn assemble_at<I>(
    pages: I,
    base_url: &str,
    opts: &Options,
    scraped_at: NaiveDateTime,
) -> Result<Thread>
where
    I: IntoIterator<Item = Page>,
{
    let mut pages = pages.into_iter();
    let first = pages.next().ok_or(Error::NoPagesFetched)?;

    let url = opts.url.as_deref().unwrap_or(base_url);
    let meta = metadata::extract_thread_metadata(first.document(), Some(url));
    let strategy = extractor::resolve_strategy(first.document(), opts.strategy);
    debug!(?strategy, "resolved extraction strategy");

    let mut posts = Vec::new();
    for (idx, page) in std::iter::once(first).chain(pages).enumerate() {
        let page_number = idx + 1;
        let candidates = extractor::extract_page(page.document(), page_number, strategy, opts);
        let found = candidates.len();
        posts.extend(candidates.into_iter().filter_map(|c| accept(c, opts)));
        debug!(page = page_number, found, kept = posts.len(), "extracted page");
    }

    if opts.deduplicate {
        let before = posts.len();
        posts = dedup::dedup_posts(posts, opts.fingerprint_prefix_len);
        debug!(removed = before - posts.len(), "removed duplicate posts");
    }

    enforce_main_topic(&mut posts, &meta);

    Ok(Thread {
        title: meta.title,
        topic_id: url_utils::topic_id(url).ok(),
        source_url: url.to_string(),
        categories: meta.categories,
        author: meta.author,
        published: meta.published,
        views: meta.views,
        scraped_at,
        posts,
    })
}

fn accept(candidate: Candidate, opts: &Options) -> Option<Post> {
    let strictness = Strictness::from(candidate.provenance);
    if validate::is_valid_post(&candidate.post, strictness, opts) {
        Some(candidate.post)
    } else {
        trace!(id = ?candidate.post.id, ?strictness, "rejected candidate");
        None
    }
}

/// Exactly one main topic, always first.
fn enforce_main_topic(posts: &mut Vec<Post>, meta: &ThreadMetadata) {
    match posts.iter().position(|p| p.is_main_topic) {
        Some(0) => {}
        Some(idx) => {
            let main = posts.remove(idx);
            posts.insert(0, main);
        }
        None if posts.is_empty() => {
            debug!("no posts survived, synthesizing topic starter");
            posts.push(Post {
                author: meta.author.clone().unwrap_or_default(),
                timestamp: meta.published.clone(),
                page: 1,
                is_main_topic: true,
                ..Post::default()
            });
        }
        None => {
            trace!("promoting first post to topic starter");
            if let Some(first) = posts.first_mut() {
                first.is_main_topic = true;
            }
        }
    }
    for post in posts.iter_mut().skip(1) {
        post.is_main_topic = false;
    }
}
