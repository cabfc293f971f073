//! # rs-ninisite
//!
//! Extraction of paginated Ninisite discussion threads into typed posts.
//!
//! The library takes the raw pages of one thread, finds the posts on each
//! page, cleans and validates their text, drops duplicates that reappear on
//! later pages, and returns a [`Thread`]: page-1 metadata plus the ordered
//! post list with the topic starter first. Renderers in [`render`] turn a
//! thread into org-mode, Markdown or JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_ninisite::{assemble, render, Page, RenderOptions};
//!
//! let page = r#"<h1 class="topic-title"><a href="/t">سوال درباره خواب نوزاد</a></h1>
//! <article id="topic">
//!   <span itemprop="name">مریم</span>
//!   <div class="post-message"><p>نوزاد من شب ها خوب نمی خوابد</p></div>
//! </article>
//! <article id="post-2">
//!   <span itemprop="name">سارا</span>
//!   <div class="post-message"><p>روتین خواب را امتحان کنید</p></div>
//! </article>"#;
//!
//! let url = "https://www.ninisite.com/discussion/topic/123/sleep";
//! let thread = assemble(vec![Page::parse(page)], url)?;
//! assert_eq!(thread.total_posts(), 2);
//! assert!(thread.posts[0].is_main_topic);
//!
//! let org = render(&thread, &RenderOptions::default())?;
//! assert!(org.starts_with("#+TITLE: سوال درباره خواب نوزاد"));
//! # Ok::<(), rs_ninisite::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Two extraction strategies**: the forum's own article markup, or a
//!   heuristic scan of every block for pages without it
//! - **Noise filtering**: profile labels, navigation phrases and separators
//!   are stripped; fragments of page chrome are rejected
//! - **Cross-page de-duplication** on a content-prefix fingerprint
//! - **Render-time formatting**: bidi-isolated author names and approximate
//!   Jalali timestamps
//!
//! The crate performs no network I/O. Implement [`PageSource`] to plug in a
//! fetcher and use [`crawl`] to follow pagination.

mod error;
mod options;
mod patterns;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Content normalization (whitespace, separators, labels, boilerplate).
pub mod normalize;

/// Per-field lookup rules and the structural/heuristic strategies.
pub mod extractor;

/// Genuine-post versus noise classification.
pub mod validate;

/// Content-prefix de-duplication.
pub mod dedup;

/// Right-to-left isolation of author names.
pub mod bidi;

/// Source timestamp normalization to the approximate Jalali form.
pub mod date;

/// Page-1 thread metadata (title, author, views, breadcrumb).
pub mod metadata;

/// Pagination discovery.
pub mod pagination;

/// Raw pages, the page-source trait and the crawl driver.
pub mod page;

/// Thread assembly.
pub mod assemble;

/// Org-mode, Markdown and JSON output.
pub mod render;

/// URL utilities for topic ids, slugs and page addresses.
pub mod url_utils;

// Public API - re-exports
pub use assemble::{assemble, assemble_at, assemble_with_options};
pub use error::{Error, Result};
pub use options::{ExtractionStrategy, Options};
pub use page::{crawl, Page, PageSource};
pub use render::{render, RenderFormat, RenderOptions};
pub use result::{Post, Thread};

/// Assembles a thread from raw page bytes with automatic encoding detection.
///
/// Each page is decoded from its BOM or `<meta charset>` declaration,
/// defaulting to UTF-8, then processed as [`assemble_with_options`] would.
///
/// # Example
///
/// ```rust
/// use rs_ninisite::{assemble_bytes, Options};
///
/// let page = "<article id=\"topic\"><div class=\"post-message\">سلام</div></article>".as_bytes();
/// let thread = assemble_bytes(&[page], "https://www.ninisite.com/discussion/topic/9", &Options::default())?;
/// assert_eq!(thread.posts[0].content, "سلام");
/// # Ok::<(), rs_ninisite::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn assemble_bytes(pages: &[&[u8]], base_url: &str, options: &Options) -> Result<Thread> {
    assemble_with_options(pages.iter().map(|bytes| Page::from_bytes(bytes)), base_url, options)
}
