//! Raw pages and the page-source boundary.
//!
//! The crate never performs network I/O. A [`PageSource`] implementation
//! (HTTP client, cache, saved files) hands pages over; [`crawl`] walks the
//! "Next page" links between them.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};
use url::Url;

use crate::dom::{self, Document};
use crate::encoding;
use crate::error::{Error, Result};
use crate::pagination;

/// One parsed page of a thread.
pub struct Page {
    document: Document,
    url: Option<String>,
}

impl Page {
    /// Parse a UTF-8 HTML page.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self { document: dom::parse(html), url: None }
    }

    /// Decode page bytes (BOM, meta charset, UTF-8) and parse them.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::parse(&encoding::decode_page(bytes))
    }

    /// Read and parse a saved page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Record the URL the page was fetched from.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl From<&str> for Page {
    fn from(html: &str) -> Self {
        Self::parse(html)
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page").field("url", &self.url).finish_non_exhaustive()
    }
}

/// Supplier of raw thread pages.
pub trait PageSource {
    /// Fetch the page at `url`. `Ok(None)` means there is no such page.
    ///
    /// # Errors
    ///
    /// Implementation-defined; [`crawl`] treats any error as the end of the
    /// thread.
    fn fetch(&mut self, url: &str) -> Result<Option<Page>>;
}

/// Fetch `start_url` and every page reachable through "Next page" links.
///
/// Stops at the first page without a next link, at a fetch failure (logged),
/// when a link points back to a visited page, or after `max_pages` pages.
///
/// # Errors
///
/// Returns [`Error::MalformedUrl`] if `start_url` is not an absolute URL.
pub fn crawl<S: PageSource + ?Sized>(
    source: &mut S,
    start_url: &str,
    max_pages: usize,
) -> Result<Vec<Page>> {
    let base = Url::parse(start_url).map_err(|_| Error::MalformedUrl(start_url.to_string()))?;
    let mut pages = Vec::new();
    let mut visited = HashSet::new();
    let mut next = Some(base.clone());

    while let Some(url) = next.take() {
        if pages.len() >= max_pages {
            debug!(max_pages, "page limit reached");
            break;
        }
        if !visited.insert(url.to_string()) {
            warn!(%url, "pagination links back to a visited page");
            break;
        }

        let page = match source.fetch(url.as_str()) {
            Ok(Some(page)) => page,
            Ok(None) => break,
            Err(err) => {
                warn!(%url, error = %err, "stopping after fetch failure");
                break;
            }
        };

        debug!(page = pages.len() + 1, %url, "fetched page");
        next = pagination::next_page_url(page.document(), &base);
        pages.push(page.with_url(url.to_string()));
    }

    Ok(pages)
}
