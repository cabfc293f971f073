//! Heuristic extraction for pages without post markup.
//!
//! Every `div` outside an ad slot is a potential post. Blocks are
//! pre-filtered on raw text (length, UI words, navigation density, Persian
//! presence) before fields are pulled out. Nested blocks routinely yield the same text more than
//! once; the assembler's de-duplication pass absorbs that.

use std::collections::HashSet;

use dom_query::{NodeId, Selection};
use tracing::trace;

use crate::dom::{self, Document};
use crate::extractor::fields;
use crate::extractor::{first_field, Candidate, Provenance, AD_CLASS};
use crate::normalize::{CleanMode, ContentNormalizer};
use crate::options::Options;
use crate::patterns::SOURCE_SCRIPT;
use crate::result::Post;

/// Ad slot elements on one page, collected once for ancestor lookups.
struct AdSlots {
    ids: HashSet<NodeId>,
}

impl AdSlots {
    fn new(doc: &Document) -> Self {
        let ids = dom::each(&doc.select("[class]"))
            .iter()
            .filter(|sel| dom::has_class(sel, AD_CLASS))
            .filter_map(|sel| sel.nodes().first().map(|node| node.id))
            .collect();
        Self { ids }
    }

    /// True when `block` is an ad slot or sits inside one.
    fn contains(&self, block: &Selection) -> bool {
        if self.ids.is_empty() {
            return false;
        }
        let mut current = block.clone();
        while let Some(id) = current.nodes().first().map(|node| node.id) {
            if self.ids.contains(&id) {
                return true;
            }
            current = current.parent();
        }
        false
    }
}

/// Number of distinct phrases from `phrases` present in `text`.
#[must_use]
pub fn distinct_phrase_count(text: &str, phrases: &[String]) -> usize {
    phrases
        .iter()
        .filter(|p| !p.is_empty() && text.contains(p.as_str()))
        .count()
}

/// Raw-text pre-filter applied before any field extraction.
#[must_use]
pub fn is_candidate_block(text: &str, opts: &Options) -> bool {
    if text.chars().count() < opts.min_scan_block_len {
        return false;
    }
    let lower = text.to_lowercase();
    if opts.ui_terms.iter().any(|term| lower.contains(term.as_str())) {
        return false;
    }
    if distinct_phrase_count(text, &opts.scan_nav_phrases) > opts.max_scan_nav_phrases {
        return false;
    }
    SOURCE_SCRIPT.is_match(text)
}

/// Extract one scanned block. `None` when no content survives cleaning.
#[must_use]
pub fn extract_post(block: &Selection, opts: &Options) -> Option<Candidate> {
    let (raw, provenance, min_len) = match first_field(block, fields::SCAN_CONTENT) {
        Some(text) => (text, Provenance::Container, 0),
        None => (dom::text_content(block).to_string(), Provenance::TextScan, opts.min_content_len),
    };

    let content = ContentNormalizer::new(CleanMode::Flat)
        .with_phrases(&opts.boilerplate_phrases)
        .with_min_len(min_len)
        .clean(&raw);
    if content.is_empty() {
        return None;
    }

    let post = Post {
        author: first_field(block, fields::SCAN_USERNAME).unwrap_or_default(),
        timestamp: first_field(block, fields::SCAN_TIMESTAMP),
        content,
        ..Post::default()
    };
    Some(Candidate { post, provenance })
}

/// Scan every `div` on the page outside ad slots, in document order.
#[must_use]
pub fn extract_page(doc: &Document, opts: &Options) -> Vec<Candidate> {
    let ads = AdSlots::new(doc);
    let blocks = dom::each(&doc.select("div"));
    let mut candidates = Vec::new();
    for block in &blocks {
        if ads.contains(block) {
            trace!("skipping block inside ad slot");
            continue;
        }
        let text = dom::text_content(block);
        let text = text.trim();
        if !is_candidate_block(text, opts) {
            continue;
        }
        match extract_post(block, opts) {
            Some(candidate) => candidates.push(candidate),
            None => trace!(len = text.len(), "scanned block left no content"),
        }
    }
    candidates
}
