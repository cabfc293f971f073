//! Post Extraction
//!
//! Turns one parsed page into candidate posts. Two strategies share the
//! field rule lists in [`fields`]:
//!
//! - [`structural`] reads the forum's own `article` markup.
//! - [`heuristic`] scans every `div` and keeps the ones that look like posts.
//!
//! Candidates are not validated here; the assembler runs them through the
//! validator with the strictness matching their [`Provenance`].

use dom_query::Selection;

use crate::dom::Document;
use crate::options::{ExtractionStrategy, Options};
use crate::result::Post;

pub mod fields;
pub mod heuristic;
pub mod structural;

/// Class the forum puts on native ad slots that mimic posts.
pub const AD_CLASS: &str = "forum-native-ad";

/// A field lookup rule: returns the raw field value when it applies.
///
/// Rules are tried in order and the first `Some` wins, see [`first_field`].
pub type FieldRule = fn(&Selection) -> Option<String>;

/// Apply `rules` to `unit` in order and return the first hit.
#[must_use]
pub fn first_field(unit: &Selection, rules: &[FieldRule]) -> Option<String> {
    rules.iter().find_map(|rule| rule(unit))
}

/// Where a candidate's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// A dedicated content container in the markup.
    Container,
    /// The full text of a scanned block.
    TextScan,
}

/// A post candidate awaiting validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub post: Post,
    pub provenance: Provenance,
}

/// Replace `Auto` with the concrete strategy page 1 calls for.
#[must_use]
pub fn resolve_strategy(first_page: &Document, strategy: ExtractionStrategy) -> ExtractionStrategy {
    match strategy {
        ExtractionStrategy::Auto if structural::has_post_markup(first_page) => {
            ExtractionStrategy::Structural
        }
        ExtractionStrategy::Auto => ExtractionStrategy::HeuristicScan,
        other => other,
    }
}

/// Extract every candidate on one page, in document order.
///
/// `page` is 1-based. `strategy` should already be resolved; `Auto` is
/// resolved against this page if passed through.
#[must_use]
pub fn extract_page(
    doc: &Document,
    page: usize,
    strategy: ExtractionStrategy,
    opts: &Options,
) -> Vec<Candidate> {
    let mut candidates = match resolve_strategy(doc, strategy) {
        ExtractionStrategy::HeuristicScan => heuristic::extract_page(doc, opts),
        _ => structural::extract_page(doc, page == 1),
    };
    for candidate in &mut candidates {
        candidate.post.page = page;
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    fn always_none(_: &Selection) -> Option<String> {
        None
    }

    fn tag(sel: &Selection) -> Option<String> {
        dom::tag_name(sel)
    }

    #[test]
    fn first_field_takes_first_hit() {
        let doc = dom::parse("<p>x</p>");
        let p = doc.select("p");
        assert_eq!(first_field(&p, &[always_none, tag]).as_deref(), Some("p"));
        assert_eq!(first_field(&p, &[always_none]), None);
    }

    #[test]
    fn auto_prefers_structural_markup() {
        let structured = dom::parse(r#"<article id="topic"><div class="post-message">x</div></article>"#);
        let plain = dom::parse("<div>متن</div>");
        assert_eq!(
            resolve_strategy(&structured, ExtractionStrategy::Auto),
            ExtractionStrategy::Structural
        );
        assert_eq!(
            resolve_strategy(&plain, ExtractionStrategy::Auto),
            ExtractionStrategy::HeuristicScan
        );
        assert_eq!(
            resolve_strategy(&plain, ExtractionStrategy::Structural),
            ExtractionStrategy::Structural
        );
    }

    #[test]
    fn extract_page_tags_page_number() {
        let doc = dom::parse(
            r#"<article id="post-5"><div class="post-message">پاسخ کاربر</div></article>"#,
        );
        let out = extract_page(&doc, 3, ExtractionStrategy::Structural, &Options::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].post.page, 3);
    }
}
