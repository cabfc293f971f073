//! Post validation.
//!
//! Decides whether a cleaned candidate is a genuine post or a fragment of
//! page chrome. Candidates that came out of a markup container only need
//! the relaxed checks; text scanned out of arbitrary blocks gets the strict
//! ones. The topic starter is never rejected.

use crate::extractor::Provenance;
use crate::options::Options;
use crate::patterns::{PURE_METADATA, SOURCE_SCRIPT};
use crate::result::Post;

/// Which rule set applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Length, script presence and word-count checks on top of the relaxed set.
    Strict,
    /// Non-empty, not pure metadata, little navigation text.
    Relaxed,
}

impl From<Provenance> for Strictness {
    fn from(provenance: Provenance) -> Self {
        match provenance {
            Provenance::Container => Self::Relaxed,
            Provenance::TextScan => Self::Strict,
        }
    }
}

/// Whitespace-separated word count.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Total occurrences of all `phrases` in `text`.
#[must_use]
pub fn phrase_occurrences(text: &str, phrases: &[String]) -> usize {
    phrases
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| text.matches(p.as_str()).count())
        .sum()
}

/// True when the whole text is a label, a bare date, separators or a role badge.
#[must_use]
pub fn is_pure_metadata(text: &str) -> bool {
    let text = text.trim();
    PURE_METADATA.iter().any(|re| re.is_match(text))
}

/// Check `post` against the rule set for `strictness`.
#[must_use]
pub fn is_valid_post(post: &Post, strictness: Strictness, opts: &Options) -> bool {
    if post.is_main_topic {
        return true;
    }

    let content = post.content.trim();
    let min_len = match strictness {
        Strictness::Strict => opts.min_content_len,
        Strictness::Relaxed => 1,
    };
    if content.chars().count() < min_len {
        return false;
    }
    if is_pure_metadata(content) {
        return false;
    }
    if phrase_occurrences(content, &opts.nav_phrases) > opts.max_nav_phrases {
        return false;
    }

    match strictness {
        Strictness::Relaxed => true,
        Strictness::Strict => {
            let words = word_count(content);
            SOURCE_SCRIPT.is_match(content) && (opts.min_words..=opts.max_words).contains(&words)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(content: &str) -> Post {
        Post { content: content.to_string(), ..Post::default() }
    }

    fn strict(content: &str) -> bool {
        is_valid_post(&post(content), Strictness::Strict, &Options::default())
    }

    fn relaxed(content: &str) -> bool {
        is_valid_post(&post(content), Strictness::Relaxed, &Options::default())
    }

    #[test]
    fn length_boundary() {
        let latin = "abcde abcde abcde abcde abcde";
        assert_eq!(latin.chars().count(), 29);
        assert!(!strict(latin));

        let persian = "ابجدهو ابجده ابجده ابجده ابجده";
        assert_eq!(persian.chars().count(), 30);
        assert!(strict(persian));
    }

    #[test]
    fn strict_requires_persian_and_word_range() {
        assert!(!strict("this sentence is long enough but has no persian text at all"));
        assert!(!strict("کلمه‌ای‌بسیار‌بلند‌بدون‌فاصله‌که‌فقط‌یک‌واژه‌است"));
        let too_many = "واژه ".repeat(201);
        assert!(!strict(&too_many));
    }

    #[test]
    fn metadata_and_navigation_rejected() {
        assert!(!relaxed("تعداد پست: 674"));
        assert!(!relaxed("1402/01/05"));
        assert!(!relaxed(" | : "));
        assert!(!relaxed("استارتر"));
        assert!(!relaxed("مجله مجله فروشگاه"));
        assert!(relaxed("مجله و فروشگاه"));
    }

    #[test]
    fn relaxed_accepts_short_container_text() {
        assert!(relaxed("ممنون"));
        assert!(!relaxed(""));
        assert!(!strict("ممنون"));
    }

    #[test]
    fn main_topic_is_exempt() {
        let main = Post { is_main_topic: true, ..Post::default() };
        assert!(is_valid_post(&main, Strictness::Strict, &Options::default()));
    }

    #[test]
    fn provenance_maps_to_strictness() {
        assert_eq!(Strictness::from(Provenance::TextScan), Strictness::Strict);
        assert_eq!(Strictness::from(Provenance::Container), Strictness::Relaxed);
    }
}
