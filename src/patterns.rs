//! Compiled regex patterns and default phrase lists.
//!
//! All patterns are compiled once using `LazyLock`. Phrase lists are the
//! defaults copied into [`Options`](crate::Options); callers may override them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Default phrase lists
// =============================================================================

/// Navigation phrases counted by the post validator.
pub const NAV_PHRASES: &[&str] = &["تبادل نظر", "ثبت نام", "مجله", "فروشگاه"];

/// Navigation phrases counted when pre-filtering scanned blocks.
pub const SCAN_NAV_PHRASES: &[&str] = &["تبادل نظر", "ثبت نام", "مجله", "فروشگاه", "کانون"];

/// Site chrome removed from scanned text by the normalizer.
pub const BOILERPLATE_PHRASES: &[&str] = &[
    "تبادل نظر",
    "ثبت نام",
    "مجله",
    "فروشگاه",
    "بارداری",
    "مشاورین",
    "کانون",
    "دسته بندی",
];

/// English UI words that disqualify a scanned block (matched lowercase).
pub const UI_TERMS: &[&str] = &["login", "register", "menu", "navigation", "footer", "header"];

// =============================================================================
// Text cleaning
// =============================================================================

/// Any whitespace run.
pub static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE regex"));

/// Whitespace run that does not cross a line break.
pub static HORIZONTAL_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("HORIZONTAL_WHITESPACE regex"));

/// Backslashes left behind by markdown escaping.
pub static BACKSLASH_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\+").expect("BACKSLASH_RUN regex"));

/// Profile labels with their value, e.g. `تعداد پست: 674` or `عضویت: 1401/06/16`.
pub static METADATA_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:تعداد پست|عضویت|امتیاز)[^\S\n]*:?[^\S\n]*[\d/]+").expect("METADATA_LABEL regex")
});

/// Strings that carry nothing but metadata.
pub static PURE_METADATA: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^(?:تعداد پست|عضویت|امتیاز)\s*:?\s*[\d/]+$",
        r"^\d{4}/\d{2}/\d{2}\s*$",
        r"^[|:\s]+$",
        r"^(?:مدیر|استارتر)$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("PURE_METADATA regex"))
    .collect()
});

// =============================================================================
// Field extraction
// =============================================================================

/// Arabic-script block used as the language-presence signal.
pub static SOURCE_SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{0600}-\x{06FF}]").expect("SOURCE_SCRIPT regex"));

/// Inline post timestamp such as `1402/04/13 | 11:32`.
pub static TIMESTAMP_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}/\d{2}/\d{2}\s*\|?\s*\d{2}:\d{2}").expect("TIMESTAMP_TEXT regex")
});

/// Reply article identifiers (`post-12345`).
pub static POST_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"post-\d+").expect("POST_ID regex"));

/// A `YYYY/MM/DD` date.
pub static SLASH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}/\d{2}/\d{2}").expect("SLASH_DATE regex"));

/// First run of digits.
pub static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("DIGITS regex"));

// =============================================================================
// Pagination
// =============================================================================

/// `page=N` query parameter.
pub static PAGE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"page=(\d+)").expect("PAGE_PARAM regex"));

/// Page count mentioned in running text.
pub static PAGE_COUNT_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*صفحه|page\s*(\d+)").expect("PAGE_COUNT_TEXT regex")
});
