//! Content normalization.
//!
//! Cleans extracted post text: whitespace, escape artifacts, stray
//! separators, profile labels and site chrome. The rule sequence is repeated
//! until the text stops changing, so `clean(clean(x)) == clean(x)`.

use std::borrow::Cow;

use crate::patterns::{BACKSLASH_RUN, HORIZONTAL_WHITESPACE, METADATA_LABEL, WHITESPACE};

/// Whether paragraph structure survives cleaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CleanMode {
    /// Everything on one line.
    #[default]
    Flat,
    /// Line breaks kept, blank lines dropped.
    Lines,
}

/// Configured text cleaner. Cheap to build per call site.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentNormalizer<'a> {
    mode: CleanMode,
    min_len: usize,
    phrases: &'a [String],
}

impl<'a> ContentNormalizer<'a> {
    #[must_use]
    pub fn new(mode: CleanMode) -> Self {
        Self { mode, min_len: 0, phrases: &[] }
    }

    /// Reject results shorter than `min_len` characters.
    #[must_use]
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// Remove these phrases wherever they occur.
    #[must_use]
    pub fn with_phrases(mut self, phrases: &'a [String]) -> Self {
        self.phrases = phrases;
        self
    }

    /// Clean `text`, returning an empty string when too little survives.
    #[must_use]
    pub fn clean(&self, text: &str) -> String {
        // A pass never lengthens the text, so this reaches a fixpoint.
        let mut current = self.pass(text);
        loop {
            let next = self.pass(&current);
            if next == current {
                break;
            }
            current = next;
        }

        if current.chars().count() < self.min_len {
            String::new()
        } else {
            current
        }
    }

    fn pass(&self, text: &str) -> String {
        let text = self.collapse(text);
        let text = BACKSLASH_RUN.replace_all(&text, "");
        let text = self.drop_separators(&text);
        let mut text = METADATA_LABEL.replace_all(&text, "").into_owned();
        for phrase in self.phrases.iter().filter(|p| !p.is_empty()) {
            if text.contains(phrase.as_str()) {
                text = text.replace(phrase.as_str(), "");
            }
        }
        self.collapse(&text)
    }

    /// Drop whitespace-delimited tokens made only of `|` and `:`. Clock
    /// times such as `10:30` are untouched.
    fn drop_separators(&self, text: &str) -> String {
        match self.mode {
            CleanMode::Flat => without_separators(text),
            CleanMode::Lines => text.lines().map(without_separators).collect::<Vec<_>>().join("\n"),
        }
    }

    fn collapse(&self, text: &str) -> String {
        match self.mode {
            CleanMode::Flat => WHITESPACE.replace_all(text, " ").trim().to_string(),
            CleanMode::Lines => text
                .lines()
                .map(|line| HORIZONTAL_WHITESPACE.replace_all(line, " "))
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

fn is_separator_token(token: &str) -> bool {
    token.chars().all(|c| matches!(c, '|' | ':'))
}

fn without_separators(line: &str) -> String {
    line.split_whitespace()
        .filter(|token| !is_separator_token(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Flat-mode clean with no phrase list and no minimum.
#[must_use]
pub fn clean_flat(text: &str) -> String {
    ContentNormalizer::new(CleanMode::Flat).clean(text)
}

/// Line-preserving clean with no phrase list and no minimum.
#[must_use]
pub fn clean_lines(text: &str) -> String {
    ContentNormalizer::new(CleanMode::Lines).clean(text)
}

/// Replace Persian (`۰-۹`) and Arabic-Indic (`٠-٩`) digits with ASCII digits.
#[must_use]
pub fn fold_digits(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_eastern_digit) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| match c {
                '\u{06F0}'..='\u{06F9}' => ascii_digit(c as u32 - 0x06F0),
                '\u{0660}'..='\u{0669}' => ascii_digit(c as u32 - 0x0660),
                _ => c,
            })
            .collect(),
    )
}

fn is_eastern_digit(c: char) -> bool {
    matches!(c, '\u{06F0}'..='\u{06F9}' | '\u{0660}'..='\u{0669}')
}

fn ascii_digit(offset: u32) -> char {
    char::from_digit(offset, 10).unwrap_or('0')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrases() -> Vec<String> {
        crate::patterns::BOILERPLATE_PHRASES.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn flat_collapses_whitespace() {
        assert_eq!(clean_flat("  سلام \n\n  دوستان\t عزیز "), "سلام دوستان عزیز");
    }

    #[test]
    fn lines_mode_keeps_paragraphs() {
        let text = "خط اول   با فاصله\n\n   \nخط دوم\r\n";
        assert_eq!(clean_lines(text), "خط اول با فاصله\nخط دوم");
    }

    #[test]
    fn strips_backslashes_and_isolated_separators() {
        assert_eq!(clean_flat(r"متن \\ اول | : دوم"), "متن اول دوم");
        assert_eq!(clean_flat("ساعت 10:30 صبح"), "ساعت 10:30 صبح");
    }

    #[test]
    fn removes_profile_labels_anywhere() {
        let cleaned = clean_flat("عضویت: 1401/06/16 سلام تعداد پست: 674 خوبید");
        assert_eq!(cleaned, "سلام خوبید");
    }

    #[test]
    fn removes_boilerplate_phrases() {
        let list = phrases();
        let n = ContentNormalizer::new(CleanMode::Flat).with_phrases(&list);
        assert_eq!(n.clean("مجله سلام ثبت نام دوستان"), "سلام دوستان");
    }

    #[test]
    fn phrase_removal_that_exposes_a_new_phrase_settles() {
        let list = phrases();
        let n = ContentNormalizer::new(CleanMode::Flat).with_phrases(&list);
        assert_eq!(n.clean("سلام ثبت ثبت نام نام دوستان"), "سلام دوستان");
    }

    #[test]
    fn minimum_length_rejects_short_text() {
        let n = ContentNormalizer::new(CleanMode::Flat).with_min_len(30);
        assert_eq!(n.clean("کوتاه"), "");
        let long = "این یک متن به اندازه کافی طولانی است برای تست";
        assert_eq!(n.clean(long), long);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let list = phrases();
        let samples = [
            "",
            "   ",
            "a | | b",
            "x : : : y \\\\ z",
            "عضویت عضویت: 12 34 متن",
            "سلام ثبت ثبت نام نام دوستان و کانون مجله",
            "خط اول\n\n | \nخط دوم : سوم",
            "1402/01/05 | 10:20 پیام کاربر درباره موضوع",
            "mixed latin | and فارسی text with \\ escapes",
        ];
        let long_runs = [
            format!("a {}b", "| ".repeat(2000)),
            format!("متن {}پایان", ": | ".repeat(700)),
            format!("خط اول\n{}\nخط دوم", "|| :: ".repeat(600)),
        ];
        for mode in [CleanMode::Flat, CleanMode::Lines] {
            for min_len in [0, 30] {
                let n = ContentNormalizer::new(mode).with_min_len(min_len).with_phrases(&list);
                for sample in samples.iter().copied().chain(long_runs.iter().map(String::as_str)) {
                    let once = n.clean(sample);
                    assert_eq!(n.clean(&once), once, "mode {mode:?}, input {sample:?}");
                }
            }
        }
    }

    #[test]
    fn long_separator_runs_vanish_in_one_call() {
        assert_eq!(clean_flat(&format!("a {}b", "| ".repeat(2000))), "a b");
        assert_eq!(clean_lines(&format!("الف {}ب\n: :: |", "|: ".repeat(600))), "الف ب");
        assert_eq!(clean_flat("ساعت 10:30 | نوبت a|b"), "ساعت 10:30 نوبت a|b");
    }

    #[test]
    fn folds_eastern_digits() {
        assert_eq!(fold_digits("۱۲۳ و ٤٥"), "123 و 45");
        assert!(matches!(fold_digits("abc"), Cow::Borrowed(_)));
    }
}
