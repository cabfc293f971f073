//! Right-to-left isolation for author names.
//!
//! Persian names dropped into left-to-right headings reorder the
//! surrounding punctuation. Wrapping them in RLI/PDI keeps them isolated.

/// Right-to-Left Isolate.
pub const RLI: char = '\u{2067}';

/// Pop Directional Isolate.
pub const PDI: char = '\u{2069}';

/// True for characters in the Arabic-script blocks used by Persian text.
#[must_use]
pub fn is_rtl_char(c: char) -> bool {
    matches!(
        c,
        '\u{0600}'..='\u{06FF}'      // Arabic
            | '\u{0750}'..='\u{077F}' // Arabic Supplement
            | '\u{FB50}'..='\u{FDFF}' // Arabic Presentation Forms-A
            | '\u{FE70}'..='\u{FEFF}' // Arabic Presentation Forms-B
    )
}

/// Wrap `name` in RLI ... PDI when it starts with a right-to-left character.
#[must_use]
pub fn wrap(name: &str) -> String {
    match name.chars().next() {
        Some(first) if is_rtl_char(first) => format!("{RLI}{name}{PDI}"),
        _ => name.to_string(),
    }
}
