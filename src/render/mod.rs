//! Rendering of assembled threads.
//!
//! The core never produces final text; these renderers turn a [`Thread`]
//! into org-mode, Markdown or JSON. Author names are bidi-isolated and
//! timestamps normalized here, at render time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::result::Thread;

pub mod markdown;
pub mod org;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// Org-mode outline with property drawers.
    #[default]
    Org,
    /// Markdown document.
    #[cfg_attr(feature = "cli", value(alias = "md"))]
    Markdown,
    /// Pretty-printed JSON of the whole thread.
    Json,
}

impl RenderFormat {
    /// File extension, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Org => "org",
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Org => "org",
            Self::Markdown => "markdown",
            Self::Json => "json",
        };
        f.write_str(name)
    }
}

impl FromStr for RenderFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "org" => Ok(Self::Org),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(Error::RenderTargetUnavailable(other.to_string())),
        }
    }
}

/// Render-time settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Output format.
    ///
    /// Default: `Org`
    pub format: RenderFormat,

    /// Group posts under per-page headings (org only).
    ///
    /// Default: `true`
    pub paginate: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { format: RenderFormat::Org, paginate: true }
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    thread: &'a Thread,
}

/// Serialize the thread as `{ "thread": ... }`.
///
/// # Errors
///
/// Returns [`Error::RenderTargetUnavailable`] if serialization fails.
pub fn to_json(thread: &Thread) -> Result<String> {
    serde_json::to_string_pretty(&JsonDocument { thread })
        .map_err(|e| Error::RenderTargetUnavailable(e.to_string()))
}

/// Render `thread` in the requested format.
///
/// # Errors
///
/// Returns [`Error::RenderTargetUnavailable`] if the JSON target fails to
/// serialize. The text formats cannot fail.
pub fn render(thread: &Thread, opts: &RenderOptions) -> Result<String> {
    match opts.format {
        RenderFormat::Org => Ok(org::render(thread, opts.paginate)),
        RenderFormat::Markdown => Ok(markdown::render(thread)),
        RenderFormat::Json => to_json(thread),
    }
}

/// Push `line` and a newline.
pub(crate) fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Push every non-blank line of `text`, trimmed.
pub(crate) fn push_text_lines(out: &mut String, text: &str) {
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        push_line(out, line);
    }
}
