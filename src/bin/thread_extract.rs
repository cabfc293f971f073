//! CLI that assembles saved thread pages and renders them.
//!
//! Pages are given in thread order. Output goes to `-o FILE`, to stdout with
//! `-o -`, or to `ninisite_topic_{id}.{ext}` in the current directory.
//! Logs go to stderr; set `RUST_LOG` to adjust and `LOG_FORMAT=json` for
//! structured output.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rs_ninisite::url_utils;
use rs_ninisite::{assemble_with_options, render, ExtractionStrategy, Options, Page, RenderFormat, RenderOptions};

#[derive(Parser)]
#[command(
    name = "thread_extract",
    version,
    about = "Convert saved Ninisite thread pages to org-mode, Markdown or JSON"
)]
struct Cli {
    /// Thread URL (topic id, title fallback and page links)
    #[arg(long)]
    url: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = RenderFormat::Org)]
    format: RenderFormat,

    /// Put every post directly under the thread heading
    #[arg(long)]
    no_paginate: bool,

    /// Extraction strategy (overrides the config file)
    #[arg(long, value_enum)]
    strategy: Option<ExtractionStrategy>,

    /// Keep posts that repeat on later pages
    #[arg(long)]
    no_dedup: bool,

    /// TOML options file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file, `-` for stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Saved HTML pages, first page first
    #[arg(required = true)]
    pages: Vec<PathBuf>,
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    if use_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    }

    Ok(())
}

fn load_options(cli: &Cli) -> Result<Options> {
    let mut options = match &cli.config {
        Some(path) => Options::from_toml_file(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => Options::default(),
    };
    if let Some(strategy) = cli.strategy {
        options.strategy = strategy;
    }
    if cli.no_dedup {
        options.deduplicate = false;
    }
    options.url = Some(cli.url.clone());
    Ok(options)
}

fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();
    let options = load_options(&cli)?;

    let pages = cli
        .pages
        .iter()
        .map(|path| {
            Page::from_file(path).with_context(|| format!("Failed to read {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    info!(pages = pages.len(), url = %cli.url, "loaded pages");

    let thread = assemble_with_options(pages, &cli.url, &options)
        .context("Failed to assemble thread")?;
    info!(
        posts = thread.total_posts(),
        authors = thread.unique_author_count(),
        "assembled thread"
    );

    let render_options = RenderOptions { format: cli.format, paginate: !cli.no_paginate };
    let text = render(&thread, &render_options).context("Failed to render thread")?;

    match cli.output.as_deref() {
        Some("-") => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
        Some(path) => {
            std::fs::write(path, &text).with_context(|| format!("Failed to write {path}"))?;
            info!(path = %path, "wrote output");
        }
        None => {
            let path = url_utils::default_filename(&cli.url, cli.format)
                .context("Cannot derive an output filename; pass -o")?;
            std::fs::write(&path, &text).with_context(|| format!("Failed to write {path}"))?;
            info!(path = %path, "wrote output");
        }
    }

    Ok(())
}
