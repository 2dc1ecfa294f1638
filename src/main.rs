//! mdtree: render markdown documentation pages into component trees.
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use clap::Parser;
use mdtree::highlight::{Highlighter, PlainHighlighter, SyntectHighlighter};
use mdtree::{config, formats, input, PageBundle, PageParser, Renderer};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mdtree")]
#[command(about = "Render markdown pages into component trees, tables of contents and search data", long_about = None)]
struct Args {
    /// Files or directories to render
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Write one file per page into this directory instead of stdout
    #[arg(long, short = 'o', value_name = "DIR")]
    out: Option<PathBuf>,

    /// Emit standalone HTML documents instead of JSON bundles
    #[arg(long)]
    html: bool,

    /// Syntect theme for code blocks
    #[arg(long)]
    theme: Option<String>,

    /// Leave code blocks unstyled
    #[arg(long)]
    no_highlight: bool,

    /// List bundled themes and exit
    #[arg(long)]
    list_themes: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.list_themes {
        for name in SyntectHighlighter::theme_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut cfg = config::Config::load();

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }
    if let Some(theme) = args.theme {
        cfg.theme = theme;
    }
    if args.no_highlight {
        cfg.highlight = false;
    }

    let documents = input::find_documents(args.paths, &cfg.file_extensions)
        .context("failed to collect documents")?;

    if documents.is_empty() {
        eprintln!("No matching files found");
        return Ok(());
    }

    // Catch stem collisions before doing any work
    let ext = if args.html { "html" } else { "json" };
    let targets = match &args.out {
        Some(dir) => input::output_paths(&documents, dir, ext)?,
        None => Vec::new(),
    };

    let highlighter: Arc<dyn Highlighter> = if cfg.highlight {
        Arc::new(SyntectHighlighter::new(&cfg.theme)?)
    } else {
        Arc::new(PlainHighlighter)
    };
    let renderer = Renderer::new(highlighter);
    let toc = cfg.toc_options();
    let mut parser = PageParser::new(&formats::markdown::MarkdownFormat)?;

    // Any malformed page aborts the whole run
    let mut bundles = Vec::new();
    for doc in &documents {
        let page = input::load_page(doc, &mut parser)
            .with_context(|| format!("failed to load {}", doc.display()))?;
        bundles.push(PageBundle::build(&page, &renderer, toc));
    }
    info!(pages = bundles.len(), "rendered pages");

    match args.out {
        Some(dir) => {
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            for (bundle, target) in bundles.iter().zip(targets) {
                let contents = if args.html {
                    bundle.to_html_document()
                } else {
                    serde_json::to_string_pretty(bundle)?
                };
                fs::write(&target, contents)
                    .with_context(|| format!("failed to write {}", target.display()))?;
            }
        }
        None => {
            let mut stdout = io::stdout().lock();
            if args.html {
                for bundle in &bundles {
                    stdout.write_all(bundle.to_html_document().as_bytes())?;
                }
            } else {
                serde_json::to_writer_pretty(&mut stdout, &bundles)?;
                writeln!(stdout)?;
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
