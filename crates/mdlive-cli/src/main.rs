//! mdlive - inspect live-preview decorations and apply list/style edits to Markdown files

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use mdlive_config::Config;
use mdlive_engine::decorations::{DecorationItem, DecorationKind};
use mdlive_engine::editing::{ChangeSet, Document, Selection};
use mdlive_engine::formatting::{self, InlineMarker};
use mdlive_engine::syntax::markdown;
use mdlive_engine::{PreviewOptions, build_with_options, lists};
use std::path::{Path, PathBuf};

/// Markdown live-preview engine driver
#[derive(Parser, Debug)]
#[command(name = "mdlive")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (defaults to ~/.config/mdlive/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the decorations for a file with the caret at a given offset
    Decorate {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Caret byte offset
        #[arg(long, default_value_t = 0)]
        cursor: usize,
        /// Keep all syntax visible
        #[arg(long)]
        show_syntax: bool,
    },
    /// Fix ordered list numbering
    Renumber {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Write the result back instead of printing it
        #[arg(long)]
        write: bool,
    },
    /// Toggle an inline style marker around a byte range
    Toggle {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
        /// One of *, _, ~~, ==
        #[arg(long)]
        marker: InlineMarker,
        /// Write the result back instead of printing it
        #[arg(long)]
        write: bool,
    },
    /// Write a config file holding the default settings
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let config_path = args.config.as_deref();

    let output = match args.command {
        Command::Decorate {
            file,
            cursor,
            show_syntax,
        } => {
            let options = preview_options(config_path)?;
            let options = PreviewOptions {
                hiding_enabled: options.hiding_enabled && !show_syntax,
                ..options
            };
            decorate(&load(&file)?, cursor, &options)?
        }
        Command::Renumber { file, write } => {
            let doc = load(&file)?;
            let next = renumber(&doc)?;
            finish(&file, &next, write)?
        }
        Command::Toggle {
            file,
            from,
            to,
            marker,
            write,
        } => {
            let doc = load(&file)?;
            let next = toggle(&doc, from, to, marker, &preview_options(config_path)?)?;
            finish(&file, &next, write)?
        }
        Command::InitConfig { force } => init_config(config_path, force)?,
    };
    print!("{output}");
    Ok(())
}

fn preview_options(config_path: Option<&Path>) -> Result<PreviewOptions> {
    let config = Config::load_or_default(config_path).context("Failed to load configuration")?;
    Ok(config.preview_options())
}

fn init_config(path: Option<&Path>, force: bool) -> Result<String> {
    let target = path.map_or_else(Config::config_path, Path::to_path_buf);
    if target.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", target.display());
    }
    let config = Config::default();
    match path {
        Some(path) => config.save_to_path(path)?,
        None => config.save()?,
    }
    log::info!("Wrote {}", target.display());
    Ok(format!("{}\n", target.display()))
}

fn load(path: &Path) -> Result<Document> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Document::from_bytes(&bytes).with_context(|| format!("Failed to load {}", path.display()))
}

/// Write the document back, or return its text for printing.
fn finish(path: &Path, doc: &Document, write: bool) -> Result<String> {
    if !write {
        return Ok(doc.text().to_string());
    }
    std::fs::write(path, doc.to_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(String::new())
}

fn decorate(doc: &Document, cursor: usize, options: &PreviewOptions) -> Result<String> {
    if cursor > doc.len() {
        bail!("cursor {cursor} is past the end of the document ({} bytes)", doc.len());
    }
    let tree = markdown::parse(doc);
    let items = build_with_options(doc, &tree, &Selection::cursor(cursor), options);
    Ok(items.iter().map(|item| describe(doc, item) + "\n").collect())
}

fn describe(doc: &Document, item: &DecorationItem) -> String {
    let what = match &item.kind {
        DecorationKind::Mark { class } => format!("mark {class}"),
        DecorationKind::Replace { widget: None } => "hide".to_string(),
        DecorationKind::Replace { widget: Some(w) } => {
            format!("widget {:?} -> {:?}", w.kind, w.display_text())
        }
        DecorationKind::Line { class, quote } => match quote {
            Some(q) => format!("line {class} depth={}", q.nesting_depth),
            None => format!("line {class}"),
        },
    };
    format!(
        "{:>5}..{:<5} {:<9} {what}  {:?}",
        item.from,
        item.to,
        format!("{:?}", item.side),
        doc.slice(item.from, item.to)
    )
}

fn renumber(doc: &Document) -> Result<Document> {
    let changes = ChangeSet::new(lists::renumber(doc))?;
    log::info!("{} numerals changed", changes.len());
    Ok(doc.apply(&changes)?)
}

fn toggle(
    doc: &Document,
    from: usize,
    to: usize,
    marker: InlineMarker,
    options: &PreviewOptions,
) -> Result<Document> {
    if from.max(to) > doc.len() {
        bail!("range {from}..{to} is past the end of the document ({} bytes)", doc.len());
    }
    let result =
        formatting::toggle_with_window(doc, from, to, marker, options.toggle_window_factor);
    log::info!(
        "{:?}: selection now {}..{}",
        result.step,
        result.selection.from(),
        result.selection.to()
    );
    Ok(doc.apply(&result.changes()?)?)
}
