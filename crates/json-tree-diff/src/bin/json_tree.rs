//! `json-tree`: diff two JSON documents or apply an operation list.
//!
//! Usage:
//!   json-tree diff <before.json> <after.json> [--raw] [--format json|text]
//!   json-tree patch <doc.json> <ops.json> [--raw]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use json_tree_diff::json_cli::{diff_documents, patch_document, render_operations, OutputFormat, Realization};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "json-tree", about = "Structural diff and patch for nested JSON documents", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log at DEBUG level on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the operations turning one document into another
    Diff(DiffArgs),
    /// Apply an operation list to a document and print the result
    Patch(PatchArgs),
}

#[derive(Args)]
struct DiffArgs {
    before: PathBuf,
    after: PathBuf,
    /// Diff raw values (`set` operations) instead of the node model.
    #[arg(long)]
    raw: bool,
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Args)]
struct PatchArgs {
    doc: PathBuf,
    ops: PathBuf,
    /// Patch the raw value instead of the node model.
    #[arg(long)]
    raw: bool,
}

fn realization(raw: bool) -> Realization {
    if raw {
        Realization::Raw
    } else {
        Realization::Node
    }
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::builder()
            .with_default_directive(tracing::Level::INFO.into())
            .from_env_lossy()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = match cli.command {
        Command::Diff(args) => {
            let ops = diff_documents(&read(&args.before)?, &read(&args.after)?, realization(args.raw))?;
            render_operations(&ops, args.format)?
        }
        Command::Patch(args) => patch_document(&read(&args.doc)?, &read(&args.ops)?, realization(args.raw))
            .with_context(|| format!("failed to patch {}", args.doc.display()))?,
    };
    println!("{output}");
    Ok(())
}
