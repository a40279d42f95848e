use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use jsontally::{MergeOptions, ReadOptions, TrackedObject, Visited};
use tracing::*;

mod logging;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Parse `//` lines instead of dropping them before parsing.
    #[arg(long, global = true)]
    keep_comments: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Overwrite a base document with another and print the result.
    Merge {
        /// Document providing the defaults.
        base: PathBuf,
        /// Document whose values win.
        overwrites: PathBuf,
        /// Reconcile arrays of objects element-wise by this attribute.
        #[arg(long)]
        id_key: Option<String>,
        /// Spaces per indentation level; 0 prints compact JSON.
        #[arg(long, default_value_t = 4)]
        indent: usize,
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare two documents structurally; exits with 1 when they differ.
    Equals { left: PathBuf, right: PathBuf },
    /// Re-print a document.
    Fmt {
        input: PathBuf,
        /// Spaces per indentation level; 0 prints compact JSON.
        #[arg(long, default_value_t = 4)]
        indent: usize,
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List every attribute path declared in a document.
    Paths { input: PathBuf },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Args::parse();
    logging::setup_logging(cli.verbose);

    debug!(?cli);

    let read_options = ReadOptions {
        strip_comments: !cli.keep_comments,
    };

    match cli.command {
        Command::Merge {
            base,
            overwrites,
            id_key,
            indent,
            output,
        } => {
            let base_doc = load(&base, &read_options)?;
            let overwrites_doc = load(&overwrites, &read_options)?;
            let merge_options = MergeOptions {
                identity_key: id_key,
            };
            let merged = base_doc.overwrite_with(&overwrites_doc, &merge_options);
            emit(&merged, indent, output.as_deref())?;
        }
        Command::Equals { left, right } => {
            let left_doc = load(&left, &read_options)?;
            let right_doc = load(&right, &read_options)?;
            if left_doc == right_doc {
                println!("equal");
            } else {
                println!("different");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Fmt {
            input,
            indent,
            output,
        } => {
            let doc = load(&input, &read_options)?;
            emit(&doc, indent, output.as_deref())?;
        }
        Command::Paths { input } => {
            let doc = load(&input, &read_options)?;
            for path in doc.never_visited() {
                println!("{}", path);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load(path: &Path, options: &ReadOptions) -> anyhow::Result<TrackedObject> {
    jsontally::read_object_file(path, options)
        .with_context(|| format!("failed to load JSON document `{}`", path.display()))
}

fn emit(doc: &TrackedObject, indent: usize, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            info!(path = ?path, "writing output");
            jsontally::write_file(path, doc, indent)
                .with_context(|| format!("failed to write `{}`", path.display()))
        }
        None => {
            let text = doc
                .to_json_string(indent)
                .context("failed to render JSON document")?;
            println!("{}", text);
            Ok(())
        }
    }
}
