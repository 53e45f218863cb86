//! Command-line front end for the item store.
//!
//! # Responsibility
//! - Drive add/list/search/delete against the same snapshot file as the UI.
//! - Apply the same input policy as the UI (trimmed, required fields;
//!   non-blank search keyword).
//!
//! # Invariants
//! - Every printed label is the 1-based store position, so `delete <label>`
//!   removes the row it was printed next to, from `list` or `search` alike.

use clap::{Args, Parser, Subcommand};
use log::info;
use resurrect_core::{
    default_log_level, init_logging, open_file_store, resolve_data_path, FileItemStore, Item,
    SearchHit,
};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Record, list, search and remove items offered for reuse.
#[derive(Parser, Debug)]
#[command(name = "resurrect", version, about, long_about = None)]
struct Cli {
    /// Snapshot file (defaults to $RESURRECT_DATA_PATH, then ./items.json)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Directory for rolling log files
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add an item
    Add(AddArgs),
    /// List every item with its label
    List,
    /// List items whose name, description or contact contains a keyword
    Search {
        keyword: String,
    },
    /// Delete the item shown with LABEL by `list` or `search`
    Delete {
        label: usize,
    },
}

#[derive(Args, Debug)]
struct AddArgs {
    #[arg(short, long)]
    name: String,
    #[arg(short, long)]
    description: String,
    #[arg(short, long)]
    contact: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    start_logging(&cli);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut store = open_file_store(resolve_data_path(cli.data_file.as_deref(), &cwd));
    info!(
        "event=cli_start module=cli status=ok data_path={} count={}",
        store.repository().path().display(),
        store.len()
    );

    let mut stdout = std::io::stdout().lock();
    match run(&cli.command, &mut store, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn start_logging(cli: &Cli) {
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    let log_dir = match &cli.log_dir {
        Some(dir) if dir.is_relative() => std::env::current_dir()
            .map(|cwd| cwd.join(dir))
            .unwrap_or_else(|_| dir.clone()),
        Some(dir) => dir.clone(),
        None => std::env::temp_dir().join("resurrect").join("logs"),
    };

    if let Err(err) = init_logging(&level, &log_dir.to_string_lossy()) {
        eprintln!("warning: logging disabled: {err}");
    }
}

fn run(command: &Command, store: &mut FileItemStore, out: &mut impl Write) -> Result<(), String> {
    match command {
        Command::Add(args) => {
            let item = Item::validated(&args.name, &args.description, &args.contact)
                .map_err(|err| err.to_string())?;
            store.add(item).map_err(|err| err.to_string())?;
            writeln!(out, "Item added ({} total).", store.len()).map_err(|err| err.to_string())
        }
        Command::List => print_hits(out, &store.search_hits("")),
        Command::Search { keyword } => {
            let keyword = keyword.trim();
            if keyword.is_empty() {
                return Err("search keyword cannot be empty".to_string());
            }
            print_hits(out, &store.search_hits(keyword))
        }
        Command::Delete { label } => {
            let position = label
                .checked_sub(1)
                .ok_or_else(|| "labels start at 1".to_string())?;
            let removed = store.delete(position).map_err(|err| err.to_string())?;
            writeln!(out, "Deleted {}: {}", label, removed.name()).map_err(|err| err.to_string())
        }
    }
}

fn print_hits(out: &mut impl Write, hits: &[SearchHit]) -> Result<(), String> {
    if hits.is_empty() {
        return writeln!(out, "No items.").map_err(|err| err.to_string());
    }
    for hit in hits {
        writeln!(
            out,
            "{}. {} | {} | {}",
            hit.position + 1,
            hit.item.name(),
            hit.item.description(),
            hit.item.contact()
        )
        .map_err(|err| err.to_string())?;
    }
    Ok(())
}
