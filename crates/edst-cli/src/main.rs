// SPDX-License-Identifier: MIT
// Copyright (c) 2020 Austin Goudge
// Copyright (c) 2026 StarTuz

mod frd_http;
mod store;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use edst_core::gesture::{self, RouteAction};
use edst_core::preferential::{compose, is_on_amendment, pending_amendment, PendingRule};
use edst_core::route::FixTable;
use edst_core::{CommandResult, ComposeBuffer, EdstConfig, Interpreter, Submission};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::io::BufRead;
use std::path::PathBuf;

use frd_http::HttpFrdResolver;
use store::EntryStore;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON array of flight entries
    #[arg(short, long, env = "EDST_SNAPSHOT")]
    snapshot: PathBuf,

    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// ARTCC the client is signed into
    #[arg(long, env = "EDST_ARTCC")]
    artcc: Option<String>,

    /// Flight-data server used for FRD lookups
    #[arg(long, env = "EDST_FRD_URL")]
    frd_url: Option<String>,

    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpret one message compose area command, e.g. `QU ABCFX N123`
    Interpret { text: Vec<String> },
    /// Read commands from stdin, one per line. An empty line blanks the response.
    Repl,
    /// Clear a flight direct to a fix on its route
    Direct {
        fid: String,
        fix: String,
        /// Amend instead of staging a trial plan
        #[arg(long)]
        amend: bool,
    },
    /// Show preferential routes and which one is pending
    Pending { fid: String },
    /// Apply the n-th preferential route of a flight (arrival unless --departure)
    Reroute {
        fid: String,
        index: usize,
        #[arg(long)]
        departure: bool,
        #[arg(long)]
        amend: bool,
    },
    /// Put a flight back on its previous route
    PreviousRoute { fid: String },
}

fn print_result(result: &CommandResult) -> Result<()> {
    let mark = if result.is_accept() { "✓" } else { "X" };
    println!("{} {}", mark, result.display_text());
    for intent in &result.intents {
        println!("  -> {}", serde_json::to_string(intent)?);
    }
    Ok(())
}

fn action(amend: bool) -> RouteAction {
    if amend {
        RouteAction::Amend
    } else {
        RouteAction::TrialPlan
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = TermLogger::init(
        level,
        ConfigBuilder::new().build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let config_path = cli.config.clone().unwrap_or_else(EdstConfig::default_path);
    let mut config = EdstConfig::load(&config_path)
        .with_context(|| format!("Failed to load config {:?}", config_path))?;
    if let Some(artcc) = cli.artcc {
        config.artcc_id = artcc;
    }
    if cli.frd_url.is_some() {
        config.frd_url = cli.frd_url;
    }

    let entries = edst_core::load_snapshot(&cli.snapshot)
        .with_context(|| format!("Failed to load snapshot {:?}", cli.snapshot))?;
    let mut store = EntryStore::new(entries);
    store.manual_posting = config.manual_posting;

    let mut interpreter = Interpreter::new();
    if let Some(url) = &config.frd_url {
        interpreter = interpreter.with_frd_resolver(HttpFrdResolver::new(url.clone())?);
    }
    let table = FixTable::new();

    match cli.command {
        Commands::Interpret { text } => {
            let context = config.context();
            let result = interpreter.interpret(&text.join(" "), store.snapshot(), &context);
            print_result(&result)?;
            store.apply_all(&result.intents);
            if let Some(readout) = &store.readout {
                println!("{}", readout);
            }
        }
        Commands::Repl => {
            let mut buffer = ComposeBuffer::new();
            for line in std::io::stdin().lock().lines() {
                buffer.set_text(line?);
                let mut context = config.context();
                context.manual_posting = store.manual_posting;
                let submission = buffer.submit(&interpreter, store.snapshot(), &context);
                match submission {
                    Submission::Cleared => println!(),
                    Submission::Result(result) => {
                        print_result(&result)?;
                        store.apply_all(&result.intents);
                    }
                }
            }
        }
        Commands::Direct { fid, fix, amend } => {
            let entry = store
                .snapshot()
                .resolve(&fid.to_uppercase())
                .ok_or_else(|| anyhow::anyhow!("No flight matches {}", fid))?;
            match gesture::clear_direct(entry, &fix.to_uppercase(), action(amend)) {
                Ok(intent) => println!("{}", serde_json::to_string_pretty(&intent)?),
                Err(kind) => println!("Rejected: {:?}", kind),
            }
        }
        Commands::Pending { fid } => {
            let entry = store
                .snapshot()
                .resolve(&fid.to_uppercase())
                .ok_or_else(|| anyhow::anyhow!("No flight matches {}", fid))?;
            let names = entry.current_fix_names();
            for rule in [PendingRule::Arrival, PendingRule::Departure] {
                let pending = pending_amendment(entry, rule);
                println!(
                    "{:?}: on amendment = {}, pending = {}",
                    rule,
                    is_on_amendment(entry, rule),
                    pending.map(|c| c.effective_amendment()).unwrap_or_default()
                );
                for (i, candidate) in rule.candidates(entry).iter().enumerate() {
                    let composed = compose(candidate, &names)
                        .map(|c| c.amended_route)
                        .unwrap_or_else(|| "(no shared fix)".to_string());
                    println!(
                        "  [{}] {} eligible={} -> {}",
                        i,
                        candidate.effective_amendment(),
                        candidate.eligible,
                        composed
                    );
                }
            }
        }
        Commands::Reroute {
            fid,
            index,
            departure,
            amend,
        } => {
            let entry = store
                .snapshot()
                .resolve(&fid.to_uppercase())
                .ok_or_else(|| anyhow::anyhow!("No flight matches {}", fid))?;
            let rule = if departure {
                PendingRule::Departure
            } else {
                PendingRule::Arrival
            };
            let candidate = rule
                .candidates(entry)
                .get(index)
                .ok_or_else(|| anyhow::anyhow!("{} has no route #{}", entry.aircraft_id, index))?;
            match gesture::apply_preferential(entry, candidate, &table, action(amend)) {
                Ok(intent) => println!("{}", serde_json::to_string_pretty(&intent)?),
                Err(kind) => println!("Rejected: {:?}", kind),
            }
        }
        Commands::PreviousRoute { fid } => {
            let entry = store
                .snapshot()
                .resolve(&fid.to_uppercase())
                .ok_or_else(|| anyhow::anyhow!("No flight matches {}", fid))?;
            match gesture::restore_previous_route(entry, &table) {
                Some(intent) => println!("{}", serde_json::to_string_pretty(&intent)?),
                None => println!("{} has no previous route", entry.aircraft_id),
            }
        }
    }

    Ok(())
}
