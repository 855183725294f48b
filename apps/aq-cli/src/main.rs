use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use aq_store::{NetworkStore, Table};

#[derive(Parser)]
#[command(name = "aq-cli")]
#[command(about = "Aquaflow CLI - inspect and manage network sketch files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty network file
    New {
        /// Path of the network file to create
        path: PathBuf,
    },
    /// Show record and column counts for a network file
    Inspect {
        /// Path to the network file
        path: PathBuf,
    },
    /// List nodes in a network file
    Nodes {
        /// Path to the network file
        path: PathBuf,
        /// Emit JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
    /// List pipes in a network file, marking unresolvable endpoints
    Pipes {
        /// Path to the network file
        path: PathBuf,
        /// Emit JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("No such network file: {path}")]
    NotFound { path: PathBuf },

    #[error(transparent)]
    Store(#[from] aq_store::StoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::New { path } => cmd_new(&path),
        Commands::Inspect { path } => cmd_inspect(&path),
        Commands::Nodes { path, json } => cmd_nodes(&path, json),
        Commands::Pipes { path, json } => cmd_pipes(&path, json),
    }
}

fn open_snapshot(path: &Path) -> CliResult<NetworkStore> {
    if !path.is_file() {
        return Err(CliError::NotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(NetworkStore::open(Some(path))?)
}

fn cmd_new(path: &Path) -> CliResult<()> {
    let mut store = NetworkStore::new();
    store.save_as(path)?;
    println!("✓ Created empty network: {}", path.display());
    Ok(())
}

fn cmd_inspect(path: &Path) -> CliResult<()> {
    let store = open_snapshot(path)?;
    println!("Network file: {}", path.display());
    println!(
        "  nodes: {} records, {} columns",
        store.nodes().len(),
        store.column_count(Table::Nodes)
    );
    println!(
        "  pipes: {} records, {} columns",
        store.pipes().len(),
        store.column_count(Table::Pipes)
    );

    let unresolved = store
        .pipes()
        .iter()
        .filter(|p| store.node_by_name(&p.node1).is_none() || store.node_by_name(&p.node2).is_none())
        .count();
    if unresolved > 0 {
        println!("  {} pipe(s) with unresolvable endpoints (not drawable)", unresolved);
    }
    Ok(())
}

fn cmd_nodes(path: &Path, json: bool) -> CliResult<()> {
    let store = open_snapshot(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(store.nodes())?);
        return Ok(());
    }

    if store.nodes().is_empty() {
        println!("No nodes in network");
    } else {
        println!("Nodes:");
        for node in store.nodes() {
            let name = if node.name.is_empty() { "(unnamed)" } else { &node.name };
            println!(
                "  {} - {} at ({}, {}), {} connected pipe(s)",
                node.id,
                name,
                node.x,
                node.y,
                store.connectivity(node.id)
            );
        }
    }
    Ok(())
}

fn cmd_pipes(path: &Path, json: bool) -> CliResult<()> {
    let store = open_snapshot(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(store.pipes())?);
        return Ok(());
    }

    if store.pipes().is_empty() {
        println!("No pipes in network");
    } else {
        println!("Pipes:");
        for pipe in store.pipes() {
            let mark = |name: &str| {
                if store.node_by_name(name).is_some() {
                    String::new()
                } else {
                    " (unresolved)".to_string()
                }
            };
            println!(
                "  {} - {}{} -> {}{}",
                pipe.id,
                pipe.node1,
                mark(&pipe.node1),
                pipe.node2,
                mark(&pipe.node2)
            );
        }
    }
    Ok(())
}
