//! Hexify - export color design tokens as SCSS, CSS, or JSON.
//!
//! Runs the plugin core against a JSON variable store, either as one-shot
//! commands or as a line-delimited message bridge.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hexify::plugin::Flow;
use hexify::tokens::{discover_collections, export_collections};
use hexify::{Config, MemoryHost, OutputFormat, PluginSession, SortMode};

/// Export color design tokens as SCSS, CSS, or JSON
#[derive(Parser)]
#[command(name = "hexify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List collections that contain color variables
    Collections {
        /// Variable store file (JSON)
        #[arg(short, long, env = "HEXIFY_STORE")]
        store: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Export color variables
    Export {
        /// Variable store file (JSON)
        #[arg(short, long, env = "HEXIFY_STORE")]
        store: PathBuf,

        /// Collection ids to export (defaults to every color collection)
        #[arg(short, long = "collection")]
        collections: Vec<String>,

        /// Output format (scss, css, json)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Variable ordering (source, name)
        #[arg(long)]
        sort: Option<SortMode>,

        /// Don't wrap CSS output in a :root block
        #[arg(long)]
        no_wrap_root: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Exchange UI messages as JSON lines over stdin/stdout
    Serve {
        /// Variable store file (JSON)
        #[arg(short, long, env = "HEXIFY_STORE")]
        store: PathBuf,
    },

    /// Show configuration
    Config {
        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for exports and messages
    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Collections { store, format } => cmd_collections(&store, &format),
        Commands::Export { store, collections, format, sort, no_wrap_root, output } => {
            cmd_export(&store, collections, format, sort, no_wrap_root, output.as_deref())
        }
        Commands::Serve { store } => cmd_serve(&store),
        Commands::Config { path } => cmd_config(path),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "hexify", &mut io::stdout());
            Ok(())
        }
    }
}

fn load_host(store: &Path) -> Result<MemoryHost> {
    MemoryHost::from_file(store)
        .with_context(|| format!("Failed to load variable store {}", store.display()))
}

/// List color collections.
fn cmd_collections(store: &Path, format: &str) -> Result<()> {
    let host = load_host(store)?;
    let rt = tokio::runtime::Runtime::new()?;
    let collections = rt.block_on(discover_collections(&host));

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&collections)?;
            println!("{json}");
        }
        _ => {
            for collection in &collections {
                println!("{}  {}", collection.id, collection.name);
            }
            println!("\nTotal: {} collections", collections.len());
        }
    }

    Ok(())
}

/// Export collections to stdout or a file.
fn cmd_export(
    store: &Path,
    collections: Vec<String>,
    format: Option<OutputFormat>,
    sort: Option<SortMode>,
    no_wrap_root: bool,
    output: Option<&Path>,
) -> Result<()> {
    let config = Config::load()?;
    let format = format.unwrap_or(config.export.format);
    let mut options = config.export.render_options();
    if let Some(sort) = sort {
        options.sort = sort;
    }
    if no_wrap_root {
        options.wrap_root = false;
    }

    let host = load_host(store)?;
    let rt = tokio::runtime::Runtime::new()?;

    let content = rt.block_on(async {
        let ids = if collections.is_empty() {
            discover_collections(&host).await.into_iter().map(|c| c.id).collect()
        } else {
            collections
        };
        export_collections(&host, &ids, format, &options).await
    })?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{content}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {format} export to {}", path.display());
        }
        None => println!("{content}"),
    }

    Ok(())
}

/// Bridge UI messages between stdin/stdout and a plugin session.
fn cmd_serve(store: &Path) -> Result<()> {
    let config = Config::load()?;
    let host = Arc::new(load_host(store)?);
    let session = PluginSession::new(Arc::clone(&host), config.export.render_options());

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        session.start(&config.panel);

        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = io::stdout();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let flow = session.dispatch_raw(&line).await;

            for message in host.take_posted() {
                writeln!(stdout, "{}", serde_json::to_string(&message)?)?;
            }
            stdout.flush()?;

            for notice in host.take_notifications() {
                eprintln!("{notice}");
            }

            if flow == Flow::Close {
                break;
            }
        }

        Ok::<(), anyhow::Error>(())
    })
}

/// Show configuration.
fn cmd_config(show_path: bool) -> Result<()> {
    if show_path {
        if let Some(path) = Config::config_dir() {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let config = Config::load()?;
    let toml = toml::to_string_pretty(&config)?;
    println!("{toml}");

    Ok(())
}
