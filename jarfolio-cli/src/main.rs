//! Jarfolio - a personal catalog for binary artifact metadata
//!
//! Main entry point. The CLI is the presentation collaborator of the
//! catalog contract: it drives the store's mutators and renders views,
//! while all semantics live in `jarfolio-core`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use tracing_subscriber::EnvFilter;

use jarfolio_core::catalog::{
    export_snapshot, format_bytes, import_and_merge, seed_entries, view, BestEffort,
    CatalogEntry, CatalogStore, EntryDraft, SortMode,
};

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Sort modes for `list`
#[derive(Debug, Clone, ValueEnum)]
enum SortArg {
    /// Ascending by name
    Alpha,
    /// Descending by size
    Size,
    /// Descending by when the entry was added
    Recent,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Alpha => SortMode::Alpha,
            SortArg::Size => SortMode::Size,
            SortArg::Recent => SortMode::Recent,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "jarfolio",
    about = "Personal catalog for tracking binary artifact metadata",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Override the snapshot file path (defaults to the platform data dir)
    #[clap(long, global = true)]
    store: Option<PathBuf>,

    /// Set log level
    #[clap(long, default_value = "warn", global = true)]
    log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add an artifact from a remote reference
    Add {
        /// Artifact name
        #[clap(long)]
        name: Option<String>,

        /// Version string
        #[clap(long)]
        version: Option<String>,

        /// Free-text description
        #[clap(long)]
        description: Option<String>,

        /// Maven group coordinate
        #[clap(long)]
        group_id: Option<String>,

        /// Maven artifact coordinate
        #[clap(long)]
        artifact_id: Option<String>,

        /// Comma-separated tags
        #[clap(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Artifact URL; probed for a size hint when given
        #[clap(long)]
        url: Option<String>,

        /// Source repository URL
        #[clap(long)]
        repo: Option<String>,

        /// License identifier
        #[clap(long)]
        license: Option<String>,
    },

    /// Add an artifact from a local file, computing its digest
    AddFile {
        /// Path to the artifact file
        path: PathBuf,
    },

    /// List catalog entries, filtered and sorted
    List {
        /// Free-text filter (name, description, tags, coordinates)
        query: Option<String>,

        /// Sort order
        #[clap(long, value_enum, default_value = "recent")]
        sort: SortArg,

        /// Output results as JSON
        #[clap(long)]
        json: bool,
    },

    /// Show full details of one entry
    Show {
        /// Entry id
        id: String,
    },

    /// Print the Maven dependency snippet for an entry
    Snippet {
        /// Entry id
        id: String,
    },

    /// Remove an entry
    Remove {
        /// Entry id
        id: String,
    },

    /// Remove all entries
    Clear,

    /// Replace the catalog with the demo seed set
    Reset,

    /// Export the catalog to a portable JSON document
    Export {
        /// Output file
        #[clap(long, short, default_value = "jarfolio.json")]
        output: PathBuf,
    },

    /// Import a previously exported document, merging it in
    Import {
        /// Document to import
        path: PathBuf,
    },
}

/// Initialize tracing from the --log-level flag; logs go to stderr.
fn initialize_tracing(log_level: &LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_filter_directive()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level);

    let mut store = match cli.store {
        Some(path) => CatalogStore::open(path)?,
        None => CatalogStore::open_default()?,
    };
    tracing::debug!(
        "Opened catalog at {} with {} entries",
        store.path().display(),
        store.items().len()
    );

    match cli.command {
        Command::Add {
            name,
            version,
            description,
            group_id,
            artifact_id,
            tags,
            url,
            repo,
            license,
        } => {
            let draft = EntryDraft {
                name: name.unwrap_or_default(),
                version: version.unwrap_or_default(),
                description: description.unwrap_or_default(),
                group_id: group_id.unwrap_or_default(),
                artifact_id: artifact_id.unwrap_or_default(),
                tags,
                url,
                repo,
                license,
                ..Default::default()
            };

            let ingested = store.ingest_remote_reference(draft).await?;
            println!(
                "Added '{}' ({})",
                ingested.entry.name, ingested.entry.id
            );

            match ingested.size_probe {
                Some(BestEffort::Ok(size)) => {
                    println!("Size: {} (from remote probe)", format_bytes(size));
                }
                Some(BestEffort::Degraded(reason)) => {
                    println!("Size unknown (probe failed: {reason})");
                }
                None => {}
            }

            Ok(())
        }

        Command::AddFile { path } => {
            let ingested = store.ingest_local_file(&path).await?;
            println!(
                "Added '{}' ({})",
                ingested.entry.name, ingested.entry.id
            );
            println!("Size: {}", format_bytes(ingested.entry.size));

            match ingested.digest {
                BestEffort::Ok(digest) => println!("SHA-256: {digest}"),
                BestEffort::Degraded(reason) => {
                    println!("SHA-256 unavailable ({reason})");
                }
            }

            Ok(())
        }

        Command::List { query, sort, json } => {
            list_command(&store, query.as_deref().unwrap_or(""), sort.into(), json)
        }

        Command::Show { id } => show_command(&store, &id),

        Command::Snippet { id } => {
            let entry = store
                .get(&id)
                .with_context(|| format!("No entry with id '{id}'"))?;
            println!("{}", entry.maven_snippet());
            Ok(())
        }

        Command::Remove { id } => {
            if store.remove(&id)? {
                println!("Removed '{id}'");
            } else {
                println!("No entry with id '{id}'");
            }
            Ok(())
        }

        Command::Clear => {
            store.replace_all(Vec::new())?;
            println!("Catalog cleared.");
            Ok(())
        }

        Command::Reset => {
            store.replace_all(seed_entries())?;
            println!("Catalog reset to the demo seed set.");
            Ok(())
        }

        Command::Export { output } => {
            let document = export_snapshot(store.catalog())?;
            std::fs::write(&output, document)
                .with_context(|| format!("Failed to write export: {}", output.display()))?;
            println!(
                "Exported {} item(s) to {}",
                store.items().len(),
                output.display()
            );
            Ok(())
        }

        Command::Import { path } => {
            let document = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read import file: {}", path.display()))?;
            let count = import_and_merge(&mut store, &document)?;
            println!("Imported {count} item(s).");
            Ok(())
        }
    }
}

/// Table row for list output
#[derive(Tabled)]
struct ListRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Added")]
    added: String,
}

fn list_command(store: &CatalogStore, query: &str, sort: SortMode, json_output: bool) -> Result<()> {
    let results = view(store.items(), query, sort);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No artifacts found. Add one with `jarfolio add` or `jarfolio add-file`.");
        return Ok(());
    }

    let rows: Vec<ListRow> = results
        .iter()
        .map(|entry| ListRow {
            id: entry.id.clone(),
            name: entry.name.clone(),
            version: entry.version.clone(),
            size: format_bytes(entry.size),
            tags: entry.tags.join(", "),
            added: format_added_at(entry),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();

    println!("{table}");
    println!("{} artifact(s)", results.len());

    Ok(())
}

fn show_command(store: &CatalogStore, id: &str) -> Result<()> {
    let entry = store
        .get(id)
        .with_context(|| format!("No entry with id '{id}'"))?;

    println!();
    println!("{}  v{}", entry.name, entry.version);
    if !entry.description.is_empty() {
        println!("{}", entry.description);
    }
    println!();
    println!("Id:         {}", entry.id);
    println!("Size:       {}", format_bytes(entry.size));
    println!("Added:      {}", format_added_at(entry));
    println!("Tags:       {}", display_or_dash(&entry.tags.join(", ")));
    println!("URL:        {}", display_or_dash(entry.url.as_deref().unwrap_or("")));
    println!("Repository: {}", display_or_dash(entry.repo.as_deref().unwrap_or("")));
    println!("License:    {}", display_or_dash(entry.license.as_deref().unwrap_or("")));
    println!("SHA-256:    {}", display_or_dash(entry.digest.as_deref().unwrap_or("")));
    println!();
    println!("Maven snippet:");
    println!("{}", entry.maven_snippet());

    Ok(())
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn format_added_at(entry: &CatalogEntry) -> String {
    chrono::DateTime::from_timestamp_millis(entry.added_at)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}
