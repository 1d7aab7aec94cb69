//! Georegistry CLI — local mirror of the EPSG geodetic registry.
//!
//! Usage:
//!   georegistry init [--db path]
//!   georegistry sync <file> [--db path] [--strict] [--remove-missing]
//!   georegistry get <identifier> [--db path]
//!   georegistry list [--kind tag] [--db path]

use clap::{Parser, Subcommand};
use georegistry::{LoadOptions, MergeOptions, Record, RecordId, Registry, SqliteStore};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "georegistry",
    version,
    about = "Local queryable mirror of the EPSG geodetic registry"
)]
struct Cli {
    /// Path to the SQLite database file
    #[arg(long, global = true, default_value = "georegistry.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty registry database
    Init,
    /// Load a GML dictionary export and merge it into the registry
    Sync {
        /// Path to the GML export file
        file: PathBuf,
        /// Fail on the first malformed or unresolved record
        #[arg(long)]
        strict: bool,
        /// Remove records absent from the export
        #[arg(long)]
        remove_missing: bool,
        /// Keep existing records when the export differs
        #[arg(long)]
        skip_existing: bool,
    },
    /// Print a record by its URN identifier
    Get {
        /// URN identifier, e.g. urn:ogc:def:ellipsoid:EPSG::7030
        identifier: String,
    },
    /// List records in the registry
    List {
        /// Only show records of this kind, e.g. Ellipsoid or ProjectedCRS
        #[arg(long)]
        kind: Option<String>,
    },
}

fn open_registry(db: &PathBuf) -> Result<Registry<SqliteStore>, String> {
    let store = SqliteStore::open(db).map_err(|e| format!("failed to open database: {}", e))?;
    Ok(Registry::new(store))
}

fn cmd_init(db: &PathBuf) -> i32 {
    match open_registry(db) {
        Ok(registry) => {
            let count = registry.len().unwrap_or(0);
            println!("Registry ready at {} ({} records)", db.display(), count);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_sync(
    registry: &Registry<SqliteStore>,
    file: &PathBuf,
    strict: bool,
    remove_missing: bool,
    skip_existing: bool,
) -> i32 {
    let text = match std::fs::read_to_string(file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", file.display(), e);
            return 1;
        }
    };

    let mut load = LoadOptions::new();
    if strict {
        load = load.strict();
    }
    let mut options = MergeOptions::new();
    if strict {
        options = options.strict();
    }
    if remove_missing {
        options = options.remove_missing();
    }
    if skip_existing {
        options = options.skip_existing();
    }

    match registry.sync(&text, load, &options) {
        Ok(report) => {
            println!(
                "Synced: {} inserted, {} updated, {} unchanged, {} removed",
                report.inserted.len(),
                report.updated.len(),
                report.unchanged.len(),
                report.removed.len()
            );
            if !report.dangling.is_empty() {
                println!("Warning: {} unresolved references", report.dangling.len());
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn print_record(record: &Record) {
    println!("{}", record.id);
    println!("  kind: {}", record.kind.as_str());
    if let Some(name) = &record.name {
        println!("  name: {}", name);
    }
    for (field, value) in &record.fields {
        println!("  {}: {}", field, value);
    }
}

fn cmd_get(registry: &Registry<SqliteStore>, identifier: &str) -> i32 {
    match registry.get(&RecordId::from(identifier)) {
        Ok(Some(record)) => {
            print_record(&record);
            0
        }
        Ok(None) => {
            eprintln!("Error: no record with identifier '{}'", identifier);
            1
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_list(registry: &Registry<SqliteStore>, kind: Option<&str>) -> i32 {
    let records = match registry.records() {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let mut shown = 0;
    for record in &records {
        if let Some(kind) = kind {
            if record.kind.as_str() != kind {
                continue;
            }
        }
        println!(
            "{:<48}  {:<20}  {}",
            record.id,
            record.kind.as_str(),
            record.name.as_deref().unwrap_or("-")
        );
        shown += 1;
    }
    if shown == 0 {
        println!("No records.");
    }
    0
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        std::process::exit(cmd_init(&cli.db));
    }

    let registry = match open_registry(&cli.db) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Init => unreachable!(),
        Commands::Sync {
            file,
            strict,
            remove_missing,
            skip_existing,
        } => cmd_sync(&registry, &file, strict, remove_missing, skip_existing),
        Commands::Get { identifier } => cmd_get(&registry, &identifier),
        Commands::List { kind } => cmd_list(&registry, kind.as_deref()),
    };
    std::process::exit(code);
}
