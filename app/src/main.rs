#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use command::{
    AddStrategy, AnalyzeInput, AnalyzeStrategy, CommandStrategy, DeleteStrategy, GetStrategy,
    InfoStrategy, InitStrategy, ListInput, ListStrategy, QueryStrategy, ValueInput,
    VersionStrategy,
};
use strand_config::Config;
use strand_core::{FilterCriteria, PropertySchema, StringCatalog};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "strand")]
#[command(about = "Analyze, store and query strings by their properties", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/strand/config.json
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Database URL, overriding the config file ("memory" for a throwaway store)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Init,
    /// Show version
    Version,
    /// Show configuration, schema and store status
    Info,
    /// Print the properties of a string without storing it
    Analyze { value: String },
    /// Analyze and store a string
    Add { value: String },
    /// Fetch a stored string
    Get { value: String },
    /// List stored strings, optionally filtered
    List {
        #[arg(long)]
        palindrome: Option<bool>,

        #[arg(long)]
        min_length: Option<i64>,

        #[arg(long)]
        max_length: Option<i64>,

        #[arg(long)]
        word_count: Option<i64>,

        #[arg(long)]
        contains_character: Option<String>,

        /// Extra condition such as `vowel_count:ge:2` or `length>5`
        #[arg(short = 'w', long = "where")]
        clauses: Vec<String>,
    },
    /// Filter stored strings with a plain-English query
    Query { text: String },
    /// Delete a stored string
    Delete { value: String },
}

fn init_logging(config: &Config) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.logging.level))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn open_catalog(config: &Config) -> anyhow::Result<Arc<StringCatalog>> {
    let repo = strand_store::open(&config.database.url).await?;
    let schema = Arc::new(PropertySchema::standard());
    debug!("Catalog ready with {} properties", schema.len());
    Ok(Arc::new(StringCatalog::new(schema, repo)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let loaded = Config::read(&config_path)?;
    let found = loaded.is_some();
    let mut config = loaded.unwrap_or_default();
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }

    init_logging(&config)?;
    info!("Starting strand {}", env!("CARGO_PKG_VERSION"));
    if !found && !matches!(cli.command, Commands::Init) {
        info!(
            "Config file not found at {}, using defaults. Run 'strand init' to create one.",
            config_path.display()
        );
    }

    match cli.command {
        Commands::Init => InitStrategy.execute(config_path).await,
        Commands::Version => VersionStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(config).await,
        Commands::Analyze { value } => {
            AnalyzeStrategy
                .execute(AnalyzeInput {
                    schema: PropertySchema::standard(),
                    value,
                })
                .await
        }
        Commands::Add { value } => {
            let catalog = open_catalog(&config).await?;
            AddStrategy.execute(ValueInput { catalog, value }).await
        }
        Commands::Get { value } => {
            let catalog = open_catalog(&config).await?;
            GetStrategy.execute(ValueInput { catalog, value }).await
        }
        Commands::List {
            palindrome,
            min_length,
            max_length,
            word_count,
            contains_character,
            clauses,
        } => {
            let catalog = open_catalog(&config).await?;
            let criteria = FilterCriteria {
                is_palindrome: palindrome,
                min_length,
                max_length,
                word_count,
                contains_character,
            };
            ListStrategy
                .execute(ListInput {
                    catalog,
                    criteria,
                    clauses,
                })
                .await
        }
        Commands::Query { text } => {
            let catalog = open_catalog(&config).await?;
            QueryStrategy
                .execute(ValueInput {
                    catalog,
                    value: text,
                })
                .await
        }
        Commands::Delete { value } => {
            let catalog = open_catalog(&config).await?;
            DeleteStrategy.execute(ValueInput { catalog, value }).await
        }
    }
}
