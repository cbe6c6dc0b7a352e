//! Command-line entry point.

use clap::{Parser, Subcommand};
use docdex::{Config, Docs};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "docdex", about = "Local documentation index", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the corpus (or serve the cache) and report how much loaded.
    Refresh {
        /// Bypass the cache and refetch unconditionally.
        #[arg(long)]
        force: bool,
    },
    /// Search the indexed corpus.
    Search {
        /// The query string.
        query: String,
        /// Maximum number of results.
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Drop the local cache.
    Clear,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().map_err(|error| miette::miette!("{error}"))?;
    let docs = Docs::new(config).map_err(|error| miette::miette!("{error}"))?;

    match cli.command {
        Command::Refresh { force } => {
            let refresh = docs.refresh(force).await.map_err(|error| miette::miette!("{error}"))?;
            let origin = if refresh.from_cache { "from cache" } else { "fetched" };
            println!("{} pages loaded ({origin})", refresh.count());
        },
        Command::Search { query, limit } => {
            let refresh = docs.refresh(false).await.map_err(|error| miette::miette!("{error}"))?;
            let results = docs.search(&query, &refresh.records, limit);
            if results.is_empty() {
                println!("no results for {query:?}");
            }
            for record in results {
                println!("{}\n    {}", record.title, record.url);
            }
        },
        Command::Clear => {
            docs.clear_cache().map_err(|error| miette::miette!("{error}"))?;
            println!("cache cleared");
        },
    }
    Ok(())
}
