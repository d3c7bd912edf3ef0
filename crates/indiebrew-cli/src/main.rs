mod classify;
mod rank;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use indiebrew_core::{ClassifierLists, DisplayOrder, RankStrategy, MAX_RESULTS};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "indiebrew-cli")]
#[command(about = "Find and rank independent coffee shops")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank a JSON snapshot of places around a point
    Rank {
        /// Origin latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Origin longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// JSON array of provider place records
        #[arg(long)]
        input: PathBuf,
        /// Ranking strategy: distance or composite
        #[arg(long, default_value = "composite")]
        strategy: RankStrategy,
        /// Maximum number of results to print
        #[arg(long, default_value_t = MAX_RESULTS)]
        max: usize,
        /// Drop places whose name carries no coffee hint
        #[arg(long)]
        coffee_only: bool,
        /// Display order applied after ranking: ranked or rating
        #[arg(long, default_value = "ranked")]
        sort: DisplayOrder,
        /// Classifier lists YAML overriding the built-in lists
        #[arg(long, env = "INDIEBREW_LISTS_PATH")]
        lists: Option<PathBuf>,
    },
    /// Classify business names as chain or independent
    Classify {
        #[arg(required = true)]
        names: Vec<String>,
        /// Classifier lists YAML overriding the built-in lists
        #[arg(long, env = "INDIEBREW_LISTS_PATH")]
        lists: Option<PathBuf>,
    },
}

fn load_classifier_lists(path: Option<&Path>) -> anyhow::Result<ClassifierLists> {
    match path {
        Some(path) => indiebrew_core::load_lists(path)
            .with_context(|| format!("failed to load classifier lists from {}", path.display())),
        None => Ok(ClassifierLists::default()),
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Rank {
            lat,
            lng,
            input,
            strategy,
            max,
            coffee_only,
            sort,
            lists,
        } => {
            let lists = load_classifier_lists(lists.as_deref())?;
            let request = rank::RankRequest {
                lat,
                lng,
                input,
                strategy,
                max_results: max,
                coffee_only,
                sort,
            };
            let results = rank::run_rank(&lists, &request)?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Classify { names, lists } => {
            let lists = load_classifier_lists(lists.as_deref())?;
            for line in classify::run_classify(&lists, &names) {
                println!("{line}");
            }
        }
    }

    Ok(())
}
