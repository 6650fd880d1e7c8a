use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// pantrypal - Cook with what you have
#[derive(Parser)]
#[command(name = "pantrypal")]
#[command(about = "Match pantry ingredients to recipes, ranked by fit and health", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Rank recipes for the given ingredients
    Match {
        /// Ingredients, e.g. "2 chicken breasts" garlic rice
        #[arg(required = true)]
        ingredients: Vec<String>,

        /// Maximum number of recipes (overrides config file)
        #[arg(long)]
        quota: Option<usize>,

        /// Recipe CSV (overrides config file)
        #[arg(long)]
        dataset: Option<String>,
    },
    /// Print recipe dataset statistics
    Inspect {
        /// Recipe CSV (overrides config file)
        #[arg(long)]
        dataset: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = pantrypal::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    pantrypal::observability::init_observability(
        "pantrypal",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Match {
            ingredients,
            quota,
            dataset,
        } => cli::search::run_match(config, ingredients, quota, dataset),
        Commands::Inspect { dataset } => cli::search::inspect(config, dataset),
    }
}
