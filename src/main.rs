use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;
mod migrate;

/// bistro - weekly meal plans under allergen and budget rules
#[derive(Parser)]
#[command(name = "bistro")]
#[command(about = "Weekly meal plan scheduling for restaurant customers", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage the menu catalog
    Menu {
        #[command(subcommand)]
        command: cli::menu::MenuCommand,
    },
    /// Manage customers
    Customer {
        #[command(subcommand)]
        command: cli::customer::CustomerCommand,
    },
    /// Create, edit and commit meal plans
    Plan {
        #[command(subcommand)]
        command: cli::plan::PlanCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = bistro::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    bistro::observability::init_observability(&config.observability.log_level)?;

    match cli.command {
        Commands::Migrate => migrate::migrate(&config).await,
        Commands::Menu { command } => cli::menu::run(config, command).await,
        Commands::Customer { command } => cli::customer::run(config, command).await,
        Commands::Plan { command } => cli::plan::run(config, command).await,
    }
}
