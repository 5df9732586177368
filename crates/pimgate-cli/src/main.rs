mod export;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "pimgate-cli")]
#[command(about = "Salsify product data command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Export the organization's attribute list to a local JSON file.
    ExportAttributes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::ExportAttributes => export::run().await,
    }
}
