use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;

use output_predictor::cli::{self, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenv().ok();

    let cli = Cli::parse();
    cli::run(cli).await
}
