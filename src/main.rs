use anyhow::Result;
use clap::Parser;
use metcast::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    metcast::logging::init(&cli)?;
    metcast::run(cli).await
}
