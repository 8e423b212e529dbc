use anyhow::Result;
use clap::Parser;

use wxc::cli::Cli;
use wxc::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    cli.run().await
}
