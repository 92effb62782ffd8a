use clap::Parser;
use essence::cli::Cli;
use tracing::{debug, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    debug!("Starting essence v{}", env!("CARGO_PKG_VERSION"));

    cli.run().await?;

    Ok(())
}
