use anyhow::Result;
use clap::Parser;
use simek_cli::SimekCli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
pub async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = SimekCli::parse();
    cli.run(&mut std::io::stdout().lock()).await
}
