use clap::Parser;
use snel_search::frontend::start_all;
use snel_search::logging;
use snel_search::shared::config::set_config_path;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "snel_search", about = "Federated search dispatch server")]
struct Args {
    /// Configuration file, without extension (overrides SNEL_SEARCH_CONFIG)
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = args.config {
        set_config_path(path)
            .map_err(|path| anyhow::anyhow!("configuration path already set, ignoring {path}"))?;
    }

    logging::init()?;
    info!("snel_search is starting...");
    start_all().await?;
    info!("snel_search stopped");
    Ok(())
}
