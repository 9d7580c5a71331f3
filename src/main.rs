mod components;
mod config;
mod error;
mod startup;
mod sync;
mod utils;

use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting iqamasync");

    // Load configuration
    let config = startup::load_config()?;

    // One full fetch-filter-synthesize-publish pass
    sync::run(&config).await?;

    Ok(())
}
