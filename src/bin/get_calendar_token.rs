use iqamasync::components::google_calendar::{
    AuthFlow, ClientSecrets, InstalledAppFlow, TokenManager,
};
use iqamasync::config::Config;
use iqamasync::error::Error;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    // Load configuration
    let config = Config::load()?;

    let secrets = ClientSecrets::load(&config.client_secrets_file)?;
    let flow = InstalledAppFlow::new(config.oauth_listen_port);

    // Run the interactive flow unconditionally, then persist for unattended syncs
    let credential = flow.authorize(&secrets).await?;

    let token_manager = TokenManager::new(config.token_file.as_str(), secrets);
    token_manager.save(&credential)?;

    info!("Token successfully saved to {}", config.token_file);

    Ok(())
}
