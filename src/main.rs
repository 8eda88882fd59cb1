use anyhow::Result;
use clap::Parser;
use stripebird::{
    cli::Cli,
    client::{MoneybirdClient, StripeClient},
    config::Config,
    sync,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = try_main().await {
        tracing::error!("Error: {err}");
        tracing::error!("{err:?}");
        std::process::exit(1);
    }
}

async fn try_main() -> Result<()> {
    let args = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Starting stripebird v{}", env!("CARGO_PKG_VERSION"));

    let stripe = StripeClient::new(&config)?;
    let moneybird = MoneybirdClient::new(&config)?;

    let summary = sync::run(&config, &args, &stripe, &moneybird).await?;

    tracing::info!(
        "Created {} invoices and {} payments for {} fetched payments",
        summary.invoices_created,
        summary.payments_created,
        summary.fetched
    );

    Ok(())
}
