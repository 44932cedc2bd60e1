use clap::Parser;
use expense_tracker::{
    cli::{self, Cli},
    config::{database, settings},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env file (non-fatal, env vars can be set externally)
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    // 2. Parse arguments and load settings
    let cli = Cli::parse();
    let mut app_config = settings::load_app_configuration(&cli.config)?;
    if let Some(url) = cli.database_url.clone() {
        app_config.database_url = url;
    }

    // 3. Initialize tracing; RUST_LOG wins over the configured filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&app_config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
    info!(dotenv_loaded, "Loaded configuration from {}", cli.config.display());

    // 4. Initialize database
    let db = database::init_db(&app_config.database_url)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Run the command
    let output = cli::execute(&db, cli.command)
        .await
        .inspect_err(|e| error!("Command failed: {}", e))?;
    println!("{output}");

    Ok(())
}
