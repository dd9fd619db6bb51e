use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use portal_db::schema::{initialize_database, seed_appointment_options};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .wrap_err("DATABASE_URL environment variable must be set")?;

    info!("Connecting to database...");
    let db_pool = portal_db::create_pool(&database_url).await?;

    info!("Initializing database schema...");
    initialize_database(&db_pool).await?;

    let seeded = seed_appointment_options(&db_pool).await?;
    info!(seeded, "Database schema initialized successfully");

    Ok(())
}
