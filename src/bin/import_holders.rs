//! Replaces the ClickHouse `holders` table with the contents of the
//! configured CSV file.

use anyhow::{Context, Result};

use mito_holders::config::Config;
use mito_holders::db::{
    init::connect_to_clickhouse, load_configured_holders, operations, store::validate_holders,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut config = Config::from_env()?;
    if let Some(path) = std::env::args().nth(1) {
        config.csv_path = path.into();
    }

    tracing::info!(
        "Importing holders from {} into ClickHouse at {}",
        config.csv_path.display(),
        config.clickhouse_url
    );

    let mut holders = load_configured_holders(&config)
        .with_context(|| format!("Failed to read {}", config.csv_path.display()))?;
    holders.sort_by_key(|holder| holder.rank);
    validate_holders(&holders)?;
    if holders.is_empty() {
        tracing::warn!("No holder rows found, the table will be left empty");
    }

    let client = connect_to_clickhouse(
        &config.clickhouse_url,
        &config.clickhouse_database,
        config.connect_retries,
    )
    .await?;

    operations::recreate_holders_table(&client).await?;
    let written = operations::insert_holders(&client, &holders, config.import_batch_size).await?;

    tracing::info!("Database import complete: {} holders written", written);
    Ok(())
}
