use anyhow::Result;
use clickhouse::Client;
use tokio::time::{sleep, Duration};

use crate::db::schema::HOLDERS_SQL;

pub async fn connect_to_clickhouse(url: &str, database: &str, max_retries: u32) -> Result<Client> {
    let client = Client::default().with_url(url).with_database(database);
    let max_retries = max_retries.max(1);

    for attempt in 1..=max_retries {
        match client.query("SELECT 1").execute().await {
            Ok(_) => {
                tracing::info!("Connected to ClickHouse at {}", url);
                return Ok(client);
            }
            Err(e) if attempt == max_retries => {
                return Err(anyhow::anyhow!(
                    "Failed to connect to ClickHouse after {} attempts: {}",
                    max_retries,
                    e
                ));
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to connect to ClickHouse (attempt {}/{}): {}",
                    attempt,
                    max_retries,
                    e
                );
                sleep(Duration::from_secs(2)).await;
            }
        }
    }
    Err(anyhow::anyhow!("No connection attempt made to {}", url))
}

/// Creates the holder table if it does not exist yet; existing rows are kept.
pub async fn init_database(client: &Client) -> Result<()> {
    tracing::info!("Initializing database tables...");
    client.query(HOLDERS_SQL).execute().await?;
    Ok(())
}
