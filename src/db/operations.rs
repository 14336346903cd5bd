use anyhow::Result;
use clickhouse::Client;

use crate::db::schema::{DROP_HOLDERS_SQL, HOLDERS_SQL, HOLDERS_TABLE};
use crate::types::models::HolderRecord;

/// Drops the holder table and creates it empty.
pub async fn recreate_holders_table(client: &Client) -> Result<()> {
    tracing::info!("Recreating {} table...", HOLDERS_TABLE);
    client.query(DROP_HOLDERS_SQL).execute().await?;
    client.query(HOLDERS_SQL).execute().await?;
    Ok(())
}

/// Writes holders in fixed-size batches, one INSERT per batch.
///
/// Returns the number of rows written. The first failing batch aborts the
/// import.
pub async fn insert_holders(
    client: &Client,
    holders: &[HolderRecord],
    batch_size: usize,
) -> Result<usize> {
    let batch_size = batch_size.max(1);
    let mut written = 0;

    for (batch_number, batch) in holders.chunks(batch_size).enumerate() {
        let mut insert = client.insert(HOLDERS_TABLE)?;
        for holder in batch {
            insert.write(holder).await?;
        }
        insert.end().await.map_err(|e| {
            anyhow::anyhow!("Failed to import batch {}: {}", batch_number + 1, e)
        })?;

        written += batch.len();
        tracing::info!(
            "Batch {} imported ({} rows, {}/{} total)",
            batch_number + 1,
            batch.len(),
            written,
            holders.len()
        );
    }

    Ok(written)
}
