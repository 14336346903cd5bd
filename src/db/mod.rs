pub mod init;
pub mod memory;
pub mod operations;
pub mod queries;
pub mod schema;
pub mod store;

use std::sync::Arc;

use anyhow::Result;

use crate::config::{Config, StoreBackend};
use crate::services::loader::load_holders_from_path;
use crate::services::ranking::{rerank, ExcludedAccounts};
use crate::types::models::HolderRecord;

pub use memory::{MemoryStore, PrefixSumTable};
pub use queries::ClickHouseStore;
pub use store::{HolderStore, StoreError};

/// Reads the configured CSV, reranking it first when configured to.
pub fn load_configured_holders(config: &Config) -> Result<Vec<HolderRecord>> {
    let holders = load_holders_from_path(&config.csv_path)?;
    if config.rerank {
        let excluded = ExcludedAccounts::new(config.excluded_addresses.iter().cloned());
        return Ok(rerank(holders, &excluded));
    }
    Ok(holders)
}

/// Builds the store handle the server shares across requests.
pub async fn open_store(config: &Config) -> Result<Arc<dyn HolderStore>> {
    match config.backend {
        StoreBackend::Memory => {
            let holders = load_configured_holders(config)?;
            Ok(Arc::new(MemoryStore::new(holders)?))
        }
        StoreBackend::ClickHouse => {
            let client = init::connect_to_clickhouse(
                &config.clickhouse_url,
                &config.clickhouse_database,
                config.connect_retries,
            )
            .await?;
            init::init_database(&client).await?;
            Ok(Arc::new(ClickHouseStore::new(client)))
        }
    }
}
