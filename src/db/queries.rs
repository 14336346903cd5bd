use async_trait::async_trait;
use clickhouse::{Client, Row};
use serde::Deserialize;

use crate::db::store::{HolderStore, StoreError};
use crate::types::models::{BalanceSums, HolderRecord};

const HOLDER_COLUMNS: &str = "rank, address, mito_balance, wmito_balance, total_balance";

#[derive(Debug, Row, Deserialize)]
struct CohortRow {
    totals: Vec<f64>,
}

/// Holder store backed by the ClickHouse `holders` table.
#[derive(Clone)]
pub struct ClickHouseStore {
    client: Client,
}

impl ClickHouseStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HolderStore for ClickHouseStore {
    async fn get_by_address(&self, address: &str) -> Result<Option<HolderRecord>, StoreError> {
        let holder = self
            .client
            .query(&format!(
                "SELECT {HOLDER_COLUMNS} FROM holders WHERE address = ? LIMIT 1"
            ))
            .bind(address)
            .fetch_one::<HolderRecord>()
            .await;

        match holder {
            Ok(holder) => Ok(Some(holder)),
            Err(clickhouse::error::Error::RowNotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_page(&self, limit: u64, offset: u64) -> Result<Vec<HolderRecord>, StoreError> {
        tracing::debug!("Fetching holders page: limit={}, offset={}", limit, offset);
        let rows = self
            .client
            .query(&format!(
                "SELECT {HOLDER_COLUMNS} FROM holders ORDER BY rank ASC LIMIT ? OFFSET ?"
            ))
            .bind(limit)
            .bind(offset)
            .fetch_all::<HolderRecord>()
            .await?;
        Ok(rows)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count = self
            .client
            .query("SELECT count() FROM holders")
            .fetch_one::<u64>()
            .await?;
        Ok(count)
    }

    async fn get_range(
        &self,
        from_rank: u64,
        to_rank: u64,
    ) -> Result<Vec<HolderRecord>, StoreError> {
        let rows = self
            .client
            .query(&format!(
                "SELECT {HOLDER_COLUMNS} FROM holders
                 WHERE rank >= ? AND rank <= ?
                 ORDER BY rank ASC"
            ))
            .bind(from_rank)
            .bind(to_rank)
            .fetch_all::<HolderRecord>()
            .await?;
        Ok(rows)
    }

    async fn get_top_n(&self, n: u64) -> Result<Vec<HolderRecord>, StoreError> {
        let rows = self
            .client
            .query(&format!(
                "SELECT {HOLDER_COLUMNS} FROM holders WHERE rank <= ? ORDER BY rank ASC"
            ))
            .bind(n)
            .fetch_all::<HolderRecord>()
            .await?;
        Ok(rows)
    }

    async fn sum_balances(&self, max_rank: Option<u64>) -> Result<BalanceSums, StoreError> {
        let select = "SELECT
                toFloat64(sum(mito_balance)) AS mito,
                toFloat64(sum(wmito_balance)) AS wmito,
                toFloat64(sum(total_balance)) AS total
            FROM holders";

        let query = match max_rank {
            Some(max_rank) => self
                .client
                .query(&format!("{select} WHERE rank <= ?"))
                .bind(max_rank),
            None => self.client.query(select),
        };
        Ok(query.fetch_one::<BalanceSums>().await?)
    }

    async fn cohort_totals(&self, max_ranks: &[u64]) -> Result<Vec<f64>, StoreError> {
        if max_ranks.is_empty() {
            return Ok(Vec::new());
        }

        // One scan: a sumIf per cohort, collected into a single array column.
        let columns =
            vec!["toFloat64(sumIf(total_balance, rank <= ?))"; max_ranks.len()].join(", ");
        let mut query = self
            .client
            .query(&format!("SELECT [{columns}] AS totals FROM holders"));
        for &max_rank in max_ranks {
            query = query.bind(max_rank);
        }

        let row = query.fetch_one::<CohortRow>().await?;
        tracing::debug!("Cohort totals for {:?}: {:?}", max_ranks, row.totals);
        Ok(row.totals)
    }
}
