use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::models::{BalanceSums, HolderRecord};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    ClickHouse(#[from] clickhouse::error::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid holder data: {0}")]
    InvalidData(String),
}

/// Read access to the ranked holder table.
///
/// Every method is a pure read; the table never changes while a store handle
/// is serving requests.
#[async_trait]
pub trait HolderStore: Send + Sync {
    async fn get_by_address(&self, address: &str) -> Result<Option<HolderRecord>, StoreError>;

    /// Rows in ascending rank order, skipping `offset` rows.
    async fn get_page(&self, limit: u64, offset: u64) -> Result<Vec<HolderRecord>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;

    /// Rows with `from_rank <= rank <= to_rank`, ascending.
    async fn get_range(&self, from_rank: u64, to_rank: u64)
        -> Result<Vec<HolderRecord>, StoreError>;

    /// Rows with `rank <= n`, ascending.
    async fn get_top_n(&self, n: u64) -> Result<Vec<HolderRecord>, StoreError>;

    /// Column sums over `rank <= max_rank`, or over the whole table for `None`.
    async fn sum_balances(&self, max_rank: Option<u64>) -> Result<BalanceSums, StoreError>;

    /// Summed `total_balance` for each `rank <= k` in `max_ranks`, in order.
    async fn cohort_totals(&self, max_ranks: &[u64]) -> Result<Vec<f64>, StoreError> {
        let mut totals = Vec::with_capacity(max_ranks.len());
        for &max_rank in max_ranks {
            totals.push(self.sum_balances(Some(max_rank)).await?.total);
        }
        Ok(totals)
    }
}

/// Checks rank-sorted rows before they are served or imported: ranks start at
/// 1 and are unique, addresses are non-empty and unique. Rank gaps are only
/// logged.
pub fn validate_holders(rows: &[HolderRecord]) -> Result<(), StoreError> {
    let mut addresses = HashSet::with_capacity(rows.len());
    let mut previous_rank = 0;
    let mut gaps = 0usize;

    for row in rows {
        if row.rank == 0 {
            return Err(StoreError::InvalidData(format!(
                "holder {} has rank 0",
                row.address
            )));
        }
        if row.address.is_empty() {
            return Err(StoreError::InvalidData(format!(
                "rank {} has an empty address",
                row.rank
            )));
        }
        if row.rank <= previous_rank {
            return Err(StoreError::InvalidData(format!(
                "duplicate or unsorted rank {}",
                row.rank
            )));
        }
        if row.rank != previous_rank + 1 {
            gaps += 1;
        }
        previous_rank = row.rank;

        if !addresses.insert(row.address.as_str()) {
            return Err(StoreError::InvalidData(format!(
                "duplicate address {}",
                row.address
            )));
        }
    }

    if gaps > 0 {
        tracing::warn!("Holder ranks are not contiguous ({} gaps)", gaps);
    }
    Ok(())
}
