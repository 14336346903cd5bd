use std::collections::HashMap;

use async_trait::async_trait;

use crate::db::store::{validate_holders, HolderStore, StoreError};
use crate::types::models::{BalanceSums, HolderRecord};

/// Running balance sums over rank-sorted rows.
///
/// Entry `i` holds the sums of the first `i` rows, so entry 0 is all zeros and
/// the last entry is the whole-table total.
#[derive(Debug, Clone, Default)]
pub struct PrefixSumTable {
    sums: Vec<BalanceSums>,
}

impl PrefixSumTable {
    pub fn build(rows: &[HolderRecord]) -> Self {
        let mut sums = Vec::with_capacity(rows.len() + 1);
        let mut running = BalanceSums::default();
        sums.push(running);
        for row in rows {
            running.mito += row.mito_balance;
            running.wmito += row.wmito_balance;
            running.total += row.total_balance;
            sums.push(running);
        }
        Self { sums }
    }

    /// Sums of the first `len` rows; `len` past the end is the full total.
    pub fn through(&self, len: usize) -> BalanceSums {
        let last = self.sums.len().saturating_sub(1);
        self.sums.get(len.min(last)).copied().unwrap_or_default()
    }
}

/// Immutable in-memory holder table, sorted by rank.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Vec<HolderRecord>,
    by_address: HashMap<String, usize>,
    prefix: PrefixSumTable,
}

impl MemoryStore {
    pub fn new(mut rows: Vec<HolderRecord>) -> Result<Self, StoreError> {
        rows.sort_by_key(|row| row.rank);
        validate_holders(&rows)?;
        tracing::info!("Loaded {} holders into memory", rows.len());

        let by_address = rows
            .iter()
            .enumerate()
            .map(|(position, row)| (row.address.clone(), position))
            .collect();
        let prefix = PrefixSumTable::build(&rows);
        Ok(Self {
            rows,
            by_address,
            prefix,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows with `rank <= max_rank`.
    fn rows_through(&self, max_rank: u64) -> usize {
        self.rows.partition_point(|row| row.rank <= max_rank)
    }
}

#[async_trait]
impl HolderStore for MemoryStore {
    async fn get_by_address(&self, address: &str) -> Result<Option<HolderRecord>, StoreError> {
        Ok(self
            .by_address
            .get(address)
            .map(|&position| self.rows[position].clone()))
    }

    async fn get_page(&self, limit: u64, offset: u64) -> Result<Vec<HolderRecord>, StoreError> {
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self.rows.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.rows.len() as u64)
    }

    async fn get_range(
        &self,
        from_rank: u64,
        to_rank: u64,
    ) -> Result<Vec<HolderRecord>, StoreError> {
        if to_rank < from_rank {
            return Ok(Vec::new());
        }
        let start = self.rows.partition_point(|row| row.rank < from_rank);
        let end = self.rows_through(to_rank);
        Ok(self.rows[start..end].to_vec())
    }

    async fn get_top_n(&self, n: u64) -> Result<Vec<HolderRecord>, StoreError> {
        Ok(self.rows[..self.rows_through(n)].to_vec())
    }

    async fn sum_balances(&self, max_rank: Option<u64>) -> Result<BalanceSums, StoreError> {
        let len = match max_rank {
            Some(max_rank) => self.rows_through(max_rank),
            None => self.rows.len(),
        };
        Ok(self.prefix.through(len))
    }

    async fn cohort_totals(&self, max_ranks: &[u64]) -> Result<Vec<f64>, StoreError> {
        Ok(max_ranks
            .iter()
            .map(|&max_rank| self.prefix.through(self.rows_through(max_rank)).total)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holder(rank: u64, address: &str, mito: f64, wmito: f64) -> HolderRecord {
        HolderRecord {
            rank,
            address: address.to_string(),
            mito_balance: mito,
            wmito_balance: wmito,
            total_balance: mito + wmito,
        }
    }

    fn sample_store(n: u64) -> MemoryStore {
        let rows = (1..=n)
            .map(|rank| holder(rank, &format!("0x{rank:04}"), (n - rank + 1) as f64, 1.0))
            .collect();
        MemoryStore::new(rows).unwrap()
    }

    #[test]
    fn prefix_sums_accumulate_every_column() {
        let rows = vec![holder(1, "0xA", 3.0, 1.0), holder(2, "0xB", 2.0, 0.5)];
        let table = PrefixSumTable::build(&rows);

        assert_eq!(table.through(0), BalanceSums::default());
        assert_eq!(
            table.through(1),
            BalanceSums {
                mito: 3.0,
                wmito: 1.0,
                total: 4.0
            }
        );
        assert_eq!(table.through(2).total, 6.5);
        assert_eq!(table.through(99).total, 6.5);
    }

    #[test]
    fn rejects_duplicate_ranks_and_addresses() {
        let dup_rank =
            MemoryStore::new(vec![holder(1, "0xA", 1.0, 0.0), holder(1, "0xB", 1.0, 0.0)]);
        assert!(matches!(dup_rank, Err(StoreError::InvalidData(_))));

        let dup_address =
            MemoryStore::new(vec![holder(1, "0xA", 1.0, 0.0), holder(2, "0xA", 1.0, 0.0)]);
        assert!(matches!(dup_address, Err(StoreError::InvalidData(_))));

        let zero_rank = MemoryStore::new(vec![holder(0, "0xA", 1.0, 0.0)]);
        assert!(matches!(zero_rank, Err(StoreError::InvalidData(_))));
    }

    #[test]
    fn sorts_unordered_input_by_rank() {
        let store = MemoryStore::new(vec![
            holder(3, "0xC", 1.0, 0.0),
            holder(1, "0xA", 3.0, 0.0),
            holder(2, "0xB", 2.0, 0.0),
        ])
        .unwrap();
        let ranks: Vec<u64> = store.rows.iter().map(|row| row.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn address_lookup_matches_last_of_top_n() {
        let store = sample_store(25);
        for rank in 1..=25u64 {
            let top = store.get_top_n(rank).await.unwrap();
            let last = top.last().unwrap();
            let found = store.get_by_address(&last.address).await.unwrap().unwrap();
            assert_eq!(&found, last);
            assert_eq!(found.rank, rank);
        }
        assert!(store.get_by_address("0xZZZ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn pages_reconstruct_full_sequence() {
        let store = sample_store(23);
        let total = store.count().await.unwrap();
        for limit in [1u64, 5, 7, 23, 50] {
            let pages = total.div_ceil(limit);
            let mut ranks = Vec::new();
            for page in 1..=pages {
                let rows = store.get_page(limit, (page - 1) * limit).await.unwrap();
                if page == pages {
                    assert_eq!(rows.len() as u64, total - limit * (pages - 1));
                }
                ranks.extend(rows.into_iter().map(|row| row.rank));
            }
            assert_eq!(ranks, (1..=total).collect::<Vec<_>>());
        }
    }

    #[tokio::test]
    async fn range_is_inclusive_and_clipped_to_table() {
        let store = sample_store(10);
        assert_eq!(store.get_range(2, 5).await.unwrap().len(), 4);
        assert_eq!(store.get_range(7, 7).await.unwrap()[0].rank, 7);
        assert_eq!(store.get_range(8, 20).await.unwrap().len(), 3);
        assert!(store.get_range(11, 20).await.unwrap().is_empty());
        assert!(store.get_range(5, 4).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn full_sum_equals_sum_over_range() {
        let store = sample_store(40);
        let full = store.sum_balances(None).await.unwrap();
        let rows = store.get_range(1, 40).await.unwrap();
        let total: f64 = rows.iter().map(|row| row.total_balance).sum();
        let mito: f64 = rows.iter().map(|row| row.mito_balance).sum();
        assert_eq!(full.total, total);
        assert_eq!(full.mito, mito);
        assert_eq!(full.wmito, 40.0);
    }

    #[tokio::test]
    async fn cohort_totals_follow_rank_prefixes() {
        let store = sample_store(4);
        // totals per rank: 5, 4, 3, 2
        let totals = store.cohort_totals(&[0, 1, 2, 100]).await.unwrap();
        assert_eq!(totals, vec![0.0, 5.0, 9.0, 14.0]);
        let restricted = store.sum_balances(Some(2)).await.unwrap();
        assert_eq!(restricted.total, 9.0);
    }

    #[tokio::test]
    async fn reads_tolerate_rank_gaps() {
        let store = MemoryStore::new(vec![
            holder(1, "0xA", 5.0, 0.0),
            holder(2, "0xB", 4.0, 0.0),
            holder(5, "0xC", 1.0, 0.0),
        ])
        .unwrap();
        assert_eq!(store.get_top_n(4).await.unwrap().len(), 2);
        assert_eq!(store.get_range(3, 5).await.unwrap()[0].address, "0xC");
        assert_eq!(store.sum_balances(Some(4)).await.unwrap().total, 9.0);
    }

    #[tokio::test]
    async fn empty_store_reads_are_empty() {
        let store = MemoryStore::default();
        assert!(store.is_empty());
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(store.get_page(50, 0).await.unwrap().is_empty());
        assert_eq!(store.sum_balances(None).await.unwrap(), BalanceSums::default());
        assert_eq!(store.cohort_totals(&[100]).await.unwrap(), vec![0.0]);
    }
}
