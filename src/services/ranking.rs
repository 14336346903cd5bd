use std::cmp::Ordering;
use std::collections::HashSet;

use rayon::prelude::*;

use crate::types::models::HolderRecord;

/// Wallets left out of the ranking, e.g. known whales and exchange wallets.
#[derive(Debug, Clone, Default)]
pub struct ExcludedAccounts {
    addresses: HashSet<String>,
}

impl ExcludedAccounts {
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addresses: addresses.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, address: &str) -> bool {
        self.addresses.contains(address)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// Descending total balance, then ascending address.
fn rank_order(a: &HolderRecord, b: &HolderRecord) -> Ordering {
    b.total_balance
        .total_cmp(&a.total_balance)
        .then_with(|| a.address.cmp(&b.address))
}

/// Drops excluded wallets and assigns ranks `1..=N` by descending total
/// balance. Equal balances are ordered by address so the result does not
/// depend on input order.
pub fn rerank(holders: Vec<HolderRecord>, excluded: &ExcludedAccounts) -> Vec<HolderRecord> {
    let before = holders.len();
    let mut kept: Vec<HolderRecord> = holders
        .into_par_iter()
        .filter(|holder| !excluded.contains(&holder.address))
        .collect();

    if kept.len() < before {
        tracing::info!(
            "Excluded {} of {} holders ({} addresses on the exclusion list)",
            before - kept.len(),
            before,
            excluded.len()
        );
    }

    kept.par_sort_unstable_by(rank_order);
    for (position, holder) in kept.iter_mut().enumerate() {
        holder.rank = position as u64 + 1;
    }
    kept
}
