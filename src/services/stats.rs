use crate::db::store::{HolderStore, StoreError};
use crate::types::models::{CohortShare, Distribution, HolderStats};

/// Fixed-size cohort: ranks 1 through 100.
pub const TOP_HOLDERS_COHORT: u64 = 100;

/// Fraction-based cohorts, sized against the current holder count.
pub const PERCENTILE_COHORTS: [f64; 3] = [0.01, 0.10, 0.20];

/// Number of ranks in the top `fraction` of `total_holders`, rounded up.
pub fn cohort_size(total_holders: u64, fraction: f64) -> u64 {
    (total_holders as f64 * fraction).ceil() as u64
}

/// `balance` as a percentage of `overall`; `None` when `overall` is zero.
pub fn percentage_of(balance: f64, overall: f64) -> Option<f64> {
    if overall == 0.0 {
        None
    } else {
        Some(balance / overall * 100.0)
    }
}

/// Computes holder count, balance sums and concentration for the top 100,
/// top 1%, top 10% and top 20% of holders.
pub async fn compute_stats(store: &dyn HolderStore) -> Result<HolderStats, StoreError> {
    let (total_holders, balances) = futures::try_join!(store.count(), store.sum_balances(None))?;

    // Cohort sizes depend on the count read above.
    let mut cohorts = vec![TOP_HOLDERS_COHORT];
    cohorts.extend(
        PERCENTILE_COHORTS
            .iter()
            .map(|&fraction| cohort_size(total_holders, fraction)),
    );
    let sums = store.cohort_totals(&cohorts).await?;
    if sums.len() != cohorts.len() {
        return Err(StoreError::InvalidData(format!(
            "expected {} cohort sums, got {}",
            cohorts.len(),
            sums.len()
        )));
    }

    let share = |i: usize| CohortShare {
        balance: sums[i],
        percentage: percentage_of(sums[i], balances.total),
    };
    let distribution = Distribution {
        top_100_holders: share(0),
        top_1_percent: share(1),
        top_10_percent: share(2),
        top_20_percent: share(3),
    };

    tracing::debug!(
        "Stats: {} holders, total balance {:.2}, cohorts {:?}",
        total_holders,
        balances.total,
        cohorts
    );

    Ok(HolderStats {
        total_holders,
        balances,
        distribution,
    })
}
