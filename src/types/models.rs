use clickhouse::Row;
use serde::{Deserialize, Serialize};

/// One row of the `holders` table.
#[derive(Debug, Clone, PartialEq, Row, Serialize, Deserialize)]
pub struct HolderRecord {
    pub rank: u64,
    pub address: String,
    pub mito_balance: f64,
    pub wmito_balance: f64,
    pub total_balance: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Row, Serialize, Deserialize)]
pub struct BalanceSums {
    pub mito: f64,
    pub wmito: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankRange {
    pub from: u64,
    pub to: u64,
    pub count: usize,
}

/// Share of the overall balance held by a prefix of ranks.
///
/// `percentage` is `None` when the overall total balance is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CohortShare {
    pub balance: f64,
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distribution {
    #[serde(rename = "top100Holders")]
    pub top_100_holders: CohortShare,
    #[serde(rename = "top1percent")]
    pub top_1_percent: CohortShare,
    #[serde(rename = "top10percent")]
    pub top_10_percent: CohortShare,
    #[serde(rename = "top20percent")]
    pub top_20_percent: CohortShare,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderStats {
    pub total_holders: u64,
    pub balances: BalanceSums,
    pub distribution: Distribution,
}
