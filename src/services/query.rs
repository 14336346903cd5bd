use crate::api::error::ApiError;
use crate::api::validation::{resolve_top_count, validate_range, PageWindow};
use crate::db::store::HolderStore;
use crate::types::models::{HolderRecord, Pagination, RankRange};

pub async fn wallet(store: &dyn HolderStore, address: &str) -> Result<HolderRecord, ApiError> {
    tracing::debug!("Looking up wallet {}", address);
    store
        .get_by_address(address)
        .await?
        .ok_or_else(|| ApiError::NotFound("Wallet not found".to_string()))
}

pub async fn holders_page(
    store: &dyn HolderStore,
    page: Option<&str>,
    limit: Option<&str>,
) -> Result<(Vec<HolderRecord>, Pagination), ApiError> {
    let window = PageWindow::resolve(page, limit);
    let holders = store.get_page(window.limit, window.offset()).await?;
    let total = store.count().await?;

    Ok((
        holders,
        Pagination {
            page: window.page,
            limit: window.limit,
            total,
            pages: window.pages(total),
        },
    ))
}

pub async fn rank_range(
    store: &dyn HolderStore,
    from: &str,
    to: &str,
) -> Result<(Vec<HolderRecord>, RankRange), ApiError> {
    let (from, to) = validate_range(from, to)?;
    let holders = store.get_range(from, to).await?;
    let range = RankRange {
        from,
        to,
        count: holders.len(),
    };
    Ok((holders, range))
}

pub async fn top_holders(
    store: &dyn HolderStore,
    count: &str,
) -> Result<Vec<HolderRecord>, ApiError> {
    let count = resolve_top_count(count)?;
    Ok(store.get_top_n(count).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;

    fn store() -> MemoryStore {
        let rows = [("0xA", 300.0), ("0xB", 200.0), ("0xC", 100.0)]
            .iter()
            .enumerate()
            .map(|(i, (address, total))| HolderRecord {
                rank: i as u64 + 1,
                address: address.to_string(),
                mito_balance: *total,
                wmito_balance: 0.0,
                total_balance: *total,
            })
            .collect();
        MemoryStore::new(rows).unwrap()
    }

    #[tokio::test]
    async fn wallet_lookup_is_exact_match() {
        let store = store();
        assert_eq!(wallet(&store, "0xB").await.unwrap().rank, 2);
        assert!(matches!(
            wallet(&store, "0xb").await,
            Err(ApiError::NotFound(msg)) if msg == "Wallet not found"
        ));
    }

    #[tokio::test]
    async fn page_metadata_reports_totals() {
        let store = store();
        let (rows, pagination) = holders_page(&store, Some("2"), Some("2")).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].address, "0xC");
        assert_eq!(
            pagination,
            Pagination {
                page: 2,
                limit: 2,
                total: 3,
                pages: 2
            }
        );

        let (rows, pagination) = holders_page(&store, Some("9"), None).await.unwrap();
        assert!(rows.is_empty());
        assert_eq!(pagination.pages, 1);
    }

    #[tokio::test]
    async fn range_counts_actual_rows() {
        let store = store();
        let (rows, range) = rank_range(&store, "2", "10").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            range,
            RankRange {
                from: 2,
                to: 10,
                count: 2
            }
        );
        assert!(rank_range(&store, "5", "1").await.is_err());
    }

    #[tokio::test]
    async fn top_holders_default_and_reject() {
        let store = store();
        assert_eq!(top_holders(&store, "2").await.unwrap().len(), 2);
        assert_eq!(top_holders(&store, "many").await.unwrap().len(), 3);
        assert!(matches!(
            top_holders(&store, "-1").await,
            Err(ApiError::Validation(_))
        ));
    }
}
