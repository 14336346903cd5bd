use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::db::store::StoreError;
use crate::types::models::HolderRecord;

const REQUIRED_COLUMNS: [&str; 5] = [
    "rank",
    "address",
    "mito_balance",
    "wmito_balance",
    "total_balance",
];

/// Positions of the required columns in the CSV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    rank: usize,
    address: usize,
    mito: usize,
    wmito: usize,
    total: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, StoreError> {
        let names: Vec<String> = headers
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();
        let find = |column: &str| names.iter().position(|name| name == column);

        match (
            find("rank"),
            find("address"),
            find("mito_balance"),
            find("wmito_balance"),
            find("total_balance"),
        ) {
            (Some(rank), Some(address), Some(mito), Some(wmito), Some(total)) => Ok(Self {
                rank,
                address,
                mito,
                wmito,
                total,
            }),
            _ => Err(StoreError::InvalidData(format!(
                "Required columns not found in CSV. Found {:?}, looking for {}",
                names,
                REQUIRED_COLUMNS.join(", ")
            ))),
        }
    }

    fn max(&self) -> usize {
        self.rank
            .max(self.address)
            .max(self.mito)
            .max(self.wmito)
            .max(self.total)
    }
}

pub fn load_holders_from_path(path: &Path) -> Result<Vec<HolderRecord>, StoreError> {
    tracing::info!("Reading holders from {}", path.display());
    let file = File::open(path)?;
    read_holders(file)
}

/// Parses holder rows from CSV.
///
/// Columns are matched by header name. Numbers that fail to parse become 0;
/// rows that are too short or have an empty address are skipped.
pub fn read_holders<R: Read>(reader: R) -> Result<Vec<HolderRecord>, StoreError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(reader.headers()?)?;
    tracing::debug!("CSV column indices: {:?}", columns);

    let mut holders = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record?;
        if record.len() <= columns.max() {
            skipped += 1;
            continue;
        }

        let address = record[columns.address].trim();
        if address.is_empty() {
            skipped += 1;
            continue;
        }

        holders.push(HolderRecord {
            rank: parse_rank(&record[columns.rank]),
            address: address.to_string(),
            mito_balance: parse_balance(&record[columns.mito]),
            wmito_balance: parse_balance(&record[columns.wmito]),
            total_balance: parse_balance(&record[columns.total]),
        });
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} CSV rows with missing columns or address", skipped);
    }
    tracing::info!("Processed {} rows from CSV", holders.len());
    Ok(holders)
}

fn parse_rank(value: &str) -> u64 {
    value.trim().parse().unwrap_or(0)
}

fn parse_balance(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
