use std::{env, net::SocketAddr, path::PathBuf, str::FromStr};

use anyhow::{anyhow, Context, Result};
use dotenv::dotenv;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    ClickHouse,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "clickhouse" => Ok(StoreBackend::ClickHouse),
            other => Err(anyhow!(
                "Unknown store backend '{}', expected 'memory' or 'clickhouse'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub backend: StoreBackend,
    pub csv_path: PathBuf,
    pub rerank: bool,
    pub excluded_addresses: Vec<String>,
    pub clickhouse_url: String,
    pub clickhouse_database: String,
    pub connect_retries: u32,
    pub import_batch_size: usize,
}

impl Config {
    /// Reads settings from the process environment, after loading `.env`.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let listen_addr = var("HOLDERS_LISTEN_ADDR", "0.0.0.0:8000")
            .parse()
            .context("Invalid HOLDERS_LISTEN_ADDR")?;
        let backend = var("HOLDERS_BACKEND", "memory").parse()?;
        let rerank = parse_bool(&var("HOLDERS_RERANK", "false"))
            .context("Invalid HOLDERS_RERANK")?;
        let excluded_addresses = var("HOLDERS_EXCLUDED_ADDRESSES", "")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let connect_retries = var("CLICKHOUSE_CONNECT_RETRIES", "5")
            .parse()
            .context("Invalid CLICKHOUSE_CONNECT_RETRIES")?;
        let import_batch_size: usize = var("IMPORT_BATCH_SIZE", "10000")
            .parse()
            .context("Invalid IMPORT_BATCH_SIZE")?;
        if import_batch_size == 0 {
            return Err(anyhow!("IMPORT_BATCH_SIZE must be at least 1"));
        }

        Ok(Self {
            listen_addr,
            backend,
            csv_path: PathBuf::from(var("HOLDERS_CSV_PATH", "reranked_holders.csv")),
            rerank,
            excluded_addresses,
            clickhouse_url: var("CLICKHOUSE_URL", "http://localhost:8123"),
            clickhouse_database: var("CLICKHOUSE_DATABASE", "default"),
            connect_retries,
            import_batch_size,
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("'{}' is not a boolean", other)),
    }
}
