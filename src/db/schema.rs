pub const HOLDERS_TABLE: &str = "holders";

pub const HOLDERS_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS holders (
    rank UInt64,
    address String,
    mito_balance Float64,
    wmito_balance Float64,
    total_balance Float64,
    INDEX idx_address address TYPE bloom_filter GRANULARITY 1,
    INDEX idx_total_balance total_balance TYPE minmax GRANULARITY 1
) ENGINE = MergeTree()
ORDER BY rank
"#;

pub const DROP_HOLDERS_SQL: &str = "DROP TABLE IF EXISTS holders";
