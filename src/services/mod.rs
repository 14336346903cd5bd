pub mod loader;
pub mod query;
pub mod ranking;
pub mod stats;
