pub mod address;
pub mod config;
pub mod db;
pub mod ingest;
pub mod models;
pub mod report;
pub mod state;
pub mod tonapi;

#[cfg(test)]
pub mod tests;

// Re-export specific items for convenience if desired
pub use address::codec::{detect, from_friendly, to_friendly, to_raw, AddressError};
pub use address::crc::crc16_checksum;
pub use ingest::{run_pass, PassError, PassSummary};
pub use models::{Holder, HolderRecord, Jetton, Snapshot};
pub use state::AppState;
pub use tonapi::client::TonapiClient;
