pub mod client;
pub mod models;

// Re-exports for convenience
pub use client::{ClientError, TonapiClient};
pub use models::extract_meta;
