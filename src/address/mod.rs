pub mod codec;
pub mod crc;

// Re-exports for convenience
pub use codec::{detect, from_friendly, to_friendly, to_raw, AccountForms, AddressError, DecodedFriendly, FriendlyForms};
pub use crc::crc16_checksum;
