//! TON address codec.
//!
//! Converts between the raw textual form `"<workchain>:<64 lowercase hex>"`
//! and the friendly form: base64/base64url of a 36-byte frame laid out as
//! tag byte, workchain byte, 32-byte account id, 2-byte CRC. The tag's low
//! seven bits select bounceable (0x11) or non-bounceable (0x51); the top
//! bit marks a test-only network address.

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;
use serde::Serialize;
use thiserror::Error;

use crate::address::crc::crc16_checksum;

const BOUNCEABLE_TAG: u8 = 0x11;
const NON_BOUNCEABLE_TAG: u8 = 0x51;
const TEST_ONLY_FLAG: u8 = 0x80;

/// Frame length: tag + workchain + 32-byte account id + 2-byte checksum.
const FRAME_LEN: usize = 36;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("address contains characters outside the base64 alphabets")]
    InvalidCharset,

    #[error("friendly address must decode to 36 bytes, got {0}")]
    InvalidLength(usize),

    #[error("address checksum mismatch")]
    ChecksumMismatch,

    #[error("unknown address tag {0:#04x}")]
    UnknownTag(u8),

    #[error("workchain {0} cannot be encoded in a friendly address")]
    WorkchainOutOfRange(i32),

    #[error("malformed raw address: {0}")]
    MalformedRaw(String),
}

/// Standard and URL-safe renderings of one tag choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendlyForms {
    pub b64: String,
    pub b64url: String,
}

/// Every rendering of one account, keyed by its canonical raw form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountForms {
    pub raw_form: String,
    pub bounceable: FriendlyForms,
    pub non_bounceable: FriendlyForms,
    pub test_only: bool,
}

/// Outcome of decoding a single friendly string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFriendly {
    pub raw_form: String,
    pub bounceable: bool,
    pub test_only: bool,
}

/// Canonical raw form of a (workchain, account id) pair.
pub fn to_raw(workchain: i32, account_id: &[u8; 32]) -> String {
    format!("{}:{}", workchain, hex::encode(account_id))
}

/// All four friendly renderings of a raw-form address.
pub fn to_friendly(raw_form: &str, test_only: bool) -> Result<AccountForms, AddressError> {
    let (workchain, account_id) = parse_raw(raw_form)?;
    let workchain_byte = encode_workchain(workchain)?;

    let test_flag = if test_only { TEST_ONLY_FLAG } else { 0 };
    Ok(AccountForms {
        raw_form: to_raw(workchain, &account_id),
        bounceable: render(BOUNCEABLE_TAG | test_flag, workchain_byte, &account_id),
        non_bounceable: render(NON_BOUNCEABLE_TAG | test_flag, workchain_byte, &account_id),
        test_only,
    })
}

/// Decode one friendly string back to its raw form.
///
/// Every character must belong to either the standard or the URL-safe
/// base64 alphabet; mixed or foreign characters are rejected outright.
/// The trailing two bytes must equal the checksum of the leading 34.
pub fn from_friendly(text: &str) -> Result<DecodedFriendly, AddressError> {
    let bytes = if in_alphabet(text, b'+', b'/') {
        STANDARD.decode(text).map_err(|_| AddressError::InvalidCharset)?
    } else if in_alphabet(text, b'-', b'_') {
        URL_SAFE.decode(text).map_err(|_| AddressError::InvalidCharset)?
    } else {
        return Err(AddressError::InvalidCharset);
    };
    if bytes.len() != FRAME_LEN {
        return Err(AddressError::InvalidLength(bytes.len()));
    }
    if crc16_checksum(&bytes[..FRAME_LEN - 2]) != bytes[FRAME_LEN - 2..] {
        return Err(AddressError::ChecksumMismatch);
    }

    let tag = bytes[0];
    let test_only = tag & TEST_ONLY_FLAG != 0;
    let bounceable = match tag & !TEST_ONLY_FLAG {
        BOUNCEABLE_TAG => true,
        NON_BOUNCEABLE_TAG => false,
        other => return Err(AddressError::UnknownTag(other)),
    };

    let workchain = decode_workchain(bytes[1]);
    let mut account_id = [0u8; 32];
    account_id.copy_from_slice(&bytes[2..FRAME_LEN - 2]);

    Ok(DecodedFriendly {
        raw_form: to_raw(workchain, &account_id),
        bounceable,
        test_only,
    })
}

/// Interpret an address in whatever form it arrives.
///
/// Dispatch order is fixed: bare hex is a masterchain account id, then
/// `workchain:hex` is an explicit raw form, then the friendly decoding is
/// attempted. A value that is valid hex never reaches the friendly path.
pub fn detect(input: &str) -> Result<AccountForms, AddressError> {
    if is_hex(input) {
        return to_friendly(&format!("-1:{}", input), false);
    }
    if let Some((workchain, account)) = input.split_once(':') {
        if workchain.parse::<i32>().is_ok() && is_hex(account) {
            return to_friendly(input, false);
        }
    }
    let decoded = from_friendly(input)?;
    to_friendly(&decoded.raw_form, decoded.test_only)
}

fn render(tag: u8, workchain_byte: u8, account_id: &[u8; 32]) -> FriendlyForms {
    let mut frame = Vec::with_capacity(FRAME_LEN);
    frame.push(tag);
    frame.push(workchain_byte);
    frame.extend_from_slice(account_id);
    let crc = crc16_checksum(&frame);
    frame.extend_from_slice(&crc);
    FriendlyForms {
        b64: STANDARD.encode(&frame),
        b64url: URL_SAFE.encode(&frame),
    }
}

// Workchain 255 is rejected: its byte form would collide with -1 and the
// round trip could not be preserved.
fn encode_workchain(workchain: i32) -> Result<u8, AddressError> {
    match workchain {
        -1 => Ok(0xFF),
        0..=254 => Ok(workchain as u8),
        _ => Err(AddressError::WorkchainOutOfRange(workchain)),
    }
}

fn decode_workchain(byte: u8) -> i32 {
    if byte == 0xFF {
        -1
    } else {
        byte as i32
    }
}

fn parse_raw(raw_form: &str) -> Result<(i32, [u8; 32]), AddressError> {
    let malformed = || AddressError::MalformedRaw(raw_form.to_string());

    let (workchain, account) = raw_form.split_once(':').ok_or_else(malformed)?;
    let workchain: i32 = workchain.parse().map_err(|_| malformed())?;
    if !is_hex(account) {
        return Err(malformed());
    }

    let mut padded = String::with_capacity(64);
    for _ in account.len()..64 {
        padded.push('0');
    }
    padded.push_str(&account.to_ascii_lowercase());

    let bytes = hex::decode(&padded).map_err(|_| malformed())?;
    let mut account_id = [0u8; 32];
    account_id.copy_from_slice(&bytes);
    Ok((workchain, account_id))
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.len() <= 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

fn in_alphabet(s: &str, extra_a: u8, extra_b: u8) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == extra_a || b == extra_b)
}
